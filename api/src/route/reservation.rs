use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    delete_reservation, register_reservation, show_reservation, show_reservation_list,
    update_reservation,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/reservations/", post(register_reservation))
        .route("/reservations/", get(show_reservation_list))
        .route("/reservations/:reservation_id", get(show_reservation))
        .route("/reservations/:reservation_id", put(update_reservation))
        .route("/reservations/:reservation_id", delete(delete_reservation))
}
