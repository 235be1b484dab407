use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::rental::{delete_rental, register_rental, show_rental, show_rental_list};

pub fn build_rental_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/rentals/", post(register_rental))
        .route("/rentals/", get(show_rental_list))
        .route("/rentals/:rental_id", get(show_rental))
        .route("/rentals/:rental_id", delete(delete_rental))
}
