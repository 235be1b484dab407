use axum::Router;
use registry::AppRegistry;

pub mod docs;
pub mod health;
pub mod rental;
pub mod reservation;

pub fn routes() -> Router<AppRegistry> {
    Router::new()
        .merge(health::build_health_check_routers())
        .merge(docs::build_docs_routers())
        .merge(rental::build_rental_routers())
        .merge(reservation::build_reservation_routers())
}
