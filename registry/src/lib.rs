use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    health::HealthCheckRepositoryImpl, rental::RentalRepositoryImpl,
    reservation::ReservationRepositoryImpl,
};
use kernel::repository::{
    health::HealthCheckRepository, rental::RentalRepository, reservation::ReservationRepository,
};
use shared::config::{AppConfig, PaginationConfig};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    rental_repository: Arc<dyn RentalRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    pagination: PaginationConfig,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let rental_repository = Arc::new(RentalRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            rental_repository,
            reservation_repository,
            pagination: app_config.pagination,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn rental_repository(&self) -> Arc<dyn RentalRepository> {
        self.rental_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn pagination(&self) -> PaginationConfig {
        self.pagination
    }
}
