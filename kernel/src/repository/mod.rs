pub mod health;
pub mod rental;
pub mod reservation;
