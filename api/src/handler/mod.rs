pub mod docs;
pub mod health;
pub mod rental;
pub mod reservation;
