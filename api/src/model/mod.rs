pub mod rental;
pub mod reservation;
