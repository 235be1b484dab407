pub mod id;
pub mod list;
pub mod rental;
pub mod reservation;
