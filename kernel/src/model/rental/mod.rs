use crate::model::id::RentalId;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    pub id: RentalId,
    pub name: String,
}
