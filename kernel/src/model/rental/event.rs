use crate::model::id::RentalId;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateRental {
    pub name: String,
}

#[derive(Debug, new)]
pub struct DeleteRental {
    pub rental_id: RentalId,
}
