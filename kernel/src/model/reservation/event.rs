use crate::model::{
    id::{RentalId, ReservationId},
    reservation::StayPeriod,
};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateReservation {
    pub rental_id: RentalId,
    pub period: StayPeriod,
}

// PUT による全項目の置き換え
#[derive(Debug, new)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub rental_id: RentalId,
    pub period: StayPeriod,
}

#[derive(Debug, new)]
pub struct DeleteReservation {
    pub reservation_id: ReservationId,
}
