use crate::model::id::{RentalId, ReservationId};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult};

pub mod event;
pub mod previous;

/// Closed date interval `[checkin, checkout]`; a same-day stay is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    checkin: NaiveDate,
    checkout: NaiveDate,
}

impl StayPeriod {
    pub fn new(checkin: NaiveDate, checkout: NaiveDate) -> AppResult<Self> {
        if checkout < checkin {
            return Err(AppError::InvalidRange(
                "Checkout date should be equal or after checking date".into(),
            ));
        }
        Ok(Self { checkin, checkout })
    }

    pub fn checkin(&self) -> NaiveDate {
        self.checkin
    }

    pub fn checkout(&self) -> NaiveDate {
        self.checkout
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub rental_id: RentalId,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

// 一覧取得時の型。rental テーブルと JOIN して名前も一緒に持つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalReservation {
    pub id: ReservationId,
    pub rental_id: RentalId,
    pub rental_name: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

/// A listed reservation together with the reservation that precedes it on
/// the same rental, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationEntry {
    pub reservation: RentalReservation,
    pub previous_reservation: Option<ReservationId>,
}
