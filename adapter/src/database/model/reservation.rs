use chrono::NaiveDate;
use kernel::model::{
    id::{RentalId, ReservationId},
    reservation::{RentalReservation, Reservation},
};

// reservation テーブル単体の行
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub id: ReservationId,
    pub rental_id: RentalId,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

impl From<ReservationRow> for Reservation {
    fn from(value: ReservationRow) -> Self {
        let ReservationRow {
            id,
            rental_id,
            checkin,
            checkout,
        } = value;
        Reservation {
            id,
            rental_id,
            checkin,
            checkout,
        }
    }
}

// 一覧取得で rental と JOIN した行
#[derive(sqlx::FromRow)]
pub struct RentalReservationRow {
    pub id: ReservationId,
    pub rental_id: RentalId,
    pub rental_name: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

impl From<RentalReservationRow> for RentalReservation {
    fn from(value: RentalReservationRow) -> Self {
        let RentalReservationRow {
            id,
            rental_id,
            rental_name,
            checkin,
            checkout,
        } = value;
        RentalReservation {
            id,
            rental_id,
            rental_name,
            checkin,
            checkout,
        }
    }
}
