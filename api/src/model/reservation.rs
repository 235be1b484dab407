use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{RentalId, ReservationId},
    list::{Page, PageRequest, INVALID_PAGE},
    reservation::{
        event::{CreateReservation, UpdateReservation},
        Reservation, ReservationEntry, StayPeriod,
    },
};
use serde::{Deserialize, Serialize};
use shared::{
    config::PaginationConfig,
    error::{AppError, AppResult},
};
use utoipa::{IntoParams, ToSchema};

const RESERVATIONS_PATH: &str = "/reservations/";

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[garde(skip)]
    #[schema(value_type = i64)]
    pub rental: RentalId,
    #[garde(skip)]
    pub checkin: NaiveDate,
    #[garde(skip)]
    pub checkout: NaiveDate,
}

// チェックイン・チェックアウトの前後関係はここで検証する
impl TryFrom<CreateReservationRequest> for CreateReservation {
    type Error = AppError;

    fn try_from(value: CreateReservationRequest) -> Result<Self, Self::Error> {
        let CreateReservationRequest {
            rental,
            checkin,
            checkout,
        } = value;
        Ok(CreateReservation::new(
            rental,
            StayPeriod::new(checkin, checkout)?,
        ))
    }
}

// PUT は全項目の置き換えなので、作成時と同じ項目をすべて受け取る
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReservationRequest {
    #[garde(skip)]
    #[schema(value_type = i64)]
    pub rental: RentalId,
    #[garde(skip)]
    pub checkin: NaiveDate,
    #[garde(skip)]
    pub checkout: NaiveDate,
}

#[derive(new)]
pub struct UpdateReservationRequestWithId(ReservationId, UpdateReservationRequest);

impl TryFrom<UpdateReservationRequestWithId> for UpdateReservation {
    type Error = AppError;

    fn try_from(value: UpdateReservationRequestWithId) -> Result<Self, Self::Error> {
        let UpdateReservationRequestWithId(
            reservation_id,
            UpdateReservationRequest {
                rental,
                checkin,
                checkout,
            },
        ) = value;
        Ok(UpdateReservation::new(
            reservation_id,
            rental,
            StayPeriod::new(checkin, checkout)?,
        ))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationResponse {
    #[schema(value_type = i64)]
    pub id: ReservationId,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    #[schema(value_type = i64)]
    pub rental: RentalId,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            id,
            rental_id,
            checkin,
            checkout,
        } = value;
        Self {
            id,
            checkin,
            checkout,
            rental: rental_id,
        }
    }
}

// 値は文字列のまま受け取り、解釈できない場合の扱いを自前で決める
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReservationListQuery {
    /// 1 始まりのページ番号
    #[param(value_type = Option<u64>)]
    pub page: Option<String>,
    /// 1 ページの件数。上限を超えた値は上限に丸める
    #[param(value_type = Option<u64>)]
    pub page_size: Option<String>,
}

impl ReservationListQuery {
    /// A page number that is not a positive integer is an unknown page.
    /// An unusable `page_size` falls back to the default.
    pub fn into_page_request(self, config: &PaginationConfig) -> AppResult<PageRequest> {
        let page = match self.page {
            None => None,
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| AppError::EntityNotFound(INVALID_PAGE.into()))?,
            ),
        };
        let page_size = self
            .page_size
            .and_then(|raw| raw.trim().parse::<u64>().ok());
        Ok(PageRequest::new(page, page_size, config))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationListItemResponse {
    pub rental_name: String,
    #[schema(value_type = i64)]
    pub id: ReservationId,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    /// 同じ物件で直前にチェックアウトする予約の ID
    #[schema(value_type = Option<i64>)]
    pub previous_reservation: Option<ReservationId>,
}

impl From<ReservationEntry> for ReservationListItemResponse {
    fn from(value: ReservationEntry) -> Self {
        let ReservationEntry {
            reservation,
            previous_reservation,
        } = value;
        Self {
            rental_name: reservation.rental_name,
            id: reservation.id,
            checkin: reservation.checkin,
            checkout: reservation.checkout,
            previous_reservation,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedReservationResponse {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ReservationListItemResponse>,
}

impl From<Page<ReservationEntry>> for PaginatedReservationResponse {
    fn from(value: Page<ReservationEntry>) -> Self {
        let next = value
            .has_next()
            .then(|| page_link(value.page + 1, value.page_size));
        let previous = value
            .has_previous()
            .then(|| page_link(value.page - 1, value.page_size));
        let page = value.map(ReservationListItemResponse::from);
        Self {
            count: page.count,
            next,
            previous,
            results: page.items,
        }
    }
}

fn page_link(page: u64, page_size: u64) -> String {
    format!("{RESERVATIONS_PATH}?page={page}&page_size={page_size}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::reservation::RentalReservation;

    fn entry(id: i64, previous: Option<i64>) -> ReservationEntry {
        ReservationEntry {
            reservation: RentalReservation {
                id: ReservationId::new(id),
                rental_id: RentalId::new(1),
                rental_name: "rental-1".into(),
                checkin: "2022-01-01".parse().unwrap(),
                checkout: "2022-01-13".parse().unwrap(),
            },
            previous_reservation: previous.map(ReservationId::new),
        }
    }

    #[test]
    fn list_item_serializes_dates_and_null_previous() {
        let json = serde_json::to_value(ReservationListItemResponse::from(entry(1, None))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rental_name": "rental-1",
                "id": 1,
                "checkin": "2022-01-01",
                "checkout": "2022-01-13",
                "previous_reservation": null,
            })
        );
    }

    #[test]
    fn middle_page_links_both_ways() {
        let config = PaginationConfig::default();
        let all = (1..=5).map(|id| entry(id, None)).collect();
        let page = Page::paginate(all, PageRequest::new(Some(2), Some(2), &config)).unwrap();
        let res = PaginatedReservationResponse::from(page);
        assert_eq!(res.count, 5);
        assert_eq!(res.next.as_deref(), Some("/reservations/?page=3&page_size=2"));
        assert_eq!(res.previous.as_deref(), Some("/reservations/?page=1&page_size=2"));
        assert_eq!(res.results.len(), 2);
    }

    fn query(page: Option<&str>, page_size: Option<&str>) -> ReservationListQuery {
        ReservationListQuery {
            page: page.map(Into::into),
            page_size: page_size.map(Into::into),
        }
    }

    #[test]
    fn list_query_parses_numbers() {
        let config = PaginationConfig::new(5, 10);
        let req = query(Some("2"), Some("3")).into_page_request(&config).unwrap();
        assert_eq!((req.page(), req.page_size()), (2, 3));

        let req = query(None, None).into_page_request(&config).unwrap();
        assert_eq!((req.page(), req.page_size()), (1, 5));
    }

    #[test]
    fn non_numeric_page_is_an_invalid_page() {
        let config = PaginationConfig::default();
        for raw in ["abc", "-1", "1.5", ""] {
            let err = query(Some(raw), None).into_page_request(&config).unwrap_err();
            assert!(
                matches!(&err, AppError::EntityNotFound(msg) if msg == INVALID_PAGE),
                "{raw}"
            );
        }
    }

    #[test]
    fn unusable_page_size_falls_back_to_default() {
        let config = PaginationConfig::new(5, 10);
        for raw in ["-1", "abc", "0", ""] {
            let req = query(None, Some(raw)).into_page_request(&config).unwrap();
            assert_eq!(req.page_size(), 5, "{raw}");
        }
        let req = query(None, Some("999")).into_page_request(&config).unwrap();
        assert_eq!(req.page_size(), 10);
    }

    #[test]
    fn reversed_dates_are_an_invalid_range() {
        let req = CreateReservationRequest {
            rental: RentalId::new(1),
            checkin: "2022-06-12".parse().unwrap(),
            checkout: "2022-06-06".parse().unwrap(),
        };
        let err = CreateReservation::try_from(req).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange(_)));
    }
}
