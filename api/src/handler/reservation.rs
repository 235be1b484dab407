use crate::{
    extractor::{QueryParams, ResourceId, ValidatedJson},
    model::reservation::{
        CreateReservationRequest, PaginatedReservationResponse, ReservationListQuery,
        ReservationResponse, UpdateReservationRequest, UpdateReservationRequestWithId,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use kernel::model::{
    id::ReservationId,
    reservation::event::{CreateReservation, DeleteReservation, UpdateReservation},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

#[utoipa::path(
    post,
    path = "/reservations/",
    tag = "reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, body = ReservationResponse),
        (status = 400, description = "日付の前後関係が不正、物件が存在しない、または期間が重複している"),
    )
)]
pub async fn register_reservation(
    State(registry): State<AppRegistry>,
    ValidatedJson(req): ValidatedJson<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    let event = CreateReservation::try_from(req)?;

    registry
        .reservation_repository()
        .create(event)
        .await
        .map(|reservation| (StatusCode::CREATED, Json(reservation.into())))
}

// 一覧は物件名・チェックアウト日順で、直前の予約 ID 付き
#[utoipa::path(
    get,
    path = "/reservations/",
    tag = "reservations",
    params(ReservationListQuery),
    responses(
        (status = 200, body = PaginatedReservationResponse),
        (status = 404, description = "Invalid page."),
    )
)]
pub async fn show_reservation_list(
    QueryParams(query): QueryParams<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedReservationResponse>> {
    let request = query.into_page_request(&registry.pagination())?;

    registry
        .reservation_repository()
        .find_all(request)
        .await
        .map(PaginatedReservationResponse::from)
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/reservations/{reservation_id}",
    tag = "reservations",
    params(("reservation_id" = i64, Path,)),
    responses(
        (status = 200, body = ReservationResponse),
        (status = 404, description = "Not found."),
    )
)]
pub async fn show_reservation(
    ResourceId(reservation_id): ResourceId<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .and_then(|reservation| match reservation {
            Some(reservation) => Ok(Json(reservation.into())),
            None => Err(AppError::EntityNotFound("Not found.".into())),
        })
}

#[utoipa::path(
    put,
    path = "/reservations/{reservation_id}",
    tag = "reservations",
    params(("reservation_id" = i64, Path,)),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, body = ReservationResponse),
        (status = 400, description = "日付の前後関係が不正、物件が存在しない、または期間が重複している"),
        (status = 404, description = "Not found."),
    )
)]
pub async fn update_reservation(
    ResourceId(reservation_id): ResourceId<ReservationId>,
    State(registry): State<AppRegistry>,
    ValidatedJson(req): ValidatedJson<UpdateReservationRequest>,
) -> AppResult<Json<ReservationResponse>> {
    let event =
        UpdateReservation::try_from(UpdateReservationRequestWithId::new(reservation_id, req))?;

    registry
        .reservation_repository()
        .update(event)
        .await
        .map(|reservation| Json(reservation.into()))
}

#[utoipa::path(
    delete,
    path = "/reservations/{reservation_id}",
    tag = "reservations",
    params(("reservation_id" = i64, Path,)),
    responses(
        (status = 204, description = "削除した"),
        (status = 404, description = "Not found."),
    )
)]
pub async fn delete_reservation(
    ResourceId(reservation_id): ResourceId<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_repository()
        .delete(DeleteReservation::new(reservation_id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
