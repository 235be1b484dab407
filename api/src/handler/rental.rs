use crate::{
    extractor::{ResourceId, ValidatedJson},
    model::rental::{CreateRentalRequest, RentalResponse},
};
use axum::{extract::State, http::StatusCode, Json};
use kernel::model::{id::RentalId, rental::event::DeleteRental};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

#[utoipa::path(
    post,
    path = "/rentals/",
    tag = "rentals",
    request_body = CreateRentalRequest,
    responses(
        (status = 201, body = RentalResponse),
        (status = 400, description = "名前が空、長すぎる、または既に使われている"),
    )
)]
pub async fn register_rental(
    State(registry): State<AppRegistry>,
    ValidatedJson(req): ValidatedJson<CreateRentalRequest>,
) -> AppResult<(StatusCode, Json<RentalResponse>)> {
    registry
        .rental_repository()
        .create(req.into())
        .await
        .map(|rental| (StatusCode::CREATED, Json(rental.into())))
}

#[utoipa::path(
    get,
    path = "/rentals/",
    tag = "rentals",
    responses((status = 200, body = Vec<RentalResponse>))
)]
pub async fn show_rental_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<RentalResponse>>> {
    registry
        .rental_repository()
        .find_all()
        .await
        .map(|rentals| rentals.into_iter().map(RentalResponse::from).collect())
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/rentals/{rental_id}",
    tag = "rentals",
    params(("rental_id" = i64, Path,)),
    responses(
        (status = 200, body = RentalResponse),
        (status = 404, description = "Not found."),
    )
)]
pub async fn show_rental(
    ResourceId(rental_id): ResourceId<RentalId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RentalResponse>> {
    registry
        .rental_repository()
        .find_by_id(rental_id)
        .await
        .and_then(|rental| match rental {
            Some(rental) => Ok(Json(rental.into())),
            None => Err(AppError::EntityNotFound("Not found.".into())),
        })
}

// 物件の予約もまとめて削除される
#[utoipa::path(
    delete,
    path = "/rentals/{rental_id}",
    tag = "rentals",
    params(("rental_id" = i64, Path,)),
    responses(
        (status = 204, description = "削除した"),
        (status = 404, description = "Not found."),
    )
)]
pub async fn delete_rental(
    ResourceId(rental_id): ResourceId<RentalId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .rental_repository()
        .delete(DeleteRental::new(rental_id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
