use utoipa::OpenApi;

use crate::{
    handler::{rental, reservation},
    model::{
        rental::{CreateRentalRequest, RentalResponse},
        reservation::{
            CreateReservationRequest, PaginatedReservationResponse, ReservationListItemResponse,
            ReservationResponse, UpdateReservationRequest,
        },
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Rental booking API"),
    paths(
        rental::register_rental,
        rental::show_rental_list,
        rental::show_rental,
        rental::delete_rental,
        reservation::register_reservation,
        reservation::show_reservation_list,
        reservation::show_reservation,
        reservation::update_reservation,
        reservation::delete_reservation,
    ),
    components(schemas(
        CreateRentalRequest,
        RentalResponse,
        CreateReservationRequest,
        UpdateReservationRequest,
        ReservationResponse,
        ReservationListItemResponse,
        PaginatedReservationResponse,
    )),
    tags(
        (name = "rentals", description = "物件"),
        (name = "reservations", description = "予約"),
    )
)]
pub struct ApiDoc;
