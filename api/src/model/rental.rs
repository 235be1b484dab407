use garde::Validate;
use kernel::model::{
    id::RentalId,
    rental::{event::CreateRental, Rental},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRentalRequest {
    /// 物件名。全物件で一意
    #[garde(length(min = 1, max = 128))]
    #[schema(example = "rental-1", min_length = 1, max_length = 128)]
    pub name: String,
}

impl From<CreateRentalRequest> for CreateRental {
    fn from(value: CreateRentalRequest) -> Self {
        let CreateRentalRequest { name } = value;
        CreateRental { name }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RentalResponse {
    #[schema(value_type = i64)]
    pub id: RentalId,
    pub name: String,
}

impl From<Rental> for RentalResponse {
    fn from(value: Rental) -> Self {
        let Rental { id, name } = value;
        Self { id, name }
    }
}
