use kernel::model::{id::RentalId, rental::Rental};

#[derive(sqlx::FromRow)]
pub struct RentalRow {
    pub id: RentalId,
    pub name: String,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        let RentalRow { id, name } = value;
        Rental { id, name }
    }
}
