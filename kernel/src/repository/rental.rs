use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::RentalId,
    rental::{
        event::{CreateRental, DeleteRental},
        Rental,
    },
};

#[async_trait]
pub trait RentalRepository: Send + Sync {
    // 物件を登録し、採番された ID を含めて返す
    async fn create(&self, event: CreateRental) -> AppResult<Rental>;
    // 全物件を ID 順に取得する
    async fn find_all(&self) -> AppResult<Vec<Rental>>;
    async fn find_by_id(&self, rental_id: RentalId) -> AppResult<Option<Rental>>;
    // 物件を削除する。紐づく予約も一緒に消える
    async fn delete(&self, event: DeleteRental) -> AppResult<()>;
}
