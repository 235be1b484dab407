use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{RentalId, ReservationId},
    list::{Page, PageRequest},
    reservation::{
        event::{CreateReservation, DeleteReservation, UpdateReservation},
        Reservation, ReservationEntry, StayPeriod,
    },
};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約を作成する。期間の重複があれば Conflict
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;
    // 予約を置き換える。自分自身は重複チェックの対象外
    async fn update(&self, event: UpdateReservation) -> AppResult<Reservation>;
    async fn delete(&self, event: DeleteReservation) -> AppResult<()>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    // 物件名・チェックアウト日順の一覧に直前の予約 ID を付けてページ分割する
    async fn find_all(&self, request: PageRequest) -> AppResult<Page<ReservationEntry>>;
    // 指定期間に同じ物件の予約が一件も重ならなければ true。
    // 読み取りのみで、create/update の事前チェックと同じ判定を使う
    async fn is_date_range_free(
        &self,
        rental_id: RentalId,
        period: StayPeriod,
        exclude: Option<ReservationId>,
    ) -> AppResult<bool>;
}
