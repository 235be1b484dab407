use crate::database::{
    model::reservation::{RentalReservationRow, ReservationRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{RentalId, ReservationId},
    list::{Page, PageRequest},
    reservation::{
        event::{CreateReservation, DeleteReservation, UpdateReservation},
        previous::link_previous,
        RentalReservation, Reservation, ReservationEntry, StayPeriod,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};
use sqlx::SqliteConnection;

const DATE_IS_BUSY: &str = "Date is busy! Choose another date!";
// マイグレーションのトリガーが RAISE するメッセージ
const OVERLAP_TRIGGER_MESSAGE: &str = "reservation dates overlap";

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定の物件 ID をもつ物件が存在するか
        // - 存在した場合、その期間に重なる予約がないか
        {
            ensure_rental_exists(&mut tx, event.rental_id).await?;

            if !date_range_is_free(&mut tx, event.rental_id, event.period, None).await? {
                return Err(AppError::Conflict(DATE_IS_BUSY.into()));
            }
        }

        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
                INSERT INTO reservation (rental_id, checkin, checkout)
                VALUES (?, ?, ?)
                RETURNING id, rental_id, checkin, checkout
            "#,
        )
        .bind(event.rental_id)
        .bind(event.period.checkin())
        .bind(event.period.checkout())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(reservation_id = %row.id, rental_id = %row.rental_id, "reservation created");
        Ok(row.into())
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        {
            let current = sqlx::query_scalar::<_, ReservationId>(
                r#"
                    SELECT id
                    FROM reservation
                    WHERE id = ?
                "#,
            )
            .bind(event.reservation_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if current.is_none() {
                return Err(AppError::EntityNotFound("Not found.".into()));
            }

            ensure_rental_exists(&mut tx, event.rental_id).await?;

            // 更新対象の予約自身は重複チェックから外す
            if !date_range_is_free(
                &mut tx,
                event.rental_id,
                event.period,
                Some(event.reservation_id),
            )
            .await?
            {
                return Err(AppError::Conflict(DATE_IS_BUSY.into()));
            }
        }

        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
                UPDATE reservation
                SET
                    rental_id = ?,
                    checkin = ?,
                    checkout = ?
                WHERE id = ?
                RETURNING id, rental_id, checkin, checkout
            "#,
        )
        .bind(event.rental_id)
        .bind(event.period.checkin())
        .bind(event.period.checkout())
        .bind(event.reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::NoRowsAffectedError("No reservation record has been updated".into()))?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(row.into())
    }

    async fn delete(&self, event: DeleteReservation) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM reservation
                WHERE id = ?
            "#,
        )
        .bind(event.reservation_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Not found.".into()));
        }

        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(
            r#"
                SELECT id, rental_id, checkin, checkout
                FROM reservation
                WHERE id = ?
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Reservation::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_all(&self, request: PageRequest) -> AppResult<Page<ReservationEntry>> {
        // rental テーブルと JOIN し、物件名・チェックアウト日の順に並べる。
        // 同じチェックアウト日の予約は ID の小さい順とする。
        // 直前の予約はページ分割の前に全件に対して一度の走査で付与する
        let rows = sqlx::query_as::<_, RentalReservationRow>(
            r#"
                SELECT
                    r.id,
                    r.rental_id,
                    rt.name AS rental_name,
                    r.checkin,
                    r.checkout
                FROM reservation AS r
                INNER JOIN rental AS rt ON r.rental_id = rt.id
                ORDER BY rt.name ASC, r.checkout ASC, r.id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let entries = link_previous(rows.into_iter().map(RentalReservation::from));
        Page::paginate(entries, request)
    }

    async fn is_date_range_free(
        &self,
        rental_id: RentalId,
        period: StayPeriod,
        exclude: Option<ReservationId>,
    ) -> AppResult<bool> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        date_range_is_free(&mut conn, rental_id, period, exclude).await
    }
}

async fn ensure_rental_exists(conn: &mut SqliteConnection, rental_id: RentalId) -> AppResult<()> {
    let found = sqlx::query_scalar::<_, RentalId>(
        r#"
            SELECT id
            FROM rental
            WHERE id = ?
        "#,
    )
    .bind(rental_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    match found {
        Some(_) => Ok(()),
        None => Err(AppError::InvalidField(format!(
            "Invalid pk \"{rental_id}\" - object does not exist."
        ))),
    }
}

// 閉区間同士の重なり判定。境界が一日でも接していれば重複とみなす。
// create/update の事前チェックと is_date_range_free はすべてここを通る
async fn date_range_is_free(
    conn: &mut SqliteConnection,
    rental_id: RentalId,
    period: StayPeriod,
    exclude: Option<ReservationId>,
) -> AppResult<bool> {
    let overlapping = sqlx::query_scalar::<_, ReservationId>(
        r#"
            SELECT id
            FROM reservation
            WHERE rental_id = ?
              AND checkout >= ?
              AND checkin <= ?
              AND (? IS NULL OR id <> ?)
            LIMIT 1
        "#,
    )
    .bind(rental_id)
    .bind(period.checkin())
    .bind(period.checkout())
    .bind(exclude)
    .bind(exclude)
    .fetch_optional(&mut *conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if let Some(existing) = overlapping {
        tracing::debug!(
            rental_id = %rental_id,
            existing_reservation = %existing,
            "requested dates overlap an existing reservation"
        );
    }
    Ok(overlapping.is_none())
}

// 同時実行で事前チェックをすり抜けた書き込みはトリガーが拒否する
fn map_write_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(db) if db.message().contains(OVERLAP_TRIGGER_MESSAGE) => {
            AppError::Conflict(DATE_IS_BUSY.into())
        }
        e => AppError::SpecificOperationError(e),
    }
}
