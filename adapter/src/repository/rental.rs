use crate::database::{model::rental::RentalRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::RentalId,
    rental::{
        event::{CreateRental, DeleteRental},
        Rental,
    },
};
use kernel::repository::rental::RentalRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RentalRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RentalRepository for RentalRepositoryImpl {
    async fn create(&self, event: CreateRental) -> AppResult<Rental> {
        // name には UNIQUE 制約があるので、重複は入力エラーとして返す
        let row = sqlx::query_as::<_, RentalRow>(
            r#"
                INSERT INTO rental (name)
                VALUES (?)
                RETURNING id, name
            "#,
        )
        .bind(&event.name)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::InvalidField("rental with this name already exists.".into())
            }
            e => AppError::SpecificOperationError(e),
        })?;

        tracing::info!(rental_id = %row.id, "rental created");
        Ok(row.into())
    }

    async fn find_all(&self) -> AppResult<Vec<Rental>> {
        sqlx::query_as::<_, RentalRow>(
            r#"
                SELECT id, name
                FROM rental
                ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Rental::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, rental_id: RentalId) -> AppResult<Option<Rental>> {
        sqlx::query_as::<_, RentalRow>(
            r#"
                SELECT id, name
                FROM rental
                WHERE id = ?
            "#,
        )
        .bind(rental_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Rental::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn delete(&self, event: DeleteRental) -> AppResult<()> {
        // 予約は外部キーの ON DELETE CASCADE で一緒に削除される
        let res = sqlx::query(
            r#"
                DELETE FROM rental
                WHERE id = ?
            "#,
        )
        .bind(event.rental_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Not found.".into()));
        }

        tracing::info!(rental_id = %event.rental_id, "rental deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn test_register_rental(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RentalRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo.create(CreateRental::new("Apartment 11".into())).await?;
        assert_eq!(created.name, "Apartment 11");

        let res = repo.find_all().await?;
        assert_eq!(res, vec![created.clone()]);

        let res = repo.find_by_id(created.id).await?;
        assert_eq!(res, Some(created));
        Ok(())
    }

    #[sqlx::test]
    async fn duplicate_name_is_rejected(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RentalRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(CreateRental::new("rental-1".into())).await?;
        let err = repo
            .create(CreateRental::new("rental-1".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidField(_)));
        assert_eq!(repo.find_all().await?.len(), 1);
        Ok(())
    }

    #[sqlx::test]
    async fn missing_rental_is_not_found(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RentalRepositoryImpl::new(ConnectionPool::new(pool));

        assert_eq!(repo.find_by_id(RentalId::new(69)).await?, None);
        let err = repo
            .delete(DeleteRental::new(RentalId::new(69)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
        Ok(())
    }

    #[sqlx::test]
    async fn delete_removes_rental(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RentalRepositoryImpl::new(ConnectionPool::new(pool));

        let first = repo.create(CreateRental::new("rental-1".into())).await?;
        let second = repo.create(CreateRental::new("rental-2".into())).await?;
        repo.delete(DeleteRental::new(first.id)).await?;

        assert_eq!(repo.find_all().await?, vec![second]);
        Ok(())
    }
}
