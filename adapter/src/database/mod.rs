use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{str::FromStr, time::Duration};

pub mod model;

fn make_sqlite_connect_options(cfg: &DatabaseConfig) -> Result<SqliteConnectOptions, sqlx::Error> {
    // ON DELETE CASCADE を効かせるため外部キー制約を必ず有効にする
    Ok(SqliteConnectOptions::from_str(&cfg.url)?
        .create_if_missing(true)
        .foreign_keys(true))
}

#[derive(Clone)]
pub struct ConnectionPool(SqlitePool);

impl ConnectionPool {
    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &SqlitePool {
        &self.0
    }

    // 読んでから書くトランザクションなので、開始時点で書き込みロックを取る。
    // 遅延 BEGIN だと途中で他の書き込みに割り込まれて SQLITE_BUSY になる
    pub async fn begin(&self) -> AppResult<sqlx::Transaction<'_, sqlx::Sqlite>> {
        self.0
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(AppError::TransactionError)
    }

    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.0)
            .await
            .map_err(|e| AppError::SpecificOperationError(e.into()))
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

// インメモリ DB は接続ごとに別のデータベースになるので接続は 1 本に絞る。
// また接続が閉じると消えるので、アイドル接続を破棄しない
fn max_connections_for(cfg: &DatabaseConfig) -> u32 {
    if is_in_memory(&cfg.url) {
        1
    } else {
        cfg.max_connections.max(1)
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> AppResult<ConnectionPool> {
    let options = make_sqlite_connect_options(cfg).map_err(AppError::SpecificOperationError)?;
    let max_connections = max_connections_for(cfg);
    if max_connections != cfg.max_connections {
        tracing::warn!(
            requested = cfg.max_connections,
            max_connections,
            "adjusted database pool size"
        );
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_lazy_with(options);
    Ok(ConnectionPool(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, max_connections: u32) -> DatabaseConfig {
        DatabaseConfig {
            url: url.into(),
            max_connections,
        }
    }

    #[test]
    fn in_memory_database_uses_a_single_connection() {
        assert_eq!(max_connections_for(&config("sqlite::memory:", 5)), 1);
        assert_eq!(max_connections_for(&config("sqlite://file:app?mode=memory", 5)), 1);
        assert_eq!(max_connections_for(&config("sqlite://app.db", 5)), 5);
    }

    #[tokio::test]
    async fn in_memory_pool_sees_migrated_tables() -> anyhow::Result<()> {
        let pool = connect_database_with(&config("sqlite::memory:", 5))?;
        pool.migrate().await?;
        assert_eq!(pool.inner_ref().options().get_max_connections(), 1);

        // 複数の取得が同じデータベースを見ていること
        for _ in 0..3 {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rental")
                .fetch_one(pool.inner_ref())
                .await?;
            assert_eq!(count, 0);
        }
        Ok(())
    }
}
