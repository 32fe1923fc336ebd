//! SQLite Repository 実装
//!
//! sqlx の `SqlitePool` を使った永続化実装。`participants` と `messages` の
//! 2 テーブルを使用します。

mod message;
mod participant;

use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::domain::RepositoryError;

pub use message::SqliteMessageRepository;
pub use participant::SqliteParticipantRepository;

const CREATE_PARTICIPANTS: &str = "\
CREATE TABLE IF NOT EXISTS participants (
    name        TEXT    PRIMARY KEY NOT NULL,
    last_status INTEGER NOT NULL
)";

const CREATE_MESSAGES: &str = "\
CREATE TABLE IF NOT EXISTS messages (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    sender    TEXT    NOT NULL,
    recipient TEXT    NOT NULL,
    body      TEXT    NOT NULL,
    kind      TEXT    NOT NULL,
    sent_at   INTEGER NOT NULL
)";

/// Connection pool shared by the SQLite repositories
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `database_url` and create the tables if they are missing.
    ///
    /// In-memory databases are pinned to a single connection that is never
    /// recycled, otherwise every connection would see its own empty database.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(storage)?
            .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(storage)?;

        let store = Self { pool };
        store.migrate().await?;
        tracing::info!("SQLite store ready at {}", database_url);
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), RepositoryError> {
        for statement in [CREATE_PARTICIPANTS, CREATE_MESSAGES] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(storage)?;
        }
        Ok(())
    }

    pub fn participants(&self) -> SqliteParticipantRepository {
        SqliteParticipantRepository::new(self.pool.clone())
    }

    pub fn messages(&self) -> SqliteMessageRepository {
        SqliteMessageRepository::new(self.pool.clone())
    }
}

fn storage(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(err.to_string())
}

fn invalid_record(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::InvalidRecord(err.to_string())
}
