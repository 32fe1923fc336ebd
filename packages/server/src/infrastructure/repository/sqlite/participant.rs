//! SQLite Participant Repository 実装

use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::{invalid_record, storage};
use crate::domain::{Participant, ParticipantName, ParticipantRepository, RepositoryError, Timestamp};

/// SQLite Participant Repository 実装
///
/// 名前は PRIMARY KEY なので、一意性はデータベースが保証します。
pub struct SqliteParticipantRepository {
    pool: SqlitePool,
}

impl SqliteParticipantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn to_participant(row: &SqliteRow) -> Result<Participant, RepositoryError> {
    let name: String = row.try_get("name").map_err(storage)?;
    let last_status: i64 = row.try_get("last_status").map_err(storage)?;
    let name = ParticipantName::new(name).map_err(invalid_record)?;
    Ok(Participant::new(name, Timestamp::new(last_status)))
}

#[async_trait]
impl ParticipantRepository for SqliteParticipantRepository {
    async fn insert(&self, participant: Participant) -> Result<(), RepositoryError> {
        let result = sqlx::query("INSERT INTO participants (name, last_status) VALUES (?, ?)")
            .bind(participant.name.as_str())
            .bind(participant.last_status.value())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                RepositoryError::ParticipantAlreadyExists(participant.name.into_string()),
            ),
            Err(e) => Err(storage(e)),
        }
    }

    async fn remove(&self, name: &ParticipantName) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM participants WHERE name = ?")
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::ParticipantNotFound(name.to_string()));
        }
        Ok(())
    }

    async fn restore(&self, participants: Vec<Participant>) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;
        for participant in &participants {
            sqlx::query("INSERT OR IGNORE INTO participants (name, last_status) VALUES (?, ?)")
                .bind(participant.name.as_str())
                .bind(participant.last_status.value())
                .execute(&mut *tx)
                .await
                .map_err(storage)?;
        }
        tx.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Participant>, RepositoryError> {
        let rows = sqlx::query("SELECT name, last_status FROM participants ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.iter().map(to_participant).collect()
    }

    async fn exists(&self, name: &ParticipantName) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 FROM participants WHERE name = ?")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        Ok(row.is_some())
    }

    async fn touch(&self, name: &ParticipantName, at: Timestamp) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE participants SET last_status = ? WHERE name = ?")
            .bind(at.value())
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::ParticipantNotFound(name.to_string()));
        }
        Ok(())
    }

    async fn remove_inactive_since(
        &self,
        cutoff: Timestamp,
    ) -> Result<Vec<Participant>, RepositoryError> {
        let rows = sqlx::query(
            "DELETE FROM participants WHERE last_status <= ? RETURNING name, last_status",
        )
        .bind(cutoff.value())
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        rows.iter().map(to_participant).collect()
    }
}
