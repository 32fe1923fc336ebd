//! SQLite Message Repository 実装

use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::{invalid_record, storage};
use crate::domain::{
    BROADCAST_RECIPIENT, ChatMessage, MessageKind, MessageLimit, MessageRepository, MessageText,
    ParticipantName, Recipient, RepositoryError, Timestamp,
};

const INSERT_MESSAGE: &str =
    "INSERT INTO messages (sender, recipient, body, kind, sent_at) VALUES (?, ?, ?, ?, ?)";

// Same predicate as `ChatMessage::is_visible_to`, evaluated by SQLite.
// `LIMIT -1` means no limit.
const SELECT_VISIBLE: &str = "\
SELECT sender, recipient, body, kind, sent_at FROM messages
WHERE sender = ? OR recipient = ? OR kind = 'message' OR recipient = ?
ORDER BY id DESC
LIMIT ?";

/// SQLite Message Repository 実装
///
/// `id` (AUTOINCREMENT) が挿入順を表し、一覧の並び替えに使われます。
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn to_message(row: &SqliteRow) -> Result<ChatMessage, RepositoryError> {
    let sender: String = row.try_get("sender").map_err(storage)?;
    let recipient: String = row.try_get("recipient").map_err(storage)?;
    let body: String = row.try_get("body").map_err(storage)?;
    let kind: String = row.try_get("kind").map_err(storage)?;
    let sent_at: i64 = row.try_get("sent_at").map_err(storage)?;

    Ok(ChatMessage::new(
        ParticipantName::new(sender).map_err(invalid_record)?,
        Recipient::new(recipient).map_err(invalid_record)?,
        MessageText::new(body).map_err(invalid_record)?,
        kind.parse::<MessageKind>().map_err(invalid_record)?,
        Timestamp::new(sent_at),
    ))
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn append(&self, message: ChatMessage) -> Result<(), RepositoryError> {
        sqlx::query(INSERT_MESSAGE)
            .bind(message.from.as_str())
            .bind(message.to.as_str())
            .bind(message.text.as_str())
            .bind(message.kind.as_str())
            .bind(message.sent_at.value())
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn append_all(&self, messages: Vec<ChatMessage>) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;
        for message in &messages {
            sqlx::query(INSERT_MESSAGE)
                .bind(message.from.as_str())
                .bind(message.to.as_str())
                .bind(message.text.as_str())
                .bind(message.kind.as_str())
                .bind(message.sent_at.value())
                .execute(&mut *tx)
                .await
                .map_err(storage)?;
        }
        tx.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn find_visible_to(
        &self,
        viewer: &ParticipantName,
        limit: Option<MessageLimit>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let limit = limit.map_or(-1, |l| i64::try_from(l.value()).unwrap_or(i64::MAX));
        let rows = sqlx::query(SELECT_VISIBLE)
            .bind(viewer.as_str())
            .bind(viewer.as_str())
            .bind(BROADCAST_RECIPIENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.iter().map(to_message).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::SqliteStore;

    async fn create_test_repository() -> SqliteMessageRepository {
        SqliteStore::connect("sqlite::memory:", 1)
            .await
            .expect("Failed to open in-memory SQLite")
            .messages()
    }

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    fn message(from: &str, to: &str, text: &str, kind: MessageKind) -> ChatMessage {
        ChatMessage::new(
            name(from),
            Recipient::new(to.to_string()).unwrap(),
            MessageText::new(text.to_string()).unwrap(),
            kind,
            Timestamp::new(1000),
        )
    }

    fn texts(messages: &[ChatMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_visibility_filter_and_order() {
        // テスト項目: SQL の可視性フィルタがドメインの判定と一致し、新しい順で返る
        // given (前提条件):
        let repo = create_test_repository().await;
        repo.append(ChatMessage::joined(name("alice"), Timestamp::new(1)))
            .await
            .unwrap();
        repo.append(message("alice", "bob", "dm", MessageKind::PrivateMessage))
            .await
            .unwrap();
        repo.append(message("bob", "alice", "room", MessageKind::Message))
            .await
            .unwrap();
        repo.append(message("bob", "Todos", "all", MessageKind::PrivateMessage))
            .await
            .unwrap();

        // when (操作):
        let for_charlie = repo.find_visible_to(&name("charlie"), None).await.unwrap();
        let for_bob = repo.find_visible_to(&name("bob"), None).await.unwrap();

        // then (期待する結果):
        assert_eq!(texts(&for_charlie), vec!["all", "room", "entra na sala..."]);
        assert_eq!(
            texts(&for_bob),
            vec!["all", "room", "dm", "entra na sala..."]
        );
        assert_eq!(for_bob[2].kind, MessageKind::PrivateMessage);
        assert_eq!(for_bob[3].kind, MessageKind::Status);
    }

    #[tokio::test]
    async fn test_find_visible_to_with_limit() {
        // テスト項目: limit 件の最新メッセージだけが返る
        // given (前提条件):
        let repo = create_test_repository().await;
        for text in ["one", "two", "three"] {
            repo.append(message("alice", "Todos", text, MessageKind::Message))
                .await
                .unwrap();
        }

        // when (操作):
        let result = repo
            .find_visible_to(&name("bob"), Some(MessageLimit::new(2).unwrap()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(texts(&result), vec!["three", "two"]);
    }

    #[tokio::test]
    async fn test_append_all_in_one_transaction() {
        // テスト項目: 一括追加した退室メッセージが全て保存される
        // given (前提条件):
        let repo = create_test_repository().await;
        let batch = vec![
            ChatMessage::left(name("alice"), Timestamp::new(5)),
            ChatMessage::left(name("bob"), Timestamp::new(5)),
        ];

        // when (操作):
        repo.append_all(batch.clone()).await.unwrap();

        // then (期待する結果):
        let result = repo.find_visible_to(&name("x"), None).await.unwrap();
        assert_eq!(result, vec![batch[1].clone(), batch[0].clone()]);
    }
}
