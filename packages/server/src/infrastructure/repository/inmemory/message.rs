//! InMemory Message Repository 実装
//!
//! メッセージは追記のみで、Vec の並び順がそのまま挿入順になります。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageLimit, MessageRepository, ParticipantName, RepositoryError};

/// インメモリ Message Repository 実装
#[derive(Default, Clone)]
pub struct InMemoryMessageRepository {
    messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されている全メッセージ数
    pub async fn count(&self) -> usize {
        self.messages.lock().await.len()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: ChatMessage) -> Result<(), RepositoryError> {
        let mut messages = self.messages.lock().await;
        messages.push(message);
        Ok(())
    }

    async fn append_all(&self, batch: Vec<ChatMessage>) -> Result<(), RepositoryError> {
        let mut messages = self.messages.lock().await;
        messages.extend(batch);
        Ok(())
    }

    async fn find_visible_to(
        &self,
        viewer: &ParticipantName,
        limit: Option<MessageLimit>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        let take = limit.map_or(usize::MAX, |l| l.value());
        Ok(messages
            .iter()
            .rev()
            .filter(|m| m.is_visible_to(viewer))
            .take(take)
            .cloned()
            .collect())
    }
}
