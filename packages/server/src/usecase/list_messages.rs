//! UseCase: メッセージ一覧取得
//!
//! 閲覧者から見えるメッセージだけを新しい順に返します。

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageLimit, MessageRepository, ParticipantName};

use super::error::ChatError;

/// メッセージ一覧取得のユースケース
pub struct ListMessagesUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl ListMessagesUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// メッセージ一覧取得を実行
    ///
    /// # Arguments
    ///
    /// * `viewer` - 閲覧者（リクエストの `user` ヘッダ由来）
    /// * `limit` - 最新から数えた最大件数（`None` なら全件）
    pub async fn execute(
        &self,
        viewer: &ParticipantName,
        limit: Option<MessageLimit>,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.messages.find_visible_to(viewer, limit).await?)
    }
}
