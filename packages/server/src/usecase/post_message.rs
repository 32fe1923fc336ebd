//! UseCase: メッセージ投稿処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostMessageUseCase::execute() メソッド
//! - 送信者の存在確認とメッセージの追記
//!
//! ### なぜこのテストが必要か
//! - 登録されていない送信者のメッセージが残らないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済み参加者の投稿
//! - 異常系：未登録の送信者

use std::sync::Arc;

use crate::domain::{
    ChatMessage, Clock, MessageKind, MessageRepository, MessageText, ParticipantName,
    ParticipantRepository, Recipient,
};

use super::error::ChatError;

/// メッセージ投稿のユースケース
pub struct PostMessageUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
}

impl PostMessageUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            messages,
            clock,
        }
    }

    /// メッセージ投稿を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信者（リクエストの `user` ヘッダ由来）
    /// * `to` - 宛先
    /// * `text` - 本文
    /// * `kind` - `Message` または `PrivateMessage`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 投稿成功
    /// * `Err(ChatError::ParticipantNotFound)` - 送信者が未登録
    pub async fn execute(
        &self,
        sender: ParticipantName,
        to: Recipient,
        text: MessageText,
        kind: MessageKind,
    ) -> Result<(), ChatError> {
        // 1. 送信者が登録済みか確認
        if !self.participants.exists(&sender).await? {
            return Err(ChatError::ParticipantNotFound(sender.into_string()));
        }

        // 2. メッセージを追記
        let message = ChatMessage::new(sender, to, text, kind, self.clock.now());
        tracing::debug!(
            "Message from '{}' to '{}' ({})",
            message.from,
            message.to,
            message.kind
        );
        self.messages.append(message).await?;

        Ok(())
    }
}
