//! UseCase: 参加者登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterParticipantUseCase::execute() メソッド
//! - 参加者の登録（重複チェック）と入室メッセージの追加
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：同名の参加者は同時に1人しか存在できない
//! - 登録時に全員宛ての入室ステータスメッセージが残ることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の登録
//! - 異常系：登録済みの名前での登録試行
//! - 異常系：メッセージストアの障害（登録は取り消され、同じ名前で再試行できる）

use std::sync::Arc;

use crate::domain::{
    ChatMessage, Clock, MessageRepository, Participant, ParticipantName, ParticipantRepository,
};

use super::error::ChatError;

/// 参加者登録のユースケース
pub struct RegisterParticipantUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
}

impl RegisterParticipantUseCase {
    /// 新しい RegisterParticipantUseCase を作成
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

    /// 参加者登録を実行
    ///
    /// # Arguments
    ///
    /// * `name` - 登録する参加者名（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 登録成功
    /// * `Err(ChatError::ParticipantAlreadyExists)` - 同名の参加者が存在する
    /// * `Err(ChatError::Store)` - ストア障害
    ///
    /// 入室メッセージの追加に失敗した場合は参加者の登録も取り消すため、
    /// 呼び出し側は同じ名前で再試行できます。
    pub async fn execute(&self, name: ParticipantName) -> Result<(), ChatError> {
        let now = self.clock.now();

        // 1. 参加者を追加（重複チェックは Repository の挿入と不可分）
        self.participants
            .insert(Participant::new(name.clone(), now))
            .await?;

        // 2. 入室メッセージを追加（失敗したら登録を取り消す）
        if let Err(e) = self
            .messages
            .append(ChatMessage::joined(name.clone(), now))
            .await
        {
            if let Err(remove_err) = self.participants.remove(&name).await {
                tracing::error!(
                    "Failed to roll back registration of '{}': {}",
                    name,
                    remove_err
                );
            }
            return Err(e.into());
        }

        tracing::info!("Participant '{}' registered", name);
        Ok(())
    }
}
