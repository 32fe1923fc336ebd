//! UseCase: ハートビート処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HeartbeatUseCase::execute() メソッド
//! - 参加者の最終ステータス時刻の更新
//!
//! ### なぜこのテストが必要か
//! - ハートビートが届いている参加者は期限切れにならないことを保証
//! - 何度呼んでもエラーにならない（冪等）ことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済み参加者のハートビート（連続呼び出しを含む）
//! - 異常系：未登録参加者のハートビート

use std::sync::Arc;

use crate::domain::{Clock, ParticipantName, ParticipantRepository};

use super::error::ChatError;

/// ハートビートのユースケース
pub struct HeartbeatUseCase {
    participants: Arc<dyn ParticipantRepository>,
    clock: Arc<dyn Clock>,
}

impl HeartbeatUseCase {
    pub fn new(participants: Arc<dyn ParticipantRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            participants,
            clock,
        }
    }

    /// 参加者の最終ステータス時刻を現在時刻に更新する
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 更新成功
    /// * `Err(ChatError::ParticipantNotFound)` - 未登録の参加者
    pub async fn execute(&self, name: &ParticipantName) -> Result<(), ChatError> {
        self.participants.touch(name, self.clock.now()).await?;
        tracing::debug!("Heartbeat from '{}'", name);
        Ok(())
    }
}
