//! UseCase: 参加者一覧取得

use std::sync::Arc;

use crate::domain::{Participant, ParticipantRepository};

use super::error::ChatError;

/// 参加者一覧取得のユースケース
pub struct ListParticipantsUseCase {
    participants: Arc<dyn ParticipantRepository>,
}

impl ListParticipantsUseCase {
    pub fn new(participants: Arc<dyn ParticipantRepository>) -> Self {
        Self { participants }
    }

    /// 登録中の全参加者をストアの自然順で返す
    pub async fn execute(&self) -> Result<Vec<Participant>, ChatError> {
        Ok(self.participants.find_all().await?)
    }
}
