//! InMemory Participant Repository 実装
//!
//! ドメイン層が定義する ParticipantRepository trait の具体的な実装。
//! Vec をインメモリ DB として使用し、登録順を保持します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Participant, ParticipantName, ParticipantRepository, RepositoryError, Timestamp};

/// インメモリ Participant Repository 実装
///
/// 全ての操作は1回のロック取得で完結するため、重複チェックと挿入、
/// 非アクティブ判定と削除がそれぞれ不可分に行われます。
#[derive(Default, Clone)]
pub struct InMemoryParticipantRepository {
    participants: Arc<Mutex<Vec<Participant>>>,
}

impl InMemoryParticipantRepository {
    /// 新しい InMemoryParticipantRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn insert(&self, participant: Participant) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        if participants.iter().any(|p| p.name == participant.name) {
            return Err(RepositoryError::ParticipantAlreadyExists(
                participant.name.into_string(),
            ));
        }
        participants.push(participant);
        Ok(())
    }

    async fn remove(&self, name: &ParticipantName) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        let index = participants
            .iter()
            .position(|p| &p.name == name)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(name.to_string()))?;
        participants.remove(index);
        Ok(())
    }

    async fn restore(&self, restored: Vec<Participant>) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        for participant in restored {
            if !participants.iter().any(|p| p.name == participant.name) {
                participants.push(participant);
            }
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Participant>, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants.clone())
    }

    async fn exists(&self, name: &ParticipantName) -> Result<bool, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants.iter().any(|p| &p.name == name))
    }

    async fn touch(&self, name: &ParticipantName, at: Timestamp) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        let participant = participants
            .iter_mut()
            .find(|p| &p.name == name)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(name.to_string()))?;
        participant.last_status = at;
        Ok(())
    }

    async fn remove_inactive_since(
        &self,
        cutoff: Timestamp,
    ) -> Result<Vec<Participant>, RepositoryError> {
        let mut participants = self.participants.lock().await;
        let (removed, kept): (Vec<_>, Vec<_>) = participants
            .drain(..)
            .partition(|p| p.last_status <= cutoff);
        *participants = kept;
        Ok(removed)
    }
}
