//! UseCase: 非アクティブ参加者の期限切れ処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ExpireInactiveParticipantsUseCase::execute() メソッド
//! - 最終ステータスから閾値以上経過した参加者の削除と退室メッセージの追加
//!
//! ### なぜこのテストが必要か
//! - 期限切れ判定の境界（ちょうど閾値）を保証
//! - 削除された参加者ごとに退室メッセージが1件ずつ残ることを確認
//! - 削除と判定が不可分であり、直前にハートビートした参加者は残ることを確認
//! - 退室メッセージの追加に失敗しても、次回の実行で同じ参加者が再び処理されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：期限切れ参加者がいる／いない
//! - エッジケース：ちょうど閾値の参加者
//! - 異常系：ストア障害（呼び出し側でログに残して次回に再試行）

use std::{sync::Arc, time::Duration};

use crate::domain::{
    ChatMessage, Clock, MessageRepository, ParticipantName, ParticipantRepository,
};

use super::error::ChatError;

/// 期限切れ処理のユースケース
pub struct ExpireInactiveParticipantsUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
    /// この時間以上ハートビートのない参加者を期限切れとみなす
    idle_timeout: Duration,
}

impl ExpireInactiveParticipantsUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            participants,
            messages,
            clock,
            idle_timeout,
        }
    }

    /// 期限切れ処理を1回実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ParticipantName>)` - 削除した参加者の名前
    /// * `Err(ChatError::Store)` - ストア障害
    ///
    /// 退室メッセージの追加に失敗した場合、削除した参加者は元の最終ステータスのまま
    /// 戻されるため、次回の実行で再び期限切れとして処理されます。
    pub async fn execute(&self) -> Result<Vec<ParticipantName>, ChatError> {
        let now = self.clock.now();
        let cutoff = now.saturating_sub(self.idle_timeout);

        // 1. 判定と削除を1回のストア操作で行う
        let removed = self.participants.remove_inactive_since(cutoff).await?;
        if removed.is_empty() {
            return Ok(Vec::new());
        }

        // 2. 削除した参加者ごとの退室メッセージを一括追加
        let names: Vec<ParticipantName> = removed.iter().map(|p| p.name.clone()).collect();
        let notices = names
            .iter()
            .map(|name| ChatMessage::left(name.clone(), now))
            .collect();
        if let Err(e) = self.messages.append_all(notices).await {
            // 3. 失敗したら参加者を戻し、次回の実行で退室メッセージを書き直す
            if let Err(restore_err) = self.participants.restore(removed).await {
                tracing::error!("Failed to restore expired participants: {}", restore_err);
            }
            return Err(e.into());
        }

        tracing::info!("Expired {} inactive participant(s)", names.len());
        Ok(names)
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::{
        domain::{
            LEAVE_TEXT, MessageKind, Participant, RepositoryError, Timestamp,
            repository::{MockMessageRepository, MockParticipantRepository},
        },
        infrastructure::{
            clock::ManualClock,
            repository::{InMemoryMessageRepository, InMemoryParticipantRepository},
        },
    };

    const IDLE: Duration = Duration::from_secs(10);

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    struct Fixture {
        participants: Arc<InMemoryParticipantRepository>,
        messages: Arc<InMemoryMessageRepository>,
        clock: Arc<ManualClock>,
        usecase: ExpireInactiveParticipantsUseCase,
    }

    fn create_fixture() -> Fixture {
        let participants = Arc::new(InMemoryParticipantRepository::new());
        let messages = Arc::new(InMemoryMessageRepository::new());
        let clock = Arc::new(ManualClock::new(Timestamp::new(0)));
        let usecase = ExpireInactiveParticipantsUseCase::new(
            participants.clone(),
            messages.clone(),
            clock.clone(),
            IDLE,
        );
        Fixture {
            participants,
            messages,
            clock,
            usecase,
        }
    }

    #[tokio::test]
    async fn test_expire_removes_stale_and_appends_leave_messages() {
        // テスト項目: 閾値以上経過した参加者が削除され、退室メッセージが追加される
        // given (前提条件):
        let f = create_fixture();
        f.participants
            .insert(Participant::new(name("alice"), Timestamp::new(1_000)))
            .await
            .unwrap();
        f.participants
            .insert(Participant::new(name("bob"), Timestamp::new(2_000)))
            .await
            .unwrap();
        f.participants
            .insert(Participant::new(name("carol"), Timestamp::new(15_000)))
            .await
            .unwrap();
        f.clock.set(Timestamp::new(20_000));

        // when (操作):
        let removed = f.usecase.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(removed, vec![name("alice"), name("bob")]);
        let remaining = f.participants.find_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, name("carol"));

        let notices = f.messages.find_visible_to(&name("carol"), None).await.unwrap();
        assert_eq!(notices.len(), 2);
        for notice in &notices {
            assert_eq!(notice.kind, MessageKind::Status);
            assert_eq!(notice.text.as_str(), LEAVE_TEXT);
            assert!(notice.to.is_broadcast());
            assert_eq!(notice.sent_at, Timestamp::new(20_000));
        }
        assert_eq!(notices[0].from, name("bob"));
        assert_eq!(notices[1].from, name("alice"));
    }

    #[tokio::test]
    async fn test_expire_boundary_is_inclusive() {
        // テスト項目: ちょうど閾値だけ経過した参加者も削除される
        // given (前提条件):
        let f = create_fixture();
        f.participants
            .insert(Participant::new(name("alice"), Timestamp::new(10_000)))
            .await
            .unwrap();

        // when (操作): 閾値の 1ms 前
        f.clock.set(Timestamp::new(19_999));
        let before = f.usecase.execute().await.unwrap();
        // ちょうど閾値
        f.clock.set(Timestamp::new(20_000));
        let at = f.usecase.execute().await.unwrap();

        // then (期待する結果):
        assert!(before.is_empty());
        assert_eq!(at, vec![name("alice")]);
    }

    #[tokio::test]
    async fn test_expire_nothing_stale() {
        // テスト項目: 期限切れの参加者がいなければメッセージは追加されない
        // given (前提条件):
        let f = create_fixture();
        f.participants
            .insert(Participant::new(name("alice"), Timestamp::new(5_000)))
            .await
            .unwrap();
        f.clock.set(Timestamp::new(6_000));

        // when (操作):
        let removed = f.usecase.execute().await.unwrap();

        // then (期待する結果):
        assert!(removed.is_empty());
        assert_eq!(f.messages.count().await, 0);
        assert_eq!(f.participants.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_heartbeat_before_sweep_keeps_participant() {
        // テスト項目: 期限切れ直前にハートビートした参加者は削除されない
        // given (前提条件):
        let f = create_fixture();
        f.participants
            .insert(Participant::new(name("alice"), Timestamp::new(0)))
            .await
            .unwrap();
        f.clock.set(Timestamp::new(30_000));
        f.participants
            .touch(&name("alice"), Timestamp::new(29_500))
            .await
            .unwrap();

        // when (操作):
        let removed = f.usecase.execute().await.unwrap();

        // then (期待する結果):
        assert!(removed.is_empty());
        assert_eq!(f.messages.count().await, 0);
    }

    #[tokio::test]
    async fn test_expire_store_error_is_returned() {
        // テスト項目: 参加者ストアの障害は Store エラーとして返され、メッセージは追加されない
        // given (前提条件):
        let mut participants = MockParticipantRepository::new();
        participants
            .expect_remove_inactive_since()
            .times(1)
            .returning(|_| Err(RepositoryError::Storage("locked".to_string())));
        let mut messages = MockMessageRepository::new();
        messages.expect_append_all().times(0);
        let clock = Arc::new(ManualClock::new(Timestamp::new(100_000)));
        let usecase = ExpireInactiveParticipantsUseCase::new(
            Arc::new(participants),
            Arc::new(messages),
            clock,
            IDLE,
        );

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ChatError::Store(RepositoryError::Storage(
                "locked".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_failed_leave_notice_is_written_on_next_pass() {
        // テスト項目: 退室メッセージの追加に失敗しても、次回の実行で参加者が削除され退室メッセージが残る
        // given (前提条件):
        let participants = Arc::new(InMemoryParticipantRepository::new());
        participants
            .insert(Participant::new(name("alice"), Timestamp::new(0)))
            .await
            .unwrap();
        let attempts = Arc::new(AtomicUsize::new(0));
        let written = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut messages = MockMessageRepository::new();
        let counter = attempts.clone();
        let sink = written.clone();
        messages.expect_append_all().returning(move |batch| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(RepositoryError::Storage("transient".to_string()));
            }
            sink.lock().unwrap().extend(batch);
            Ok(())
        });
        let usecase = ExpireInactiveParticipantsUseCase::new(
            participants.clone(),
            Arc::new(messages),
            Arc::new(ManualClock::new(Timestamp::new(60_000))),
            IDLE,
        );

        // when (操作):
        let first = usecase.execute().await;
        let remaining_after_failure = participants.find_all().await.unwrap();
        let second = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            first,
            Err(ChatError::Store(RepositoryError::Storage(
                "transient".to_string()
            )))
        );
        assert_eq!(
            remaining_after_failure,
            vec![Participant::new(name("alice"), Timestamp::new(0))]
        );
        assert_eq!(second, Ok(vec![name("alice")]));
        assert!(participants.find_all().await.unwrap().is_empty());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].from, name("alice"));
        assert_eq!(written[0].text.as_str(), LEAVE_TEXT);
    }

    #[tokio::test]
    async fn test_expire_uses_cutoff_from_clock() {
        // テスト項目: cutoff は現在時刻から閾値を引いた時刻になる
        // given (前提条件):
        let mut participants = MockParticipantRepository::new();
        participants
            .expect_remove_inactive_since()
            .withf(|cutoff| *cutoff == Timestamp::new(90_000))
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let messages = MockMessageRepository::new();
        let clock = Arc::new(ManualClock::new(Timestamp::new(100_000)));
        let usecase = ExpireInactiveParticipantsUseCase::new(
            Arc::new(participants),
            Arc::new(messages),
            clock,
            IDLE,
        );

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(result, Ok(Vec::new()));
    }
}
