//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（HTTP ハンドラ、期限切れスケジューラ）から呼び出され、Domain 層を操作します。

pub mod error;
pub mod expire_participants;
pub mod heartbeat;
pub mod list_messages;
pub mod list_participants;
pub mod post_message;
pub mod register_participant;

pub use error::ChatError;
pub use expire_participants::ExpireInactiveParticipantsUseCase;
pub use heartbeat::HeartbeatUseCase;
pub use list_messages::ListMessagesUseCase;
pub use list_participants::ListParticipantsUseCase;
pub use post_message::PostMessageUseCase;
pub use register_participant::RegisterParticipantUseCase;
