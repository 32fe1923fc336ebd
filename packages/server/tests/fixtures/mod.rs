//! Test fixtures for HTTP integration tests.

use std::sync::Arc;

use lounge_server::{
    create_router,
    domain::Timestamp,
    infrastructure::{
        clock::ManualClock,
        repository::{InMemoryMessageRepository, InMemoryParticipantRepository},
    },
    ui::state::AppState,
    usecase::ExpireInactiveParticipantsUseCase,
};
use tokio::{net::TcpListener, task::JoinHandle};

/// Idle timeout used by [`TestServer::expiry`]
pub const IDLE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Chat server running in-process on an ephemeral port
///
/// Stores are in memory and time is driven by a [`ManualClock`].
pub struct TestServer {
    addr: std::net::SocketAddr,
    pub participants: Arc<InMemoryParticipantRepository>,
    pub messages: Arc<InMemoryMessageRepository>,
    pub clock: Arc<ManualClock>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server whose clock reads `start`
    pub async fn start_at(start: Timestamp) -> Self {
        let participants = Arc::new(InMemoryParticipantRepository::new());
        let messages = Arc::new(InMemoryMessageRepository::new());
        let clock = Arc::new(ManualClock::new(start));

        let state = Arc::new(AppState::new(
            participants.clone(),
            messages.clone(),
            clock.clone(),
        ));
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        Self {
            addr,
            participants,
            messages,
            clock,
            handle,
        }
    }

    pub async fn start() -> Self {
        Self::start_at(Timestamp::new(1_700_000_000_000)).await
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Expiry use case wired to this server's stores and clock
    pub fn expiry(&self) -> ExpireInactiveParticipantsUseCase {
        ExpireInactiveParticipantsUseCase::new(
            self.participants.clone(),
            self.messages.clone(),
            self.clock.clone(),
            IDLE_TIMEOUT,
        )
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
