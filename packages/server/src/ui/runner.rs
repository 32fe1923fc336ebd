//! Server bootstrap: store selection, expiry scheduler and HTTP listener.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::{
    config::{ServerConfig, StoreKind},
    domain::{Clock, MessageRepository, ParticipantRepository},
    error::ServerError,
    infrastructure::{
        clock::SystemClock,
        repository::{InMemoryMessageRepository, InMemoryParticipantRepository, SqliteStore},
        scheduler::ExpiryScheduler,
    },
    usecase::ExpireInactiveParticipantsUseCase,
};

use super::{router::create_router, signal::shutdown_signal, state::AppState};

type Repositories = (Arc<dyn ParticipantRepository>, Arc<dyn MessageRepository>);

async fn open_store(config: &ServerConfig) -> Result<Repositories, ServerError> {
    match config.store {
        StoreKind::Memory => {
            tracing::info!("Using in-memory store");
            let participants: Arc<dyn ParticipantRepository> =
                Arc::new(InMemoryParticipantRepository::new());
            let messages: Arc<dyn MessageRepository> = Arc::new(InMemoryMessageRepository::new());
            Ok((participants, messages))
        }
        StoreKind::Sqlite => {
            let store = SqliteStore::connect(&config.database_url, config.max_connections).await?;
            let participants: Arc<dyn ParticipantRepository> = Arc::new(store.participants());
            let messages: Arc<dyn MessageRepository> = Arc::new(store.messages());
            Ok((participants, messages))
        }
    }
}

/// Run the chat server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let (participants, messages) = open_store(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let expire_usecase = Arc::new(ExpireInactiveParticipantsUseCase::new(
        participants.clone(),
        messages.clone(),
        clock.clone(),
        config.idle_timeout(),
    ));
    let scheduler = ExpiryScheduler::start(expire_usecase, config.sweep_interval());

    let state = Arc::new(AppState::new(participants, messages, clock));
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    scheduler.stop().await;
    served?;

    tracing::info!("Server stopped");
    Ok(())
}
