//! Periodic expiry of inactive participants.
//!
//! The scheduler owns a background task that runs one expiry pass per period.
//! A failed pass is logged and the next tick tries again.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::usecase::ExpireInactiveParticipantsUseCase;

/// Handle to the running expiry task
pub struct ExpiryScheduler {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ExpiryScheduler {
    /// Spawn the expiry task. The first pass runs one `period` after start.
    pub fn start(usecase: Arc<ExpireInactiveParticipantsUseCase>, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        tracing::info!(
            "Expiry scheduler started (period: {:?}, idle timeout: {:?})",
            period,
            usecase.idle_timeout()
        );

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => run_pass(&usecase).await,
                    _ = shutdown_rx.changed() => {
                        tracing::info!("Expiry scheduler stopping");
                        break;
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stop the task and wait for it to finish. A pass in progress is completed first.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.handle.await {
            tracing::error!("Expiry task ended abnormally: {}", e);
        }
    }
}

/// Run one expiry pass, logging the outcome. Errors are never propagated.
pub async fn run_pass(usecase: &ExpireInactiveParticipantsUseCase) {
    match usecase.execute().await {
        Ok(removed) if removed.is_empty() => {
            tracing::debug!("Expiry pass: no inactive participants");
        }
        Ok(removed) => {
            let names: Vec<&str> = removed.iter().map(|n| n.as_str()).collect();
            tracing::info!("Expiry pass removed: {}", names.join(", "));
        }
        Err(e) => {
            tracing::error!("Expiry pass failed, retrying on next tick: {}", e);
        }
    }
}
