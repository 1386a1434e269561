//! Outbound sync of local edits
//!
//! Local-origin snapshots are pushed to the remote store once edits have
//! been quiet for the debounce window. Snapshots applied from the remote
//! store are never echoed back.

use crate::error::Result;
use crate::league::state::{LeagueSnapshot, StateOrigin};
use crate::types::LeagueState;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Destination for locally edited league documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SyncPublisher: Send + Sync {
    /// Persist the full league document
    async fn publish_state(&self, state: LeagueState) -> Result<()>;
}

/// Background task forwarding debounced local snapshots to a [`SyncPublisher`]
pub struct OutboundSync;

impl OutboundSync {
    /// Spawn the sync loop. It ends once the coordinator is dropped, flushing
    /// a pending local edit first.
    pub fn spawn(
        receiver: watch::Receiver<Arc<LeagueSnapshot>>,
        publisher: Arc<dyn SyncPublisher>,
        debounce: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(run(receiver, publisher, debounce))
    }
}

async fn run(
    mut receiver: watch::Receiver<Arc<LeagueSnapshot>>,
    publisher: Arc<dyn SyncPublisher>,
    debounce: Duration,
) {
    info!("Outbound sync started ({}ms debounce)", debounce.as_millis());

    loop {
        if receiver.changed().await.is_err() {
            break;
        }

        let mut pending = receiver.borrow_and_update().clone();
        if pending.origin != StateOrigin::Local {
            debug!(
                "Skipping sync of revision {} ({})",
                pending.revision, pending.origin
            );
            continue;
        }

        // Wait for a quiet period; newer snapshots replace the pending one
        let mut closed = false;
        loop {
            match tokio::time::timeout(debounce, receiver.changed()).await {
                Ok(Ok(())) => pending = receiver.borrow_and_update().clone(),
                Ok(Err(_)) => {
                    closed = true;
                    break;
                }
                Err(_) => break,
            }
        }

        if pending.is_local() {
            publish(publisher.as_ref(), &pending).await;
        } else {
            debug!(
                "Pending local edit superseded by revision {} ({})",
                pending.revision, pending.origin
            );
        }

        if closed {
            break;
        }
    }

    info!("Outbound sync stopped");
}

async fn publish(publisher: &dyn SyncPublisher, snapshot: &LeagueSnapshot) {
    match publisher.publish_state(snapshot.state.clone()).await {
        Ok(()) => debug!("Published league revision {}", snapshot.revision),
        Err(e) => error!(
            "Failed to publish league revision {}: {}",
            snapshot.revision, e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeagueError;
    use crate::league::coordinator::LeagueCoordinator;
    use crate::league::validation::MatchDraft;
    use crate::rating::RatingEngine;
    use crate::types::Player;

    const DEBOUNCE: Duration = Duration::from_millis(800);

    async fn seeded() -> LeagueCoordinator {
        let players = ["a", "b", "c", "d"]
            .iter()
            .map(|id| Player::new(*id, id.to_uppercase(), 1000.0))
            .collect();
        LeagueCoordinator::new(
            RatingEngine::default(),
            LeagueState {
                players,
                matches: vec![],
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_local_burst_published_once() {
        let coordinator = seeded().await;

        let mut publisher = MockSyncPublisher::new();
        publisher
            .expect_publish_state()
            .withf(|state: &LeagueState| state.matches.len() == 2)
            .times(1)
            .returning(|_| Ok(()));

        let handle = OutboundSync::spawn(coordinator.subscribe(), Arc::new(publisher), DEBOUNCE);

        let draft = MatchDraft::new(["a", "b"], ["c", "d"], &[(6, 2), (6, 3)]);
        coordinator.record_match(&draft).await.unwrap();
        coordinator.record_match(&draft).await.unwrap();

        tokio::time::sleep(DEBOUNCE * 2).await;

        drop(coordinator);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_snapshot_not_echoed() {
        let coordinator = seeded().await;

        let mut publisher = MockSyncPublisher::new();
        publisher.expect_publish_state().times(0);

        let handle = OutboundSync::spawn(coordinator.subscribe(), Arc::new(publisher), DEBOUNCE);

        coordinator
            .apply_remote(LeagueState::default())
            .await
            .unwrap();
        tokio::time::sleep(DEBOUNCE * 2).await;

        drop(coordinator);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_supersedes_pending_local() {
        let coordinator = seeded().await;

        let mut publisher = MockSyncPublisher::new();
        publisher.expect_publish_state().times(0);

        let handle = OutboundSync::spawn(coordinator.subscribe(), Arc::new(publisher), DEBOUNCE);

        coordinator.add_player("Eva").await.unwrap();
        tokio::time::sleep(DEBOUNCE / 4).await;
        coordinator
            .apply_remote(LeagueState::default())
            .await
            .unwrap();
        tokio::time::sleep(DEBOUNCE * 2).await;

        drop(coordinator);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_edit_flushed_on_shutdown() {
        let coordinator = seeded().await;

        let mut publisher = MockSyncPublisher::new();
        publisher
            .expect_publish_state()
            .withf(|state: &LeagueState| state.players.len() == 5)
            .times(1)
            .returning(|_| Ok(()));

        let handle = OutboundSync::spawn(coordinator.subscribe(), Arc::new(publisher), DEBOUNCE);

        coordinator.add_player("Eva").await.unwrap();
        tokio::task::yield_now().await;
        drop(coordinator);

        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_failure_is_not_fatal() {
        let coordinator = seeded().await;

        let mut publisher = MockSyncPublisher::new();
        publisher.expect_publish_state().times(2).returning(|_| {
            Err(LeagueError::SyncFailed {
                message: "store offline".to_string(),
            }
            .into())
        });

        let handle = OutboundSync::spawn(coordinator.subscribe(), Arc::new(publisher), DEBOUNCE);

        coordinator.add_player("Eva").await.unwrap();
        tokio::time::sleep(DEBOUNCE * 2).await;
        coordinator.add_player("Finn").await.unwrap();
        tokio::time::sleep(DEBOUNCE * 2).await;

        drop(coordinator);
        handle.await.unwrap();
    }
}
