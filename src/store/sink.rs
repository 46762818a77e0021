//! Write sink boundary
//!
//! After a toggle commits, the store hands the persistence collaborator a
//! full replacement of the pair's tag set. Delivery failures (network,
//! storage) are the collaborator's concern: it retries or resyncs on its
//! side and reports back only through the absence of a fresh snapshot, so
//! the sink interface is infallible from the store's point of view.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{RoundTag, ToggleCommit};

/// Persistence collaborator interface for committed toggles
#[async_trait]
pub trait RoundWriteSink: Send + Sync {
    /// Accept the full post-toggle tag set for one pair.
    ///
    /// Commits for the same pair arrive in store commit order; the write
    /// is idempotent ("set rounds to exactly this collection").
    async fn commit(&self, commit: ToggleCommit);
}

/// In-memory sink recording every commit, for tests and offline use
#[derive(Default)]
pub struct InMemorySink {
    commits: RwLock<Vec<ToggleCommit>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commits observed so far, in arrival order
    pub async fn commits(&self) -> Vec<ToggleCommit> {
        self.commits.read().await.clone()
    }

    /// Latest committed tag set for a pair, if any toggle was observed
    pub async fn latest_for(&self, company_id: &str, student_id: &str) -> Option<Vec<RoundTag>> {
        let commits = self.commits.read().await;
        commits
            .iter()
            .rev()
            .find(|commit| commit.company_id == company_id && commit.student_id == student_id)
            .map(|commit| commit.rounds.clone())
    }

}

#[async_trait]
impl RoundWriteSink for InMemorySink {
    async fn commit(&self, commit: ToggleCommit) {
        let mut commits = self.commits.write().await;
        commits.push(commit);
    }
}
