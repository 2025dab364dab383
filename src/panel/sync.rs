//! Auto-index flag and watched projects, owned by the indexer's sync service

use crate::bridge::HostBridge;
use crate::error::Result;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexSync {
    pub auto_index_enabled: bool,
    pub watched_projects: Vec<String>,
}

/// Both halves of a refresh; each applies on its own
pub type SyncSnapshot = (Result<bool>, Result<Vec<String>>);

impl IndexSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch both values concurrently; they are independent reads
    pub async fn fetch(bridge: &dyn HostBridge) -> SyncSnapshot {
        tokio::join!(bridge.get_auto_index_enabled(), bridge.get_watching_projects())
    }

    /// Apply whatever part of a snapshot succeeded, returning the first error
    pub fn apply(&mut self, (enabled, watched): SyncSnapshot) -> Result<()> {
        let mut first_error = None;
        match enabled {
            Ok(enabled) => self.auto_index_enabled = enabled,
            Err(e) => first_error = Some(e),
        }
        match watched {
            Ok(mut watched) => {
                watched.sort();
                watched.dedup();
                self.watched_projects = watched;
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub async fn refresh(&mut self, bridge: &dyn HostBridge) -> Result<()> {
        let snapshot = Self::fetch(bridge).await;
        self.apply(snapshot)
    }

    pub async fn set_auto_index(&mut self, bridge: &dyn HostBridge, enabled: bool) -> Result<()> {
        bridge.set_auto_index_enabled(enabled).await?;
        self.confirm_auto_index(enabled);
        Ok(())
    }

    /// Record a flag value the backend has accepted
    pub fn confirm_auto_index(&mut self, enabled: bool) {
        tracing::info!(enabled, "auto-index toggled");
        self.auto_index_enabled = enabled;
    }

    pub fn is_watched(&self, root: &str) -> bool {
        self.watched_projects.iter().any(|p| p == root)
    }
}
