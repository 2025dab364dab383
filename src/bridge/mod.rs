//! Host bridge: the command surface of the indexer process
//!
//! Every command the panel can issue is one method on [`HostBridge`]. The
//! panel only ever talks to the trait, so tests swap in a recording fake.

pub mod http;
pub mod types;

#[cfg(test)]
pub mod fake;

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use types::{
    AcemcpConfig, ConnectionReport, DebugSearchReply, DetectedProxy, IndexedProjectSummary,
    SaveConfigArgs, SpeedTestArgs, SpeedTestResult,
};

/// Default port the host bridge listens on
pub const DEFAULT_BRIDGE_PORT: u16 = 38270;

/// Bridge address, overridable through `SOU_BRIDGE_URL`
pub fn bridge_addr() -> String {
    std::env::var("SOU_BRIDGE_URL")
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| format!("http://127.0.0.1:{}", DEFAULT_BRIDGE_PORT))
}

/// Where speed test reports are written, overridable through `SOU_EXPORT_DIR`
pub fn export_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("SOU_EXPORT_DIR").filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn get_acemcp_config(&self) -> Result<AcemcpConfig>;

    async fn save_acemcp_config(&self, args: &SaveConfigArgs) -> Result<()>;

    async fn test_acemcp_connection(&self, base_url: &str, token: &str) -> Result<ConnectionReport>;

    async fn debug_acemcp_search(&self, project_root_path: &str, query: &str) -> Result<DebugSearchReply>;

    async fn read_acemcp_logs(&self) -> Result<Vec<String>>;

    async fn clear_acemcp_cache(&self) -> Result<String>;

    async fn detect_acemcp_proxy(&self, extra_ports: &[u16]) -> Result<Vec<DetectedProxy>>;

    async fn get_all_acemcp_index_status(&self) -> Result<HashMap<String, IndexedProjectSummary>>;

    async fn check_directory_exists(&self, directory_path: &str) -> Result<bool>;

    async fn trigger_acemcp_index_update(&self, project_root_path: &str) -> Result<String>;

    async fn test_acemcp_proxy_speed(&self, args: &SpeedTestArgs) -> Result<SpeedTestResult>;

    async fn get_auto_index_enabled(&self) -> Result<bool>;

    async fn set_auto_index_enabled(&self, enabled: bool) -> Result<()>;

    async fn get_watching_projects(&self) -> Result<Vec<String>>;
}
