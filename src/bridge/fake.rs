//! Recording in-memory bridge for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::types::{
    AcemcpConfig, ConnectionReport, DebugSearchReply, DetectedProxy, IndexedProjectSummary,
    SaveConfigArgs, SpeedTestArgs, SpeedTestResult,
};
use super::HostBridge;
use crate::error::{PanelError, Result};

/// Canned replies plus a log of every command issued.
///
/// Fields are set before the fake is handed to the code under test; a `None`
/// reply (or `fail_all`) makes the command fail with a transport error.
#[derive(Default)]
pub struct FakeBridge {
    pub config: Option<AcemcpConfig>,
    pub connection: Option<ConnectionReport>,
    pub debug_reply: Option<DebugSearchReply>,
    pub logs: Option<Vec<String>>,
    pub cache_message: Option<String>,
    pub detected: Option<Vec<DetectedProxy>>,
    pub index_status: Option<HashMap<String, IndexedProjectSummary>>,
    pub existing_dirs: Vec<String>,
    pub index_message: Option<String>,
    pub speed_result: Option<SpeedTestResult>,
    pub auto_index: Option<bool>,
    pub watching: Option<Vec<String>>,
    pub fail_all: bool,

    pub calls: Mutex<Vec<String>>,
    pub saved: Mutex<Vec<SaveConfigArgs>>,
    pub speed_requests: Mutex<Vec<SpeedTestArgs>>,
    pub detect_requests: Mutex<Vec<Vec<u16>>>,
    pub auto_index_writes: Mutex<Vec<bool>>,
}

impl FakeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, command: &str) -> Result<()> {
        self.calls.lock().unwrap().push(command.to_string());
        if self.fail_all {
            return Err(PanelError::Transport(format!("{} failed: connection refused", command)));
        }
        Ok(())
    }

    fn reply<T: Clone>(command: &str, value: &Option<T>) -> Result<T> {
        value
            .clone()
            .ok_or_else(|| PanelError::Transport(format!("{} failed: no reply", command)))
    }
}

#[async_trait]
impl HostBridge for FakeBridge {
    async fn get_acemcp_config(&self) -> Result<AcemcpConfig> {
        self.record("get_acemcp_config")?;
        Self::reply("get_acemcp_config", &self.config)
    }

    async fn save_acemcp_config(&self, args: &SaveConfigArgs) -> Result<()> {
        self.record("save_acemcp_config")?;
        self.saved.lock().unwrap().push(args.clone());
        Ok(())
    }

    async fn test_acemcp_connection(&self, _base_url: &str, _token: &str) -> Result<ConnectionReport> {
        self.record("test_acemcp_connection")?;
        Self::reply("test_acemcp_connection", &self.connection)
    }

    async fn debug_acemcp_search(&self, _project_root_path: &str, _query: &str) -> Result<DebugSearchReply> {
        self.record("debug_acemcp_search")?;
        Self::reply("debug_acemcp_search", &self.debug_reply)
    }

    async fn read_acemcp_logs(&self) -> Result<Vec<String>> {
        self.record("read_acemcp_logs")?;
        Self::reply("read_acemcp_logs", &self.logs)
    }

    async fn clear_acemcp_cache(&self) -> Result<String> {
        self.record("clear_acemcp_cache")?;
        Self::reply("clear_acemcp_cache", &self.cache_message)
    }

    async fn detect_acemcp_proxy(&self, extra_ports: &[u16]) -> Result<Vec<DetectedProxy>> {
        self.record("detect_acemcp_proxy")?;
        self.detect_requests.lock().unwrap().push(extra_ports.to_vec());
        Self::reply("detect_acemcp_proxy", &self.detected)
    }

    async fn get_all_acemcp_index_status(&self) -> Result<HashMap<String, IndexedProjectSummary>> {
        self.record("get_all_acemcp_index_status")?;
        Self::reply("get_all_acemcp_index_status", &self.index_status)
    }

    async fn check_directory_exists(&self, directory_path: &str) -> Result<bool> {
        self.record("check_directory_exists")?;
        Ok(self.existing_dirs.iter().any(|d| d == directory_path))
    }

    async fn trigger_acemcp_index_update(&self, _project_root_path: &str) -> Result<String> {
        self.record("trigger_acemcp_index_update")?;
        Self::reply("trigger_acemcp_index_update", &self.index_message)
    }

    async fn test_acemcp_proxy_speed(&self, args: &SpeedTestArgs) -> Result<SpeedTestResult> {
        self.record("test_acemcp_proxy_speed")?;
        self.speed_requests.lock().unwrap().push(args.clone());
        Self::reply("test_acemcp_proxy_speed", &self.speed_result)
    }

    async fn get_auto_index_enabled(&self) -> Result<bool> {
        self.record("get_auto_index_enabled")?;
        Self::reply("get_auto_index_enabled", &self.auto_index)
    }

    async fn set_auto_index_enabled(&self, enabled: bool) -> Result<()> {
        self.record("set_auto_index_enabled")?;
        self.auto_index_writes.lock().unwrap().push(enabled);
        Ok(())
    }

    async fn get_watching_projects(&self) -> Result<Vec<String>> {
        self.record("get_watching_projects")?;
        Self::reply("get_watching_projects", &self.watching)
    }
}
