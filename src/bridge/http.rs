//! HTTP client for the host bridge
//!
//! Each command is a `POST <base>/invoke/<command>` carrying the argument
//! object as JSON; the reply body is the command's JSON return value.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::types::{
    AcemcpConfig, ConnectionReport, DebugSearchReply, DetectedProxy, IndexedProjectSummary,
    SaveConfigArgs, SpeedTestArgs, SpeedTestResult,
};
use super::HostBridge;
use crate::error::{PanelError, Result};

/// Client for the indexer's command surface
#[derive(Debug, Clone)]
pub struct HttpBridge {
    client: Client,
    base_url: String,
}

impl HttpBridge {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn command_url(&self, command: &str) -> String {
        format!("{}/invoke/{}", self.base_url, command)
    }

    async fn send(&self, command: &str, args: Value) -> Result<reqwest::Response> {
        tracing::debug!(command, "bridge request");
        let response = self
            .client
            .post(self.command_url(command))
            .json(&args)
            .send()
            .await
            .map_err(|e| PanelError::Transport(format!("{} failed: {}", command, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(command, %status, "bridge error reply");
            return Err(error_from_reply(command, status, &body));
        }
        Ok(response)
    }

    /// Invoke a command and decode its JSON return value
    async fn invoke<T: DeserializeOwned>(&self, command: &str, args: Value) -> Result<T> {
        let response = self.send(command, args).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| PanelError::Decode(format!("{}: {}", command, e)))
    }

    /// Invoke a command whose return value carries nothing
    async fn invoke_unit(&self, command: &str, args: Value) -> Result<()> {
        self.send(command, args).await.map(|_| ())
    }
}

/// Map a non-2xx reply to an error.
///
/// A command that returned `Err(message)` arrives as a bare JSON string; that
/// is the backend speaking. Anything else is a plumbing failure.
fn error_from_reply(command: &str, status: StatusCode, body: &str) -> PanelError {
    if let Ok(message) = serde_json::from_str::<String>(body) {
        return PanelError::backend(message);
    }
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body.trim())
    };
    PanelError::Transport(format!("{} failed: {}", command, detail))
}

#[async_trait]
impl HostBridge for HttpBridge {
    async fn get_acemcp_config(&self) -> Result<AcemcpConfig> {
        self.invoke("get_acemcp_config", json!({})).await
    }

    async fn save_acemcp_config(&self, args: &SaveConfigArgs) -> Result<()> {
        let args = serde_json::to_value(args)?;
        self.invoke_unit("save_acemcp_config", args).await
    }

    async fn test_acemcp_connection(&self, base_url: &str, token: &str) -> Result<ConnectionReport> {
        self.invoke(
            "test_acemcp_connection",
            json!({ "baseUrl": base_url, "token": token }),
        )
        .await
    }

    async fn debug_acemcp_search(&self, project_root_path: &str, query: &str) -> Result<DebugSearchReply> {
        self.invoke(
            "debug_acemcp_search",
            json!({ "projectRootPath": project_root_path, "query": query }),
        )
        .await
    }

    async fn read_acemcp_logs(&self) -> Result<Vec<String>> {
        self.invoke("read_acemcp_logs", json!({})).await
    }

    async fn clear_acemcp_cache(&self) -> Result<String> {
        self.invoke("clear_acemcp_cache", json!({})).await
    }

    async fn detect_acemcp_proxy(&self, extra_ports: &[u16]) -> Result<Vec<DetectedProxy>> {
        self.invoke("detect_acemcp_proxy", json!({ "extraPorts": extra_ports }))
            .await
    }

    async fn get_all_acemcp_index_status(&self) -> Result<HashMap<String, IndexedProjectSummary>> {
        self.invoke("get_all_acemcp_index_status", json!({})).await
    }

    async fn check_directory_exists(&self, directory_path: &str) -> Result<bool> {
        self.invoke(
            "check_directory_exists",
            json!({ "directoryPath": directory_path }),
        )
        .await
    }

    async fn trigger_acemcp_index_update(&self, project_root_path: &str) -> Result<String> {
        self.invoke(
            "trigger_acemcp_index_update",
            json!({ "projectRootPath": project_root_path }),
        )
        .await
    }

    async fn test_acemcp_proxy_speed(&self, args: &SpeedTestArgs) -> Result<SpeedTestResult> {
        let args = serde_json::to_value(args)?;
        self.invoke("test_acemcp_proxy_speed", args).await
    }

    async fn get_auto_index_enabled(&self) -> Result<bool> {
        self.invoke("get_auto_index_enabled", json!({})).await
    }

    async fn set_auto_index_enabled(&self, enabled: bool) -> Result<()> {
        self.invoke_unit("set_auto_index_enabled", json!({ "enabled": enabled }))
            .await
    }

    async fn get_watching_projects(&self) -> Result<Vec<String>> {
        self.invoke("get_watching_projects", json!({})).await
    }
}
