//! Shared types for host bridge communication
//!
//! Replies use the backend's snake_case field names. Request payloads that the
//! host expects in camelCase carry `rename_all = "camelCase"` and are built by
//! a single conversion function each, next to the state they are built from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;

/// Proxy protocol understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyScheme {
    #[default]
    Http,
    Https,
    Socks5,
}

impl ProxyScheme {
    pub const ALL: [ProxyScheme; 3] = [ProxyScheme::Http, ProxyScheme::Https, ProxyScheme::Socks5];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyScheme::Http => "http",
            ProxyScheme::Https => "https",
            ProxyScheme::Socks5 => "socks5",
        }
    }

    /// Port assumed when a proxy URL omits one
    pub fn default_port(&self) -> u16 {
        match self {
            ProxyScheme::Http => 80,
            ProxyScheme::Https => 443,
            ProxyScheme::Socks5 => 1080,
        }
    }
}

impl fmt::Display for ProxyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProxyScheme {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(ProxyScheme::Http),
            "https" => Ok(ProxyScheme::Https),
            "socks5" => Ok(ProxyScheme::Socks5),
            other => Err(PanelError::validation(format!(
                "Unsupported proxy protocol: {} (expected http, https or socks5)",
                other
            ))),
        }
    }
}

/// Configuration as returned by `get_acemcp_config`.
///
/// Every field is optional: older hosts omit what they don't know about and
/// the panel fills in its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcemcpConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub batch_size: Option<u32>,
    pub max_lines_per_blob: Option<u32>,
    pub text_extensions: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub watch_debounce_ms: Option<u64>,
    pub proxy_enabled: Option<bool>,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u32>,
    pub proxy_type: Option<String>,
    pub proxy_username: Option<String>,
    pub proxy_password: Option<String>,
}

/// Payload of `save_acemcp_config`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigArgs {
    pub base_url: String,
    pub token: String,
    pub batch_size: u32,
    pub max_lines_per_blob: u32,
    pub text_extensions: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub watch_debounce_ms: u64,
    pub proxy_enabled: bool,
    pub proxy_host: String,
    pub proxy_port: u16,
    pub proxy_type: ProxyScheme,
    pub proxy_username: Option<String>,
    pub proxy_password: Option<String>,
}

/// Reply of `test_acemcp_connection`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionReport {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Reply of `debug_acemcp_search`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DebugSearchReply {
    pub success: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Proxy found by the backend scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedProxy {
    pub host: String,
    pub port: u16,
    #[serde(alias = "proxy_type", alias = "type")]
    pub scheme: ProxyScheme,
    #[serde(default, alias = "latency_ms")]
    pub response_time_ms: Option<u64>,
}

impl DetectedProxy {
    pub fn label(&self) -> String {
        match self.response_time_ms {
            Some(ms) => format!("{}://{}:{} ({} ms)", self.scheme, self.host, self.port, ms),
            None => format!("{}://{}:{}", self.scheme, self.host, self.port),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTestMode {
    Proxy,
    Direct,
    #[default]
    Compare,
}

impl SpeedTestMode {
    pub const ALL: [SpeedTestMode; 3] = [SpeedTestMode::Proxy, SpeedTestMode::Direct, SpeedTestMode::Compare];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedTestMode::Proxy => "proxy",
            SpeedTestMode::Direct => "direct",
            SpeedTestMode::Compare => "compare",
        }
    }

    /// Every mode except `direct` uploads a project through the proxy
    pub fn needs_project(&self) -> bool {
        !matches!(self, SpeedTestMode::Direct)
    }
}

impl fmt::Display for SpeedTestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpeedTestMode {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proxy" => Ok(SpeedTestMode::Proxy),
            "direct" => Ok(SpeedTestMode::Direct),
            "compare" | "both" => Ok(SpeedTestMode::Compare),
            other => Err(PanelError::validation(format!("Unknown speed test mode: {}", other))),
        }
    }
}

/// How much of the project a speed test uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    #[default]
    Sample,
    Full,
}

impl UploadMode {
    pub const ALL: [UploadMode; 2] = [UploadMode::Sample, UploadMode::Full];
}

impl fmt::Display for UploadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadMode::Sample => f.write_str("sample"),
            UploadMode::Full => f.write_str("full"),
        }
    }
}

/// Payload of `test_acemcp_proxy_speed`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedTestArgs {
    pub test_mode: SpeedTestMode,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
    pub proxy_type: Option<ProxyScheme>,
    pub proxy_username: Option<String>,
    pub proxy_password: Option<String>,
    pub test_query: String,
    pub project_root_path: Option<String>,
    pub upload_mode: UploadMode,
    pub upload_max_files: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyInfo {
    #[serde(rename = "type", alias = "proxy_type")]
    pub scheme: ProxyScheme,
    pub host: String,
    pub port: u16,
}

/// One measured step of a speed test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedMetric {
    pub name: String,
    #[serde(default)]
    pub metric_type: String,
    #[serde(default)]
    pub proxy_time_ms: Option<u64>,
    #[serde(default)]
    pub direct_time_ms: Option<u64>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedTestResult {
    pub mode: SpeedTestMode,
    #[serde(default)]
    pub proxy_info: Option<ProxyInfo>,
    #[serde(default)]
    pub metrics: Vec<SpeedMetric>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub recommendation: String,
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    Idle,
    Indexing,
    Synced,
    Failed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndexStatus::Idle => "idle",
            IndexStatus::Indexing => "indexing",
            IndexStatus::Synced => "synced",
            IndexStatus::Failed => "failed",
            IndexStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Per-project entry of `get_all_acemcp_index_status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedProjectSummary {
    /// Empty when the backend leaves it out; the listing key stands in
    #[serde(default)]
    pub project_root: String,
    pub status: IndexStatus,
    #[serde(default, alias = "file_count")]
    pub total_files: u64,
    #[serde(default)]
    pub last_success_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_scheme_parse_is_case_insensitive() {
        assert_eq!("SOCKS5".parse::<ProxyScheme>().unwrap(), ProxyScheme::Socks5);
        assert!("ftp".parse::<ProxyScheme>().unwrap_err().is_validation());
    }

    #[test]
    fn test_save_args_use_camel_case() {
        let args = SaveConfigArgs {
            base_url: "https://api.example.com".into(),
            token: "t".into(),
            batch_size: 10,
            max_lines_per_blob: 800,
            text_extensions: vec![".rs".into()],
            exclude_patterns: vec![],
            watch_debounce_ms: 180_000,
            proxy_enabled: false,
            proxy_host: "127.0.0.1".into(),
            proxy_port: 7890,
            proxy_type: ProxyScheme::Socks5,
            proxy_username: None,
            proxy_password: None,
        };
        let value = serde_json::to_value(&args).unwrap();
        assert_eq!(value["baseUrl"], "https://api.example.com");
        assert_eq!(value["maxLinesPerBlob"], 800);
        assert_eq!(value["watchDebounceMs"], 180_000);
        assert_eq!(value["proxyType"], "socks5");
        assert!(value.get("base_url").is_none());
    }

    #[test]
    fn test_detected_proxy_accepts_backend_aliases() {
        let proxy: DetectedProxy = serde_json::from_str(
            r#"{"host":"127.0.0.1","port":7890,"proxy_type":"http","response_time_ms":42}"#,
        )
        .unwrap();
        assert_eq!(proxy.scheme, ProxyScheme::Http);
        assert_eq!(proxy.response_time_ms, Some(42));

        let bare: DetectedProxy =
            serde_json::from_str(r#"{"host":"localhost","port":1080,"type":"socks5"}"#).unwrap();
        assert_eq!(bare.response_time_ms, None);
    }

    #[test]
    fn test_unknown_index_status_does_not_fail() {
        let summary: IndexedProjectSummary = serde_json::from_str(
            r#"{"project_root":"/p","status":"paused","total_files":3}"#,
        )
        .unwrap();
        assert_eq!(summary.status, IndexStatus::Unknown);
        assert_eq!(summary.last_success_time, None);
    }

    #[test]
    fn test_listing_entry_without_root_still_decodes() {
        let listing: HashMap<String, IndexedProjectSummary> = serde_json::from_str(
            r#"{"/k":{"status":"synced","total_files":3},"/p":{"project_root":"/p","status":"synced"}}"#,
        )
        .unwrap();
        assert_eq!(listing["/k"].project_root, "");
        assert_eq!(listing["/k"].total_files, 3);
        assert_eq!(listing["/p"].project_root, "/p");
    }
}
