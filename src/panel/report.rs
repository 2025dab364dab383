//! Speed test report export
//!
//! Reports are shareable, so they record whether a token or proxy password
//! is configured but never the values themselves.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::speed::SpeedTestParams;
use super::SearchToolConfig;
use crate::bridge::types::{ProxyScheme, SpeedTestMode, SpeedTestResult, UploadMode};
use crate::error::Result;

pub const REPORT_TOOL: &str = "sou";

#[derive(Debug, Clone, Serialize)]
pub struct SpeedTestReport {
    pub tool: &'static str,
    pub timestamp: String,
    pub mode: SpeedTestMode,
    pub query: String,
    pub project: ReportProject,
    pub proxy: ReportProxy,
    pub config: ReportConfig,
    pub result: SpeedTestResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportProject {
    pub root: Option<String>,
    pub name: Option<String>,
    pub upload_mode: UploadMode,
    pub upload_max_files: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportProxy {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub scheme: ProxyScheme,
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password_set: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub base_url: String,
    pub token_set: bool,
}

/// `toISOString()`-style UTC timestamp with millisecond precision
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `sou-speedtest-2026-10-19_08-30-00-123.json` for `2026-10-19T08:30:00.123Z`
pub fn report_filename(at: DateTime<Utc>) -> String {
    let stamp = iso_timestamp(at).replace([':', '.'], "-").replacen('T', "_", 1);
    let stamp = stamp.strip_suffix('Z').unwrap_or(&stamp);
    format!("{}-speedtest-{}.json", REPORT_TOOL, stamp)
}

/// Last path component of a project root, for either separator style
fn project_name(root: &str) -> Option<String> {
    root.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

impl SpeedTestReport {
    pub fn build(
        config: &SearchToolConfig,
        params: &SpeedTestParams,
        result: &SpeedTestResult,
        at: DateTime<Utc>,
    ) -> Result<Self> {
        let root = params.project_root().map(str::to_string);
        let proxy = config.proxy.decomposed()?;
        Ok(Self {
            tool: REPORT_TOOL,
            timestamp: iso_timestamp(at),
            mode: result.mode,
            query: params.effective_query().to_string(),
            project: ReportProject {
                name: root.as_deref().and_then(project_name),
                root,
                upload_mode: params.upload_mode,
                upload_max_files: params.upload_max_files,
            },
            proxy: ReportProxy {
                enabled: proxy.enabled,
                scheme: proxy.scheme,
                host: proxy.host.trim().to_string(),
                port: proxy.effective_port(),
                username: proxy.username_opt(),
                password_set: proxy.password_opt().is_some(),
            },
            config: ReportConfig {
                base_url: config.base_url.trim().to_string(),
                token_set: !config.token.trim().is_empty(),
            },
            result: result.clone(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report into `dir`, returning the file path
    pub fn write_to(&self, dir: &Path, at: DateTime<Utc>) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(report_filename(at));
        std::fs::write(&path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "speed test report exported");
        Ok(path)
    }
}
