//! Speed test requests and the values derived from their results

use std::fmt;

use super::proxy::ProxySettings;
use crate::bridge::types::{SpeedMetric, SpeedTestArgs, SpeedTestMode, UploadMode};

pub const DEFAULT_TEST_QUERY: &str = "function definition";
pub const DEFAULT_UPLOAD_MAX_FILES: u32 = 200;

/// What the user asked to measure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedTestParams {
    pub mode: SpeedTestMode,
    pub query: String,
    pub project_root: Option<String>,
    pub upload_mode: UploadMode,
    pub upload_max_files: u32,
}

impl SpeedTestParams {
    pub fn new(mode: SpeedTestMode) -> Self {
        Self {
            mode,
            query: DEFAULT_TEST_QUERY.to_string(),
            project_root: None,
            upload_mode: UploadMode::Sample,
            upload_max_files: DEFAULT_UPLOAD_MAX_FILES,
        }
    }

    pub fn with_project(mut self, root: impl Into<String>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// Selected project root, if it is non-blank
    pub fn project_root(&self) -> Option<&str> {
        self.project_root
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    pub fn effective_query(&self) -> &str {
        let query = self.query.trim();
        if query.is_empty() {
            DEFAULT_TEST_QUERY
        } else {
            query
        }
    }
}

/// Result of checking a speed test's preconditions
#[derive(Debug, Clone, PartialEq)]
pub enum SpeedTestPlan {
    Ready(SpeedTestArgs),
    /// Parked until a project is picked
    NeedsProject,
}

impl SpeedTestArgs {
    /// Build the camelCase payload from the form state.
    ///
    /// Proxy fields are omitted for direct-only runs.
    pub fn new(params: &SpeedTestParams, proxy: &ProxySettings) -> Self {
        let uses_proxy = !matches!(params.mode, SpeedTestMode::Direct);
        Self {
            test_mode: params.mode,
            proxy_host: uses_proxy.then(|| proxy.host.trim().to_string()),
            proxy_port: uses_proxy.then(|| proxy.effective_port()),
            proxy_type: uses_proxy.then_some(proxy.scheme),
            proxy_username: if uses_proxy { proxy.username_opt() } else { None },
            proxy_password: if uses_proxy { proxy.password_opt() } else { None },
            test_query: params.effective_query().to_string(),
            project_root_path: params.project_root().map(str::to_string),
            upload_mode: params.upload_mode,
            upload_max_files: params.upload_max_files.clamp(1, 10_000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improved,
    Degraded,
    Unchanged,
}

/// Proxy-vs-direct comparison for one metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyDiff {
    Unavailable,
    Available {
        /// `round((direct - proxy) / direct * 100)`; positive means the proxy is faster
        percent: i64,
        trend: Trend,
    },
}

impl LatencyDiff {
    pub fn trend(&self) -> Option<Trend> {
        match self {
            LatencyDiff::Available { trend, .. } => Some(*trend),
            LatencyDiff::Unavailable => None,
        }
    }
}

impl fmt::Display for LatencyDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatencyDiff::Unavailable => f.write_str("-"),
            LatencyDiff::Available { percent, trend } => match trend {
                Trend::Improved => write!(f, "↑{}%", percent.abs()),
                Trend::Degraded => write!(f, "↓{}%", percent.abs()),
                Trend::Unchanged => write!(f, "{}%", percent.abs()),
            },
        }
    }
}

/// Compare proxy and direct timings.
///
/// The trend follows the sign of the raw millisecond difference, so a
/// difference that rounds to 0% still reads as improved or degraded.
pub fn calc_diff(proxy_ms: Option<u64>, direct_ms: Option<u64>) -> LatencyDiff {
    let (Some(proxy), Some(direct)) = (proxy_ms, direct_ms) else {
        return LatencyDiff::Unavailable;
    };
    if direct == 0 {
        return LatencyDiff::Unavailable;
    }
    let delta = direct as i128 - proxy as i128;
    let percent = (delta as f64 / direct as f64 * 100.0).round() as i64;
    let trend = match delta.signum() {
        1 => Trend::Improved,
        -1 => Trend::Degraded,
        _ => Trend::Unchanged,
    };
    LatencyDiff::Available { percent, trend }
}

impl SpeedMetric {
    pub fn diff(&self) -> LatencyDiff {
        calc_diff(self.proxy_time_ms, self.direct_time_ms)
    }
}

/// `123 ms`, or `-` when the side was not measured
pub fn format_ms(ms: Option<u64>) -> String {
    ms.map(|v| format!("{} ms", v)).unwrap_or_else(|| "-".to_string())
}
