//! Local mirror of the indexer configuration

use super::filters::{self, DEFAULT_EXCLUDES, DEFAULT_EXTENSIONS};
use super::proxy::ProxySettings;
use crate::bridge::types::{AcemcpConfig, ConnectionReport, SaveConfigArgs};
use crate::bridge::HostBridge;
use crate::error::{PanelError, Result};

pub const BATCH_SIZE_RANGE: (u32, u32) = (1, 100);
pub const MAX_LINES_RANGE: (u32, u32) = (100, 5000);
pub const DEBOUNCE_MINUTES_RANGE: (u32, u32) = (1, 30);

const MS_PER_MINUTE: u64 = 60_000;

/// Panel-side view of the search tool configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchToolConfig {
    pub base_url: String,
    pub token: String,
    pub batch_size: u32,
    pub max_lines_per_blob: u32,
    pub text_extensions: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub watch_debounce_minutes: u32,
    pub proxy: ProxySettings,
}

impl Default for SearchToolConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            batch_size: 10,
            max_lines_per_blob: 800,
            text_extensions: DEFAULT_EXTENSIONS.clone(),
            exclude_patterns: vec![
                "node_modules".into(),
                ".git".into(),
                "target".into(),
                "dist".into(),
            ],
            watch_debounce_minutes: 3,
            proxy: ProxySettings::default(),
        }
    }
}

/// Whole minutes from a millisecond debounce, by simple rounding
pub fn debounce_ms_to_minutes(ms: u64) -> u32 {
    let minutes = (ms as f64 / MS_PER_MINUTE as f64).round() as u64;
    clamp(minutes.min(u32::MAX as u64) as u32, DEBOUNCE_MINUTES_RANGE)
}

pub fn debounce_minutes_to_ms(minutes: u32) -> u64 {
    clamp(minutes, DEBOUNCE_MINUTES_RANGE) as u64 * MS_PER_MINUTE
}

fn clamp(value: u32, (lo, hi): (u32, u32)) -> u32 {
    value.clamp(lo, hi)
}

/// `^https?://`, case-insensitive
pub fn has_http_scheme(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl SearchToolConfig {
    /// Build local state from a backend reply, filling gaps with defaults
    pub fn from_backend(wire: AcemcpConfig) -> Self {
        let defaults = Self::default();
        let proxy_defaults = ProxySettings::default();

        let proxy = ProxySettings {
            enabled: wire.proxy_enabled.unwrap_or(proxy_defaults.enabled),
            host: wire.proxy_host.unwrap_or(proxy_defaults.host),
            port: wire
                .proxy_port
                .map(|p| p.clamp(1, 65535) as u16)
                .unwrap_or(proxy_defaults.port),
            // An unknown scheme from the host falls back rather than failing the load.
            scheme: wire
                .proxy_type
                .and_then(|t| t.parse().ok())
                .unwrap_or(proxy_defaults.scheme),
            username: wire.proxy_username.unwrap_or_default(),
            password: wire.proxy_password.unwrap_or_default(),
        };

        Self {
            base_url: wire.base_url.unwrap_or_default(),
            token: wire.token.unwrap_or_default(),
            batch_size: wire
                .batch_size
                .map(|v| clamp(v, BATCH_SIZE_RANGE))
                .unwrap_or(defaults.batch_size),
            max_lines_per_blob: wire
                .max_lines_per_blob
                .map(|v| clamp(v, MAX_LINES_RANGE))
                .unwrap_or(defaults.max_lines_per_blob),
            text_extensions: wire
                .text_extensions
                .map(|e| filters::normalize_extensions(&e))
                .unwrap_or(defaults.text_extensions),
            exclude_patterns: wire
                .exclude_patterns
                .map(|p| filters::normalize_patterns(&p))
                .unwrap_or(defaults.exclude_patterns),
            watch_debounce_minutes: wire
                .watch_debounce_ms
                .map(debounce_ms_to_minutes)
                .unwrap_or(defaults.watch_debounce_minutes),
            proxy,
        }
    }
}

impl SaveConfigArgs {
    /// The one place local field names become the host's camelCase names.
    ///
    /// Numbers are clamped and lists normalized here so nothing out of range
    /// reaches the backend even if a widget let it through.
    pub fn from_config(config: &SearchToolConfig) -> Self {
        Self {
            base_url: config.base_url.trim().to_string(),
            token: config.token.trim().to_string(),
            batch_size: clamp(config.batch_size, BATCH_SIZE_RANGE),
            max_lines_per_blob: clamp(config.max_lines_per_blob, MAX_LINES_RANGE),
            text_extensions: filters::normalize_extensions(&config.text_extensions),
            exclude_patterns: filters::normalize_patterns(&config.exclude_patterns),
            watch_debounce_ms: debounce_minutes_to_ms(config.watch_debounce_minutes),
            proxy_enabled: config.proxy.enabled,
            proxy_host: config.proxy.host.trim().to_string(),
            proxy_port: config.proxy.effective_port(),
            proxy_type: config.proxy.scheme,
            proxy_username: config.proxy.username_opt(),
            proxy_password: config.proxy.password_opt(),
        }
    }
}

/// Configuration form state plus the option catalogs it offers
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config: SearchToolConfig,
    extension_options: Vec<String>,
    exclude_options: Vec<String>,
    loaded: bool,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            config: SearchToolConfig::default(),
            extension_options: DEFAULT_EXTENSIONS.clone(),
            exclude_options: DEFAULT_EXCLUDES.clone(),
            loaded: false,
        }
    }

    pub fn config(&self) -> &SearchToolConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchToolConfig {
        &mut self.config
    }

    pub fn extension_options(&self) -> &[String] {
        &self.extension_options
    }

    pub fn exclude_options(&self) -> &[String] {
        &self.exclude_options
    }

    /// Whether a load has ever succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub async fn load(&mut self, bridge: &dyn HostBridge) -> Result<()> {
        let wire = bridge.get_acemcp_config().await?;
        self.apply_loaded(wire);
        Ok(())
    }

    /// Replace local state wholesale with a fetched configuration
    pub fn apply_loaded(&mut self, wire: AcemcpConfig) {
        let config = SearchToolConfig::from_backend(wire);
        let added = filters::merge_into_catalog(&mut self.extension_options, &config.text_extensions)
            + filters::merge_into_catalog(&mut self.exclude_options, &config.exclude_patterns);
        tracing::info!(
            extensions = config.text_extensions.len(),
            merged_options = added,
            "configuration loaded"
        );
        self.config = config;
        self.loaded = true;
    }

    /// Validate the form and build the save payload.
    ///
    /// A URL in the proxy host field is decomposed into the form fields here,
    /// and that rewrite sticks even if the save itself later fails.
    pub fn prepare_save(&mut self) -> Result<SaveConfigArgs> {
        let base_url = self.config.base_url.trim();
        if base_url.is_empty() {
            return Err(PanelError::validation("API endpoint URL is required"));
        }
        if !has_http_scheme(base_url) {
            return Err(PanelError::validation(
                "API endpoint URL must start with http:// or https://",
            ));
        }
        self.config.proxy.expand_url_host()?;
        Ok(SaveConfigArgs::from_config(&self.config))
    }

    pub async fn save(&mut self, bridge: &dyn HostBridge) -> Result<()> {
        let args = self.prepare_save()?;
        bridge.save_acemcp_config(&args).await?;
        tracing::info!("configuration saved");
        Ok(())
    }

    /// Trimmed endpoint and token, checked before a connection test
    pub fn connection_target(&self) -> Result<(String, String)> {
        let base_url = self.config.base_url.trim();
        if !has_http_scheme(base_url) {
            return Err(PanelError::validation(
                "API endpoint URL must start with http:// or https://",
            ));
        }
        let token = self.config.token.trim();
        if token.is_empty() {
            return Err(PanelError::validation("Token is required"));
        }
        Ok((base_url.to_string(), token.to_string()))
    }

    pub async fn test_connection(&self, bridge: &dyn HostBridge) -> Result<ConnectionReport> {
        let (base_url, token) = self.connection_target()?;
        let report = bridge.test_acemcp_connection(&base_url, &token).await?;
        if !report.success {
            tracing::warn!(message = %report.message, "connection test failed");
        }
        Ok(report)
    }

    /// Add a user-typed extension to the catalog and the selection
    pub fn add_extension(&mut self, raw: &str) -> Option<String> {
        let ext = filters::normalize_extension(raw)?;
        filters::merge_into_catalog(&mut self.extension_options, std::slice::from_ref(&ext));
        if !self.config.text_extensions.contains(&ext) {
            self.config.text_extensions.push(ext.clone());
        }
        Some(ext)
    }

    pub fn toggle_extension(&mut self, ext: &str) {
        toggle(&mut self.config.text_extensions, ext);
    }

    /// Add a user-typed exclusion pattern to the catalog and the selection
    pub fn add_exclude(&mut self, raw: &str) -> Option<String> {
        let pattern = raw.trim();
        if pattern.is_empty() {
            return None;
        }
        let pattern = pattern.to_string();
        filters::merge_into_catalog(&mut self.exclude_options, std::slice::from_ref(&pattern));
        if !self.config.exclude_patterns.contains(&pattern) {
            self.config.exclude_patterns.push(pattern.clone());
        }
        Some(pattern)
    }

    pub fn toggle_exclude(&mut self, pattern: &str) {
        toggle(&mut self.config.exclude_patterns, pattern);
    }
}

fn toggle(list: &mut Vec<String>, value: &str) {
    if let Some(pos) = list.iter().position(|v| v == value) {
        list.remove(pos);
    } else {
        list.push(value.to_string());
    }
}
