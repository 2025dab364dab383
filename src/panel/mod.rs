//! Settings panel state
//!
//! One [`SettingsPanel`] per open window. It owns every piece of form state
//! and talks to the indexer only through a [`HostBridge`]. Each component
//! exposes its operations in two halves: a validating/preparing step and an
//! `apply_*` step for the reply, so the iced front end can run the RPC as a
//! task in between. The async methods here chain both halves for the CLI.

pub mod activity;
pub mod config_store;
pub mod console;
pub mod filters;
pub mod notice;
pub mod projects;
pub mod proxy;
pub mod report;
pub mod speed;
pub mod sync;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::bridge::HostBridge;
use crate::error::{PanelError, Result};

pub use activity::{Action, Activity};
pub use config_store::{ConfigStore, SearchToolConfig};
pub use console::DebugConsole;
pub use notice::Notice;
pub use projects::ProjectPicker;
pub use proxy::{DetectOutcome, ProxyAssistant, ProxySettings};
pub use report::SpeedTestReport;
pub use speed::{SpeedTestParams, SpeedTestPlan};
pub use sync::IndexSync;

/// How a speed test request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeedTestStep {
    /// Result stored and ready to display
    Completed,
    /// Picker opened; the request resumes once a project is chosen
    AwaitingProject,
}

pub struct SettingsPanel {
    bridge: Arc<dyn HostBridge>,
    pub store: ConfigStore,
    pub proxy: ProxyAssistant,
    pub projects: ProjectPicker,
    pub console: DebugConsole,
    pub sync: IndexSync,
    pub activity: Activity,
}

impl SettingsPanel {
    pub fn new(bridge: Arc<dyn HostBridge>) -> Self {
        Self {
            bridge,
            store: ConfigStore::new(),
            proxy: ProxyAssistant::new(),
            projects: ProjectPicker::new(),
            console: DebugConsole::new(),
            sync: IndexSync::new(),
            activity: Activity::new(),
        }
    }

    pub fn bridge(&self) -> Arc<dyn HostBridge> {
        self.bridge.clone()
    }

    pub fn config(&self) -> &SearchToolConfig {
        self.store.config()
    }

    /// Initial fetch: configuration, then the sync state pair in parallel.
    ///
    /// Each failure becomes its own notice; nothing here aborts the others.
    pub async fn mount(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if let Err(e) = self.store.load(self.bridge.as_ref()).await {
            notices.push(Notice::failed("Failed to load configuration", &e));
        }
        if let Err(e) = self.sync.refresh(self.bridge.as_ref()).await {
            notices.push(Notice::failed("Failed to load sync status", &e));
        }
        notices
    }

    pub async fn save(&mut self) -> Result<()> {
        self.store.save(self.bridge.as_ref()).await
    }

    pub async fn detect_proxy(&mut self, extra_ports: &str) -> Result<DetectOutcome> {
        let proxy = &mut self.store.config_mut().proxy;
        self.proxy.detect(self.bridge.as_ref(), extra_ports, proxy).await
    }

    /// Run a speed test, or open the project picker if it needs a project
    pub async fn speed_test(&mut self, params: SpeedTestParams) -> Result<SpeedTestStep> {
        let bridge = self.bridge.clone();
        let done = self
            .proxy
            .run_speed_test(bridge.as_ref(), self.store.config(), params)
            .await?
            .is_some();
        if done {
            return Ok(SpeedTestStep::Completed);
        }
        self.projects.open();
        // A failed listing still leaves the "add project" path usable.
        if let Err(e) = self.projects.list_indexed(bridge.as_ref()).await {
            tracing::warn!(error = %e, "could not list indexed projects");
        }
        Ok(SpeedTestStep::AwaitingProject)
    }

    /// Resume the parked speed test with a listed project
    pub async fn pick_project(&mut self, root: &str) -> Result<SpeedTestStep> {
        let root = self.projects.select(root)?;
        self.resume_with(root).await
    }

    /// Index a new directory, then feed it to the parked speed test
    pub async fn add_project(&mut self, path: &str) -> Result<SpeedTestStep> {
        let bridge = self.bridge.clone();
        let (root, message) = self.projects.add_and_index(bridge.as_ref(), path).await?;
        tracing::info!(root = %root, message = %message, "project indexed");
        self.resume_with(root).await
    }

    async fn resume_with(&mut self, root: String) -> Result<SpeedTestStep> {
        let params = self
            .proxy
            .take_pending()
            .ok_or_else(|| PanelError::validation("No speed test is waiting for a project"))?;
        self.speed_test(params.with_project(root)).await
    }

    /// Export the displayed result as a JSON report
    pub fn export_report(&self, dir: &Path) -> Result<PathBuf> {
        let (Some(result), Some(params)) = (self.proxy.result(), self.proxy.result_params()) else {
            return Err(PanelError::validation("Run a speed test before exporting a report"));
        };
        let now = chrono::Utc::now();
        SpeedTestReport::build(self.store.config(), params, result, now)?.write_to(dir, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::fake::FakeBridge;
    use crate::bridge::types::{
        AcemcpConfig, IndexStatus, IndexedProjectSummary, SpeedTestMode, SpeedTestResult,
    };
    use std::collections::HashMap;

    fn speed_result() -> SpeedTestResult {
        SpeedTestResult {
            mode: SpeedTestMode::Compare,
            proxy_info: None,
            metrics: vec![],
            timestamp: "2026-10-19T00:00:00Z".into(),
            recommendation: "ok".into(),
            success: true,
        }
    }

    fn ready_bridge() -> FakeBridge {
        let mut status = HashMap::new();
        status.insert(
            "/indexed".to_string(),
            IndexedProjectSummary {
                project_root: "/indexed".into(),
                status: IndexStatus::Synced,
                total_files: 10,
                last_success_time: None,
            },
        );
        FakeBridge {
            config: Some(AcemcpConfig {
                base_url: Some("https://api.example.com".into()),
                token: Some("tok".into()),
                ..Default::default()
            }),
            auto_index: Some(false),
            watching: Some(vec![]),
            index_status: Some(status),
            existing_dirs: vec!["/new".into()],
            index_message: Some("done".into()),
            speed_result: Some(speed_result()),
            ..FakeBridge::new()
        }
    }

    #[tokio::test]
    async fn test_mount_collects_independent_failures() {
        let bridge = Arc::new(FakeBridge {
            fail_all: true,
            ..FakeBridge::new()
        });
        let mut panel = SettingsPanel::new(bridge);
        let notices = panel.mount().await;
        assert_eq!(notices.len(), 2);
    }

    #[tokio::test]
    async fn test_speed_test_flows_through_picker() {
        let bridge = Arc::new(ready_bridge());
        let mut panel = SettingsPanel::new(bridge.clone());
        assert!(panel.mount().await.is_empty());

        let step = panel
            .speed_test(SpeedTestParams::new(SpeedTestMode::Compare))
            .await
            .unwrap();
        assert_eq!(step, SpeedTestStep::AwaitingProject);
        assert!(panel.projects.is_open());
        assert_eq!(panel.projects.projects().len(), 1);

        let step = panel.pick_project("/indexed").await.unwrap();
        assert_eq!(step, SpeedTestStep::Completed);
        let sent = bridge.speed_requests.lock().unwrap()[0].clone();
        assert_eq!(sent.project_root_path.as_deref(), Some("/indexed"));
        assert!(panel.proxy.pending().is_none());
    }

    #[tokio::test]
    async fn test_added_project_feeds_pending_test() {
        let bridge = Arc::new(ready_bridge());
        let mut panel = SettingsPanel::new(bridge.clone());
        panel.mount().await;
        panel
            .speed_test(SpeedTestParams::new(SpeedTestMode::Proxy))
            .await
            .unwrap();

        let step = panel.add_project("/new").await.unwrap();
        assert_eq!(step, SpeedTestStep::Completed);
        let sent = bridge.speed_requests.lock().unwrap()[0].clone();
        assert_eq!(sent.project_root_path.as_deref(), Some("/new"));
    }

    #[tokio::test]
    async fn test_failed_add_keeps_config_untouched() {
        let bridge = Arc::new(ready_bridge());
        let mut panel = SettingsPanel::new(bridge);
        panel.mount().await;
        panel
            .speed_test(SpeedTestParams::new(SpeedTestMode::Proxy))
            .await
            .unwrap();
        let before = panel.config().clone();

        assert!(panel.add_project("/missing").await.is_err());
        assert_eq!(panel.config(), &before);
        assert!(panel.proxy.pending().is_some());
    }

    #[tokio::test]
    async fn test_export_requires_a_result() {
        let panel = SettingsPanel::new(Arc::new(FakeBridge::new()));
        let err = panel.export_report(Path::new(".")).unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_export_writes_report_file() {
        let bridge = Arc::new(ready_bridge());
        let mut panel = SettingsPanel::new(bridge);
        panel.mount().await;
        panel
            .speed_test(SpeedTestParams::new(SpeedTestMode::Direct))
            .await
            .unwrap();

        let dir = std::env::temp_dir().join(format!("sou-panel-test-{}", std::process::id()));
        let path = panel.export_report(&dir).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("\"token_set\": true"));
        assert!(!body.contains("\"tok\""));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
