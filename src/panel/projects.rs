//! Picker over the projects the indexer already knows about

use std::collections::HashMap;

use crate::bridge::types::IndexedProjectSummary;
use crate::bridge::HostBridge;
use crate::error::{PanelError, Result};

#[derive(Debug, Default)]
pub struct ProjectPicker {
    projects: Vec<IndexedProjectSummary>,
    open: bool,
    new_path: String,
}

impl ProjectPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[IndexedProjectSummary] {
        &self.projects
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.new_path.clear();
    }

    pub fn new_path(&self) -> &str {
        &self.new_path
    }

    pub fn set_new_path(&mut self, path: String) {
        self.new_path = path;
    }

    pub async fn list_indexed(&mut self, bridge: &dyn HostBridge) -> Result<&[IndexedProjectSummary]> {
        let all = bridge.get_all_acemcp_index_status().await?;
        self.apply_listing(all);
        Ok(&self.projects)
    }

    /// Keep projects that have files indexed, ordered by root path
    pub fn apply_listing(&mut self, all: HashMap<String, IndexedProjectSummary>) {
        let mut projects: Vec<IndexedProjectSummary> = all
            .into_iter()
            .map(|(root, mut summary)| {
                if summary.project_root.is_empty() {
                    summary.project_root = root;
                }
                summary
            })
            .filter(|summary| summary.total_files > 0)
            .collect();
        projects.sort_by(|a, b| a.project_root.cmp(&b.project_root));
        tracing::debug!(count = projects.len(), "indexed projects listed");
        self.projects = projects;
    }

    /// Pick a listed project, closing the picker
    pub fn select(&mut self, root: &str) -> Result<String> {
        let chosen = self
            .projects
            .iter()
            .find(|p| p.project_root == root)
            .map(|p| p.project_root.clone())
            .ok_or_else(|| PanelError::validation(format!("Unknown project: {}", root)))?;
        self.close();
        Ok(chosen)
    }

    /// Check the directory exists, then build its index.
    ///
    /// Returns the trimmed root path and the backend's status message.
    pub async fn add_and_index(&mut self, bridge: &dyn HostBridge, path: &str) -> Result<(String, String)> {
        let indexed = index_new_project(bridge, path).await?;
        self.close();
        Ok(indexed)
    }
}

/// Existence check plus index build for a typed-in directory
pub async fn index_new_project(bridge: &dyn HostBridge, path: &str) -> Result<(String, String)> {
    let root = validate_new_path(path)?;
    if !bridge.check_directory_exists(&root).await? {
        return Err(PanelError::validation(format!("Directory does not exist: {}", root)));
    }
    tracing::info!(root = %root, "indexing new project");
    let message = bridge.trigger_acemcp_index_update(&root).await?;
    Ok((root, message))
}

pub fn validate_new_path(path: &str) -> Result<String> {
    let root = path.trim();
    if root.is_empty() {
        return Err(PanelError::validation("Enter a project directory"));
    }
    Ok(root.to_string())
}
