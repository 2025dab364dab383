//! Debug console: ad-hoc search, log copy and cache clearing

use crate::bridge::types::DebugSearchReply;
use crate::bridge::HostBridge;
use crate::clipboard::ClipboardSink;
use crate::error::{PanelError, Result};
use std::sync::Arc;

/// What the console shows after a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutput {
    /// Text returned by the search
    Result(String),
    /// Failure reported by the backend, shown verbatim
    BackendError(String),
    /// The call itself failed
    TransportError(String),
}

impl ConsoleOutput {
    pub fn text(&self) -> String {
        match self {
            ConsoleOutput::Result(text) | ConsoleOutput::BackendError(text) => text.clone(),
            ConsoleOutput::TransportError(msg) => format!("Error: {}", msg),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, ConsoleOutput::Result(_))
    }

    /// Map a search reply (or the failure to get one) to console output
    pub fn from_reply(reply: Result<DebugSearchReply>) -> Self {
        match reply {
            Ok(reply) if reply.success => ConsoleOutput::Result(reply.result.unwrap_or_default()),
            Ok(reply) => ConsoleOutput::BackendError(
                reply
                    .error
                    .unwrap_or_else(|| "Search failed without details".to_string()),
            ),
            Err(e) => ConsoleOutput::TransportError(match e {
                PanelError::Transport(msg) | PanelError::Decode(msg) => msg,
                other => other.to_string(),
            }),
        }
    }
}

/// Outcome of the "view logs" action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogsOutcome {
    Copied { lines: usize },
    Empty,
}

#[derive(Debug, Default)]
pub struct DebugConsole {
    pub project_root: String,
    pub query: String,
    output: Option<ConsoleOutput>,
}

impl DebugConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> Option<&ConsoleOutput> {
        self.output.as_ref()
    }

    /// Both fields trimmed and non-empty
    pub fn validate(&self) -> Result<(String, String)> {
        let root = self.project_root.trim();
        let query = self.query.trim();
        if root.is_empty() || query.is_empty() {
            return Err(PanelError::validation("Enter both a project root and a query"));
        }
        Ok((root.to_string(), query.to_string()))
    }

    pub async fn run(&mut self, bridge: &dyn HostBridge) -> Result<&ConsoleOutput> {
        let (root, query) = self.validate()?;
        tracing::info!(root = %root, "debug search");
        let reply = bridge.debug_acemcp_search(&root, &query).await;
        Ok(self.apply_reply(reply))
    }

    pub fn apply_reply(&mut self, reply: Result<DebugSearchReply>) -> &ConsoleOutput {
        self.output.insert(ConsoleOutput::from_reply(reply))
    }

    pub fn clear_output(&mut self) {
        self.output = None;
    }
}

/// Fetch recent log lines and put them on the clipboard.
///
/// The clipboard write waits on an external tool, so it runs on the
/// blocking pool.
pub async fn view_logs(bridge: &dyn HostBridge, clipboard: Arc<dyn ClipboardSink>) -> Result<LogsOutcome> {
    let lines = bridge.read_acemcp_logs().await?;
    tokio::task::spawn_blocking(move || copy_logs(&lines, clipboard.as_ref()))
        .await
        .map_err(|e| PanelError::Clipboard(e.to_string()))?
}

pub fn copy_logs(lines: &[String], clipboard: &dyn ClipboardSink) -> Result<LogsOutcome> {
    if lines.is_empty() {
        return Ok(LogsOutcome::Empty);
    }
    clipboard.set_text(&lines.join("\n"))?;
    Ok(LogsOutcome::Copied { lines: lines.len() })
}

pub async fn clear_cache(bridge: &dyn HostBridge) -> Result<String> {
    let message = bridge.clear_acemcp_cache().await?;
    tracing::info!(message = %message, "cache cleared");
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::fake::FakeBridge;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeClipboard {
        text: Mutex<Option<String>>,
    }

    impl ClipboardSink for FakeClipboard {
        fn set_text(&self, text: &str) -> Result<()> {
            *self.text.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    fn console(root: &str, query: &str) -> DebugConsole {
        DebugConsole {
            project_root: root.into(),
            query: query.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_run_requires_both_fields() {
        let bridge = FakeBridge::new();
        for (root, query) in [("", "q"), ("/r", " "), ("", "")] {
            let mut c = console(root, query);
            assert!(c.run(&bridge).await.unwrap_err().is_validation());
        }
        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_run_shows_result_text() {
        let bridge = FakeBridge {
            debug_reply: Some(DebugSearchReply {
                success: true,
                result: Some("src/main.rs:10 fn main()".into()),
                error: None,
            }),
            ..FakeBridge::new()
        };
        let mut c = console("/repo", "main");
        let output = c.run(&bridge).await.unwrap().clone();
        assert_eq!(output, ConsoleOutput::Result("src/main.rs:10 fn main()".into()));
        assert!(!output.is_error());
    }

    #[tokio::test]
    async fn test_backend_error_is_verbatim_transport_error_is_prefixed() {
        let bridge = FakeBridge {
            debug_reply: Some(DebugSearchReply {
                success: false,
                result: None,
                error: Some("index not built".into()),
            }),
            ..FakeBridge::new()
        };
        let mut c = console("/repo", "main");
        assert_eq!(c.run(&bridge).await.unwrap().text(), "index not built");

        let down = FakeBridge {
            fail_all: true,
            ..FakeBridge::new()
        };
        let text = c.run(&down).await.unwrap().text();
        assert!(text.starts_with("Error: "), "{}", text);
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_view_logs_copies_joined_lines() {
        let bridge = FakeBridge {
            logs: Some(vec!["one".into(), "two".into()]),
            ..FakeBridge::new()
        };
        let clipboard = Arc::new(FakeClipboard::default());
        let outcome = view_logs(&bridge, clipboard.clone()).await.unwrap();
        assert_eq!(outcome, LogsOutcome::Copied { lines: 2 });
        assert_eq!(clipboard.text.lock().unwrap().as_deref(), Some("one\ntwo"));
    }

    #[tokio::test]
    async fn test_view_logs_empty_is_informational() {
        let bridge = FakeBridge {
            logs: Some(vec![]),
            ..FakeBridge::new()
        };
        let clipboard = Arc::new(FakeClipboard::default());
        assert_eq!(view_logs(&bridge, clipboard.clone()).await.unwrap(), LogsOutcome::Empty);
        assert!(clipboard.text.lock().unwrap().is_none());
    }

    /// Blocks inside `set_text` until the test releases it
    struct GatedClipboard {
        gate: Mutex<std::sync::mpsc::Receiver<()>>,
    }

    impl ClipboardSink for GatedClipboard {
        fn set_text(&self, _text: &str) -> Result<()> {
            self.gate
                .lock()
                .unwrap()
                .recv_timeout(std::time::Duration::from_secs(5))
                .map_err(|e| PanelError::Clipboard(e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_view_logs_keeps_runtime_free_while_copying() {
        let bridge = FakeBridge {
            logs: Some(vec!["one".into()]),
            ..FakeBridge::new()
        };
        let (release, gate) = std::sync::mpsc::channel();
        let clipboard = Arc::new(GatedClipboard { gate: Mutex::new(gate) });
        // Single-threaded runtime: the release below only runs if the
        // clipboard write is off the runtime thread.
        let (outcome, _) = tokio::join!(view_logs(&bridge, clipboard), async move {
            tokio::task::yield_now().await;
            release.send(()).unwrap();
        });
        assert_eq!(outcome.unwrap(), LogsOutcome::Copied { lines: 1 });
    }

    #[tokio::test]
    async fn test_clear_cache_returns_message() {
        let bridge = FakeBridge {
            cache_message: Some("Cleared 12 entries".into()),
            ..FakeBridge::new()
        };
        assert_eq!(clear_cache(&bridge).await.unwrap(), "Cleared 12 entries");
    }
}
