//! Clipboard writer
//!
//! Pipes text into the platform's clipboard tool.
//! Supports Wayland (wl-copy), X11 (xclip) and macOS (pbcopy).

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{PanelError, Result};

/// Somewhere copied text can go
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// The desktop clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    /// Feed `text` to a tool's stdin; true when it exited cleanly
    fn pipe_to(program: &str, args: &[&str], text: &str) -> bool {
        let Ok(mut child) = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        else {
            return false;
        };

        if let Some(mut stdin) = child.stdin.take() {
            if stdin.write_all(text.as_bytes()).is_err() {
                let _ = child.kill();
                let _ = child.wait();
                return false;
            }
        }

        child.wait().map(|status| status.success()).unwrap_or(false)
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let candidates: [(&str, &[&str]); 3] = [
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("pbcopy", &[]),
        ];

        for (program, args) in candidates {
            if Self::pipe_to(program, args, text) {
                tracing::debug!(program, bytes = text.len(), "copied to clipboard");
                return Ok(());
            }
        }

        Err(PanelError::Clipboard(
            "no clipboard tool available (install wl-clipboard or xclip)".to_string(),
        ))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_to_reports_tool_outcome() {
        assert!(SystemClipboard::pipe_to("cat", &[], "hello"));
        assert!(!SystemClipboard::pipe_to("sou-panel-no-such-tool", &[], "hello"));
    }

    #[test]
    fn test_pipe_to_reaps_tool_that_stops_reading() {
        // `true` exits without reading, so a large write hits a closed pipe
        let text = "x".repeat(4 * 1024 * 1024);
        assert!(!SystemClipboard::pipe_to("true", &[], &text));
    }
}
