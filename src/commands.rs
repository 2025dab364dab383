//! Command-line parsing
//!
//! Parses `sou-panel <command> [args]` into a [`Command`]. No command means
//! the desktop panel.

use crate::bridge::types::SpeedTestMode;

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the settings window: (no args)
    Panel,
    /// Print the current configuration: show
    Show,
    /// Test the API endpoint: test
    TestConnection,
    /// Scan for local proxies: detect [ports]
    Detect { extra_ports: String },
    /// Run a speed test: speedtest <proxy|direct|compare> [root] [--export]
    SpeedTest {
        mode: SpeedTestMode,
        project_root: Option<String>,
        export: bool,
    },
    /// List indexed projects: projects
    Projects,
    /// Build the index of a directory: index <root>
    Index { root: String },
    /// Ad-hoc search: search <root> <query...>
    Search { root: String, query: String },
    /// Copy recent logs to the clipboard: logs
    Logs,
    /// Clear the search cache: clear-cache
    ClearCache,
    /// Toggle automatic indexing: auto-index <on|off>
    AutoIndex { enabled: bool },
    /// Show help: help
    Help,
    /// Anything unrecognised, with the reason
    Invalid { message: String },
}

impl Command {
    /// Parse arguments (program name already stripped)
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        let Some((&cmd, rest)) = args.split_first() else {
            return Command::Panel;
        };

        match cmd.to_lowercase().as_str() {
            "show" | "config" => Command::Show,
            "test" | "test-connection" => Command::TestConnection,
            "detect" => Command::Detect {
                extra_ports: rest.join(" "),
            },
            "speedtest" | "speed" => {
                let export = rest.contains(&"--export");
                let positional: Vec<&str> = rest.iter().copied().filter(|a| *a != "--export").collect();
                match positional.first() {
                    None => Command::SpeedTest {
                        mode: SpeedTestMode::Compare,
                        project_root: None,
                        export,
                    },
                    Some(mode) => match mode.parse::<SpeedTestMode>() {
                        Ok(mode) => Command::SpeedTest {
                            mode,
                            project_root: positional.get(1).map(|r| r.to_string()),
                            export,
                        },
                        Err(e) => Command::Invalid {
                            message: e.to_string(),
                        },
                    },
                }
            }
            "projects" | "ls" => Command::Projects,
            "index" => match rest.first() {
                Some(root) => Command::Index {
                    root: root.to_string(),
                },
                None => Command::Invalid {
                    message: "Usage: sou-panel index <root>".to_string(),
                },
            },
            "search" => {
                if rest.len() < 2 {
                    Command::Invalid {
                        message: "Usage: sou-panel search <root> <query>".to_string(),
                    }
                } else {
                    Command::Search {
                        root: rest[0].to_string(),
                        query: rest[1..].join(" "),
                    }
                }
            }
            "logs" => Command::Logs,
            "clear-cache" => Command::ClearCache,
            "auto-index" => match rest.first().map(|s| s.to_lowercase()).as_deref() {
                Some("on" | "true" | "1") => Command::AutoIndex { enabled: true },
                Some("off" | "false" | "0") => Command::AutoIndex { enabled: false },
                _ => Command::Invalid {
                    message: "Usage: sou-panel auto-index <on|off>".to_string(),
                },
            },
            "help" | "--help" | "-h" => Command::Help,
            other => Command::Invalid {
                message: format!("Unknown command: {}", other),
            },
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"sou-panel - settings for the sou code-search indexer

Usage: sou-panel [command]

Commands:
  (none)                         Open the settings window
  show                           Print the current configuration
  test                           Test the API endpoint and token
  detect [ports]                 Scan for local proxies (extra ports: "7890,1080")
  speedtest [mode] [root]        Speed test: proxy, direct or compare (default)
            [--export]           Also write a JSON report
  projects                       List indexed projects
  index <root>                   Build the index of a directory
  search <root> <query>          Run an ad-hoc search
  logs                           Copy recent logs to the clipboard
  clear-cache                    Clear the search cache
  auto-index <on|off>            Toggle automatic indexing
  help                           Show this help

Environment:
  SOU_BRIDGE_URL   Host bridge address
  SOU_EXPORT_DIR   Where speed test reports are written
  RUST_LOG         Log filter (e.g. sou_panel=debug)"#
    }
}
