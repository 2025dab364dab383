//! sou-panel: settings for the sou code-search indexer
//!
//! Usage:
//!   sou-panel              - Open the settings window
//!   sou-panel <command>    - Run one action and print the result
//!   sou-panel help         - Show all commands

mod app;
mod bridge;
mod clipboard;
mod commands;
mod error;
mod panel;
mod ui;

use std::env;
use std::sync::Arc;

use app::SettingsApp;
use bridge::http::HttpBridge;
use bridge::{export_dir, HostBridge};
use clipboard::SystemClipboard;
use commands::Command;
use iced::{window, Size};
use panel::console::{self, LogsOutcome};
use panel::speed::format_ms;
use panel::projects::index_new_project;
use panel::{DetectOutcome, SettingsPanel, SpeedTestParams, SpeedTestStep};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    // try_init so a second call never panics
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().skip(1).collect();
    match Command::parse(&args) {
        Command::Panel => start_panel(),
        command => {
            if !handle_cli_command(command) {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn connect() -> Arc<dyn HostBridge> {
    let addr = bridge::bridge_addr();
    tracing::debug!(addr = %addr, "using host bridge");
    Arc::new(HttpBridge::new(&addr))
}

/// Run one command to completion. Returns false on failure.
fn handle_cli_command(command: Command) -> bool {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return false;
        }
    };
    let bridge = connect();
    let mut panel = SettingsPanel::new(bridge.clone());

    rt.block_on(async move {
        match command {
            Command::Panel => true,
            Command::Help => {
                println!("{}", Command::help_text());
                true
            }
            Command::Invalid { message } => {
                eprintln!("{}", message);
                eprintln!("Run 'sou-panel help' for usage");
                false
            }
            Command::Show => {
                let notices = panel.mount().await;
                for notice in &notices {
                    eprintln!("{}", notice.message);
                }
                if !panel.store.is_loaded() {
                    return false;
                }
                print_config(&panel);
                true
            }
            Command::TestConnection => {
                if let Err(e) = panel.store.load(bridge.as_ref()).await {
                    eprintln!("Error: {}", e);
                    return false;
                }
                match panel.store.test_connection(bridge.as_ref()).await {
                    Ok(report) => {
                        println!("{}", report.message);
                        report.success
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        false
                    }
                }
            }
            Command::Detect { extra_ports } => match panel.detect_proxy(&extra_ports).await {
                Ok(DetectOutcome::NoneFound) => {
                    println!("No local proxy found");
                    true
                }
                Ok(DetectOutcome::Applied(hit)) => {
                    println!("Found {}", hit.label());
                    true
                }
                Ok(DetectOutcome::ChooseOne(list)) => {
                    println!("Found {} proxies (fastest first):", list.len());
                    for (i, proxy) in list.iter().enumerate() {
                        println!("  {}. {}", i + 1, proxy.label());
                    }
                    true
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    false
                }
            },
            Command::SpeedTest {
                mode,
                project_root,
                export,
            } => {
                if let Err(e) = panel.store.load(bridge.as_ref()).await {
                    eprintln!("Error: {}", e);
                    return false;
                }
                let mut step = panel.speed_test(SpeedTestParams::new(mode)).await;
                // A root on the command line answers the project picker:
                // a listed project is used as is, anything else is indexed first.
                let awaiting = matches!(step, Ok(SpeedTestStep::AwaitingProject));
                if let (true, Some(root)) = (awaiting, project_root) {
                    let listed = panel.projects.projects().iter().any(|p| p.project_root == root);
                    step = if listed {
                        panel.pick_project(&root).await
                    } else {
                        panel.add_project(&root).await
                    };
                }
                match step {
                    Ok(SpeedTestStep::Completed) => {
                        print_speed_result(&panel);
                        if export {
                            match panel.export_report(&export_dir()) {
                                Ok(path) => println!("Report saved to {}", path.display()),
                                Err(e) => {
                                    eprintln!("Error: {}", e);
                                    return false;
                                }
                            }
                        }
                        panel.proxy.result().is_some_and(|r| r.success)
                    }
                    Ok(SpeedTestStep::AwaitingProject) => {
                        eprintln!("The {} test uploads a project. Indexed projects:", mode);
                        for project in panel.projects.projects() {
                            eprintln!("  {} ({} files)", project.project_root, project.total_files);
                        }
                        eprintln!("Re-run with one: sou-panel speedtest {} <root>", mode);
                        false
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        false
                    }
                }
            }
            Command::Projects => {
                let _ = panel.sync.refresh(bridge.as_ref()).await;
                match panel.projects.list_indexed(bridge.as_ref()).await {
                    Ok(projects) if projects.is_empty() => {
                        println!("No indexed projects");
                        true
                    }
                    Ok(projects) => {
                        for project in projects {
                            let watched = if panel.sync.is_watched(&project.project_root) {
                                " [watched]"
                            } else {
                                ""
                            };
                            println!(
                                "{}  {} files  {}{}",
                                project.project_root, project.total_files, project.status, watched
                            );
                        }
                        true
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        false
                    }
                }
            }
            Command::Index { root } => {
                match index_new_project(bridge.as_ref(), &root).await {
                    Ok((_, message)) => {
                        println!("{}", message);
                        true
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        false
                    }
                }
            }
            Command::Search { root, query } => {
                panel.console.project_root = root;
                panel.console.query = query;
                match panel.console.run(bridge.as_ref()).await {
                    Ok(output) if output.is_error() => {
                        eprintln!("{}", output.text());
                        false
                    }
                    Ok(output) => {
                        println!("{}", output.text());
                        true
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        false
                    }
                }
            }
            Command::Logs => match console::view_logs(bridge.as_ref(), Arc::new(SystemClipboard::new())).await {
                Ok(LogsOutcome::Copied { lines }) => {
                    println!("Copied {} log lines to the clipboard", lines);
                    true
                }
                Ok(LogsOutcome::Empty) => {
                    println!("No log lines yet");
                    true
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    false
                }
            },
            Command::ClearCache => match console::clear_cache(bridge.as_ref()).await {
                Ok(message) => {
                    println!("{}", message);
                    true
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    false
                }
            },
            Command::AutoIndex { enabled } => {
                match panel.sync.set_auto_index(bridge.as_ref(), enabled).await {
                    Ok(()) => {
                        println!("Auto-index {}", if enabled { "enabled" } else { "disabled" });
                        true
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        false
                    }
                }
            }
        }
    })
}

fn print_config(panel: &SettingsPanel) {
    let config = panel.config();
    let proxy = &config.proxy;
    println!("API endpoint:    {}", config.base_url);
    println!("Token:           {}", if config.token.is_empty() { "(not set)" } else { "(set)" });
    println!("Batch size:      {}", config.batch_size);
    println!("Lines per blob:  {}", config.max_lines_per_blob);
    println!("Watch debounce:  {} min", config.watch_debounce_minutes);
    println!("Extensions:      {}", config.text_extensions.join(" "));
    println!("Excludes:        {}", config.exclude_patterns.join(" "));
    println!(
        "Proxy:           {} {}://{}:{}",
        if proxy.enabled { "on" } else { "off" },
        proxy.scheme,
        proxy.host,
        proxy.effective_port()
    );
    println!(
        "Auto-index:      {} ({} watched)",
        if panel.sync.auto_index_enabled { "on" } else { "off" },
        panel.sync.watched_projects.len()
    );
}

fn print_speed_result(panel: &SettingsPanel) {
    let Some(result) = panel.proxy.result() else {
        return;
    };
    println!("{:<28} {:>10} {:>10} {:>7}", "Metric", "Proxy", "Direct", "Diff");
    for metric in &result.metrics {
        println!(
            "{:<28} {:>10} {:>10} {:>7}",
            metric.name,
            format_ms(metric.proxy_time_ms),
            format_ms(metric.direct_time_ms),
            metric.diff().to_string()
        );
        if let Some(error) = metric.error.as_ref().filter(|_| !metric.success) {
            println!("    {}", error);
        }
    }
    println!("\n{}", result.recommendation);
}

fn start_panel() -> iced::Result {
    tracing::info!("Starting sou settings panel...");

    let bridge = connect();
    let clipboard = Arc::new(SystemClipboard::new());
    let report_dir = export_dir();

    iced::application("Sou Settings", SettingsApp::update, SettingsApp::view)
        .subscription(SettingsApp::subscription)
        .theme(SettingsApp::theme)
        .window(window::Settings {
            size: Size::new(820.0, 900.0),
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || SettingsApp::new(bridge, clipboard, report_dir))
}
