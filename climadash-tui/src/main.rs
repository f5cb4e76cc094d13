//! Climate dashboard TUI — six-panel terminal interface over the OWID CO₂ dataset.
//!
//! Panels:
//! 1. Overview — title, headline indicators, load summary
//! 2. CO₂ — emissions line chart
//! 3. Temperature — temperature change line chart
//! 4. Combined — both series on independent y axes
//! 5. Data — the selected years as a table, newest first
//! 6. Help — keyboard shortcuts

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use climadash_core::data::{open_cache, SourceChoice};
use climadash_core::DashboardConfig;

use crate::app::AppState;
use crate::worker::WorkerCommand;

const DEFAULT_LOG_FILTER: &str = "climadash_core=info,climadash_tui=info";

#[derive(Parser)]
#[command(name = "climadash-tui", about = "Climate change dashboard in the terminal")]
struct Args {
    /// Config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read the dataset from a local CSV instead of downloading it.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Use the deterministic synthetic dataset (offline).
    #[arg(long)]
    synthetic: bool,

    /// Log file (the terminal is owned by the UI).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = DashboardConfig::load(args.config.as_deref()).context("failed to load config")?;

    let log_path = args
        .log_file
        .clone()
        .or_else(|| dirs::cache_dir().map(|d| d.join("climadash").join("climadash.log")))
        .unwrap_or_else(|| PathBuf::from("climadash.log"));
    init_logging(&log_path)?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let choice = SourceChoice::from_flags(args.file, args.synthetic);
    let cache = open_cache(&choice, &config.source).context("failed to build dataset source")?;
    let source_name = cache.source_name().to_string();
    info!(source = %source_name, category = %config.source.category, "starting dashboard");

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(cache, cmd_rx, resp_tx).context("failed to spawn worker thread")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, &config.view, source_name);
    app.request_load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // A blocking fetch cannot be interrupted; leave the thread to die with the process.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    if !app.is_loading() {
        let _ = worker_handle.join();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("dashboard closed");
    result
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log dir {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
