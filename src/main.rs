//! Passbook - local password manager
//!
//! A vim-style TUI over a searchable, maskable table of credential entries.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod input;
mod table;
mod ui;
mod vault;

use app::config::{default_config_path, default_log_dir};
use app::{App, AppConfig, Configuration};

const LOG_FILE: &str = "passbook.log";

#[derive(Debug, Parser)]
#[command(name = "passbook", version, about)]
struct Cli {
    /// Configuration file (JSON object)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Entries file to open at startup
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let configuration = Configuration::load_or_default(&config_path);
    let mut config = AppConfig::from_configuration(&configuration);
    config.initial_file = cli.file;

    let mut app = App::new(config);
    if let Some(path) = app.config.initial_file.clone() {
        app.open_file(path);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("shutdown");
    result
}

/// Log to a file; the terminal belongs to the UI. Logging stays off when
/// the file cannot be opened.
fn init_logging(verbose: bool) {
    let dir = default_log_dir();
    let file = fs::create_dir_all(&dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))
    });
    let Ok(file) = file else { return };

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    if installed.is_ok() {
        info!(version = env!("CARGO_PKG_VERSION"), "startup");
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.poll_background();

        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key_event(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
