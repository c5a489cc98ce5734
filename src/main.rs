mod api;
mod app;
mod config;
mod events;
mod mood;
mod player;
mod ui;
#[cfg(test)]
mod tests;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load()?;

    // ── Logging setup ────────────────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("moodwave=info"));
    // Write logs to file so they don't corrupt the TUI
    let log_file = std::fs::File::create(&config.log_file).ok();
    if let Some(file) = log_file {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    }
    tracing::info!("moodwave {} starting", env!("CARGO_PKG_VERSION"));

    let mut app = App::new(config.clone())?;

    // ── Terminal setup ────────────────────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // ── Panic hook to restore terminal on crash ──────────────────────────────
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
        original_hook(panic_info);
    }));

    // ── Run the app ──────────────────────────────────────────────────────────
    let result = app.run(&mut terminal).await;

    // ── Restore terminal ─────────────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("App error: {e:?}");
        eprintln!("\n\x1b[31mmoodwave crashed:\x1b[0m {e}");
        eprintln!("Check {} for details", config.log_file.display());
    }

    Ok(())
}
