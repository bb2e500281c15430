//! Terminal resource form.
//!
//! Provides an interactive terminal UI with:
//! - An ID bar for typing or scanning a resource ID
//! - The resource form, showing only the fields that apply
//! - A notices panel for lookup, scan and submit feedback

mod app;
mod components;
mod event;
mod ui;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;

use app::App;
use siddhi_core::{Config, MemoryStore, ResourceManager};

/// Run the TUI application.
pub async fn run(
    config: Config,
    manager: ResourceManager<MemoryStore>,
    previous_crash: Option<String>,
) -> color_eyre::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, manager, previous_crash);

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
