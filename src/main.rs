use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use mailgraph::app::{App, PlotData};
use mailgraph::config::Config;
use mailgraph::graph::read_archive_graph;
use mailgraph::report::edge_lines;
use mailgraph::ui::render;

fn main() -> Result<()> {
    mailgraph::logging::init();

    let config = Arc::new(Config::load());

    // Optional positional argument overrides the configured archive
    let cli_archive = std::env::args().nth(1);
    let path = config.archive_path(cli_archive.as_deref());

    let graph = read_archive_graph(
        &path,
        config.graph.build_options(),
        config.graph.lowercase_addresses,
    )
    .with_context(|| format!("failed to build graph from {}", path.display()))?;

    // Print edges with message subject
    let mut stdout = io::stdout().lock();
    for line in edge_lines(&graph) {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;
    drop(stdout);

    let mut app = App::new(PlotData::new(&graph, &config), config);
    run_plots(&mut app)?;

    // Statistics come last; a failure is fatal once the screens are closed
    let summary = app
        .data
        .summary
        .context("failed to compute graph statistics")?;
    for line in summary.lines() {
        info!("{}", line);
    }

    Ok(())
}

/// Show the plot screens until the user quits or pages past the last one
fn run_plots(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    // Restore the terminal before any error reaches the user
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| render(app, f))?;

        // Poll with timeout so we redraw on resize
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Right
                | KeyCode::Enter => app.next_view(),
                KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left => app.previous_view(),
                _ => {}
            }
        }
    }

    Ok(())
}
