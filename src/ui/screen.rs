use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::{
    render_degree_histogram, render_degree_rank, render_help, render_log_log, render_network,
    render_stats,
};
use crate::app::{App, View};

/// Current plot above a one-line help bar
pub fn render(app: &App, f: &mut Frame) {
    let theme = &app.config.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    match app.view {
        View::Layout => render_network(f, chunks[0], &app.data, theme),
        View::DegreeRank => render_degree_rank(f, chunks[0], &app.data, theme),
        View::DegreeHistogram => render_degree_histogram(f, chunks[0], &app.data, theme),
        View::LogLog => render_log_log(f, chunks[0], &app.data, theme),
        View::Stats => render_stats(f, chunks[0], &app.data, theme),
    }

    render_help(
        f,
        chunks[1],
        &app.progress(),
        app.view == View::Stats,
        theme,
    );
}
