use ratatui::{
    layout::{Direction, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
    Frame,
};

use super::{inner_width, truncate, Pane};
use crate::app::{PlotData, View};
use crate::config::ThemeConfig;

/// Horizontal bars for the highest-degree addresses, largest first
pub fn render_degree_rank(f: &mut Frame, area: Rect, data: &PlotData, theme: &ThemeConfig) {
    // Leave at least half the width for the bars themselves
    let label_width = data
        .top_degrees
        .iter()
        .map(|(addr, _)| addr.chars().count())
        .max()
        .unwrap_or(0)
        .min(inner_width(area) / 2);

    let bars: Vec<Bar> = data
        .top_degrees
        .iter()
        .map(|(addr, degree)| {
            Bar::default()
                .value(*degree as u64)
                .label(Line::from(truncate(addr, label_width)))
                .text_value(degree.to_string())
        })
        .collect();

    let title = format!("{}(top {}) ", View::DegreeRank.title(), bars.len());
    let chart = BarChart::default()
        .block(Pane::new(title, theme).block())
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.primary()))
        .value_style(Style::default().fg(theme.bg()).bg(theme.primary()))
        .label_style(Style::default().fg(theme.fg()));

    f.render_widget(chart, area);
}

/// One vertical bar per degree value, zero included
pub fn render_degree_histogram(f: &mut Frame, area: Rect, data: &PlotData, theme: &ThemeConfig) {
    let bars: Vec<Bar> = data
        .histogram
        .iter()
        .enumerate()
        .map(|(degree, count)| {
            Bar::default()
                .value(*count as u64)
                .label(Line::from(degree.to_string()))
        })
        .collect();

    let slots = bars.len().max(1);
    let slot_width = (inner_width(area) / slots).max(1);
    let (bar_width, bar_gap) = if slot_width > 1 {
        (slot_width - 1, 1)
    } else {
        (1, 0)
    };

    let title = format!("{}(count per degree) ", View::DegreeHistogram.title());
    let chart = BarChart::default()
        .block(Pane::new(title, theme).block())
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width.min(u16::MAX as usize) as u16)
        .bar_gap(bar_gap)
        .bar_style(Style::default().fg(theme.secondary()))
        .value_style(Style::default().fg(theme.bg()).bg(theme.secondary()))
        .label_style(Style::default().fg(theme.fg_muted()));

    f.render_widget(chart, area);
}
