use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Pane;
use crate::app::{PlotData, View};
use crate::config::ThemeConfig;

pub fn render_stats(f: &mut Frame, area: Rect, data: &PlotData, theme: &ThemeConfig) {
    let text_style = Style::default().fg(theme.fg());
    let muted_style = Style::default().fg(theme.fg_muted());
    let key_style = Style::default().fg(theme.primary());

    let mut lines: Vec<Line> = match &data.summary {
        Ok(summary) => summary
            .lines()
            .into_iter()
            .map(|l| Line::from(Span::styled(l, text_style)))
            .collect(),
        Err(e) => vec![
            Line::from(Span::styled(
                "Statistics unavailable:",
                Style::default().fg(theme.secondary()),
            )),
            Line::from(Span::styled(e.to_string(), text_style)),
        ],
    };

    if !data.top_degrees.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Highest degree:", muted_style)));
        for (addr, degree) in &data.top_degrees {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:>6}  ", degree), key_style),
                Span::styled(addr.clone(), text_style),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(Pane::new(View::Stats.title(), theme).block());
    f.render_widget(paragraph, area);
}
