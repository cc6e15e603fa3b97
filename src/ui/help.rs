use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::ThemeConfig;

pub fn render_help(f: &mut Frame, area: Rect, progress: &str, last: bool, theme: &ThemeConfig) {
    let key_style = Style::default().fg(theme.primary());
    let text_style = Style::default().fg(theme.fg_muted());

    let help_text = vec![
        Span::styled(progress.to_string(), Style::default().fg(theme.fg())),
        Span::styled("  ", text_style),
        Span::styled("l/→/Enter", key_style),
        Span::styled(if last { " finish  " } else { " next  " }, text_style),
        Span::styled("h/←", key_style),
        Span::styled(" previous  ", text_style),
        Span::styled("q/Esc", key_style),
        Span::styled(" quit", text_style),
    ];

    let paragraph =
        Paragraph::new(Line::from(help_text)).style(Style::default().bg(theme.bg_panel()));

    f.render_widget(paragraph, area);
}
