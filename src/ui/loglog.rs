use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    widgets::{Axis, Chart, Dataset, GraphType},
    Frame,
};

use super::Pane;
use crate::app::{PlotData, View};
use crate::config::ThemeConfig;

/// Power-of-ten tick labels from 10^0 up to the axis end
fn decade_labels(max_exponent: f64) -> Vec<String> {
    (0..=max_exponent as u32).map(|e| format!("1e{}", e)).collect()
}

/// Scatter of log10(count) against log10(degree)
pub fn render_log_log(f: &mut Frame, area: Rect, data: &PlotData, theme: &ThemeConfig) {
    let axis_end = |values: &mut dyn Iterator<Item = f64>| {
        values.fold(1.0_f64, f64::max).ceil()
    };
    let x_max = axis_end(&mut data.log_log.iter().map(|p| p.0));
    let y_max = axis_end(&mut data.log_log.iter().map(|p| p.1));

    let dataset = Dataset::default()
        .name("nodes")
        .marker(Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(theme.primary()))
        .data(&data.log_log);

    let axis_style = Style::default().fg(theme.fg_muted());
    let chart = Chart::new(vec![dataset])
        .block(Pane::new(View::LogLog.title(), theme).block())
        .x_axis(
            Axis::default()
                .title("degree")
                .style(axis_style)
                .bounds([0.0, x_max])
                .labels(decade_labels(x_max)),
        )
        .y_axis(
            Axis::default()
                .title("nodes")
                .style(axis_style)
                .bounds([0.0, y_max])
                .labels(decade_labels(y_max)),
        );

    f.render_widget(chart, area);
}
