use ratatui::{
    layout::Rect,
    symbols::Marker,
    widgets::canvas::{Canvas, Line as CanvasLine, Points},
    Frame,
};

use super::Pane;
use crate::app::{PlotData, View};
use crate::config::ThemeConfig;

/// Extra room around the [-1, 1] layout so border nodes stay visible
const MARGIN: f64 = 0.08;

/// Draw the force-directed layout: edges first, nodes on top
pub fn render_network(f: &mut Frame, area: Rect, data: &PlotData, theme: &ThemeConfig) {
    let title = format!(
        "{}({} nodes, {} edges) ",
        View::Layout.title(),
        data.addresses.len(),
        data.edges.len()
    );
    let edge_color = theme.edge();
    let node_color = theme.node();
    let bound = 1.0 + MARGIN;

    let canvas = Canvas::default()
        .block(Pane::new(title, theme).block())
        .background_color(theme.bg())
        .marker(Marker::Braille)
        .x_bounds([-bound, bound])
        .y_bounds([-bound, bound])
        .paint(|ctx| {
            for &(a, b) in &data.edges {
                let (x1, y1) = data.positions[a];
                let (x2, y2) = data.positions[b];
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: edge_color,
                });
            }
            ctx.layer();
            ctx.draw(&Points {
                coords: &data.positions,
                color: node_color,
            });
        });

    f.render_widget(canvas, area);
}
