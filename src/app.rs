use std::sync::Arc;

use crate::config::Config;
use crate::error::GraphError;
use crate::graph::{metrics, spring_layout, MailGraph};
use crate::report::Summary;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Layout,
    DegreeRank,
    DegreeHistogram,
    LogLog,
    Stats,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Layout,
        View::DegreeRank,
        View::DegreeHistogram,
        View::LogLog,
        View::Stats,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Layout => " Network ",
            View::DegreeRank => " Degree rank ",
            View::DegreeHistogram => " Degree histogram ",
            View::LogLog => " Degree histogram (log-log) ",
            View::Stats => " Statistics ",
        }
    }

    fn position(self) -> usize {
        View::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }
}

/// Everything the plot screens draw, computed once up front
pub struct PlotData {
    pub addresses: Vec<String>,
    /// Node positions in `[-1, 1]²`, indexed like `addresses`
    pub positions: Vec<(f64, f64)>,
    pub edges: Vec<(usize, usize)>,
    pub top_degrees: Vec<(String, usize)>,
    pub histogram: Vec<usize>,
    pub log_log: Vec<(f64, f64)>,
    /// Computed after the plots. A failure is shown on the stats screen and
    /// handed back to the caller once the screens are closed.
    pub summary: Result<Summary, GraphError>,
}

impl PlotData {
    pub fn new(graph: &MailGraph, config: &Config) -> Self {
        let histogram = metrics::degree_histogram(graph);
        let positions = spring_layout(graph, &config.layout);
        let top_degrees = metrics::top_degrees(graph, config.stats.top_nodes);

        let summary = Summary::compute(graph, config.stats.allow_disconnected);
        if let Err(e) = &summary {
            tracing::warn!("graph statistics failed: {}", e);
        }

        Self {
            addresses: graph.nodes().map(str::to_string).collect(),
            positions,
            edges: graph.edge_positions().collect(),
            top_degrees,
            log_log: metrics::log_log_points(&histogram),
            histogram,
            summary,
        }
    }
}

pub struct App {
    pub config: Arc<Config>,
    pub view: View,
    pub data: PlotData,
    pub should_quit: bool,
}

impl App {
    pub fn new(data: PlotData, config: Arc<Config>) -> Self {
        Self {
            config,
            view: View::Layout,
            data,
            should_quit: false,
        }
    }

    /// Advance to the next plot; past the last one the app quits
    pub fn next_view(&mut self) {
        match View::ALL.get(self.view.position() + 1) {
            Some(&view) => self.view = view,
            None => self.should_quit = true,
        }
    }

    pub fn previous_view(&mut self) {
        let pos = self.view.position();
        if pos > 0 {
            self.view = View::ALL[pos - 1];
        }
    }

    /// "2/5" style indicator for the help bar
    pub fn progress(&self) -> String {
        format!("{}/{}", self.view.position() + 1, View::ALL.len())
    }
}
