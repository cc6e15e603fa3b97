use serde::Serialize;

use crate::error::GraphError;
use crate::graph::{metrics, GraphKind, MailGraph};

/// One line per edge, insertion order
pub fn edge_lines(graph: &MailGraph) -> Vec<String> {
    graph
        .edges()
        .map(|(from, to, edge)| {
            format!(
                "From: {} To: {} Subject: {}",
                from,
                to,
                edge.message.subject_display()
            )
        })
        .collect()
}

/// Scalar graph statistics
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub kind: GraphKind,
    pub nodes: usize,
    pub edges: usize,
    pub self_loops: usize,
    pub average_clustering: f64,
    /// `None` only when disconnected graphs were explicitly allowed
    pub average_shortest_path_length: Option<f64>,
    pub density: f64,
    pub connected: bool,
}

impl Summary {
    /// Compute every metric. A graph without a defined average path length is
    /// an error unless `allow_disconnected` is set.
    pub fn compute(graph: &MailGraph, allow_disconnected: bool) -> Result<Self, GraphError> {
        let average_shortest_path_length = match metrics::average_shortest_path_length(graph) {
            Ok(length) => Some(length),
            Err(e) if allow_disconnected => {
                tracing::warn!("average shortest path length undefined: {}", e);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            kind: graph.kind(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            self_loops: graph.self_loop_count(),
            average_clustering: metrics::average_clustering(graph),
            average_shortest_path_length,
            density: metrics::density(graph),
            connected: metrics::is_connected(graph),
        })
    }

    pub fn lines(&self) -> Vec<String> {
        let path = self
            .average_shortest_path_length
            .map(|l| format!("{:.4}", l))
            .unwrap_or_else(|| "undefined (graph not connected)".to_string());

        vec![
            format!("Graph kind: {:?}", self.kind),
            format!("Nodes: {}", self.nodes),
            format!("Edges: {}", self.edges),
            format!("Self-loops: {}", self.self_loops),
            format!("Average clustering coefficient: {:.4}", self.average_clustering),
            format!("Average shortest path length: {}", path),
            format!("Density: {:.6}", self.density),
            format!("Connected: {}", if self.connected { "yes" } else { "no" }),
        ]
    }
}
