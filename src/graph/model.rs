use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::mail::Message;

/// How repeated sender/recipient pairs are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Directed multigraph: one edge per message and recipient
    #[default]
    Multi,
    /// Undirected simple graph: one edge per address pair, newest message wins
    Simple,
}

impl GraphKind {
    pub fn is_directed(self) -> bool {
        matches!(self, GraphKind::Multi)
    }
}

#[derive(Debug, Clone)]
pub struct MailEdge {
    pub message: Rc<Message>,
}

/// Address graph. Nodes are created on first use and never removed.
///
/// Storage is always a petgraph `DiGraph`; for `GraphKind::Simple` the edge
/// orientation is whatever the first message for that pair used, and lookups
/// ignore it.
#[derive(Debug, Clone)]
pub struct MailGraph {
    kind: GraphKind,
    graph: DiGraph<String, MailEdge>,
    node_index: HashMap<String, NodeIndex>,
}

impl MailGraph {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            graph: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Underlying petgraph storage, for the traversal algorithms
    pub(crate) fn inner(&self) -> &DiGraph<String, MailEdge> {
        &self.graph
    }

    /// Undirected neighbor positions of every node: no parallel edges, no
    /// self-loops
    pub(crate) fn neighbor_sets(&self) -> Vec<HashSet<usize>> {
        self.graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_undirected(idx)
                    .filter(|n| *n != idx)
                    .map(|n| n.index())
                    .collect()
            })
            .collect()
    }

    pub fn contains_node(&self, addr: &str) -> bool {
        self.node_index.contains_key(addr)
    }

    /// Node position (0..node_count) for an address
    pub fn position(&self, addr: &str) -> Option<usize> {
        self.node_index.get(addr).map(|idx| idx.index())
    }

    /// Address at a node position
    pub fn address(&self, position: usize) -> &str {
        &self.graph[NodeIndex::new(position)]
    }

    /// Addresses in node creation order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// `(source, target, edge)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &MailEdge)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
                e.weight(),
            )
        })
    }

    /// Node position pairs in insertion order
    pub fn edge_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
    }

    /// Number of edges joining `a` and `b`; direction counts only for directed kinds
    pub fn edges_between(&self, a: &str, b: &str) -> usize {
        let (Some(&ia), Some(&ib)) = (self.node_index.get(a), self.node_index.get(b)) else {
            return 0;
        };
        self.graph
            .edge_references()
            .filter(|e| {
                let (s, t) = (e.source(), e.target());
                (s == ia && t == ib) || (!self.kind.is_directed() && s == ib && t == ia)
            })
            .count()
    }

    pub fn self_loop_count(&self) -> usize {
        self.graph
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count()
    }

    fn ensure_node(&mut self, addr: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(addr) {
            return idx;
        }
        let idx = self.graph.add_node(addr.to_string());
        self.node_index.insert(addr.to_string(), idx);
        idx
    }

    /// Connect `from` to `to`, creating either node as needed.
    /// For `Simple` an existing edge between the pair gets the new message.
    pub fn add_edge(&mut self, from: &str, to: &str, message: Rc<Message>) -> EdgeIndex {
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        let edge = MailEdge { message };

        if self.kind == GraphKind::Simple {
            if let Some((existing, _)) = self.graph.find_edge_undirected(a, b) {
                self.graph[existing] = edge;
                return existing;
            }
        }

        self.graph.add_edge(a, b, edge)
    }

    /// Drop every edge whose endpoints coincide. Nodes stay, so an address that
    /// only ever mailed itself remains as an isolated node.
    pub fn remove_self_loops(&mut self) -> usize {
        let before = self.graph.edge_count();
        let graph = &self.graph;
        // filter_map keeps node indices and the relative order of surviving edges
        let stripped = graph.filter_map(
            |_, addr| Some(addr.clone()),
            |idx, edge| {
                let (a, b) = graph.edge_endpoints(idx)?;
                (a != b).then(|| edge.clone())
            },
        );
        self.graph = stripped;
        before - self.graph.edge_count()
    }
}
