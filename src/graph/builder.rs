use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info};

use super::model::{GraphKind, MailGraph};
use crate::error::ArchiveError;
use crate::mail::{ArchiveReader, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub kind: GraphKind,
    pub strip_self_loops: bool,
}

impl BuildOptions {
    /// Directed multigraph, self-loops kept
    pub fn multi() -> Self {
        Self::for_kind(GraphKind::Multi)
    }

    /// Undirected simple graph, self-loops stripped
    pub fn simple() -> Self {
        Self::for_kind(GraphKind::Simple)
    }

    pub fn for_kind(kind: GraphKind) -> Self {
        Self {
            kind,
            strip_self_loops: kind == GraphKind::Simple,
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::multi()
    }
}

/// Incrementally turns messages into a `MailGraph`
pub struct GraphBuilder {
    options: BuildOptions,
    graph: MailGraph,
    messages: usize,
    without_sender: usize,
}

impl GraphBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            graph: MailGraph::new(options.kind),
            messages: 0,
            without_sender: 0,
        }
    }

    /// Add one edge per distinct recipient. Returns the number of edges touched.
    pub fn add_message(&mut self, message: Message) -> usize {
        self.messages += 1;

        let Some(sender) = message.sender().map(str::to_string) else {
            debug!(index = message.index, "message has no sender address, skipped");
            self.without_sender += 1;
            return 0;
        };

        let mut recipients: Vec<String> = Vec::new();
        for addr in message.recipients() {
            if !recipients.contains(&addr.addr) {
                recipients.push(addr.addr.clone());
            }
        }

        let message = Rc::new(message);
        for recipient in &recipients {
            self.graph.add_edge(&sender, recipient, Rc::clone(&message));
        }

        recipients.len()
    }

    pub fn finish(mut self) -> MailGraph {
        let stripped = if self.options.strip_self_loops {
            self.graph.remove_self_loops()
        } else {
            0
        };

        info!(
            messages = self.messages,
            without_sender = self.without_sender,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            self_loops_removed = stripped,
            kind = ?self.options.kind,
            "graph built"
        );

        self.graph
    }
}

/// Build a graph from a message stream, stopping at the first read error
pub fn build_graph<I>(messages: I, options: BuildOptions) -> Result<MailGraph, ArchiveError>
where
    I: IntoIterator<Item = Result<Message, ArchiveError>>,
{
    let mut builder = GraphBuilder::new(options);
    for message in messages {
        builder.add_message(message?);
    }
    Ok(builder.finish())
}

/// Read an mbox archive from disk straight into a graph
pub fn read_archive_graph(
    path: &Path,
    options: BuildOptions,
    lowercase: bool,
) -> Result<MailGraph, ArchiveError> {
    info!(path = %path.display(), "reading archive");
    build_graph(ArchiveReader::open(path, lowercase)?, options)
}
