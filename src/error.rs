use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("cannot read archive {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed archive entry #{index}: {reason}")]
    Malformed { index: usize, reason: &'static str },
}

#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("graph has no nodes")]
    Empty,

    /// No path from `from` to `to`; average path length is undefined
    #[error("graph is not connected: no path from {from} to {to}")]
    Disconnected { from: String, to: String },
}
