use std::collections::TryReserveError;

use thiserror::Error;

use crate::color::VertexId;

/** Errors raised while building, reading or coloring a graph.
None of them is recoverable for the current solve: the caller reports it and aborts.
*/
#[derive(Error, Debug)]
pub enum ColoringError {
    /// the graph itself cannot be solved (no vertices, self-loop, ...)
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
    /// an edge references a vertex id outside of [0,n)
    #[error("vertex {node} out of range (graph has {n} vertices)")]
    OutOfRange {
        /// offending vertex id
        node: VertexId,
        /// number of vertices of the graph
        n: usize,
    },
    /// host memory exhaustion while growing a buffer
    #[error("memory allocation failed")]
    AllocationFailure(#[from] TryReserveError),
    /// an element was requested from an exhausted priority queue
    #[error("priority queue is empty")]
    EmptyQueue,
    /// malformed instance or solution file (1-based line number)
    #[error("input data not in expected format on line {line}: {reason}")]
    Format {
        /// line number (starting at 1)
        line: usize,
        /// what went wrong
        reason: String,
    },
    /// invalid command line parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// io error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// json (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColoringError {
    /// builds a format error for the given line
    pub fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format { line, reason: reason.into() }
    }
}
