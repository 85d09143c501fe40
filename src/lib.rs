//! DSATUR + local search implementation of the Graph Coloring problem

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]


/// vertices, colorings and solution checker
pub mod color;

/// graph model (adjacency + coloring state of the vertices)
pub mod graph;

/// max priority queue with priorities computed at insertion
pub mod pqueue;

/// errors
pub mod errors;

/// local search parameters
pub mod config;

/// read/write instances & solutions
pub mod io;

/// search procedures for the graph coloring problem
pub mod search;

/// solver entry points (DSATUR followed by local search)
pub mod solver;

/// helper and utility methods for executables
pub mod util;

pub use color::{validate_coloring, Coloring};
pub use errors::ColoringError;
pub use graph::Graph;
pub use solver::{solve, solve_with_config, SolveReport};
