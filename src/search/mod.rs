//! DSATUR construction and local search refinement for the graph coloring problem.

/// greedy DSATUR algorithm (initial solution)
pub mod dsatur;

/// cost function over color classes, with incremental move evaluation
pub mod cost;

/// local search refinement of a DSATUR solution
pub mod local_search;
