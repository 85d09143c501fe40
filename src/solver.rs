use serde::Serialize;
use tracing::{info, instrument};

use crate::color::{validate_coloring, Coloring};
use crate::config::SolverConfig;
use crate::errors::ColoringError;
use crate::graph::Graph;
use crate::search::dsatur::dsatur;
use crate::search::local_search::{LocalSearch, SearchStats};

/// result of a solving run
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// best proper coloring found (colors 1..=k)
    pub coloring: Coloring,
    /// number of colors of the DSATUR solution
    pub initial_colors: usize,
    /// local search statistics
    pub stats: SearchStats,
}

/** solves the coloring problem with the default parameters.
Returns a proper coloring using at most as many colors as DSATUR. */
pub fn solve(graph: &mut Graph) -> Result<Coloring, ColoringError> {
    Ok(solve_with_config(graph, &SolverConfig::default())?.coloring)
}

/** solves the coloring problem:
    1. builds an initial solution with DSATUR (stored in the graph)
    2. refines a copy of it by local search, within the DSATUR palette
    3. returns the best proper coloring found, with its colors renumbered 1..=k
*/
#[instrument(skip_all, fields(n = graph.nb_vertices(), m = graph.nb_edges()))]
pub fn solve_with_config(graph: &mut Graph, config: &SolverConfig) -> Result<SolveReport, ColoringError> {
    let initial_colors = dsatur(graph)?;
    let graph: &Graph = graph;
    let mut local_search = LocalSearch::new(graph, graph.copy_node_states(), initial_colors, config)?;
    local_search.run();
    let coloring = local_search.best_coloring().compacted();
    debug_assert!(validate_coloring(graph, &coloring));
    info!(initial_colors, final_colors = coloring.nb_colors(), "solved");
    Ok(SolveReport {
        coloring,
        initial_colors,
        stats: local_search.stats().clone(),
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() {
        let mut g = Graph::from_edges(3, &[(0, 1), (0, 2), (1, 2)]).unwrap();
        let coloring = solve(&mut g).unwrap();
        assert_eq!(coloring.nb_colors(), 3);
        assert!(validate_coloring(&g, &coloring));
    }

    #[test]
    fn test_bipartite() {
        let mut g = Graph::from_edges(4, &[(0, 2), (0, 3), (1, 2), (1, 3)]).unwrap();
        let coloring = solve(&mut g).unwrap();
        assert_eq!(coloring.nb_colors(), 2);
        assert_eq!(coloring.color(0), coloring.color(1));
        assert_eq!(coloring.color(2), coloring.color(3));
        assert!(validate_coloring(&g, &coloring));
    }

    #[test]
    fn test_single_vertex() {
        let mut g = Graph::new(1).unwrap();
        assert_eq!(solve(&mut g).unwrap().colors(), &[1]);
    }

    #[test]
    fn test_random_graphs() {
        for seed in 0..5 {
            let mut g = Graph::random(60, 0.25, seed);
            let config = SolverConfig { seed, trials_per_round: 5000, ..SolverConfig::default() };
            let report = solve_with_config(&mut g, &config).unwrap();
            assert!(validate_coloring(&g, &report.coloring));
            let k = report.coloring.nb_colors();
            assert!(k <= report.initial_colors);
            assert_eq!(report.stats.primal_list.last(), Some(&k));
            // colors are contiguous
            assert!(report.coloring.colors().iter().all(|c| *c >= 1 && *c <= k));
        }
    }

    #[test]
    fn test_petersen() {
        let mut g = crate::io::dimacs::read_dimacs("insts/petersen.col").unwrap();
        let report = solve_with_config(&mut g, &SolverConfig::default()).unwrap();
        assert!(validate_coloring(&g, &report.coloring));
        // the Petersen graph contains odd cycles
        assert!(report.coloring.nb_colors() >= 3);
        assert!(report.coloring.nb_colors() <= report.initial_colors);
    }

    #[test]
    fn test_deterministic() {
        let config = SolverConfig { seed: 12, trials_per_round: 3000, ..SolverConfig::default() };
        let mut g1 = Graph::random(50, 0.3, 8);
        let mut g2 = g1.clone();
        let r1 = solve_with_config(&mut g1, &config).unwrap();
        let r2 = solve_with_config(&mut g2, &config).unwrap();
        assert_eq!(r1.coloring, r2.coloring);
        assert_eq!(r1.stats.trials, r2.stats.trials);
    }
}
