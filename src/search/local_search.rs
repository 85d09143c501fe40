use std::time::Instant;

use fastrand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use crate::color::{Color, Coloring, Node, VertexId};
use crate::config::SolverConfig;
use crate::errors::ColoringError;
use crate::graph::Graph;
use crate::search::cost::CostModel;

/// number of trials between two checks of the time limit
const TIME_CHECK_PERIOD: usize = 1024;

/// statistics gathered during the refinement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchStats {
    /// number of rounds performed
    pub rounds: usize,
    /// number of proposed moves
    pub trials: usize,
    /// number of accepted (non-worsening) moves
    pub accepted_moves: usize,
    /// number of accepted moves that strictly decreased the cost
    pub improving_moves: usize,
    /// number of colors of the best known solution, each time it improved
    pub primal_list: Vec<usize>,
    /// time spent in the refinement (seconds)
    pub time_searched: f32,
}

/** local search refinement of a proper coloring.
The palette is fixed to the colors 1..=max_colors of the initial solution.
At each trial, a random vertex and a random color are drawn, and the move is accepted
if it does not increase the cost function (see CostModel).
The best solution (proper, with the fewest non-empty classes) is kept aside.

The search is organized in rounds of `trials_per_round` trials. It stops after
`max_unproductive_rounds` consecutive rounds without a strictly improving move
(or when the round or time limits are reached). The time limit is also checked every
TIME_CHECK_PERIOD trials within a round.
*/
#[derive(Debug)]
pub struct LocalSearch<'a> {
    /// reference instance
    graph: &'a Graph,
    /// search parameters
    config: &'a SolverConfig,
    /// random number generator
    rng: Rng,
    /// current solution
    solution: Vec<Node>,
    /// class sizes & bad edges of the current solution
    model: CostModel,
    /// best proper solution found so far
    best: Vec<Node>,
    /// number of non-empty classes of the best solution
    best_nb_colors: usize,
    /// statistics
    stats: SearchStats,
}

impl<'a> LocalSearch<'a> {
    /** creates a local search starting from a proper coloring using the colors 1..=max_colors. */
    pub fn new(
        graph: &'a Graph,
        initial: Vec<Node>,
        max_colors: usize,
        config: &'a SolverConfig,
    ) -> Result<Self, ColoringError> {
        let model = CostModel::new(graph, &initial, max_colors)?;
        if !model.is_proper() {
            return Err(ColoringError::InvalidGraph(
                "the initial solution of the local search must be a proper coloring".to_string()
            ));
        }
        let best_nb_colors = model.nb_occupied_classes();
        Ok(Self {
            graph,
            config,
            rng: Rng::with_seed(config.seed),
            best: initial.clone(),
            solution: initial,
            model,
            best_nb_colors,
            stats: SearchStats { primal_list: vec![best_nb_colors], ..SearchStats::default() },
        })
    }

    /// current solution
    pub fn solution(&self) -> &[Node] { &self.solution }

    /// cost model of the current solution
    pub fn model(&self) -> &CostModel { &self.model }

    /// number of colors of the best solution
    pub fn best_nb_colors(&self) -> usize { self.best_nb_colors }

    /// best proper coloring found so far
    pub fn best_coloring(&self) -> Coloring { Coloring::from_nodes(&self.best) }

    /// statistics of the search
    pub fn stats(&self) -> &SearchStats { &self.stats }

    /// draws a random vertex and a random color of the palette
    pub fn propose(&mut self) -> (VertexId, Color) {
        let u = self.rng.usize(0..self.graph.nb_vertices());
        let c = self.rng.usize(1..=self.model.max_colors());
        (u, c)
    }

    /** performs one trial. Returns the cost delta if the move was accepted. */
    pub fn step(&mut self) -> Option<i64> {
        let (u, c) = self.propose();
        self.stats.trials += 1;
        if self.solution[u].color == c {
            return None;
        }
        let delta = self.model.evaluate_move(self.graph, &self.solution, u, c) - self.model.cost();
        if delta > 0 {
            return None;
        }
        self.model.commit_move(self.graph, &mut self.solution, u, c);
        self.stats.accepted_moves += 1;
        if delta < 0 { self.stats.improving_moves += 1; }
        trace!(vertex = u, color = c, delta, cost = self.model.cost(), "move accepted");
        if self.model.is_proper() && self.model.nb_occupied_classes() < self.best_nb_colors {
            self.best.copy_from_slice(&self.solution);
            self.best_nb_colors = self.model.nb_occupied_classes();
            self.stats.primal_list.push(self.best_nb_colors);
            info!(nb_colors = self.best_nb_colors, trials = self.stats.trials, "new best solution");
        }
        Some(delta)
    }

    /// true if the time limit (if any) is reached
    fn time_exceeded(&self, t_start: Instant) -> bool {
        match self.config.time_limit {
            None => false,
            Some(time_limit) => t_start.elapsed().as_secs_f32() >= time_limit,
        }
    }

    /** performs a round of trials. Returns true if a strictly improving move was accepted.
    The round is cut short if the time limit is reached. */
    fn round(&mut self, t_start: Instant) -> bool {
        let mut improved = false;
        for i in 0..self.config.trials_per_round {
            if i % TIME_CHECK_PERIOD == 0 && i > 0 && self.time_exceeded(t_start) {
                break;
            }
            if let Some(delta) = self.step() {
                improved |= delta < 0;
            }
        }
        improved
    }

    /** runs rounds until convergence or until a limit of the configuration is reached. */
    #[instrument(skip_all, fields(n = self.graph.nb_vertices(), max_colors = self.model.max_colors()))]
    pub fn run(&mut self) -> &SearchStats {
        let t_start = Instant::now();
        let mut nb_unproductive: usize = 0;
        while nb_unproductive < self.config.max_unproductive_rounds {
            if let Some(max_rounds) = self.config.max_rounds {
                if self.stats.rounds >= max_rounds { break; }
            }
            if self.time_exceeded(t_start) { break; }
            let improved = self.round(t_start);
            self.stats.rounds += 1;
            if improved { nb_unproductive = 0; } else { nb_unproductive += 1; }
            debug!(
                round = self.stats.rounds,
                cost = self.model.cost(),
                occupied = self.model.nb_occupied_classes(),
                best = self.best_nb_colors,
                "round finished"
            );
        }
        self.stats.time_searched += t_start.elapsed().as_secs_f32();
        info!(
            rounds = self.stats.rounds,
            accepted = self.stats.accepted_moves,
            nb_colors = self.best_nb_colors,
            "local search finished"
        );
        &self.stats
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::validate_coloring;
    use crate::search::dsatur::dsatur;

    fn config(seed: u64) -> SolverConfig {
        SolverConfig { seed, trials_per_round: 2000, max_unproductive_rounds: 5, ..SolverConfig::default() }
    }

    #[test]
    fn test_same_seed_same_search() {
        let mut g = Graph::random(40, 0.3, 1);
        let k = dsatur(&mut g).unwrap();
        let conf = config(3);
        let mut ls1 = LocalSearch::new(&g, g.copy_node_states(), k, &conf).unwrap();
        let mut ls2 = LocalSearch::new(&g, g.copy_node_states(), k, &conf).unwrap();
        let mut s1 = ls1.run().clone();
        let mut s2 = ls2.run().clone();
        s1.time_searched = 0.;
        s2.time_searched = 0.;
        assert_eq!(s1, s2);
        assert_eq!(ls1.solution(), ls2.solution());
        assert_eq!(ls1.best_coloring(), ls2.best_coloring());
    }

    #[test]
    fn test_best_never_regresses() {
        for seed in 0..5 {
            let mut g = Graph::random(50, 0.2, seed);
            let k = dsatur(&mut g).unwrap();
            let conf = config(seed);
            let mut ls = LocalSearch::new(&g, g.copy_node_states(), k, &conf).unwrap();
            let mut last_best = ls.best_nb_colors();
            for _ in 0..20_000 {
                ls.step();
                assert!(ls.best_nb_colors() <= last_best);
                last_best = ls.best_nb_colors();
            }
            let primal = &ls.stats().primal_list;
            assert_eq!(primal[0], k);
            assert!(primal.windows(2).all(|w| w[1] < w[0]));
            let best = ls.best_coloring();
            assert!(validate_coloring(&g, &best));
            assert_eq!(best.nb_colors(), ls.best_nb_colors());
        }
    }

    #[test]
    fn test_triangle_cannot_be_improved() {
        let mut g = Graph::from_edges(3, &[(0, 1), (0, 2), (1, 2)]).unwrap();
        let k = dsatur(&mut g).unwrap();
        let conf = config(0);
        let mut ls = LocalSearch::new(&g, g.copy_node_states(), k, &conf).unwrap();
        let stats = ls.run().clone();
        assert_eq!(stats.accepted_moves, 0);
        assert_eq!(stats.rounds, conf.max_unproductive_rounds);
        assert_eq!(ls.best_nb_colors(), 3);
        assert!(validate_coloring(&g, &ls.best_coloring()));
    }

    #[test]
    fn test_removes_a_superfluous_color() {
        // path 0-1-2 colored with 3 colors
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let mut initial = g.copy_node_states();
        initial[0].color = 1;
        initial[1].color = 2;
        initial[2].color = 3;
        let conf = config(9);
        let mut ls = LocalSearch::new(&g, initial, 3, &conf).unwrap();
        ls.run();
        assert_eq!(ls.best_nb_colors(), 2);
        assert_eq!(ls.stats().primal_list, vec![3, 2]);
        let best = ls.best_coloring();
        assert!(validate_coloring(&g, &best));
        assert_eq!(best.nb_colors(), 2);
    }

    #[test]
    fn test_round_limit() {
        let mut g = Graph::random(30, 0.3, 4);
        let k = dsatur(&mut g).unwrap();
        let conf = SolverConfig { max_rounds: Some(2), max_unproductive_rounds: 100, ..config(1) };
        let mut ls = LocalSearch::new(&g, g.copy_node_states(), k, &conf).unwrap();
        assert_eq!(ls.run().rounds, 2);
        assert_eq!(ls.stats().trials, 2 * conf.trials_per_round);
    }

    #[test]
    fn test_time_limit() {
        let mut g = Graph::random(30, 0.3, 4);
        let k = dsatur(&mut g).unwrap();
        let conf = SolverConfig { time_limit: Some(0.), ..config(1) };
        let mut ls = LocalSearch::new(&g, g.copy_node_states(), k, &conf).unwrap();
        assert_eq!(ls.run().rounds, 0);
    }

    #[test]
    fn test_time_limit_within_a_round() {
        let mut g = Graph::random(30, 0.3, 4);
        let k = dsatur(&mut g).unwrap();
        let conf = SolverConfig {
            time_limit: Some(0.05),
            trials_per_round: usize::MAX,
            ..config(1)
        };
        let mut ls = LocalSearch::new(&g, g.copy_node_states(), k, &conf).unwrap();
        let stats = ls.run().clone();
        assert_eq!(stats.rounds, 1);
        assert!(stats.trials < conf.trials_per_round);
        assert!(stats.trials >= TIME_CHECK_PERIOD);
        assert!(validate_coloring(&g, &ls.best_coloring()));
    }

    #[test]
    fn test_rejects_improper_start() {
        let g = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let mut initial = g.copy_node_states();
        initial[0].color = 1;
        initial[1].color = 1;
        let conf = config(0);
        assert!(LocalSearch::new(&g, initial, 2, &conf).is_err());
    }
}
