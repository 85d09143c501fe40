use crate::color::{Color, Node, VertexId, UNCOLORED};
use crate::errors::ColoringError;
use crate::graph::Graph;

/// contribution of a color class of size c with e bad edges
fn contribution(c: i64, e: i64) -> i64 { 2 * c * e - c * c }

/** maintains the color classes of a candidate coloring and its cost
    f(S) = ∑_i (2.|C_i|.|E_i| - |C_i|²)
where C_i is the set of vertices colored i and E_i the set of edges with both endpoints colored i.
A proper coloring scores -∑|C_i|², lower when the classes are unbalanced, which pushes towards
emptying classes. Bad edges are penalized by the size of their class.

Moves are evaluated in O(d(v)) without modifying the model, and committed in O(d(v)).
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostModel {
    /// palette size (colors are 1..=max_colors)
    max_colors: usize,
    /// class_sizes[c]: number of vertices colored c (index 0 is unused)
    class_sizes: Vec<i64>,
    /// bad_edges[c]: number of edges whose endpoints are both colored c (index 0 is unused)
    bad_edges: Vec<i64>,
    /// ∑ bad_edges[c]
    nb_bad_edges: i64,
    /// number of non-empty classes
    nb_occupied: usize,
    /// current value of f
    cost: i64,
}

impl CostModel {
    /** initializes the class and bad edge tables from a complete coloring using the colors
    1..=max_colors. Fails if a vertex is uncolored or colored outside of the palette, or if the
    solution does not have one entry per vertex. */
    pub fn new(graph: &Graph, solution: &[Node], max_colors: usize) -> Result<Self, ColoringError> {
        if solution.len() != graph.nb_vertices() {
            return Err(ColoringError::InvalidGraph(format!(
                "the solution has {} vertices, the graph {}", solution.len(), graph.nb_vertices()
            )));
        }
        let mut class_sizes: Vec<i64> = Vec::new();
        class_sizes.try_reserve_exact(max_colors + 1)?;
        class_sizes.resize(max_colors + 1, 0);
        let mut bad_edges: Vec<i64> = Vec::new();
        bad_edges.try_reserve_exact(max_colors + 1)?;
        bad_edges.resize(max_colors + 1, 0);
        for node in solution {
            if node.color == UNCOLORED || node.color > max_colors {
                return Err(ColoringError::InvalidGraph(format!(
                    "vertex {} has color {} outside of the palette 1..={}", node.id, node.color, max_colors
                )));
            }
            class_sizes[node.color] += 1;
        }
        let mut nb_bad_edges = 0;
        for (u, v) in graph.edges() {
            if solution[u].color == solution[v].color {
                bad_edges[solution[u].color] += 1;
                nb_bad_edges += 1;
            }
        }
        let nb_occupied = class_sizes.iter().skip(1).filter(|c| **c > 0).count();
        let mut res = Self {
            max_colors,
            class_sizes,
            bad_edges,
            nb_bad_edges,
            nb_occupied,
            cost: 0,
        };
        res.cost = res.recompute_cost();
        Ok(res)
    }

    /// colors of the palette
    fn palette(&self) -> impl Iterator<Item = Color> { 1..=self.max_colors }

    /// current value of the cost function
    pub fn cost(&self) -> i64 { self.cost }

    /// computes the cost function from scratch (O(k))
    pub fn recompute_cost(&self) -> i64 {
        self.palette()
            .map(|c| contribution(self.class_sizes[c], self.bad_edges[c]))
            .sum()
    }

    /// palette size
    pub fn max_colors(&self) -> usize { self.max_colors }

    /// number of vertices colored c
    pub fn class_size(&self, c: Color) -> usize { self.class_sizes[c] as usize }

    /// number of edges inside the class c
    pub fn class_bad_edges(&self, c: Color) -> usize { self.bad_edges[c] as usize }

    /// total number of bad edges
    pub fn nb_bad_edges(&self) -> usize { self.nb_bad_edges as usize }

    /// number of non-empty color classes
    pub fn nb_occupied_classes(&self) -> usize { self.nb_occupied }

    /// true iff no edge is monochromatic
    pub fn is_proper(&self) -> bool { self.nb_bad_edges == 0 }

    /// (neighbors of u colored like u, neighbors of u colored new_color)
    fn move_conflicts(graph: &Graph, solution: &[Node], u: VertexId, new_color: Color) -> (i64, i64) {
        let old_color = solution[u].color;
        let mut resolved = 0;
        let mut introduced = 0;
        for v in graph.neighbors(u) {
            let c = solution[*v].color;
            if c == old_color { resolved += 1; }
            if c == new_color { introduced += 1; }
        }
        (resolved, introduced)
    }

    /** cost of the solution if u was recolored with new_color. Does not modify anything.
    The move delta is evaluate_move(..) - cost().

    # Panics
    if new_color is not in 1..=max_colors or u is not a vertex of the solution. */
    pub fn evaluate_move(&self, graph: &Graph, solution: &[Node], u: VertexId, new_color: Color) -> i64 {
        let old_color = solution[u].color;
        if old_color == new_color {
            return self.cost;
        }
        let (resolved, introduced) = Self::move_conflicts(graph, solution, u, new_color);
        let (c_old, e_old) = (self.class_sizes[old_color], self.bad_edges[old_color]);
        let (c_new, e_new) = (self.class_sizes[new_color], self.bad_edges[new_color]);
        self.cost
            - contribution(c_old, e_old) - contribution(c_new, e_new)
            + contribution(c_old - 1, e_old - resolved)
            + contribution(c_new + 1, e_new + introduced)
    }

    /** recolors u with new_color and updates the classes, bad edges and cost.

    # Panics
    if new_color is not in 1..=max_colors or u is not a vertex of the solution. */
    pub fn commit_move(&mut self, graph: &Graph, solution: &mut [Node], u: VertexId, new_color: Color) {
        assert!(
            (1..=self.max_colors).contains(&new_color),
            "color {} outside of the palette 1..={}", new_color, self.max_colors
        );
        let old_color = solution[u].color;
        if old_color == new_color {
            return;
        }
        self.cost = self.evaluate_move(graph, solution, u, new_color);
        let (resolved, introduced) = Self::move_conflicts(graph, solution, u, new_color);
        self.class_sizes[old_color] -= 1;
        self.bad_edges[old_color] -= resolved;
        if self.class_sizes[old_color] == 0 { self.nb_occupied -= 1; }
        if self.class_sizes[new_color] == 0 { self.nb_occupied += 1; }
        self.class_sizes[new_color] += 1;
        self.bad_edges[new_color] += introduced;
        self.nb_bad_edges += introduced - resolved;
        solution[u].color = new_color;
        debug_assert_eq!(self.cost, self.recompute_cost());
    }
}
