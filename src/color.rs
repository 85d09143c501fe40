use bit_set::BitSet;
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/** Vertex Id */
pub type VertexId = usize;

/** Color Id. Colors are positive, 0 is reserved for uncolored vertices */
pub type Color = usize;

/** sentinel color of a vertex that has not been colored yet */
pub const UNCOLORED: Color = 0;

/** Solution of a graph coloring problem
(represented as a partition).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** coloring state of a vertex. Cheap to copy, used as working solution. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    /// stable id of the vertex (its index in the graph)
    pub id: VertexId,
    /// number of adjacent vertices
    pub degree: usize,
    /// number of distinct colors among the colored neighbors
    pub saturation_degree: usize,
    /// color of the vertex (UNCOLORED if not colored yet)
    pub color: Color,
}

impl Node {
    /// creates an uncolored isolated vertex
    pub fn new(id: VertexId) -> Self {
        Self { id, degree: 0, saturation_degree: 0, color: UNCOLORED }
    }

    /// true iff the vertex received a color
    pub fn is_colored(&self) -> bool { self.color != UNCOLORED }
}

/** final vertex -> color assignment */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring {
    /// colors[v]: color of the vertex v
    colors: Vec<Color>,
}

impl Coloring {
    /// coloring from a color vector (colors[v] is the color of v)
    pub fn new(colors: Vec<Color>) -> Self { Self { colors } }

    /// reads the colors of a working solution
    pub fn from_nodes(nodes: &[Node]) -> Self {
        Self { colors: nodes.iter().map(|node| node.color).collect() }
    }

    /** builds a coloring from a partition. The i-th class gets the color i+1.
    Vertices missing from the partition stay UNCOLORED. */
    pub fn from_classes(n: usize, classes: &[Vec<VertexId>]) -> Self {
        let mut colors = vec![UNCOLORED; n];
        for (i, class) in classes.iter().enumerate() {
            for v in class.iter().filter(|v| **v < n) {
                colors[*v] = i + 1;
            }
        }
        Self { colors }
    }

    /// number of vertices
    pub fn len(&self) -> usize { self.colors.len() }

    /// true iff there is no vertex
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    /// color of the vertex v
    pub fn color(&self, v: VertexId) -> Color { self.colors[v] }

    /// colors of all vertices
    pub fn colors(&self) -> &[Color] { &self.colors }

    /// number of distinct colors used
    pub fn nb_colors(&self) -> usize {
        let mut used = BitSet::new();
        for c in self.colors.iter().filter(|c| **c != UNCOLORED) {
            used.insert(*c);
        }
        used.len()
    }

    /** renumbers the colors to 1..=k, keeping the relative order of the colors. */
    pub fn compacted(&self) -> Self {
        let max_color = self.colors.iter().copied().max().unwrap_or(UNCOLORED);
        let mut renaming = vec![UNCOLORED; max_color + 1];
        let mut used = BitSet::with_capacity(max_color + 1);
        for c in self.colors.iter().filter(|c| **c != UNCOLORED) {
            used.insert(*c);
        }
        for (i, c) in used.iter().enumerate() {
            renaming[c] = i + 1;
        }
        Self { colors: self.colors.iter().map(|c| renaming[*c]).collect() }
    }

    /** color classes, ordered by color. Empty classes are skipped. */
    pub fn classes(&self) -> Solution {
        let max_color = self.colors.iter().copied().max().unwrap_or(UNCOLORED);
        let mut res: Solution = vec![vec![]; max_color];
        for (v, c) in self.colors.iter().enumerate().filter(|(_, c)| **c != UNCOLORED) {
            res[*c - 1].push(v);
        }
        res.into_iter().filter(|class| !class.is_empty()).collect()
    }

    /** writes a string encoding the solution (use this to export the solution).
    each line corresponds to a color. */
    pub fn to_solution_string(&self) -> String {
        let mut res = String::default();
        for class in self.classes() {
            for v in class {
                res += format!("{} ", v).as_str();
            }
            res += "\n";
        }
        res
    }
}

/// result of the solution checker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerResult {
    /// the solution is feasible and uses this many colors
    Ok(usize),
    /// the vertex is not colored
    VertexNotColored(VertexId),
    /// the vertex appears in two color classes
    VertexAddedTwice(VertexId),
    /// the vertex does not exist in the instance
    UnknownVertex(VertexId),
    /// the two adjacent vertices share a color
    ConflictingEdge(VertexId, VertexId),
}

/**
checks a solution given as a partition.
returns the number of colors if the solution is feasible, the first problem found otherwise
*/
pub fn checker(graph: &Graph, sol: &[Vec<VertexId>]) -> CheckerResult {
    // check that all vertices are added exactly once
    let mut visited = BitSet::with_capacity(graph.nb_vertices());
    for class in sol {
        for v in class {
            if *v >= graph.nb_vertices() {
                return CheckerResult::UnknownVertex(*v);
            }
            if !visited.insert(*v) {
                return CheckerResult::VertexAddedTwice(*v);
            }
        }
    }
    if let Some(v) = graph.vertices().find(|v| !visited.contains(*v)) {
        return CheckerResult::VertexNotColored(v);
    }
    // check conflicts
    let coloring = Coloring::from_classes(graph.nb_vertices(), sol);
    if let Some((u, v)) = first_conflict(graph, &coloring) {
        return CheckerResult::ConflictingEdge(u, v);
    }
    // if ok: return the number of colors
    CheckerResult::Ok(coloring.nb_colors())
}

/** true iff every vertex is colored and no edge connects two vertices of the same color.
Independent from the solving path (scans all edges). */
pub fn validate_coloring(graph: &Graph, coloring: &Coloring) -> bool {
    coloring.len() == graph.nb_vertices()
        && coloring.colors().iter().all(|c| *c != UNCOLORED)
        && first_conflict(graph, coloring).is_none()
}

/// first edge (u,v) with u < v such that u and v share a color
fn first_conflict(graph: &Graph, coloring: &Coloring) -> Option<(VertexId, VertexId)> {
    graph.edges().find(|(u, v)| coloring.color(*u) == coloring.color(*v))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
    }

    #[test]
    fn test_validate_coloring() {
        let g = square();
        assert!(validate_coloring(&g, &Coloring::new(vec![1, 2, 1, 2])));
        assert!(!validate_coloring(&g, &Coloring::new(vec![1, 1, 2, 2])));
        // uncolored vertex
        assert!(!validate_coloring(&g, &Coloring::new(vec![1, 2, 1, 0])));
        // wrong length
        assert!(!validate_coloring(&g, &Coloring::new(vec![1, 2, 1])));
    }

    #[test]
    fn test_checker() {
        let g = square();
        assert_eq!(checker(&g, &[vec![0, 2], vec![1, 3]]), CheckerResult::Ok(2));
        assert_eq!(checker(&g, &[vec![0, 2], vec![1]]), CheckerResult::VertexNotColored(3));
        assert_eq!(checker(&g, &[vec![0, 2], vec![1, 3, 0]]), CheckerResult::VertexAddedTwice(0));
        assert_eq!(checker(&g, &[vec![0, 1], vec![2, 3]]), CheckerResult::ConflictingEdge(0, 1));
        assert_eq!(checker(&g, &[vec![0, 2], vec![1, 3, 7]]), CheckerResult::UnknownVertex(7));
    }

    #[test]
    fn test_compacted_and_classes() {
        let coloring = Coloring::new(vec![5, 2, 5, 9]);
        assert_eq!(coloring.nb_colors(), 3);
        let compact = coloring.compacted();
        assert_eq!(compact.colors(), &[2, 1, 2, 3]);
        assert_eq!(compact.classes(), vec![vec![1], vec![0, 2], vec![3]]);
        assert_eq!(compact.to_solution_string(), "1 \n0 2 \n3 \n");
    }
}
