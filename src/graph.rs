use std::ops::Range;

use bit_set::BitSet;

use crate::color::{validate_coloring, Coloring, Node, VertexId, UNCOLORED};
use crate::errors::ColoringError;

/** models a Graph Coloring instance.
Vertices are stored in an arena indexed by their id, together with their coloring state.
The adjacency is kept both as lists (iteration in O(d(v))) and as a bitset matrix
(adjacency test in O(1)).
*/
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// nodes[i]: coloring state of the vertex i
    nodes: Vec<Node>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
}

impl Graph {
    /** creates a graph with n vertices and no edges.
    fails if n is 0 */
    pub fn new(n: usize) -> Result<Self, ColoringError> {
        if n == 0 {
            return Err(ColoringError::InvalidGraph("a graph needs at least one vertex".to_string()));
        }
        Ok(Self {
            n,
            m: 0,
            nodes: (0..n).map(Node::new).collect(),
            adj_list: vec![Vec::new(); n],
            adj_matrix: vec![BitSet::with_capacity(n); n],
        })
    }

    /** constructor using an edge list */
    pub fn from_edges(n: usize, edges: &[(VertexId, VertexId)]) -> Result<Self, ColoringError> {
        let mut res = Self::new(n)?;
        for (u, v) in edges {
            res.add_edge(*u, *v)?;
        }
        Ok(res)
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.m }

    /// vertex ids
    pub fn vertices(&self) -> Range<VertexId> { 0..self.n }

    /// list of vertices adjacent to vertex u
    pub fn neighbors(&self, u: VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// degree of vertex u
    pub fn degree(&self, u: VertexId) -> usize { self.nodes[u].degree }

    /// coloring state of vertex u
    pub fn node(&self, u: VertexId) -> &Node { &self.nodes[u] }

    /// coloring state of all vertices
    pub fn nodes(&self) -> &[Node] { &self.nodes }

    pub(crate) fn node_mut(&mut self, u: VertexId) -> &mut Node { &mut self.nodes[u] }

    /// returns if u and v are adjacent (O(1))
    pub fn are_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.adj_matrix[u].contains(v)
    }

    /// edges (u,v) of the graph, with u < v
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.vertices().flat_map(move |u| {
            self.adj_list[u].iter().filter(move |v| u < **v).map(move |v| (u, *v))
        })
    }

    fn check_vertex(&self, u: VertexId) -> Result<(), ColoringError> {
        if u >= self.n {
            return Err(ColoringError::OutOfRange { node: u, n: self.n });
        }
        Ok(())
    }

    /** adds the edge (u,v). Adding an existing edge does nothing.
    fails if u or v is not a vertex, or if u == v */
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), ColoringError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(ColoringError::InvalidGraph(format!("self-loop on vertex {}", u)));
        }
        if self.adj_matrix[u].insert(v) {
            self.adj_matrix[v].insert(u);
            self.adj_list[u].push(v);
            self.adj_list[v].push(u);
            self.nodes[u].degree += 1;
            self.nodes[v].degree += 1;
            self.m += 1;
        }
        Ok(())
    }

    /** removes the edge (u,v). Removing a missing edge does nothing.
    fails if u or v is not a vertex */
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), ColoringError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if self.adj_matrix[u].remove(v) {
            self.adj_matrix[v].remove(u);
            self.adj_list[u].retain(|w| *w != v);
            self.adj_list[v].retain(|w| *w != u);
            self.nodes[u].degree -= 1;
            self.nodes[v].degree -= 1;
            self.m -= 1;
        }
        Ok(())
    }

    /** independent snapshot of the coloring state of every vertex.
    Used as working solution by the local search. */
    pub fn copy_node_states(&self) -> Vec<Node> { self.nodes.clone() }

    /// uncolors every vertex (allows another solving run on the same graph)
    pub fn reset_coloring(&mut self) {
        for node in self.nodes.iter_mut() {
            node.color = UNCOLORED;
            node.saturation_degree = 0;
        }
    }

    /// true iff the colors currently stored in the graph form a proper coloring
    pub fn validate_coloring(&self) -> bool {
        validate_coloring(self, &Coloring::from_nodes(&self.nodes))
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees = self.nodes.iter().map(|node| node.degree);
        println!("\t{} \t min degree", degrees.clone().min().unwrap_or(0));
        println!("\t{} \t max degree", degrees.max().unwrap_or(0));
    }
}

#[cfg(test)]
impl Graph {
    /// random graph where each edge exists with probability density
    pub(crate) fn random(n: usize, density: f64, seed: u64) -> Self {
        let rng = fastrand::Rng::with_seed(seed);
        let mut res = Self::new(n).unwrap();
        for u in 0..n {
            for v in u + 1..n {
                if rng.f64() < density {
                    res.add_edge(u, v).unwrap();
                }
            }
        }
        res
    }
}
