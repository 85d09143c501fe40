use bit_set::BitSet;
use tracing::{info, instrument, trace};

use crate::color::{Color, Node, VertexId};
use crate::errors::ColoringError;
use crate::graph::Graph;
use crate::pqueue::PQueue;

/** priority of an uncolored vertex: its saturation degree, ties broken by the largest degree.
n normalizes the degree so the fractional part never reaches 1. */
pub fn node_priority(node: &Node, n: usize) -> f64 {
    node.saturation_degree as f64 + node.degree as f64 / n as f64
}

/** implements the DSATUR greedy. Colors the vertices stored in the graph.
    1. choose an uncolored node that sees the most colors (break ties by the largest degree)
    2. assign it the lowest color none of its neighbors uses
    3. update the saturation degree of its uncolored neighbors
    4. repeat until every vertex is colored

The priority queue is rebuilt from scratch at every iteration.
Any previous coloring stored in the graph is discarded.
Returns the number of colors used (colors are 1..=k).
*/
#[instrument(skip_all, fields(n = graph.nb_vertices(), m = graph.nb_edges()))]
pub fn dsatur(graph: &mut Graph) -> Result<usize, ColoringError> {
    let n = graph.nb_vertices();
    graph.reset_coloring();
    let mut pq = PQueue::with_capacity(n, move |node: &Node| node_priority(node, n))?;
    let mut adj_colors: Vec<BitSet> = vec![BitSet::default(); n]; // adj_colors[v] -> colors v sees
    let mut neighbor_colors: Vec<Color> = Vec::new();
    let mut used_colors: BitSet = BitSet::new();
    let mut nb_colored: usize = 0;
    while nb_colored < n {
        update_pqueue_priorities(graph, &mut pq)?;
        let u = pq.extract_max()?.id;
        let color = lowest_available_color(graph, u, &mut neighbor_colors);
        graph.node_mut(u).color = color;
        used_colors.insert(color);
        nb_colored += 1;
        trace!(vertex = u, color, "colored");
        update_saturation_degrees(graph, u, &mut adj_colors);
    }
    debug_assert!(graph.validate_coloring());
    let nb_colors = used_colors.len();
    info!(nb_colors, "DSATUR finished");
    Ok(nb_colors)
}

/// empties the queue and inserts every uncolored vertex with its current priority
fn update_pqueue_priorities<F>(graph: &Graph, pq: &mut PQueue<Node, F>) -> Result<(), ColoringError>
where F: Fn(&Node) -> f64 {
    pq.reset();
    for node in graph.nodes().iter().filter(|node| !node.is_colored()) {
        pq.insert(*node)?;
    }
    Ok(())
}

/** lowest positive color not used by the colored neighbors of u.
neighbor_colors is a scratch buffer (its content is overwritten). */
pub fn lowest_available_color(graph: &Graph, u: VertexId, neighbor_colors: &mut Vec<Color>) -> Color {
    neighbor_colors.clear();
    neighbor_colors.extend(
        graph.neighbors(u).iter()
            .map(|v| graph.node(*v))
            .filter(|node| node.is_colored())
            .map(|node| node.color)
    );
    neighbor_colors.sort_unstable();
    neighbor_colors.dedup();
    let mut res: Color = 1;
    for c in neighbor_colors.iter() {
        if *c > res { break; } // gap found
        res = c + 1;
    }
    res
}

/** updates the saturation degree of the uncolored neighbors of u (that just got colored).
a neighbor only counts the color if it did not see it before. */
fn update_saturation_degrees(graph: &mut Graph, u: VertexId, adj_colors: &mut [BitSet]) {
    let color = graph.node(u).color;
    for i in 0..graph.degree(u) {
        let v = graph.neighbors(u)[i];
        if !graph.node(v).is_colored() && adj_colors[v].insert(color) {
            graph.node_mut(v).saturation_degree += 1;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{Coloring, UNCOLORED};

    #[test]
    fn test_no_edges_single_color() {
        for n in [1, 2, 10] {
            let mut g = Graph::new(n).unwrap();
            assert_eq!(dsatur(&mut g).unwrap(), 1);
            assert!(g.nodes().iter().all(|node| node.color == 1));
        }
    }

    #[test]
    fn test_triangle() {
        let mut g = Graph::from_edges(3, &[(0, 1), (0, 2), (1, 2)]).unwrap();
        assert_eq!(dsatur(&mut g).unwrap(), 3);
        assert!(g.validate_coloring());
    }

    #[test]
    fn test_bipartite() {
        let mut g = Graph::from_edges(4, &[(0, 2), (0, 3), (1, 2), (1, 3)]).unwrap();
        assert_eq!(dsatur(&mut g).unwrap(), 2);
        let colors = Coloring::from_nodes(g.nodes());
        assert_eq!(colors.color(0), colors.color(1));
        assert_eq!(colors.color(2), colors.color(3));
        assert_ne!(colors.color(0), colors.color(2));
    }

    #[test]
    fn test_nb_colors_is_the_number_of_distinct_colors() {
        for seed in 0..5 {
            let mut g = Graph::random(40, 0.3, seed);
            let k = dsatur(&mut g).unwrap();
            let mut seen: BitSet = BitSet::new();
            for node in g.nodes() {
                seen.insert(node.color);
            }
            assert_eq!(k, seen.len());
            assert_eq!(g.nodes().iter().map(|node| node.color).max(), Some(k));
        }
    }

    #[test]
    fn test_path() {
        let mut g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        assert_eq!(dsatur(&mut g).unwrap(), 2);
        assert!(g.validate_coloring());
    }

    #[test]
    fn test_random_graphs_are_properly_colored() {
        for seed in 0..20 {
            let mut g = Graph::random(40, 0.3, seed);
            let k = dsatur(&mut g).unwrap();
            assert!(g.validate_coloring());
            let coloring = Coloring::from_nodes(g.nodes());
            assert_eq!(coloring.nb_colors(), k);
            // colors are 1..=k
            assert!(coloring.colors().iter().all(|c| *c >= 1 && *c <= k));
        }
    }

    #[test]
    fn test_rerun_on_colored_graph() {
        let mut g = Graph::random(30, 0.5, 7);
        let k1 = dsatur(&mut g).unwrap();
        let first = Coloring::from_nodes(g.nodes());
        let k2 = dsatur(&mut g).unwrap();
        assert_eq!(k1, k2);
        assert_eq!(first, Coloring::from_nodes(g.nodes()));
    }

    #[test]
    fn test_lowest_available_color() {
        // vertex 0 adjacent to 1, 2, 3
        let mut g = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).unwrap();
        let mut buf = Vec::new();
        assert_eq!(lowest_available_color(&g, 0, &mut buf), 1);
        g.node_mut(1).color = 1;
        g.node_mut(2).color = 3;
        assert_eq!(lowest_available_color(&g, 0, &mut buf), 2);
        g.node_mut(1).color = 2;
        assert_eq!(lowest_available_color(&g, 0, &mut buf), 1);
        g.node_mut(1).color = 1;
        g.node_mut(2).color = 1;
        g.node_mut(3).color = 2;
        assert_eq!(lowest_available_color(&g, 0, &mut buf), 3);
    }

    #[test]
    fn test_saturation_counts_distinct_colors() {
        // 3 adjacent to 0, 1, 2
        let mut g = Graph::from_edges(4, &[(0, 3), (1, 3), (2, 3)]).unwrap();
        let mut adj_colors = vec![BitSet::default(); 4];
        g.node_mut(0).color = 1;
        update_saturation_degrees(&mut g, 0, &mut adj_colors);
        g.node_mut(1).color = 1;
        update_saturation_degrees(&mut g, 1, &mut adj_colors);
        assert_eq!(g.node(3).saturation_degree, 1);
        g.node_mut(2).color = 2;
        update_saturation_degrees(&mut g, 2, &mut adj_colors);
        assert_eq!(g.node(3).saturation_degree, 2);
        assert_eq!(g.node(3).color, UNCOLORED);
    }

    #[test]
    fn test_priority_breaks_ties_by_degree() {
        let mut a = Node::new(0);
        let mut b = Node::new(1);
        a.saturation_degree = 2;
        a.degree = 3;
        b.saturation_degree = 2;
        b.degree = 9;
        assert!(node_priority(&b, 10) > node_priority(&a, 10));
        b.saturation_degree = 1;
        assert!(node_priority(&a, 10) > node_priority(&b, 10));
    }
}
