use std::fs;
use std::path::Path;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{space0, space1};
use nom::combinator::all_consuming;
use nom::sequence::{delimited, preceded, separated_pair};
use tracing::{info, warn};

use crate::errors::ColoringError;
use crate::graph::Graph;
use crate::io::edge_list::integer;

/// reads two numbers separated by spaces
fn read_two_integers(s: &str) -> IResult<&str, (usize, usize)> {
    delimited(space0, separated_pair(integer, space1, integer), space0)(s)
}

/// reads header containing (n,m)
pub fn read_header(s: &str) -> IResult<&str, (usize, usize)> {
    all_consuming(preceded(alt((tag("p edge"), tag("p col"))), read_two_integers))(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s: &str) -> IResult<&str, (usize, usize)> {
    all_consuming(preceded(tag("e"), read_two_integers))(s)
}

/** parses a DIMACS instance (comment lines "c ...", header "p edge n m", edges "e a b").
Returns a graph where vertex a of the file is the vertex a-1. */
pub fn parse_dimacs(s: &str) -> Result<Graph, ColoringError> {
    let mut graph: Option<Graph> = None;
    let mut expected_nb_edges = 0;
    let mut check_nb_edges = 0;
    for (i, raw_line) in s.lines().enumerate() {
        let line_number = i + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('c') { continue; }
        if line.starts_with('p') {
            if graph.is_some() {
                return Err(ColoringError::format(line_number, "duplicated header"));
            }
            let (_, (n, m)) = read_header(line).map_err(|_| ColoringError::format(
                line_number, format!("expected \"p edge n m\", got \"{}\"", line)
            ))?;
            graph = Some(Graph::new(n).map_err(|e| ColoringError::format(line_number, e.to_string()))?);
            expected_nb_edges = m;
            continue;
        }
        let g = graph.as_mut().ok_or_else(|| ColoringError::format(line_number, "edge before the header"))?;
        let (_, (a, b)) = read_edge(line).map_err(|_| ColoringError::format(
            line_number, format!("expected \"e a b\", got \"{}\"", line)
        ))?;
        if a == 0 || b == 0 {
            return Err(ColoringError::format(line_number, "DIMACS vertices start at 1"));
        }
        g.add_edge(a - 1, b - 1).map_err(|e| ColoringError::format(line_number, e.to_string()))?;
        check_nb_edges += 1;
    }
    let graph = graph.ok_or_else(|| ColoringError::format(1, "missing header \"p edge n m\""))?;
    // some files count each edge twice
    if check_nb_edges != expected_nb_edges && 2 * check_nb_edges != expected_nb_edges {
        warn!(expected = expected_nb_edges, read = check_nb_edges, "unexpected number of edges");
    }
    Ok(graph)
}

/// reads a DIMACS instance from a file
pub fn read_dimacs<P: AsRef<Path>>(filename: P) -> Result<Graph, ColoringError> {
    let s = fs::read_to_string(filename)?;
    let graph = parse_dimacs(&s)?;
    info!(n = graph.nb_vertices(), m = graph.nb_edges(), "DIMACS instance read");
    Ok(graph)
}
