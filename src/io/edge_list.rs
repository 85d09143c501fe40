use std::fs;
use std::path::Path;

use nom::IResult;
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::{all_consuming, map_res, opt};
use nom::sequence::{delimited, preceded, separated_pair, terminated};
use tracing::info;

use crate::errors::ColoringError;
use crate::graph::Graph;

/// reads a non-negative integer
pub(crate) fn integer(s: &str) -> IResult<&str, usize> {
    map_res(digit1, |d: &str| d.parse::<usize>())(s)
}

/// reads the header line: the number of vertices (optionally followed by the number of edges)
pub fn read_header(s: &str) -> IResult<&str, usize> {
    all_consuming(delimited(
        space0,
        terminated(integer, opt(preceded(space1, integer))),
        space0,
    ))(s)
}

/// reads an edge line: two vertex ids separated by spaces (indices start at 0)
pub fn read_edge(s: &str) -> IResult<&str, (usize, usize)> {
    all_consuming(delimited(space0, separated_pair(integer, space1, integer), space0))(s)
}

/** parses an edge list instance.
    - first (non-empty) line: number of vertices n > 0
    - then one edge per line: "u v" with u,v in [0,n)
blank lines are ignored. Errors report the (1-based) line number.
*/
pub fn parse_edge_list(s: &str) -> Result<Graph, ColoringError> {
    let mut graph: Option<Graph> = None;
    for (i, raw_line) in s.lines().enumerate() {
        let line_number = i + 1;
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() { continue; }
        match graph.as_mut() {
            None => {
                let (_, n) = read_header(line).map_err(|_| ColoringError::format(
                    line_number, format!("expected the number of vertices, got \"{}\"", line)
                ))?;
                let g = Graph::new(n).map_err(|e| ColoringError::format(line_number, e.to_string()))?;
                graph = Some(g);
            }
            Some(g) => {
                let (_, (u, v)) = read_edge(line).map_err(|_| ColoringError::format(
                    line_number, format!("expected an edge \"u v\", got \"{}\"", line)
                ))?;
                g.add_edge(u, v).map_err(|e| ColoringError::format(line_number, e.to_string()))?;
            }
        }
    }
    graph.ok_or_else(|| ColoringError::format(1, "missing number of vertices"))
}

/// reads an edge list instance from a file
pub fn read_edge_list<P: AsRef<Path>>(filename: P) -> Result<Graph, ColoringError> {
    let s = fs::read_to_string(filename)?;
    let graph = parse_edge_list(&s)?;
    info!(n = graph.nb_vertices(), m = graph.nb_edges(), "edge list instance read");
    Ok(graph)
}
