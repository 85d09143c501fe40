//! Instance and solution files.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use nom::character::complete::{space0, space1};
use nom::combinator::all_consuming;
use nom::multi::separated_list0;
use nom::sequence::delimited;

use crate::color::{Coloring, Solution};
use crate::errors::ColoringError;
use crate::graph::Graph;

/// edge list format ("n" then "u v" lines, indices start at 0)
pub mod edge_list;

/// DIMACS format ("p edge n m" then "e a b" lines, indices start at 1)
pub mod dimacs;

/// supported instance formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFileType {
    /// see edge_list
    EdgeList,
    /// see dimacs
    Dimacs,
}

impl FromStr for GraphFileType {
    type Err = ColoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edgelist" | "edge_list" => Ok(Self::EdgeList),
            "dimacs" | "col" => Ok(Self::Dimacs),
            _ => Err(ColoringError::InvalidParameter(format!("instance type unknown {}", s))),
        }
    }
}

/// reads an instance file
pub fn read_graph<P: AsRef<Path>>(filename: P, file_type: GraphFileType) -> Result<Graph, ColoringError> {
    match file_type {
        GraphFileType::EdgeList => edge_list::read_edge_list(filename),
        GraphFileType::Dimacs => dimacs::read_dimacs(filename),
    }
}

/** parses a solution: each line lists the vertices of a color class. */
pub fn parse_solution(s: &str) -> Result<Solution, ColoringError> {
    let mut res = Solution::new();
    for (i, line) in s.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() { continue; }
        let (_, class) = all_consuming(delimited(space0, separated_list0(space1, edge_list::integer), space0))(line)
            .map_err(|_| ColoringError::format(i + 1, format!("expected vertex ids, got \"{}\"", line)))?;
        res.push(class);
    }
    Ok(res)
}

/// reads a solution file
pub fn read_solution<P: AsRef<Path>>(filename: P) -> Result<Solution, ColoringError> {
    parse_solution(&fs::read_to_string(filename)?)
}

/** writes a solution into a file. each line corresponds to a color. */
pub fn write_solution<P: AsRef<Path>>(filename: P, coloring: &Coloring) -> Result<(), ColoringError> {
    fs::write(filename, coloring.to_solution_string())?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{checker, CheckerResult};

    #[test]
    fn test_file_type() {
        assert_eq!("dimacs".parse::<GraphFileType>().unwrap(), GraphFileType::Dimacs);
        assert_eq!("edgelist".parse::<GraphFileType>().unwrap(), GraphFileType::EdgeList);
        assert!("metis".parse::<GraphFileType>().is_err());
    }

    #[test]
    fn test_parse_solution() {
        let sol = parse_solution("0 2 \n1 3\n\n").unwrap();
        assert_eq!(sol, vec![vec![0, 2], vec![1, 3]]);
        assert!(matches!(parse_solution("0 2\n1 x\n"), Err(ColoringError::Format { line: 2, .. })));
    }

    #[test]
    fn test_solution_written_then_checked() {
        let g = read_graph("insts/bipartite.txt", GraphFileType::EdgeList).unwrap();
        let coloring = Coloring::new(vec![1, 1, 2, 2]);
        let filename = std::env::temp_dir().join("dsatur_color_test_solution.txt");
        write_solution(&filename, &coloring).unwrap();
        let sol = read_solution(&filename).unwrap();
        assert_eq!(checker(&g, &sol), CheckerResult::Ok(2));
        let _ = fs::remove_file(&filename);
    }
}
