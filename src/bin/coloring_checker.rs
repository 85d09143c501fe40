use std::process;

use clap::{App, load_yaml};

use dsatur_color::{
    color::{checker, CheckerResult},
    errors::ColoringError,
    io::{read_graph, read_solution, GraphFileType},
};

/** checks a coloring solution. Prints the number of colors if it is valid */
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("coloring_checker.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let inst_filename = main_args.value_of("instance").unwrap_or_default();
    let sol_filename = main_args.value_of("solution").unwrap_or_default();
    let instance_type = main_args.value_of("type").unwrap_or("edgelist");
    // read files & call checker
    let res_checker = instance_type.parse::<GraphFileType>()
        .and_then(|file_type| read_graph(inst_filename, file_type))
        .and_then(|graph| {
            let solution = read_solution(sol_filename)?;
            Ok::<_, ColoringError>(checker(&graph, &solution))
        });
    let valid = match res_checker {
        Err(e) => {
            eprintln!("error: {}", e);
            false
        },
        Ok(CheckerResult::Ok(n)) => {
            println!("{}", n);
            true
        },
        Ok(CheckerResult::VertexAddedTwice(v)) => {
            println!("ERROR: vertex {} colored twice", v);
            false
        },
        Ok(CheckerResult::VertexNotColored(v)) => {
            println!("ERROR: vertex {} not colored", v);
            false
        },
        Ok(CheckerResult::UnknownVertex(v)) => {
            println!("ERROR: vertex {} is not in the instance", v);
            false
        },
        Ok(CheckerResult::ConflictingEdge(a, b)) => {
            println!("ERROR: vertices {} and {} are conflicting", a, b);
            false
        },
    };
    if !valid { process::exit(1); }
}
