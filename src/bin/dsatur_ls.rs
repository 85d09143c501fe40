use std::process;
use std::time::Instant;

use clap::{App, ArgMatches, load_yaml};
use serde_json::json;

use dsatur_color::errors::ColoringError;
use dsatur_color::solver::solve_with_config;
use dsatur_color::util::{export_results, init_logging, read_params};


/** solves a coloring instance using DSATUR followed by a local search */
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("dsatur_ls.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(main_args: &ArgMatches) -> Result<(), ColoringError> {
    init_logging(main_args)?;
    let params = read_params(main_args)?;
    let mut graph = params.graph;

    // solve it
    let t_start = Instant::now();
    let report = solve_with_config(&mut graph, &params.config)?;
    let duration = t_start.elapsed().as_secs_f32();
    let nb_colors = report.coloring.nb_colors();
    println!("DSATUR found {} colors", report.initial_colors);
    println!("local search took {:.3} seconds. Nb colors: {}", duration, nb_colors);
    let stats = json!({
        "inst_name": params.inst_filename,
        "nb_vertices": graph.nb_vertices(),
        "nb_edges": graph.nb_edges(),
        "initial_colors": report.initial_colors,
        "final_colors": nb_colors,
        "primal_list": report.stats.primal_list,
        "rounds": report.stats.rounds,
        "accepted_moves": report.stats.accepted_moves,
        "time_searched": duration,
    });

    // export results
    export_results(&graph, &report.coloring, &stats, params.perf_file, params.sol_file, true)
}
