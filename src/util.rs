use std::fs::File;
use std::str::FromStr;

use clap::ArgMatches;
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{
    color::{checker, CheckerResult, Coloring},
    config::SolverConfig,
    errors::ColoringError,
    graph::Graph,
    io::{read_graph, write_solution, GraphFileType},
};

/// parameters read from the command line
#[derive(Debug)]
pub struct Params {
    /// instance filename
    pub inst_filename: String,
    /// instance
    pub graph: Graph,
    /// local search parameters
    pub config: SolverConfig,
    /// where to write the solution (if asked)
    pub sol_file: Option<String>,
    /// where to write the performance statistics (if asked)
    pub perf_file: Option<String>,
}

/// parses an optional argument
fn parse_arg<T: FromStr>(main_args: &ArgMatches, name: &str) -> Result<Option<T>, ColoringError> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_|
            ColoringError::InvalidParameter(format!("unable to parse {} (got \"{}\")", name, s))
        ),
    }
}

/** installs the log subscriber (level given by the "log-level" argument, "info" by default).
logs are written on stderr. */
pub fn init_logging(main_args: &ArgMatches) -> Result<(), ColoringError> {
    let level: Level = parse_arg(main_args, "log-level")?.unwrap_or(Level::INFO);
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish()
        .init();
    Ok(())
}

/** reads command line input: instance, solver configuration, solution and stats filenames.
The configuration file (if any) is read first, then individual arguments override it. */
pub fn read_params(main_args: &ArgMatches) -> Result<Params, ColoringError> {
    let inst_filename = main_args.value_of("instance")
        .ok_or_else(|| ColoringError::InvalidParameter("missing instance".to_string()))?;
    let instance_type: GraphFileType = parse_arg(main_args, "type")?.unwrap_or(GraphFileType::EdgeList);
    let mut config = match main_args.value_of("config") {
        None => SolverConfig::default(),
        Some(filename) => SolverConfig::from_file(filename)?,
    };
    if let Some(seed) = parse_arg(main_args, "seed")? { config.seed = seed; }
    if let Some(trials) = parse_arg(main_args, "trials")? { config.trials_per_round = trials; }
    if let Some(rounds) = parse_arg(main_args, "unproductive")? { config.max_unproductive_rounds = rounds; }
    if let Some(rounds) = parse_arg(main_args, "rounds")? { config.max_rounds = Some(rounds); }
    if let Some(t) = parse_arg(main_args, "time")? { config.time_limit = Some(t); }
    // read value of the solution filename
    let sol_file = main_args.value_of("solution").map(|e| {
        println!("printing solutions in: {}", e);
        e.to_string()
    });
    // read value of the performance logs filename
    let perf_file = main_args.value_of("perf").map(|e| {
        println!("printing perfs in: {}", e);
        e.to_string()
    });
    // read instance file
    println!("reading instance: {}...", inst_filename);
    let graph = read_graph(inst_filename, instance_type)?;
    graph.display_statistics();
    println!("=======================");
    Ok(Params { inst_filename: inst_filename.to_string(), graph, config, sol_file, perf_file })
}

/// exports search results to files
pub fn export_results(
    graph: &Graph,
    coloring: &Coloring,
    stats: &Value,
    perf_file: Option<String>,
    sol_file: Option<String>,
    check_result: bool,
) -> Result<(), ColoringError> {
    // export statistics
    if let Some(filename) = perf_file {
        let file = File::create(filename.as_str())?;
        serde_json::to_writer_pretty(file, stats)?;
    }
    // export solution
    if let Some(filename) = sol_file {
        if check_result {
            let checker_result = checker(graph, &coloring.classes());
            if !matches!(checker_result, CheckerResult::Ok(_)) {
                println!("invalid solution (reason: {:?})", checker_result);
            }
        }
        write_solution(filename.as_str(), coloring)?;
    }
    Ok(())
}
