mod cli;
mod report;

use std::process::ExitCode;

use clap::Parser;
use fastroute_core::{
    Error, RouteAlgorithm, RouteOptimizer, Scenario, ScenarioConfig, create_scenario,
};
use log::{LevelFilter, error};

use cli::{Cli, Command, QueryArgs, RouteArgs};
use report::{RouteReport, comparison_table, print_route};

const EXIT_CONFIG: u8 = 1;
const EXIT_NO_ROUTE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match &cli.command {
        Command::Route(args) => run_route(args),
        Command::Compare(args) => run_compare(args),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_NO_ROUTE),
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load(query: &QueryArgs) -> Result<Scenario, Error> {
    let mut config = ScenarioConfig::from_path(&query.scenario)?;
    if let Some(start) = query.start {
        config.start = start;
    }
    if let Some(end) = query.end {
        config.end = end;
    }
    if let Some(time) = query.time {
        config.current_time = time;
    }
    if query.max_depth.is_some() {
        config.max_depth = query.max_depth;
    }
    create_scenario(&config)
}

/// Returns whether a route was found
fn run_route(args: &RouteArgs) -> Result<bool, Error> {
    let scenario = load(&args.query)?;
    let optimizer = scenario.optimizer(args.algorithm)?;
    let result = optimizer.optimize_route();

    if args.json {
        let report = RouteReport::new(args.algorithm, result.as_ref());
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(route) = &result {
        print_route(optimizer.algorithm_name(), route);
    } else {
        println!(
            "{}: no route from {} to {}",
            optimizer.algorithm_name(),
            scenario.start(),
            scenario.end()
        );
    }

    Ok(result.is_some())
}

fn run_compare(args: &QueryArgs) -> Result<bool, Error> {
    let scenario = load(args)?;

    let mut rows = Vec::with_capacity(RouteAlgorithm::ALL.len());
    for kind in RouteAlgorithm::ALL {
        let optimizer =
            RouteOptimizer::for_algorithm(kind, scenario.context()?, scenario.planner_options())?;
        rows.push((optimizer.algorithm_name(), optimizer.optimize_route()));
    }

    println!("{}", comparison_table(&rows));
    Ok(rows.iter().any(|(_, result)| result.is_some()))
}
