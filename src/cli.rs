use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fastroute_core::{Hour, NodeId, RouteAlgorithm};

#[derive(Parser, Debug)]
#[command(name = "fastroute", version, about = "Constrained route planning over road graphs")]
pub struct Cli {
    /// More log output; repeat for debug and trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan one route with a single algorithm
    Route(RouteArgs),
    /// Run every algorithm on the same query and compare the results
    Compare(QueryArgs),
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// dijkstra, astar, bellman-ford, floyd-warshall, iterative-deepening or shortest-time
    #[arg(short, long, default_value = "dijkstra")]
    pub algorithm: RouteAlgorithm,

    /// Print the route as JSON
    #[arg(long)]
    pub json: bool,
}

/// Scenario file plus optional overrides of its query
#[derive(Args, Debug)]
pub struct QueryArgs {
    pub scenario: PathBuf,

    #[arg(long)]
    pub start: Option<NodeId>,

    #[arg(long)]
    pub end: Option<NodeId>,

    /// Hour of day, 0-24
    #[arg(long)]
    pub time: Option<Hour>,

    /// Depth limit for iterative deepening
    #[arg(long)]
    pub max_depth: Option<i32>,
}
