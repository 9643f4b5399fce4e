//! Cascade CLI — load checks for the score-propagation engine.
//!
//! Usage:
//!   cascade bench tree [--nodes N] [--cross-link-every K] [--json]
//!   cascade bench fanout [--width W] [--json]

use cascade::{synthetic, CascadeEngine, CascadeResult, NodeId};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "cascade",
    version,
    about = "Graph score-propagation engine"
)]
struct Cli {
    /// Log engine phases to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a synthetic graph and time a full score calculation
    Bench {
        #[command(subcommand)]
        shape: Shape,
        /// Print the summary as JSON
        #[arg(long, global = true)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum Shape {
    /// Binary tree with periodic cross links back to the root
    Tree {
        /// Number of nodes
        #[arg(long, default_value_t = 100_000)]
        nodes: usize,
        /// Link every Kth node back to the root (0 disables)
        #[arg(long, default_value_t = 100)]
        cross_link_every: usize,
    },
    /// One root with many direct children
    Fanout {
        /// Number of children
        #[arg(long, default_value_t = 2_000)]
        width: usize,
    },
}

/// What a bench run reports
#[derive(Debug, Serialize)]
struct BenchSummary {
    nodes: usize,
    edges: usize,
    root_score_count: usize,
    root_full_score: f64,
    elapsed_ms: u64,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_bench(engine: &CascadeEngine) -> CascadeResult<BenchSummary> {
    let started = Instant::now();
    let scores = engine.calculate_node_scores()?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let root = scores.get(&NodeId::from(synthetic::node_name(0)));
    Ok(BenchSummary {
        nodes: engine.node_count(),
        edges: engine.edge_count(),
        root_score_count: root.map(|r| r.score_count()).unwrap_or(0),
        root_full_score: root.map(|r| r.full_score).unwrap_or(0.0),
        elapsed_ms,
    })
}

fn print_summary(summary: &BenchSummary, json: bool) -> i32 {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    } else {
        println!("nodes:            {}", summary.nodes);
        println!("edges:            {}", summary.edges);
        println!("root scores:      {}", summary.root_score_count);
        println!("root full score:  {:.3}", summary.root_full_score);
        println!("elapsed:          {} ms", summary.elapsed_ms);
    }
    0
}

fn cmd_bench(shape: Shape, json: bool) -> i32 {
    let engine = match shape {
        Shape::Tree {
            nodes,
            cross_link_every,
        } => synthetic::binary_tree(nodes, cross_link_every),
        Shape::Fanout { width } => synthetic::fan_out(width),
    };

    match engine.and_then(|e| run_bench(&e)) {
        Ok(summary) => print_summary(&summary, json),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Commands::Bench { shape, json } => cmd_bench(shape, json),
    };
    std::process::exit(code);
}
