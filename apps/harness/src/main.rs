//! # StoreBench CLI
//!
//! Benchmarking harness comparing PostgreSQL and MongoDB over an identical
//! synthetic e-commerce dataset.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         storebench pipeline                             │
//! │                                                                         │
//! │  setup-pg ──┐                                                           │
//! │             ├─► populate ──► perf ──► cap ──► report                    │
//! │  setup-mongo┘   (generate    (timing   (CAP    (dashboard.html)        │
//! │                  + verify)    JSON)     JSON)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! # One-time schema setup
//! storebench setup-pg
//! storebench setup-mongo
//!
//! # Load both stores and verify counts
//! storebench populate --users 100 --products 200
//!
//! # Everything after setup, in order
//! storebench all
//! ```
//!
//! Connections come from the environment (`PG_URL`/`DATABASE_URL`,
//! `MONGO_URI`, `MONGO_DB`, `RESULTS_DIR`), with localhost defaults.

mod cap;
mod config;
mod error;
mod perf;
mod populate;
mod report;
mod setup;

use std::env;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use storebench_core::DatasetCounts;

use crate::config::BenchConfig;
use crate::error::HarnessResult;

fn print_usage() {
    println!("StoreBench - PostgreSQL vs MongoDB benchmark harness");
    println!();
    println!("Usage: storebench <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  setup-pg      Create tables and indexes in PostgreSQL");
    println!("  setup-mongo   Create collections and indexes in MongoDB");
    println!("  populate      Generate the dataset, load both stores, verify counts");
    println!("  perf          Run the six-query battery, write performance_results.json");
    println!("  cap           Run the consistency/availability probes, write cap_analysis.json");
    println!("  report        Render dashboard.html from the JSON artifacts");
    println!("  all           populate + perf + cap + report");
    println!();
    println!("Options:");
    println!("  --users <N>        Users to generate (default: 100)");
    println!("  --products <N>     Products to generate (default: 200)");
    println!("  --orders <N>       Orders to generate (default: 150)");
    println!("  --reviews <N>      Reviews to generate (default: 80)");
    println!("  --results-dir <D>  Artifact directory (default: ./results or $RESULTS_DIR)");
    println!("  -h, --help         Show this help message");
}

struct CliArgs {
    command: String,
    counts: DatasetCounts,
    results_dir: Option<String>,
}

fn parse_args(args: &[String]) -> Option<CliArgs> {
    let command = args.first()?.clone();

    let mut counts = DatasetCounts::default();
    let mut results_dir = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--users" => {
                if i + 1 < args.len() {
                    counts.users = args[i + 1].parse().unwrap_or(counts.users);
                    i += 1;
                }
            }
            "--products" => {
                if i + 1 < args.len() {
                    counts.products = args[i + 1].parse().unwrap_or(counts.products);
                    i += 1;
                }
            }
            "--orders" => {
                if i + 1 < args.len() {
                    counts.orders = args[i + 1].parse().unwrap_or(counts.orders);
                    i += 1;
                }
            }
            "--reviews" => {
                if i + 1 < args.len() {
                    counts.reviews = args[i + 1].parse().unwrap_or(counts.reviews);
                    i += 1;
                }
            }
            "--results-dir" => {
                if i + 1 < args.len() {
                    results_dir = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    Some(CliArgs {
        command,
        counts,
        results_dir,
    })
}

async fn dispatch(cli: &CliArgs, config: &BenchConfig) -> HarnessResult<()> {
    match cli.command.as_str() {
        "setup-pg" => setup::run_pg(config).await,
        "setup-mongo" => setup::run_mongo(config).await,
        "populate" => populate::run(config, cli.counts).await,
        "perf" => perf::run(config).await,
        "cap" => cap::run(config).await,
        "report" => report::run(config),
        "all" => {
            populate::run(config, cli.counts).await?;
            perf::run(config).await?;
            cap::run(config).await?;
            report::run(config)
        }
        other => {
            eprintln!("unknown command: {other}");
            print_usage();
            std::process::exit(2);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") || args.is_empty() {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let cli = match parse_args(&args) {
        Some(cli) => cli,
        None => {
            print_usage();
            return ExitCode::from(2);
        }
    };

    let mut config = match BenchConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration invalid");
            return ExitCode::FAILURE;
        }
    };
    if let Some(dir) = &cli.results_dir {
        config.results_dir = dir.clone();
    }

    match dispatch(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, command = cli.command, "command failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let cli = parse_args(&args(&["populate"])).unwrap();
        assert_eq!(cli.command, "populate");
        assert_eq!(cli.counts.users, 100);
        assert_eq!(cli.counts.products, 200);
        assert!(cli.results_dir.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let cli = parse_args(&args(&[
            "all",
            "--users",
            "10",
            "--orders",
            "25",
            "--results-dir",
            "/tmp/out",
        ]))
        .unwrap();
        assert_eq!(cli.counts.users, 10);
        assert_eq!(cli.counts.orders, 25);
        assert_eq!(cli.counts.products, 200);
        assert_eq!(cli.results_dir.as_deref(), Some("/tmp/out"));
    }

    #[test]
    fn test_parse_bad_number_keeps_default() {
        let cli = parse_args(&args(&["populate", "--users", "lots"])).unwrap();
        assert_eq!(cli.counts.users, 100);
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert!(parse_args(&[]).is_none());
    }
}
