mod analytics;
mod config;
mod generate;
mod model;
mod pools;
mod report;

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// Dashboard Seed — generates a mock pull-request security dataset
/// (repositories, pull requests, bot findings and analytics) for the
/// security dashboard, written as a single JSON document.
#[derive(Parser, Debug)]
#[command(name = "dashboard-seed", version, about)]
struct Cli {
    /// Output file path for the JSON document (default: mock-data.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file path (default: .dashboard-seed.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of repositories to generate
    #[arg(long)]
    repositories: Option<usize>,

    /// Total number of pull requests across all repositories
    #[arg(long)]
    pull_requests: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print a summary of the generated data to the terminal
    #[arg(long)]
    summary: bool,
}

impl Cli {
    /// Command-line values take precedence over the config file.
    fn apply_overrides(&self, config: &mut config::Config) {
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(repositories) = self.repositories {
            config.generation.repositories = repositories;
        }
        if let Some(pull_requests) = self.pull_requests {
            config.generation.pull_requests = pull_requests;
        }
        if self.seed.is_some() {
            config.generation.seed = self.seed;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let mut config = match cli.config.as_deref() {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };
    cli.apply_overrides(&mut config);
    debug!(?config, "resolved configuration");

    let _main_span = info_span!(
        "dashboard_seed",
        org = %config.organization.name,
        seed = ?config.generation.seed
    )
    .entered();

    println!(
        "Generating dashboard data for {} repositories...",
        config.generation.repositories
    );

    let mut rng = match config.generation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = Local::now().naive_local();

    info!("assembling repositories and pull requests");
    let repositories = generate::Assembler::new(
        &config.generation,
        &config.organization.name,
        now,
        &mut rng,
    )?
    .assemble();

    info!("computing analytics");
    let data = analytics::build(repositories);
    info!(
        open_vulnerable = data.summary_analytics.open_prs_with_vulnerabilities,
        "analytics complete"
    );

    report::write(&data, &config.output.path)?;
    if cli.summary {
        report::print_summary(&data, &config.organization.name);
    }

    println!(
        "{} Successfully created {} for the security dashboard.",
        "✅".green(),
        config.output.path.display()
    );
    info!("done");

    Ok(())
}
