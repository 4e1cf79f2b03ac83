//! analyzer-bench CLI.
//!
//! Runs the configured benchmark suites and writes their reports.

use analyzer_bench::{
    discover_suite, run_suite, BenchError, BenchResult, Harness, HarnessConfig, ReportWriter,
    SuiteConfig,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "analyzer-bench")]
#[command(about = "Correctness benchmark for C/C++ static analyzers", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file (built-in defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path of the analyzer under evaluation
    #[arg(long, global = true, env = "ANALYZER_BENCH_SUBJECT")]
    subject_analyzer: Option<PathBuf>,

    /// Worker threads (defaults to every core)
    #[arg(long, global = true)]
    jobs: Option<usize>,

    /// Per-invocation timeout in seconds, 0 disables
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Directory receiving the reports
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run suites and write their reports (all suites by default)
    Run {
        /// Suite to run; repeat for several
        #[arg(long)]
        suite: Vec<String>,
    },

    /// Print discovered case ids without running any analyzer
    List {
        /// Suite to list; repeat for several
        #[arg(long)]
        suite: Vec<String>,
    },

    /// Print the built-in configuration as JSON
    DefaultConfig,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> BenchResult<()> {
    if let Some(Commands::DefaultConfig) = cli.command {
        println!("{}", serde_json::to_string_pretty(&HarnessConfig::default())?);
        return Ok(());
    }

    let config = load_config(&cli)?;

    match &cli.command {
        Some(Commands::List { suite }) => {
            for suite in select_suites(&config, suite)? {
                for case in discover_suite(suite)? {
                    println!("{}\t{}", suite.name, case.id);
                }
            }
            Ok(())
        }
        Some(Commands::Run { suite }) => run_suites(&config, suite),
        None => run_suites(&config, &[]),
        Some(Commands::DefaultConfig) => Ok(()),
    }
}

/// File (or defaults) plus command-line overrides, validated.
fn load_config(cli: &Cli) -> BenchResult<HarnessConfig> {
    let mut config = match &cli.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };

    if let Some(path) = &cli.subject_analyzer {
        config.tools.subject_path = path.clone();
    }
    if let Some(jobs) = cli.jobs {
        config.jobs = Some(jobs);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Suites named on the command line (first occurrence of each), or every
/// configured suite.
fn select_suites<'a>(
    config: &'a HarnessConfig,
    names: &[String],
) -> BenchResult<Vec<&'a SuiteConfig>> {
    if names.is_empty() {
        return Ok(config.suites.iter().collect());
    }
    let mut selected: Vec<&SuiteConfig> = Vec::with_capacity(names.len());
    for name in names {
        let suite = config
            .suite(name)
            .ok_or_else(|| BenchError::Config(format!("unknown suite '{name}'")))?;
        // A repeated name would write the same reports twice.
        if !selected.iter().any(|s| s.name == suite.name) {
            selected.push(suite);
        }
    }
    Ok(selected)
}

fn run_suites(config: &HarnessConfig, names: &[String]) -> BenchResult<()> {
    let suites = select_suites(config, names)?;
    let harness = Harness::from_config(config)?;
    let mut writer = ReportWriter::new(&config.output_dir);

    for suite in suites {
        let outcome = run_suite(&harness, suite, &mut writer)?;
        println!("{} ({} cases)", outcome.name, outcome.summary.total_tests);
        print!("{}", outcome.summary.summary());
    }
    Ok(())
}
