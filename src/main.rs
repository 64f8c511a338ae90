//! Domain Finder - generate pronounceable domain names and check them via DNS
//!
//! `generate` prints candidates, `check` probes a given list, and `find`
//! does both in one go.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use domain_finder::{
    domain::{parse_domain_list, AvailabilityChecker},
    BatchReport, CheckConfig, CheckOutcome, DomainFinderError, GenerationConfig, MetricsSnapshot, NameGenerator,
    ResolverBackend,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "domain-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate pronounceable domain names and check their availability via DNS")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file with checker settings
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Max lookups in flight (1-20)
    #[arg(short = 'w', long, global = true, value_name = "N")]
    workers: Option<usize>,

    /// Per-lookup timeout in seconds (1-10)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Total attempts per domain for inconclusive lookups (1-5)
    #[arg(long, global = true, value_name = "N")]
    retries: Option<usize>,

    /// Resolver backend: hickory or system
    #[arg(long, global = true, value_name = "BACKEND")]
    resolver: Option<ResolverBackend>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print generated candidate names
    Generate(GenerateArgs),
    /// Check the availability of the given domains
    Check(CheckArgs),
    /// Generate candidates and check them
    Find(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of base names
    #[arg(short = 'n', long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    count: u64,

    /// Characters per base name
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u64).range(1..=63))]
    length: u64,

    /// Template over C (consonant), V (vowel) and literal characters, e.g. CVCV
    #[arg(short, long)]
    pattern: Option<String>,

    /// Overwrite the start of every name
    #[arg(long)]
    prefix: Option<String>,

    /// Overwrite the end of every name
    #[arg(long)]
    suffix: Option<String>,

    /// TLDs to expand each name into (comma-separated or repeated)
    #[arg(short, long = "tld", value_name = "TLD", value_delimiter = ',', default_value = "com")]
    tlds: Vec<String>,

    /// Print JSON instead of plain text
    #[arg(short, long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Fully qualified domains to check
    #[arg(value_name = "DOMAIN")]
    domains: Vec<String>,

    /// File with one domain per line (`#` starts a comment)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Print the JSON report instead of plain text
    #[arg(short, long)]
    json: bool,
}

impl GenerateArgs {
    fn generation_config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::new(self.count as usize, self.length as usize).with_tlds(
            self.tlds
                .iter()
                .map(|tld| tld.trim().trim_start_matches('.').to_lowercase())
                .filter(|tld| !tld.is_empty()),
        );
        config.pattern = self.pattern.clone();
        config.prefix = self.prefix.clone();
        config.suffix = self.suffix.clone();
        config
    }
}

#[tokio::main]
async fn main() {
    // Initialize the library
    if let Err(e) = domain_finder::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<DomainFinderError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Generate(args) => {
            let names = NameGenerator::new().generate(&args.generation_config());
            print_names(&names, args.json)
        }
        Command::Check(args) => {
            let domains = collect_domains(args)?;
            let checker = build_checker(&cli)?;
            let report = check_with_progress(&checker, &domains, args.json).await;
            print_report(&report, args.json)?;
            print_metrics(&checker.get_metrics_snapshot(), cli.verbose && !args.json);
            Ok(())
        }
        Command::Find(args) => {
            let names = NameGenerator::new().generate(&args.generation_config());
            let checker = build_checker(&cli)?;
            let report = check_with_progress(&checker, &names, args.json).await;
            print_report(&report, args.json)?;
            print_metrics(&checker.get_metrics_snapshot(), cli.verbose && !args.json);
            Ok(())
        }
    }
}

/// Defaults < config file < environment < flags
fn build_checker(cli: &Cli) -> anyhow::Result<AvailabilityChecker> {
    let mut config = CheckConfig::resolve(cli.config.as_deref()).context("failed to load configuration")?;

    if let Some(workers) = cli.workers {
        config = config.with_max_workers(workers);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = cli.retries {
        config = config.with_retry_attempts(retries);
    }
    if let Some(resolver) = cli.resolver {
        config = config.with_resolver(resolver);
    }

    AvailabilityChecker::with_config(config).context("invalid checker configuration")
}

fn collect_domains(args: &CheckArgs) -> anyhow::Result<Vec<String>> {
    let mut domains = args.domains.clone();
    if let Some(path) = &args.file {
        domains.extend(read_domain_file(path)?);
    }

    if domains.is_empty() {
        bail!("no domains given; pass them as arguments or with --file");
    }
    Ok(domains)
}

fn read_domain_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read domain list {}", path.display()))?;
    Ok(parse_domain_list(&content))
}

async fn check_with_progress(checker: &AvailabilityChecker, domains: &[String], quiet: bool) -> BatchReport {
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        create_progressbar(domains.len() as u64)
    };

    let report = checker
        .check_report_with_progress(domains, |result| {
            progress.set_message(result.domain.clone());
            progress.inc(1);
        })
        .await;
    progress.finish_and_clear();

    report
}

fn create_progressbar(len: u64) -> ProgressBar {
    let progress_bar = ProgressBar::new(len);
    progress_bar.enable_steady_tick(Duration::from_millis(100));
    match ProgressStyle::with_template("{elapsed_precise} {bar:36.cyan/blue} {pos:>4}/{len:4} {msg}") {
        Ok(style) => progress_bar.set_style(style.progress_chars("■■□")),
        Err(e) => tracing::debug!(error = %e, "Falling back to default progress style"),
    }
    progress_bar
}

fn print_names(names: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(names)?);
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}

fn print_report(report: &BatchReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for result in &report.results {
        match result.outcome {
            CheckOutcome::Available => println!("✓ {} AVAILABLE", result.domain),
            CheckOutcome::Registered { ip } => println!("✗ {} TAKEN (IP: {})", result.domain, ip),
            CheckOutcome::Indeterminate => println!("? {} UNKNOWN", result.domain),
        }
    }

    let summary = &report.summary;
    println!();
    println!("📈 Summary:");
    println!("   ✓ Available: {}", summary.available);
    println!("   ✗ Taken: {}", summary.taken);
    if summary.unknown > 0 {
        println!("   ? Unknown: {}", summary.unknown);
    }
    println!("   📊 Total checked: {}", summary.total);
    println!("   ⏱️  Total time: {:.2}s", report.duration_seconds);

    Ok(())
}

/// Lookup timings, shown with --verbose
fn print_metrics(metrics: &MetricsSnapshot, enabled: bool) {
    if !enabled || metrics.domains_checked == 0 {
        return;
    }

    println!("   📊 Average check time: {:.1}ms", metrics.avg_check_time_ms());
    if metrics.retries > 0 {
        println!("   🔁 Retries: {}", metrics.retries);
    }
    if let Some((domain, duration)) = &metrics.slowest {
        println!("   🐢 Slowest: {} ({}ms)", domain, duration.as_millis());
    }
}
