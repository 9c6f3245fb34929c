use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use evaluation::StrategyKind;
use harness::config::{
    DEFAULT_AT, DEFAULT_DATA_DIR, DEFAULT_FOLDS, DEFAULT_NEIGHBORHOOD_SIZE, DEFAULT_SEED,
    DEFAULT_THRESHOLD, DEFAULT_URL,
};
use harness::{CrossValidationPipeline, CrossValidationReport, RunConfig};
use recommender::Similarity;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

/// Rival CV - offline cross-validation of a user-based recommender
#[derive(Parser)]
#[command(name = "rival-cv")]
#[command(
    about = "Split a ratings dataset into folds, recommend, and report NDCG, RMSE and precision",
    long_about = None
)]
struct Cli {
    /// Relevance threshold: test ratings at or above it count as relevant
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Split each user's ratings across folds (false splits all ratings at once)
    #[arg(short = 'u', long, default_value_t = true, action = ArgAction::Set)]
    per_user: bool,

    /// Number of nearest neighbours the recommender uses
    #[arg(short = 'n', long, default_value_t = DEFAULT_NEIGHBORHOOD_SIZE)]
    neighborhood_size: usize,

    /// Number of cross-validation folds
    #[arg(long, default_value_t = DEFAULT_FOLDS)]
    folds: usize,

    /// Cutoff of NDCG and precision
    #[arg(long, default_value_t = DEFAULT_AT)]
    at: usize,

    /// Seed of every shuffle in the run
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Dataset directory; all outputs are written below it
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Where to download the dataset archive from when u.data is missing
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// User similarity: pearson, cosine or euclidean
    #[arg(long, default_value = "pearson")]
    similarity: Similarity,

    /// Candidate items per user: user-test, test-items, train-items, all-items, rel-plus-n
    #[arg(long, default_value = "user-test")]
    strategy: StrategyKind,

    /// Score the strategy-filtered models instead of the raw recommendations
    #[arg(long)]
    evaluate_strategy_output: bool,

    /// Also write the per-fold results as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> (RunConfig, Option<PathBuf>) {
        let config = RunConfig {
            data_dir: self.data_dir,
            url: self.url,
            folds: self.folds,
            at: self.at,
            threshold: self.threshold,
            per_user: self.per_user,
            neighborhood_size: self.neighborhood_size,
            seed: self.seed,
            similarity: self.similarity,
            strategy: self.strategy,
            evaluate_strategy_output: self.evaluate_strategy_output,
        };
        (config, self.report)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout only carries split paths and results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (config, report_path) = Cli::parse().into_config();
    let pipeline = CrossValidationPipeline::new(config).context("Invalid configuration")?;
    let start = Instant::now();

    if pipeline.provision().await? {
        info!("Dataset downloaded into {}", pipeline.config().data_dir.display());
    }

    // A failing stage is reported and the next one still runs on whatever
    // files are already on disk
    match pipeline.prepare_splits() {
        Ok(written) => info!("Wrote {} folds", written.len()),
        Err(e) => error!("Split stage failed: {:#}", e),
    }
    match pipeline.recommend() {
        Ok(summaries) => {
            for summary in summaries.iter().filter(|s| s.aborted) {
                warn!(
                    "Fold {} has recommendations for {} of {} users",
                    summary.fold, summary.users_written, summary.test_users
                );
            }
        }
        Err(e) => error!("Recommendation stage failed: {:#}", e),
    }
    if let Err(e) = pipeline.prepare_strategy() {
        error!("Strategy stage failed: {:#}", e);
    }

    let report = pipeline.evaluate().context("Evaluation failed")?;
    print_report(&report);
    println!(
        "{} Finished {} folds in {:.2?}",
        "✓".green(),
        report.folds.len(),
        start.elapsed()
    );

    if let Some(path) = report_path {
        report.write_json(&path)?;
        info!("Report written to {}", path.display());
    }
    Ok(())
}

fn print_report(report: &CrossValidationReport) {
    println!(
        "{}",
        format!(
            "Cross-validation ({} similarity, {} strategy):",
            report.config.similarity, report.config.strategy
        )
        .bold()
        .blue()
    );
    for line in report.summary_lines() {
        println!("{}", line);
    }
}
