use anyhow::Context;
use clap::{Parser, ValueEnum};
use commit_stats::chart::{self, ChartOptions};
use commit_stats::export::{self, ExportOptions};
use commit_stats::{CommitAnalyzer, ExtractorConfig, TimestampSource};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// コミット単位の表のファイル名
const COMMITS_FILE: &str = "commits.csv";
/// 上位作成者の表のファイル名
const TOP_AUTHORS_FILE: &str = "top_authors.csv";
/// グラフ画像のファイル名
const CHART_FILE: &str = "commit_stats.png";

#[derive(Parser)]
#[command(
    version,
    about = "Summarizes authorship and commit timing of a Git branch",
    long_about = None
)]
struct Cli {
    /// Path to Git repository
    #[arg(short, long)]
    repo: PathBuf,

    /// Branch to walk
    #[arg(short, long, default_value = "main")]
    branch: String,

    /// Directory for the CSV files and the chart
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of top authors to keep
    #[arg(short = 'n', long, default_value_t = 5)]
    top: usize,

    /// Which signature time to bucket commits by
    #[arg(short, long, value_enum, default_value_t = TimestampArg::Author)]
    timestamp: TimestampArg,

    /// Summary format printed to stdout
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Do not write a UTF-8 byte order mark to the CSV files
    #[arg(long)]
    no_bom: bool,

    /// Skip rendering the chart image
    #[arg(long)]
    no_chart: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TimestampArg {
    /// Time the change was authored
    Author,
    /// Time the change was committed
    Committer,
}

impl From<TimestampArg> for TimestampSource {
    fn from(arg: TimestampArg) -> Self {
        match arg {
            TimestampArg::Author => TimestampSource::Author,
            TimestampArg::Committer => TimestampSource::Committer,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ExtractorConfig::new(&cli.repo, &cli.branch)
        .with_timestamp_source(cli.timestamp.into());

    let analyzer = CommitAnalyzer::new(config, cli.top).context("Failed to initialize analyzer")?;

    let analysis = analyzer.analyze().context("Failed to analyze repository")?;

    fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            cli.output_dir.display()
        )
    })?;

    let export_options = ExportOptions { bom: !cli.no_bom };
    export::write_commits_csv(
        cli.output_dir.join(COMMITS_FILE),
        &analysis.records,
        export_options,
    )
    .context("Failed to write commit table")?;
    export::write_top_authors_csv(
        cli.output_dir.join(TOP_AUTHORS_FILE),
        &analysis.view,
        export_options,
    )
    .context("Failed to write top author table")?;

    if !cli.no_chart {
        chart::render(
            &analysis.view,
            cli.output_dir.join(CHART_FILE),
            ChartOptions::default(),
        )
        .context("Failed to render chart")?;
    }

    info!(
        "Wrote results for {} commits to {}",
        analysis.view.total_commits,
        cli.output_dir.display()
    );

    match cli.format {
        Format::Json => {
            println!(
                "{}",
                export::summary_json(&analysis.view).context("Failed to serialize to JSON")?
            );
        }
        Format::Text => print_summary(&analysis.view),
    }

    Ok(())
}

fn print_summary(view: &commit_stats::AggregatedView) {
    println!("Commits: {}", view.total_commits);

    println!("\nTop authors:");
    for (rank, author) in view.top_authors.iter().enumerate() {
        println!("{:>3}. {} ({})", rank + 1, author.author, author.commits);
    }

    println!("\nCommits by hour (UTC):");
    for bucket in &view.hour_histogram {
        println!("  {:02}: {}", bucket.hour, bucket.commits);
    }

    println!("\nCommits by weekday (UTC):");
    for bucket in &view.weekday_histogram {
        println!("  {:<9} {}", bucket.name, bucket.commits);
    }
}
