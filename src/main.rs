use std::io::{stderr, stdout, BufWriter};
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use ofx_ingest::{BatchEngine, BatchEvent, BatchFile, BatchParsedTransaction, ImportOptions, MissingFieldPolicy};

const CSV_HEADER: [&str; 7] = ["file_index", "filename", "date", "type", "amount", "description", "fitid"];
const USAGE: &str = "Usage: ofx-ingest [--log-level level] [--skip-invalid] [input].ofx... > [output].csv";

struct CliArgs {
    files: Vec<PathBuf>,
    log_level: LevelFilter,
    skip_invalid: bool
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    };

    setup_logging(args.log_level);

    let mut files = Vec::with_capacity(args.files.len());

    for path in &args.files {
        let file = BatchFile::read(path).await
            .with_context(|| format!("Unable to read {}", path.display()))?;
        files.push(file);
    }

    let policy = if args.skip_invalid {
        MissingFieldPolicy::SkipRecord
    } else {
        MissingFieldPolicy::FailFile
    };

    let engine = BatchEngine::new(ImportOptions::default().with_missing_field_policy(policy));

    let timer = Instant::now();
    let transactions = engine.collect_transactions_with_progress(files, log_progress).await;
    let duration = timer.elapsed();

    info!("Imported {} transactions in: {duration:?}", transactions.len());

    write_results_to_stdout(&transactions)?;

    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<CliArgs> {
    let mut files = Vec::new();
    let mut log_level = LevelFilter::ERROR;
    let mut skip_invalid = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--log-level" => log_level = parse_log_level(&args.next()?),
            "--skip-invalid" => skip_invalid = true,
            "-h" | "--help" => return None,
            _ => files.push(PathBuf::from(arg))
        }
    }

    if files.is_empty() {
        return None;
    }

    Some(CliArgs { files, log_level, skip_invalid })
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the CSV output, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn log_progress(event: &BatchEvent) {
    match event {
        BatchEvent::FileStart { file_index, filename } => info!("[{file_index}] Importing {filename}"),
        BatchEvent::Transaction { .. } => {}
        BatchEvent::FileComplete { file_index, filename, transaction_count } => {
            info!("[{file_index}] {filename}: {transaction_count} transactions")
        }
        BatchEvent::FileError { file_index, filename, error } => warn!("[{file_index}] {filename} skipped: {error}"),
        BatchEvent::BatchComplete { total_files, total_transactions, error_count } => {
            info!("{total_files} files, {total_transactions} transactions, {error_count} failed")
        }
    }
}

fn write_results_to_stdout(transactions: &[BatchParsedTransaction]) -> Result<()> {
    let mut output = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(stdout().lock()));

    output.write_record(CSV_HEADER)?;

    for transaction in transactions {
        output.serialize(transaction)?;
    }

    output.flush()?;

    Ok(())
}
