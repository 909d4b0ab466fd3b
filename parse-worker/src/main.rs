//! fragstats-worker - Replay decoded CTF session streams into stats records.
//!
//! Each input file is one session: a JSON-lines message stream produced by
//! the recording decoder. Sessions are independent and processed in parallel.
//!
//! Usage: fragstats-worker [--catalog FILE] [--settings FILE] [--output-dir DIR] <inputs>...
//!
//! Output: `<stem>.frags.json`, `<stem>.items.json` and `<stem>.stats.json`
//! per input, plus a JSON summary of the run on stdout.

mod output;
mod stream;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use clap::Parser;
use fragstats_core::catalog::default_catalog_path;
use fragstats_core::config::resolve_settings;
use fragstats_core::summary::reconcile;
use fragstats_core::{Catalog, CatalogError, ScoringSettings, SessionSummary, SummaryMeta, replay};
use fragstats_types::formatting::{format_duration_f32, format_score_delta};
use rayon::prelude::*;
use tracing_subscriber::filter::EnvFilter;

use output::{FailedInput, SessionOutput, WorkerOutput, output_path, write_json};
use stream::StreamError;

#[derive(Parser)]
#[command(version, about = "Replay decoded CTF session streams into frag, item and stats records")]
struct Args {
    /// Message stream files, one JSON message per line
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Fragfile catalog (default: user catalog if present, else builtin)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Scoring settings TOML (default: user settings if present, else builtin)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Directory for the generated JSON files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

/// Initialize logging, writing to FRAGSTATS_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("FRAGSTATS_LOG_PATH")
        && let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(e) = fs::create_dir_all(&args.output_dir) {
        tracing::error!(error = %e, dir = %args.output_dir.display(), "Failed to create output dir");
        std::process::exit(1);
    }

    let catalog = match load_catalog(args.catalog.as_deref()) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog");
            std::process::exit(1);
        }
    };

    let settings = match resolve_settings(args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load settings");
            std::process::exit(1);
        }
    };

    let timer = std::time::Instant::now();

    let results: Vec<_> = args
        .inputs
        .par_iter()
        .map(|input| {
            let result = process_file(input, &catalog, settings, &args.output_dir);
            (input, result)
        })
        .collect();

    let mut output = WorkerOutput::default();
    for (input, result) in results {
        match result {
            Ok(session) => output.sessions.push(session),
            Err(e) => {
                tracing::error!(input = %input.display(), error = %e, "Session failed");
                output.failed.push(FailedInput {
                    input: input.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    output.elapsed_ms = timer.elapsed().as_millis();

    // Output JSON to stdout for the caller
    if let Ok(json) = serde_json::to_string(&output) {
        println!("{}", json);
    }

    if !output.failed.is_empty() {
        std::process::exit(1);
    }
}

/// Explicit catalog, else the user's catalog if it exists, else the builtin.
fn load_catalog(explicit: Option<&Path>) -> Result<Catalog, CatalogError> {
    if let Some(path) = explicit {
        return Catalog::load_file(path);
    }
    match default_catalog_path() {
        Some(path) if path.is_file() => Catalog::load_file(&path),
        _ => {
            let catalog = Catalog::builtin()?;
            tracing::info!(definitions = catalog.len(), "Using builtin catalog");
            Ok(catalog)
        }
    }
}

fn process_file(
    input: &Path,
    catalog: &Arc<Catalog>,
    settings: ScoringSettings,
    output_dir: &Path,
) -> Result<SessionOutput, StreamError> {
    let messages = stream::read_messages(input)?;
    let message_count = messages.len();
    let report = replay(Arc::clone(catalog), settings, messages);

    tracing::info!(
        input = %input.display(),
        messages = message_count,
        players = report.roster.len(),
        matched = report.counts.matched,
        unmatched = report.counts.unmatched,
        duration = %format_duration_f32(report.state.duration),
        "Session replayed"
    );
    for check in reconcile(&report.roster) {
        tracing::info!(
            player = %check.name,
            team = %check.team,
            frags = check.frags,
            derived = check.derived,
            delta = %format_score_delta(check.delta()),
            "Score check"
        );
    }

    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("session");
    let meta = SummaryMeta {
        date: session_date(input),
        demo: input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        ..SummaryMeta::default()
    };

    let frags_path = output_path(output_dir, stem, "frags");
    let items_path = output_path(output_dir, stem, "items");
    let stats_path = output_path(output_dir, stem, "stats");
    write_json(&frags_path, &report.ledger.frag_rows(&report.roster))?;
    write_json(&items_path, &report.ledger.item_rows(&report.roster))?;
    write_json(&stats_path, &SessionSummary::build(&report, meta))?;

    Ok(SessionOutput {
        input: input.to_path_buf(),
        map: report.state.map_name.clone(),
        duration_secs: report.state.duration,
        players: report.roster.scoring_players().count(),
        matched: report.counts.matched,
        unmatched: report.counts.unmatched,
        frags_path,
        items_path,
        stats_path,
    })
}

/// Recording date from the input's modification time, in local time.
fn session_date(input: &Path) -> String {
    let modified = fs::metadata(input)
        .and_then(|m| m.modified())
        .unwrap_or_else(|_| SystemTime::now());
    DateTime::<Local>::from(modified)
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string()
}
