// src/main.rs
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::Serialize;

use matching_lib::{CorralConfig, Herd, PhoneticAlgorithm, Profile, Record};

/// Score a population of patient profiles for likely duplicates.
#[derive(Debug, Parser)]
#[command(name = "corral", version, about)]
struct Args {
    /// Path to a JSON array of profile objects.
    input: PathBuf,

    /// Minimum similarity score a pair must reach to be reported.
    #[arg(short, long, default_value_t = 0.6)]
    threshold: f32,

    /// Phonetic algorithm used for blocking: soundex, nysiis, metaphone,
    /// or dmetaphone.
    #[arg(short, long, default_value = "dmetaphone")]
    blocking: PhoneticAlgorithm,

    /// Write the matched-pair report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct MatchedPair {
    first_accession: usize,
    second_accession: usize,
    first_name: String,
    second_name: String,
    score: f32,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();
    let start_time = Instant::now();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let profiles: Vec<Profile> =
        serde_json::from_str(&raw).context("input is not a JSON array of profiles")?;
    info!("loaded {} profiles from {}", profiles.len(), args.input.display());

    let mut records = Vec::with_capacity(profiles.len());
    let mut rejected = 0usize;
    for (index, profile) in profiles.into_iter().enumerate() {
        match Record::from_profile(profile) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!("skipping profile {index}: {err}");
                rejected += 1;
            }
        }
    }
    if rejected > 0 {
        warn!("rejected {rejected} profiles missing required name fields");
    }

    let mut herd = Herd::new();
    herd.populate(records).context("failed to populate herd")?;

    let config = CorralConfig {
        blocking_method: args.blocking,
        ..CorralConfig::default()
    };
    let spinner = ProgressBar::new_spinner().with_message("corralling");
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")?);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    herd.corral(&config).context("matching pipeline failed")?;
    spinner.finish_and_clear();
    info!("corralled {} records in {:.2?}", herd.size(), start_time.elapsed());

    let pairs = matched_pairs(&herd, args.threshold);
    info!(
        "{} pairs scored at or above threshold {}",
        pairs.len(),
        args.threshold
    );

    let report = serde_json::to_string_pretty(&pairs)?;
    match args.output {
        Some(path) => {
            fs::write(&path, report)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("report written to {}", path.display());
        }
        None => println!("{report}"),
    }
    Ok(())
}

/// Collect each unordered pair whose better-direction score clears the
/// threshold. Scores are direction-dependent when name slots differ, so both
/// cells are consulted.
fn matched_pairs(herd: &Herd, threshold: f32) -> Vec<MatchedPair> {
    let mut pairs = Vec::new();
    for first in 0..herd.size() {
        for second in (first + 1)..herd.size() {
            let forward = herd.similarity(first, second);
            let backward = herd.similarity(second, first);
            let score = match (forward, backward) {
                (Some(a), Some(b)) => a.max(b),
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => continue,
            };
            if score >= threshold {
                pairs.push(MatchedPair {
                    first_accession: first,
                    second_accession: second,
                    first_name: herd.population()[first].to_string(),
                    second_name: herd.population()[second].to_string(),
                    score,
                });
            }
        }
    }
    pairs.sort_by(|a, b| b.score.total_cmp(&a.score));
    pairs
}
