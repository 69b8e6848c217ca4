// src/bin/gen_profiles.rs - synthetic profile populations for exercising the matcher
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use matching_lib::Profile;

const FORENAMES: &[&str] = &[
    "Adelyn", "Oliver", "Charlotte", "Henry", "Amelia", "Theodore", "Evelyn", "Jack", "Harper",
    "Leo", "Margaret", "Silas", "Josephine", "Arthur", "Hazel", "Felix", "Clara", "Jasper",
    "Violet", "Hugo",
];

const SURNAMES: &[&str] = &[
    "Bartell", "Nader", "Gerlach", "Heidenreich", "Kowalczyk", "Schmidt", "Filipowicz",
    "Wasserman", "Thomas", "Jones", "Oliveira", "Katsaros", "MacDonald", "Breaux", "Nguyen",
    "Castillo", "Okafor", "Lindqvist",
];

const STREETS: &[&str] = &[
    "Jones Street", "Oak Avenue", "Maple Drive", "Birch Lane", "Cedar Court", "Elm Boulevard",
    "Willow Way", "Chestnut Terrace",
];

const CITIES: &[&str] = &["Springfield", "Riverton", "Fairview", "Lakewood", "Ashland"];

/// Generate a synthetic patient population with seeded duplicates.
#[derive(Debug, Parser)]
#[command(name = "gen_profiles", version, about)]
struct Args {
    /// Number of base individuals to generate.
    #[arg(short, long, default_value_t = 100)]
    count: usize,

    /// Probability that any individual also appears as a corrupted duplicate.
    #[arg(short, long, default_value_t = 0.2)]
    duplicate_rate: f64,

    /// RNG seed, for reproducible populations.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Write the JSON array here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let mut profiles = Vec::new();
    let mut duplicates = 0usize;
    for _ in 0..args.count {
        let profile = random_profile(&mut rng);
        if rng.gen_bool(args.duplicate_rate) {
            profiles.push(corrupted_copy(&profile, &mut rng));
            duplicates += 1;
        }
        profiles.push(profile);
    }
    profiles.shuffle(&mut rng);
    info!(
        "generated {} profiles ({} seeded duplicates)",
        profiles.len(),
        duplicates
    );

    let report = serde_json::to_string_pretty(&profiles)?;
    match args.output {
        Some(path) => fs::write(&path, report)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{report}"),
    }
    Ok(())
}

fn random_profile(rng: &mut StdRng) -> Profile {
    let mid_forename = if rng.gen_bool(0.6) {
        pick(rng, FORENAMES).to_string()
    } else {
        String::new()
    };
    let birth_surname = if rng.gen_bool(0.3) {
        pick(rng, SURNAMES).to_string()
    } else {
        String::new()
    };
    Profile {
        forename: pick(rng, FORENAMES).to_string(),
        mid_forename,
        current_surname: pick(rng, SURNAMES).to_string(),
        birth_surname,
        address1: format!("{} {}", rng.gen_range(1..2000), pick(rng, STREETS)),
        city: pick(rng, CITIES).to_string(),
        postal_code: format!("{:05}", rng.gen_range(10000..99999)),
        sex: if rng.gen_bool(0.5) { "F" } else { "M" }.to_string(),
        national_id1: format!(
            "{:03}-{:02}-{:04}",
            rng.gen_range(1..900),
            rng.gen_range(1..99),
            rng.gen_range(1..9999)
        ),
        birth_year: rng.gen_range(1930..2010).to_string(),
        birth_month: format!("{:02}", rng.gen_range(1..=12)),
        birth_day: format!("{:02}", rng.gen_range(1..=28)),
        ..Profile::default()
    }
}

/// Reintroduce the individual with the kinds of damage real intake data
/// shows: a typo in a name, a dropped middle name, a surname change with the
/// old name kept as birth surname, or transposed date digits.
fn corrupted_copy(original: &Profile, rng: &mut StdRng) -> Profile {
    let mut copy = original.clone();
    match rng.gen_range(0..4) {
        0 => copy.forename = with_typo(&copy.forename, rng),
        1 => copy.mid_forename.clear(),
        2 => {
            copy.birth_surname = copy.current_surname.clone();
            copy.current_surname = pick(rng, SURNAMES).to_string();
        }
        _ => copy.birth_day = transpose(&copy.birth_day),
    }
    copy
}

fn with_typo(name: &str, rng: &mut StdRng) -> String {
    let mut chars: Vec<char> = name.chars().collect();
    if chars.len() < 2 {
        return name.to_string();
    }
    let position = rng.gen_range(1..chars.len());
    chars[position] = *pick(rng, &['a', 'e', 'i', 'o', 'u', 'n', 'r', 's', 't']);
    chars.into_iter().collect()
}

fn transpose(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    if chars.len() >= 2 {
        let last = chars.len() - 1;
        chars.swap(last - 1, last);
    }
    chars.into_iter().collect()
}

fn pick<'a, T>(rng: &mut StdRng, pool: &'a [T]) -> &'a T {
    pool.choose(rng).expect("pools are non-empty")
}
