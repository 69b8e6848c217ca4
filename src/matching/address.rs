// src/matching/address.rs - address normalization and the address/postal comparators

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::{FieldWeight, StringDistance};
use crate::models::Profile;

// Address free text is too noisy for a raw edit distance, so both sides are
// canonicalized first and only the leading characters are compared; street
// numbers and names carry the signal, trailing unit detail rarely does.
const ADDRESS_COMPARISON_PREFIX: usize = 12;

const ADDRESS_EXACT_WEIGHT: f32 = 7.0;
const ADDRESS_CLOSE_WEIGHT: f32 = 2.0;
const ADDRESS_CLOSE_CUTOFF: usize = 2;

const POSTAL_EXACT_WEIGHT: f32 = 4.0;
const POSTAL_CLOSE_WEIGHT: f32 = 1.0;

/// One synonym group from the lookup assets: every synonym rewrites to the
/// canonical abbreviation.
#[derive(Debug, Deserialize)]
struct SynonymGroup {
    canonical: String,
    synonyms: Vec<String>,
}

fn synonym_map(raw: &str) -> HashMap<String, String> {
    let groups: Vec<SynonymGroup> =
        serde_json::from_str(raw).expect("synonym lookup asset is valid JSON");
    let mut map = HashMap::new();
    for group in groups {
        map.insert(group.canonical.clone(), group.canonical.clone());
        for synonym in group.synonyms {
            map.insert(synonym, group.canonical.clone());
        }
    }
    map
}

static STREET_SUFFIXES: Lazy<HashMap<String, String>> =
    Lazy::new(|| synonym_map(include_str!("../../data/street_suffixes.json")));

static UNIT_DESIGNATORS: Lazy<HashMap<String, String>> =
    Lazy::new(|| synonym_map(include_str!("../../data/unit_designators.json")));

/// Lower-case an address, strip punctuation, and rewrite street-suffix and
/// unit-designator synonyms to their canonical abbreviations, so
/// "448 Jones Street" and "448 Jones St." normalize identically.
pub fn normalize_address(address: &str) -> String {
    let lower = address.to_lowercase();
    let stripped: String = lower
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    stripped
        .split_whitespace()
        .map(|token| {
            STREET_SUFFIXES
                .get(token)
                .or_else(|| UNIT_DESIGNATORS.get(token))
                .map(|canonical| canonical.as_str())
                .unwrap_or(token)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn comparison_key(profile: &Profile) -> String {
    let full = format!("{} {}", profile.address1, profile.address2);
    normalize_address(&full)
        .chars()
        .take(ADDRESS_COMPARISON_PREFIX)
        .collect()
}

pub fn address_similarity(
    first: &Profile,
    second: &Profile,
    distance: StringDistance,
) -> FieldWeight {
    let difference = distance(&comparison_key(first), &comparison_key(second));
    let weight = if difference == 0 {
        ADDRESS_EXACT_WEIGHT
    } else if difference <= ADDRESS_CLOSE_CUTOFF {
        ADDRESS_CLOSE_WEIGHT
    } else {
        0.0
    };
    FieldWeight::new(weight, ADDRESS_EXACT_WEIGHT)
}

pub fn postal_code_similarity(
    first: &Profile,
    second: &Profile,
    distance: StringDistance,
) -> FieldWeight {
    let difference = distance(&first.postal_code, &second.postal_code);
    // distance 1 covers a single typo or, with Damerau-Levenshtein, one
    // transposed pair of digits
    let weight = match difference {
        0 => POSTAL_EXACT_WEIGHT,
        1 => POSTAL_CLOSE_WEIGHT,
        _ => 0.0,
    };
    FieldWeight::new(weight, POSTAL_EXACT_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strsim::damerau_levenshtein;

    fn profile(address1: &str, address2: &str, postal_code: &str) -> Profile {
        Profile {
            forename: "Jane".to_string(),
            current_surname: "Doe".to_string(),
            address1: address1.to_string(),
            address2: address2.to_string(),
            postal_code: postal_code.to_string(),
            ..Profile::default()
        }
    }

    #[test]
    fn street_suffixes_rewrite_to_canonical_abbreviations() {
        assert_eq!(normalize_address("448 Jones Street"), "448 jones st");
        assert_eq!(
            normalize_address("448 Jones Avenue, Apartment 2"),
            "448 jones ave apt 2"
        );
    }

    #[test]
    fn blank_addresses_normalize_to_empty() {
        assert_eq!(normalize_address(""), "");
        assert_eq!(normalize_address("   \t "), "");
    }

    #[test]
    fn already_canonical_tokens_pass_through() {
        assert_eq!(normalize_address("17 Oak St Apt 4"), "17 oak st apt 4");
    }

    #[test]
    fn equivalent_spellings_score_the_exact_tier() {
        let a = profile("448 Jones Street", "", "");
        let b = profile("448 Jones St.", "", "");
        let fw = address_similarity(&a, &b, damerau_levenshtein);
        assert_eq!(fw.weight, ADDRESS_EXACT_WEIGHT);
    }

    #[test]
    fn near_miss_addresses_score_the_close_tier() {
        let a = profile("448 Jones Street", "", "");
        let b = profile("449 Jones Street", "", "");
        let fw = address_similarity(&a, &b, damerau_levenshtein);
        assert_eq!(fw.weight, ADDRESS_CLOSE_WEIGHT);
    }

    #[test]
    fn only_the_leading_characters_are_compared() {
        // differences past the 12-character prefix are invisible
        let a = profile("448 Jones Avenue", "Apartment 2", "");
        let b = profile("448 Jones Avenue", "Suite 900", "");
        let fw = address_similarity(&a, &b, damerau_levenshtein);
        assert_eq!(fw.weight, ADDRESS_EXACT_WEIGHT);
    }

    #[test]
    fn postal_code_tiers() {
        let exact = postal_code_similarity(
            &profile("", "", "47351"),
            &profile("", "", "47351"),
            damerau_levenshtein,
        );
        assert_eq!(exact.weight, POSTAL_EXACT_WEIGHT);

        let transposed = postal_code_similarity(
            &profile("", "", "47351"),
            &profile("", "", "47315"),
            damerau_levenshtein,
        );
        assert_eq!(transposed.weight, POSTAL_CLOSE_WEIGHT);

        let different = postal_code_similarity(
            &profile("", "", "47351"),
            &profile("", "", "90210"),
            damerau_levenshtein,
        );
        assert_eq!(different.weight, 0.0);
    }
}
