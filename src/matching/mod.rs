// src/matching/mod.rs - field comparators and the record-level aggregate

pub mod address;
pub mod demographics;
pub mod name;

use crate::herd::Herd;
use crate::models::Record;

/// Edit-distance strategy supplied by the caller; `strsim::levenshtein` and
/// `strsim::damerau_levenshtein` both fit.
pub type StringDistance = fn(&str, &str) -> usize;

/// A comparator's verdict for one field: a signed evidence weight, and the
/// weight the field could have contributed at best for this pair. Negative
/// weights are evidence against a match. Fields absent on both sides
/// contribute (0, 0) so they neither help nor dilute the aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeight {
    pub weight: f32,
    pub max_weight: f32,
}

impl FieldWeight {
    pub const NEUTRAL: FieldWeight = FieldWeight {
        weight: 0.0,
        max_weight: 0.0,
    };

    pub fn new(weight: f32, max_weight: f32) -> Self {
        FieldWeight { weight, max_weight }
    }
}

/// Score the likelihood that two records describe the same individual.
///
/// Sums the independent field comparators and normalizes by the maximum
/// attainable sum for this pair, so two identical fully-indexed records
/// score exactly 1.0 and confidently mismatched records can go negative.
///
/// Name comparators pick the second record's best-matching name slot, so
/// `record_similarity(herd, a, b)` need not equal
/// `record_similarity(herd, b, a)` when the two records populate their name
/// slots differently.
pub fn record_similarity(
    herd: &Herd,
    first: &Record,
    second: &Record,
    name_distance: StringDistance,
    field_distance: StringDistance,
) -> f32 {
    let first_profile = first.profile();
    let second_profile = second.profile();
    let parts = [
        name::forename_similarity(herd, first, second, name::ForenameSlot::Forename, name_distance),
        name::forename_similarity(
            herd,
            first,
            second,
            name::ForenameSlot::MidForename,
            name_distance,
        ),
        name::surname_similarity(herd, first, second, name::SurnameSlot::Birth, name_distance),
        name::surname_similarity(herd, first, second, name::SurnameSlot::Current, name_distance),
        address::address_similarity(first_profile, second_profile, field_distance),
        address::postal_code_similarity(first_profile, second_profile, field_distance),
        demographics::sex_similarity(first_profile, second_profile),
        demographics::dob_similarity(first_profile, second_profile, field_distance),
        demographics::national_id_similarity(first_profile, second_profile, field_distance),
    ];
    let total: f32 = parts.iter().map(|part| part.weight).sum();
    let max_total: f32 = parts.iter().map(|part| part.max_weight).sum();
    if max_total == 0.0 {
        0.0
    } else {
        total / max_total
    }
}
