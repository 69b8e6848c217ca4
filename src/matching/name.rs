// src/matching/name.rs - frequency-weighted forename and surname comparators

use super::{FieldWeight, StringDistance};
use crate::herd::Herd;
use crate::models::Record;

/// Rarity scaling for one class of name field. A match on a name whose
/// compression is common in the population is weak evidence, so it gets the
/// small multiplier; a match on a rare name gets the large one. The cutoffs
/// follow the Oxford record-linkage weights and could be tuned.
pub struct NameWeights {
    pub common: f64,
    pub rare: f64,
    pub rarity_cutoff: f64,
    pub missing_penalty: f32,
}

pub const FORENAME_WEIGHTS: NameWeights = NameWeights {
    common: 3.0,
    rare: 12.0,
    rarity_cutoff: 5.0 / 26.0,
    missing_penalty: -1.0,
};

pub const SURNAME_WEIGHTS: NameWeights = NameWeights {
    common: 6.0,
    rare: 17.0,
    rarity_cutoff: 1.0 / 500.0,
    missing_penalty: -3.0,
};

// Floor on observed frequencies so a code missing from the counters does not
// make every name look infinitely rare.
const FREQUENCY_FLOOR: f64 = 1.0 / 1000.0;

/// Which of the first record's forename slots is being compared.
#[derive(Debug, Clone, Copy)]
pub enum ForenameSlot {
    Forename,
    MidForename,
}

/// Which of the first record's surname slots is being compared.
#[derive(Debug, Clone, Copy)]
pub enum SurnameSlot {
    Birth,
    Current,
}

pub fn forename_similarity(
    herd: &Herd,
    first: &Record,
    second: &Record,
    slot: ForenameSlot,
    distance: StringDistance,
) -> FieldWeight {
    let first_profile = first.profile();
    let (first_name, first_code) = match slot {
        ForenameSlot::Forename => (
            first_profile.forename.as_str(),
            freq_ref(first, |meta| &meta.forename_freq_ref),
        ),
        ForenameSlot::MidForename => (
            first_profile.mid_forename.as_str(),
            freq_ref(first, |meta| &meta.mid_forename_freq_ref),
        ),
    };
    let second_profile = second.profile();
    if first_name.is_empty() {
        let counterpart = match slot {
            ForenameSlot::Forename => &second_profile.forename,
            ForenameSlot::MidForename => &second_profile.mid_forename,
        };
        if counterpart.is_empty() {
            return FieldWeight::NEUTRAL;
        }
        return FieldWeight::new(FORENAME_WEIGHTS.missing_penalty, 0.0);
    }
    let candidates = [
        (
            second_profile.forename.as_str(),
            freq_ref(second, |meta| &meta.forename_freq_ref),
        ),
        (
            second_profile.mid_forename.as_str(),
            freq_ref(second, |meta| &meta.mid_forename_freq_ref),
        ),
    ];
    scaled_name_weight(
        first_name,
        herd.forename_frequency(first_code),
        &candidates,
        |code| herd.forename_frequency(code),
        &FORENAME_WEIGHTS,
        distance,
    )
}

pub fn surname_similarity(
    herd: &Herd,
    first: &Record,
    second: &Record,
    slot: SurnameSlot,
    distance: StringDistance,
) -> FieldWeight {
    let first_profile = first.profile();
    let (first_name, first_code) = match slot {
        SurnameSlot::Birth => (
            first_profile.birth_surname.as_str(),
            freq_ref(first, |meta| &meta.birth_surname_freq_ref),
        ),
        SurnameSlot::Current => (
            first_profile.current_surname.as_str(),
            freq_ref(first, |meta| &meta.current_surname_freq_ref),
        ),
    };
    let second_profile = second.profile();
    if first_name.is_empty() {
        let counterpart = match slot {
            SurnameSlot::Birth => &second_profile.birth_surname,
            SurnameSlot::Current => &second_profile.current_surname,
        };
        if counterpart.is_empty() {
            return FieldWeight::NEUTRAL;
        }
        return FieldWeight::new(SURNAME_WEIGHTS.missing_penalty, 0.0);
    }
    let candidates = [
        (
            second_profile.birth_surname.as_str(),
            freq_ref(second, |meta| &meta.birth_surname_freq_ref),
        ),
        (
            second_profile.current_surname.as_str(),
            freq_ref(second, |meta| &meta.current_surname_freq_ref),
        ),
    ];
    scaled_name_weight(
        first_name,
        herd.surname_frequency(first_code),
        &candidates,
        |code| herd.surname_frequency(code),
        &SURNAME_WEIGHTS,
        distance,
    )
}

fn freq_ref<'a>(record: &'a Record, pick: impl Fn(&'a crate::models::Meta) -> &'a String) -> &'a str {
    record.meta().map(|meta| pick(meta).as_str()).unwrap_or("")
}

/// Shared core: choose whichever of the second record's two slots best
/// matches the first record's name, map the proportional edit distance from
/// [0, 1] onto [+2, -2], and scale by the rarity multiplier.
fn scaled_name_weight(
    first_name: &str,
    first_freq: f64,
    candidates: &[(&str, &str); 2],
    frequency: impl Fn(&str) -> f64,
    weights: &NameWeights,
    distance: StringDistance,
) -> FieldWeight {
    let diffs = [
        distance(first_name, candidates[0].0),
        distance(first_name, candidates[1].0),
    ];
    let chosen = if diffs[1] < diffs[0] { 1 } else { 0 };
    let (second_name, second_code) = candidates[chosen];
    let second_freq = frequency(second_code);

    let max_length = first_name
        .chars()
        .count()
        .max(second_name.chars().count());
    let prop_diff = diffs[chosen] as f64 / max_length as f64;
    let prop_freq = first_freq.max(second_freq).max(FREQUENCY_FLOOR);
    let multiplier = if prop_freq > weights.rarity_cutoff {
        weights.common
    } else {
        weights.rare
    };
    // lower difference means more similar, so the sign flips
    let weight = -(4.0 * prop_diff - 2.0) * multiplier;
    FieldWeight::new(weight as f32, (2.0 * multiplier) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::herd::{CorralConfig, Herd};
    use crate::models::{Profile, Record};
    use strsim::damerau_levenshtein;

    fn record(forename: &str, mid: &str, current: &str, birth: &str) -> Record {
        Record::from_profile(Profile {
            forename: forename.to_string(),
            mid_forename: mid.to_string(),
            current_surname: current.to_string(),
            birth_surname: birth.to_string(),
            ..Profile::default()
        })
        .unwrap()
    }

    fn indexed_herd(records: Vec<Record>) -> Herd {
        let mut herd = Herd::new();
        herd.populate(records).unwrap();
        herd.corral(&CorralConfig::default()).unwrap();
        herd
    }

    #[test]
    fn identical_rare_names_score_the_full_rare_weight() {
        let herd = indexed_herd(vec![
            record("Adelyn", "", "Bartell", ""),
            record("Adelyn", "", "Bartell", ""),
            record("Oliver", "", "Nader", ""),
        ]);
        let a = &herd.population()[0];
        let b = &herd.population()[1];
        let fw = surname_similarity(&herd, a, b, SurnameSlot::Current, damerau_levenshtein);
        // Bartell appears in 2 of 3 records: common, multiplier 6
        assert_eq!(fw.weight, 12.0);
        assert_eq!(fw.max_weight, 12.0);
    }

    #[test]
    fn surname_comparator_takes_the_better_of_both_slots() {
        let herd = indexed_herd(vec![
            record("Ann", "", "Smith", ""),
            record("Ann", "", "Jones", "Smith"),
        ]);
        let a = &herd.population()[0];
        let b = &herd.population()[1];
        let fw = surname_similarity(&herd, a, b, SurnameSlot::Current, damerau_levenshtein);
        // Smith matches b's birth surname exactly, so the weight is positive
        // despite the current surnames disagreeing
        assert!(fw.weight > 0.0);
        assert_eq!(fw.weight, fw.max_weight);
    }

    #[test]
    fn missing_mid_forename_on_both_sides_is_neutral() {
        let herd = indexed_herd(vec![
            record("Ann", "", "Smith", ""),
            record("Ann", "", "Smith", ""),
        ]);
        let a = &herd.population()[0];
        let b = &herd.population()[1];
        let fw = forename_similarity(&herd, a, b, ForenameSlot::MidForename, damerau_levenshtein);
        assert_eq!(fw, FieldWeight::NEUTRAL);
    }

    #[test]
    fn missing_mid_forename_on_one_side_is_penalized() {
        let herd = indexed_herd(vec![
            record("Ann", "", "Smith", ""),
            record("Ann", "Beth", "Smith", ""),
        ]);
        let a = &herd.population()[0];
        let b = &herd.population()[1];
        let fw = forename_similarity(&herd, a, b, ForenameSlot::MidForename, damerau_levenshtein);
        assert_eq!(fw.weight, FORENAME_WEIGHTS.missing_penalty);
        assert_eq!(fw.max_weight, 0.0);
    }

    #[test]
    fn completely_different_names_score_negative() {
        let herd = indexed_herd(vec![
            record("Ann", "", "Smith", ""),
            record("Zoe", "", "Kowalczyk", ""),
        ]);
        let a = &herd.population()[0];
        let b = &herd.population()[1];
        let fw = surname_similarity(&herd, a, b, SurnameSlot::Current, damerau_levenshtein);
        assert!(fw.weight < 0.0);
    }
}
