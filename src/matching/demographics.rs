// src/matching/demographics.rs - sex, date-of-birth, and national-id comparators

use super::{FieldWeight, StringDistance};
use crate::models::Profile;

const SEX_MATCH_WEIGHT: f32 = 1.0;
const SEX_MISMATCH_WEIGHT: f32 = -10.0;

// Maps the proportional date difference from [0, 1] onto [+14, -23]; sex is
// recorded reliably so a disagreement is heavily penalized, while dates of
// birth tolerate partial transcription errors.
const DOB_RANGE: f64 = 37.0;
const DOB_MAX_WEIGHT: f64 = 14.0;

const NATIONAL_ID_EXACT_WEIGHT: f32 = 7.0;
const NATIONAL_ID_CLOSE_WEIGHT: f32 = 2.0;

// TODO: account for sexes beyond M and F once the intake format carries them
pub fn sex_similarity(first: &Profile, second: &Profile) -> FieldWeight {
    let weight = if first.sex.eq_ignore_ascii_case(&second.sex) {
        SEX_MATCH_WEIGHT
    } else {
        SEX_MISMATCH_WEIGHT
    };
    FieldWeight::new(weight, SEX_MATCH_WEIGHT)
}

fn dob_fields(profile: &Profile) -> [&str; 3] {
    [
        profile.birth_year.as_str(),
        profile.birth_month.as_str(),
        profile.birth_day.as_str(),
    ]
}

/// Compare the three date-of-birth components with the year weighted twice
/// as heavily as the month or day. Records with no date at all on either
/// side are neutral rather than penalized.
pub fn dob_similarity(
    first: &Profile,
    second: &Profile,
    distance: StringDistance,
) -> FieldWeight {
    let first_dob = dob_fields(first);
    let second_dob = dob_fields(second);
    if first_dob.iter().all(|part| part.is_empty())
        || second_dob.iter().all(|part| part.is_empty())
    {
        return FieldWeight::NEUTRAL;
    }
    let year_diff = distance(first_dob[0], second_dob[0]) as f64;
    let month_diff = distance(first_dob[1], second_dob[1]) as f64;
    let month_length = first_dob[1].len().max(second_dob[1].len()).max(1) as f64;
    let day_diff = distance(first_dob[2], second_dob[2]) as f64;

    // year differences dominate: a wrong year is rarely the same person
    let prop_diff =
        0.5 * (year_diff / 4.0) + 0.25 * (month_diff / month_length) + 0.25 * (day_diff / 2.0);
    let weight = -(DOB_RANGE * prop_diff - DOB_MAX_WEIGHT);
    FieldWeight::new(weight as f32, DOB_MAX_WEIGHT as f32)
}

pub fn national_id_similarity(
    first: &Profile,
    second: &Profile,
    distance: StringDistance,
) -> FieldWeight {
    if first.national_id1.is_empty() && second.national_id1.is_empty() {
        return FieldWeight::NEUTRAL;
    }
    let difference = distance(&first.national_id1, &second.national_id1);
    let weight = match difference {
        0 => NATIONAL_ID_EXACT_WEIGHT,
        1 => NATIONAL_ID_CLOSE_WEIGHT,
        _ => 0.0,
    };
    FieldWeight::new(weight, NATIONAL_ID_EXACT_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strsim::damerau_levenshtein;

    fn profile_with_dob(year: &str, month: &str, day: &str) -> Profile {
        Profile {
            forename: "Jane".to_string(),
            current_surname: "Doe".to_string(),
            birth_year: year.to_string(),
            birth_month: month.to_string(),
            birth_day: day.to_string(),
            ..Profile::default()
        }
    }

    #[test]
    fn matching_sex_is_weak_positive_evidence() {
        let mut a = Profile::default();
        let mut b = Profile::default();
        a.sex = "F".to_string();
        b.sex = "f".to_string();
        assert_eq!(sex_similarity(&a, &b).weight, SEX_MATCH_WEIGHT);
        b.sex = "M".to_string();
        assert_eq!(sex_similarity(&a, &b).weight, SEX_MISMATCH_WEIGHT);
    }

    #[test]
    fn identical_dob_scores_the_maximum() {
        let a = profile_with_dob("1974", "02", "16");
        let fw = dob_similarity(&a, &a.clone(), damerau_levenshtein);
        assert_eq!(fw.weight, DOB_MAX_WEIGHT as f32);
        assert_eq!(fw.max_weight, DOB_MAX_WEIGHT as f32);
    }

    #[test]
    fn transposed_day_digits_still_score_positive() {
        let a = profile_with_dob("1974", "02", "16");
        let b = profile_with_dob("1974", "02", "61");
        let fw = dob_similarity(&a, &b, damerau_levenshtein);
        // one transposition in the day: prop_diff 0.125, weight 9.375
        assert!(fw.weight > 9.0 && fw.weight < 10.0);
    }

    #[test]
    fn entirely_different_dob_scores_negative() {
        let a = profile_with_dob("1974", "02", "16");
        let b = profile_with_dob("2038", "11", "30");
        let fw = dob_similarity(&a, &b, damerau_levenshtein);
        assert!(fw.weight < 0.0);
    }

    #[test]
    fn missing_dob_on_either_side_is_neutral() {
        let a = profile_with_dob("", "", "");
        let b = profile_with_dob("1974", "02", "16");
        assert_eq!(dob_similarity(&a, &b, damerau_levenshtein), FieldWeight::NEUTRAL);
        assert_eq!(dob_similarity(&b, &a, damerau_levenshtein), FieldWeight::NEUTRAL);
    }

    #[test]
    fn national_id_tiers() {
        let mut a = Profile::default();
        let mut b = Profile::default();
        assert_eq!(
            national_id_similarity(&a, &b, damerau_levenshtein),
            FieldWeight::NEUTRAL
        );

        a.national_id1 = "123-45-6789".to_string();
        b.national_id1 = "123-45-6789".to_string();
        assert_eq!(
            national_id_similarity(&a, &b, damerau_levenshtein).weight,
            NATIONAL_ID_EXACT_WEIGHT
        );

        b.national_id1 = "123-45-6798".to_string();
        assert_eq!(
            national_id_similarity(&a, &b, damerau_levenshtein).weight,
            NATIONAL_ID_CLOSE_WEIGHT
        );

        b.national_id1 = "999-99-9999".to_string();
        assert_eq!(
            national_id_similarity(&a, &b, damerau_levenshtein).weight,
            0.0
        );
    }
}
