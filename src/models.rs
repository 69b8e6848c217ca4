// src/models.rs - profiles, per-record metadata, and blocking-key generation

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::phonetic::{compress, NameCompression, PhoneticAlgorithm};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("a forename and current surname must be supplied")]
    MissingIdentifier,
}

/// Patient-identifying information extracted from a single health record.
/// Every field is a string; unpopulated fields are empty strings, never
/// absent. Numeric JSON values for the date and postal fields are coerced on
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Also known as first name.
    pub forename: String,
    /// Also known as middle name.
    pub mid_forename: String,
    /// Last name at birth, often the mother's maiden name.
    pub birth_surname: String,
    /// Current last name; can differ from the birth surname after marriage.
    pub current_surname: String,
    /// Sr., Junior, II, etc.
    pub suffix: String,
    /// Street address, such as "100 Main Street".
    pub address1: String,
    /// Apartment or unit information, such as "Apt. 201".
    pub address2: String,
    pub city: String,
    pub state_province: String,
    #[serde(deserialize_with = "string_or_number")]
    pub postal_code: String,
    pub country: String,
    /// Physiological sex (M or F).
    pub sex: String,
    /// The gender the patient identifies with.
    pub gender: String,
    /// E.g. a social security number; use the same kind of ID across the
    /// whole population.
    pub national_id1: String,
    /// A second identifying number, such as a driver's license.
    pub id2: String,
    /// Medical record number.
    pub mrn: String,
    /// YYYY.
    #[serde(deserialize_with = "string_or_number")]
    pub birth_year: String,
    /// MM.
    #[serde(deserialize_with = "string_or_number")]
    pub birth_month: String,
    /// DD.
    #[serde(deserialize_with = "string_or_number")]
    pub birth_day: String,
    /// One of A, B, AB, or O with an optional +/- RhD status.
    pub blood_type: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(i64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Derived identity bookkeeping for one record. `accession` is the record's
/// fixed position in the herd and addresses the similarity matrix; `person`
/// starts equal to it and is the slot a later linkage decision would
/// reassign. The four frequency references are the phonetic codes counted in
/// the herd-wide rarity counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub person: usize,
    pub accession: usize,
    pub forename_freq_ref: String,
    pub mid_forename_freq_ref: String,
    pub birth_surname_freq_ref: String,
    pub current_surname_freq_ref: String,
}

/// One profile plus the phonetic material derived from it during indexing.
/// Records never hold a reference back to their owning herd; the blocking
/// keys and frequency references are opaque strings the herd resolves.
#[derive(Debug, Clone)]
pub struct Record {
    profile: Profile,
    meta: Option<Meta>,
    blocks: HashSet<String>,
}

impl Record {
    /// Validate and wrap a profile. A record without both a forename and a
    /// current surname cannot be blocked or scored meaningfully and is
    /// rejected outright.
    pub fn from_profile(profile: Profile) -> Result<Self, RecordError> {
        if profile.forename.is_empty() || profile.current_surname.is_empty() {
            return Err(RecordError::MissingIdentifier);
        }
        Ok(Record {
            profile,
            meta: None,
            blocks: HashSet::new(),
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn blocks(&self) -> &HashSet<String> {
        &self.blocks
    }

    /// Generate and store the record's blocking keys: the phonetic
    /// compressions of both surnames, each combined with the first letter of
    /// each populated forename, upper-cased and deduplicated. Regenerating
    /// with the same algorithm yields the same set.
    pub fn gen_blocks(&mut self, algorithm: PhoneticAlgorithm) {
        let surnames: Vec<&str> = [
            self.profile.current_surname.as_str(),
            self.profile.birth_surname.as_str(),
        ]
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect();
        let bases = compress(&surnames, algorithm);

        let forenames = [
            self.profile.forename.as_str(),
            self.profile.mid_forename.as_str(),
        ]
        .into_iter()
        .filter(|name| !name.is_empty());

        let mut blocks = HashSet::new();
        for forename in forenames {
            let initial = forename.chars().next().unwrap_or_default();
            for base in &bases {
                blocks.insert(format!("{base}{initial}").to_uppercase());
            }
        }
        self.blocks = blocks;
    }

    /// Compress the four name fields into frequency-reference codes and
    /// record the accession number assigned at population time.
    pub fn save_name_freq_refs(
        &mut self,
        record_number: usize,
        forename_method: NameCompression,
        surname_method: NameCompression,
    ) {
        let profile = &self.profile;
        self.meta = Some(Meta {
            person: record_number,
            accession: record_number,
            forename_freq_ref: forename_method.compress_one(&profile.forename),
            mid_forename_freq_ref: forename_method.compress_one(&profile.mid_forename),
            birth_surname_freq_ref: surname_method.compress_one(&profile.birth_surname),
            current_surname_freq_ref: surname_method.compress_one(&profile.current_surname),
        });
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.profile.forename,
            self.profile.current_surname,
            self.meta
                .as_ref()
                .map(|meta| meta.accession.to_string())
                .unwrap_or_else(|| "unindexed".to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(forename: &str, mid: &str, current: &str, birth: &str) -> Profile {
        Profile {
            forename: forename.to_string(),
            mid_forename: mid.to_string(),
            current_surname: current.to_string(),
            birth_surname: birth.to_string(),
            ..Profile::default()
        }
    }

    #[test]
    fn records_require_forename_and_current_surname() {
        assert!(Record::from_profile(profile("", "", "Nader", "")).is_err());
        assert!(Record::from_profile(profile("Oliver", "", "", "")).is_err());
        assert!(Record::from_profile(profile("Oliver", "", "Nader", "")).is_ok());
    }

    #[test]
    fn single_surname_single_forename_yields_one_block() {
        let mut record = Record::from_profile(profile("Oliver", "", "Nader", "")).unwrap();
        record.gen_blocks(PhoneticAlgorithm::DoubleMetaphone);
        let expected: HashSet<String> = ["NTRO".to_string()].into();
        assert_eq!(record.blocks(), &expected);
    }

    #[test]
    fn two_surnames_two_forenames_yield_the_full_cross_product() {
        let mut record =
            Record::from_profile(profile("Adelyn", "Heidenreich", "Bartell", "Gerlach")).unwrap();
        record.gen_blocks(PhoneticAlgorithm::DoubleMetaphone);
        let expected: HashSet<String> = ["PRTLA", "KRLKA", "JRLKA", "PRTLH", "KRLKH", "JRLKH"]
            .iter()
            .map(|block| block.to_string())
            .collect();
        assert_eq!(record.blocks(), &expected);
    }

    #[test]
    fn block_generation_is_idempotent() {
        let mut record =
            Record::from_profile(profile("Adelyn", "Heidenreich", "Bartell", "Gerlach")).unwrap();
        record.gen_blocks(PhoneticAlgorithm::DoubleMetaphone);
        let first = record.blocks().clone();
        record.gen_blocks(PhoneticAlgorithm::DoubleMetaphone);
        assert_eq!(record.blocks(), &first);
    }

    #[test]
    fn freq_refs_cover_all_four_name_fields() {
        let mut record =
            Record::from_profile(profile("Adelyn", "Heidenreich", "Bartell", "Gerlach")).unwrap();
        record.save_name_freq_refs(
            7,
            NameCompression::FirstLetter,
            NameCompression::Phonetic(PhoneticAlgorithm::DoubleMetaphone),
        );
        let meta = record.meta().unwrap();
        assert_eq!(meta.person, 7);
        assert_eq!(meta.accession, 7);
        assert_eq!(meta.forename_freq_ref, "A");
        assert_eq!(meta.mid_forename_freq_ref, "H");
        assert_eq!(meta.current_surname_freq_ref, "PRTL");
        assert_eq!(meta.birth_surname_freq_ref, "KRLK");
    }

    #[test]
    fn missing_profile_keys_default_to_empty_strings() {
        let profile: Profile =
            serde_json::from_str(r#"{"forename": "Jane", "current_surname": "Doe"}"#).unwrap();
        assert_eq!(profile.forename, "Jane");
        assert_eq!(profile.mid_forename, "");
        assert_eq!(profile.birth_year, "");
    }

    #[test]
    fn numeric_date_fields_are_coerced() {
        let profile: Profile = serde_json::from_str(
            r#"{"forename": "Jane", "current_surname": "Doe",
                "birth_year": 1974, "birth_month": "02", "birth_day": 6,
                "postal_code": 47351}"#,
        )
        .unwrap();
        assert_eq!(profile.birth_year, "1974");
        assert_eq!(profile.birth_month, "02");
        assert_eq!(profile.birth_day, "6");
        assert_eq!(profile.postal_code, "47351");
    }
}
