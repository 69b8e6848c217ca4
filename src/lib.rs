//! Entity resolution for health-record profiles.
//!
//! Given a population of partially-inconsistent identity records with no
//! ground-truth identifier, this crate surfaces which pairs plausibly
//! describe the same individual. Names are reduced to phonetic codes,
//! records sharing a blocking key are compared with a frequency-aware
//! field-weighted scorer, and the scores land in an N by N similarity
//! matrix addressed by accession number.
//!
//! ```no_run
//! use matching_lib::{CorralConfig, Herd, Profile, Record};
//!
//! # fn main() -> anyhow::Result<()> {
//! let profiles: Vec<Profile> = serde_json::from_str(r#"[
//!     {"forename": "Adelyn", "current_surname": "Bartell"},
//!     {"forename": "Adelynn", "current_surname": "Bartel"}
//! ]"#)?;
//! let records = profiles
//!     .into_iter()
//!     .map(Record::from_profile)
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let mut herd = Herd::new();
//! herd.populate(records)?;
//! herd.corral(&CorralConfig::default())?;
//! println!("{:?}", herd.similarity(0, 1));
//! # Ok(())
//! # }
//! ```

pub mod herd;
pub mod matching;
pub mod models;
pub mod phonetic;

pub use herd::{CorralConfig, Herd, HerdError};
pub use matching::record_similarity;
pub use models::{Profile, Record, RecordError};
pub use phonetic::{compress, double_metaphone, NameCompression, PhoneticAlgorithm};
