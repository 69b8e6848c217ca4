// src/phonetic/mod.rs - uniform interface over the phonetic encoders

pub mod double_metaphone;
pub mod word;

use std::str::FromStr;

use rphonetic::{Encoder, Metaphone, Nysiis, Soundex};
use thiserror::Error;

pub use double_metaphone::double_metaphone;
pub use word::Word;

/// The closed set of phonetic encoders available for blocking and frequency
/// compression. Double Metaphone is implemented in this crate; the three
/// classical algorithms come from `rphonetic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneticAlgorithm {
    Soundex,
    Nysiis,
    Metaphone,
    DoubleMetaphone,
}

#[derive(Debug, Error)]
#[error("unrecognized phonetic algorithm '{0}', expected one of soundex, nysiis, metaphone, dmetaphone")]
pub struct UnknownAlgorithm(String);

impl FromStr for PhoneticAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "soundex" => Ok(PhoneticAlgorithm::Soundex),
            "nysiis" => Ok(PhoneticAlgorithm::Nysiis),
            "metaphone" => Ok(PhoneticAlgorithm::Metaphone),
            "dmetaphone" | "double_metaphone" => Ok(PhoneticAlgorithm::DoubleMetaphone),
            other => Err(UnknownAlgorithm(other.to_string())),
        }
    }
}

impl PhoneticAlgorithm {
    /// Encode one name. Double Metaphone contributes up to two codes; the
    /// single-code algorithms exactly one. Codes may be empty for inputs the
    /// encoder cannot voice (empty strings, digits).
    pub fn encode(&self, name: &str) -> Vec<String> {
        match self {
            PhoneticAlgorithm::Soundex => vec![Soundex::default().encode(name)],
            PhoneticAlgorithm::Nysiis => vec![Nysiis::default().encode(name)],
            PhoneticAlgorithm::Metaphone => vec![Metaphone::default().encode(name)],
            PhoneticAlgorithm::DoubleMetaphone => {
                let (primary, secondary) = double_metaphone(name);
                vec![primary, secondary]
            }
        }
    }
}

/// How a name field is reduced to a frequency-reference code. The original
/// Oxford record-linkage scheme counts forenames by first initial, which
/// gives coarser but better-populated frequency classes than a full phonetic
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCompression {
    FirstLetter,
    Phonetic(PhoneticAlgorithm),
}

impl NameCompression {
    /// The single code used as a frequency-counter key; empty when the name
    /// itself is empty.
    pub fn compress_one(&self, name: &str) -> String {
        match self {
            NameCompression::FirstLetter => name
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
            NameCompression::Phonetic(algorithm) => compress(&[name], *algorithm)
                .into_iter()
                .next()
                .unwrap_or_default(),
        }
    }
}

/// Compress a batch of names, flattening Double Metaphone's dual codes into
/// the output and dropping empty codes. When nothing can be encoded the
/// result is a single empty-string sentinel, never an empty sequence, so a
/// caller can always index the first code.
pub fn compress<S: AsRef<str>>(names: &[S], algorithm: PhoneticAlgorithm) -> Vec<String> {
    let mut compressions: Vec<String> = names
        .iter()
        .flat_map(|name| algorithm.encode(name.as_ref()))
        .filter(|code| !code.is_empty())
        .collect();
    if compressions.is_empty() {
        compressions.push(String::new());
    }
    compressions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soundex_compression() {
        assert_eq!(
            compress(&["Jellyfish"], PhoneticAlgorithm::Soundex),
            vec!["J412"]
        );
    }

    #[test]
    fn double_metaphone_flattens_both_codes() {
        assert_eq!(
            compress(&["Jellyfish"], PhoneticAlgorithm::DoubleMetaphone),
            vec!["JLFX", "ALFX"]
        );
        // single-code words contribute only their primary
        assert_eq!(
            compress(&["Thomas"], PhoneticAlgorithm::DoubleMetaphone),
            vec!["TMS"]
        );
    }

    #[test]
    fn empty_input_returns_the_sentinel() {
        assert_eq!(compress(&[""], PhoneticAlgorithm::Soundex), vec![""]);
        assert_eq!(
            compress::<&str>(&[], PhoneticAlgorithm::DoubleMetaphone),
            vec![""]
        );
        assert_eq!(
            compress(&["", ""], PhoneticAlgorithm::DoubleMetaphone),
            vec![""]
        );
    }

    #[test]
    fn multiple_names_concatenate_in_order() {
        let codes = compress(&["Bartell", "Gerlach"], PhoneticAlgorithm::DoubleMetaphone);
        assert_eq!(codes, vec!["PRTL", "KRLK", "JRLK"]);
    }

    #[test]
    fn first_letter_compression() {
        assert_eq!(NameCompression::FirstLetter.compress_one("adelyn"), "A");
        assert_eq!(NameCompression::FirstLetter.compress_one(""), "");
    }

    #[test]
    fn algorithm_parsing() {
        assert_eq!(
            "dmetaphone".parse::<PhoneticAlgorithm>().unwrap(),
            PhoneticAlgorithm::DoubleMetaphone
        );
        assert!("caverphone".parse::<PhoneticAlgorithm>().is_err());
    }
}
