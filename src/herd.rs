// src/herd.rs - population container and the two-pass matching pipeline

use std::collections::HashMap;
use std::fmt;

use log::{debug, info};
use ndarray::Array2;
use strsim::damerau_levenshtein;
use thiserror::Error;

use crate::matching::{record_similarity, StringDistance};
use crate::models::Record;
use crate::phonetic::{NameCompression, PhoneticAlgorithm};

#[derive(Debug, Error)]
pub enum HerdError {
    #[error("herd is already populated; build a new herd to change the population")]
    AlreadyPopulated,
    #[error("cannot populate a herd with zero records")]
    EmptyPopulation,
    #[error("herd must be populated before corralling")]
    NotPopulated,
}

/// Strategy knobs for one corral run. The defaults follow the Oxford
/// record-linkage scheme: forename frequencies by first initial (coarse but
/// well-populated classes), surname frequencies and blocking by Double
/// Metaphone, and transposition-tolerant edit distance everywhere.
#[derive(Debug, Clone, Copy)]
pub struct CorralConfig {
    pub blocking_method: PhoneticAlgorithm,
    pub forename_freq_method: NameCompression,
    pub surname_freq_method: NameCompression,
    pub name_distance: StringDistance,
    pub field_distance: StringDistance,
}

impl Default for CorralConfig {
    fn default() -> Self {
        CorralConfig {
            blocking_method: PhoneticAlgorithm::DoubleMetaphone,
            forename_freq_method: NameCompression::FirstLetter,
            surname_freq_method: NameCompression::Phonetic(PhoneticAlgorithm::DoubleMetaphone),
            name_distance: damerau_levenshtein,
            field_distance: damerau_levenshtein,
        }
    }
}

/// A fixed population of records plus everything derived from it: the block
/// index, the two name-frequency counters, and the pairwise similarity
/// matrix. The population is set once; every derived structure is rebuilt
/// from scratch on each [`Herd::corral`] call.
#[derive(Debug, Default)]
pub struct Herd {
    population: Vec<Record>,
    block_index: HashMap<String, Vec<usize>>,
    forename_freqs: HashMap<String, usize>,
    forename_freq_total: usize,
    surname_freqs: HashMap<String, usize>,
    surname_freq_total: usize,
    similarity_matrix: Option<Array2<f32>>,
}

impl Herd {
    pub fn new() -> Self {
        Herd::default()
    }

    pub fn population(&self) -> &[Record] {
        &self.population
    }

    pub fn size(&self) -> usize {
        self.population.len()
    }

    /// Adopt the population. Accession numbers are positions in `records`,
    /// so the caller's ordering is the matrix ordering.
    pub fn populate(&mut self, records: Vec<Record>) -> Result<(), HerdError> {
        if !self.population.is_empty() {
            return Err(HerdError::AlreadyPopulated);
        }
        if records.is_empty() {
            return Err(HerdError::EmptyPopulation);
        }
        info!("populating herd with {} records", records.len());
        self.population = records;
        Ok(())
    }

    /// Run the full matching pipeline.
    ///
    /// Pass 1 indexes every record: blocking keys, frequency-reference codes,
    /// frequency counters, block index. Pass 2 scores every pair of records
    /// sharing at least one blocking key and writes the scores into the
    /// similarity matrix. The passes cannot be interleaved because scoring
    /// reads the finished frequency counters.
    pub fn corral(&mut self, config: &CorralConfig) -> Result<(), HerdError> {
        if self.population.is_empty() {
            return Err(HerdError::NotPopulated);
        }
        self.block_index.clear();
        self.forename_freqs.clear();
        self.forename_freq_total = 0;
        self.surname_freqs.clear();
        self.surname_freq_total = 0;
        self.similarity_matrix = None;

        for accession in 0..self.population.len() {
            let record = &mut self.population[accession];
            record.gen_blocks(config.blocking_method);
            record.save_name_freq_refs(
                accession,
                config.forename_freq_method,
                config.surname_freq_method,
            );
            let meta = match record.meta() {
                Some(meta) => meta,
                None => continue,
            };
            let forename_refs = [
                meta.forename_freq_ref.clone(),
                meta.mid_forename_freq_ref.clone(),
            ];
            let surname_refs = [
                meta.birth_surname_freq_ref.clone(),
                meta.current_surname_freq_ref.clone(),
            ];
            let blocks: Vec<String> = record.blocks().iter().cloned().collect();

            for code in forename_refs {
                if !code.is_empty() {
                    *self.forename_freqs.entry(code).or_insert(0) += 1;
                    self.forename_freq_total += 1;
                }
            }
            for code in surname_refs {
                if !code.is_empty() {
                    *self.surname_freqs.entry(code).or_insert(0) += 1;
                    self.surname_freq_total += 1;
                }
            }
            for block in blocks {
                self.block_index.entry(block).or_default().push(accession);
            }
        }
        debug!(
            "indexed {} records into {} blocks",
            self.population.len(),
            self.block_index.len()
        );

        // Cells stay NaN unless some block brings the pair together, which
        // keeps "never compared" distinguishable from a computed zero.
        let size = self.population.len();
        let mut matrix = Array2::from_elem((size, size), f32::NAN);
        let mut comparisons = 0usize;
        for record in &self.population {
            let accession = match record.meta() {
                Some(meta) => meta.accession,
                None => continue,
            };
            for block in record.blocks() {
                let members = match self.block_index.get(block) {
                    Some(members) => members,
                    None => continue,
                };
                for &other in members {
                    let score = record_similarity(
                        self,
                        record,
                        &self.population[other],
                        config.name_distance,
                        config.field_distance,
                    );
                    matrix[[accession, other]] = score;
                    comparisons += 1;
                }
            }
        }
        info!(
            "corralled {} records with {} in-block comparisons",
            size, comparisons
        );
        self.similarity_matrix = Some(matrix);
        Ok(())
    }

    /// Proportion of counted forename codes equal to `code`; 0.0 for the
    /// empty code or before any indexing pass has run.
    pub fn forename_frequency(&self, code: &str) -> f64 {
        proportion(&self.forename_freqs, self.forename_freq_total, code)
    }

    pub fn surname_frequency(&self, code: &str) -> f64 {
        proportion(&self.surname_freqs, self.surname_freq_total, code)
    }

    pub fn forename_freq_count(&self, code: &str) -> usize {
        self.forename_freqs.get(code).copied().unwrap_or(0)
    }

    pub fn surname_freq_count(&self, code: &str) -> usize {
        self.surname_freqs.get(code).copied().unwrap_or(0)
    }

    /// The score for a pair of accessions, or `None` if the pair is out of
    /// range or was never brought together by any block.
    pub fn similarity(&self, first: usize, second: usize) -> Option<f32> {
        let score = *self.similarity_matrix.as_ref()?.get([first, second])?;
        if score.is_nan() {
            None
        } else {
            Some(score)
        }
    }

    pub fn similarity_matrix(&self) -> Option<&Array2<f32>> {
        self.similarity_matrix.as_ref()
    }
}

fn proportion(freqs: &HashMap<String, usize>, total: usize, code: &str) -> f64 {
    if code.is_empty() || total == 0 {
        return 0.0;
    }
    freqs.get(code).copied().unwrap_or(0) as f64 / total as f64
}

impl fmt::Display for Herd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "herd of {} records", self.population.len())
    }
}
