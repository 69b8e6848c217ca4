// src/phonetic/word.rs - padded, case/diacritic-folded view of a single name

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const PREPAD: &str = "--";
const POSTPAD: &str = "------";

/// An upper-cased, diacritic-stripped name bracketed by non-letter pad
/// regions. The pads are sized so the encoder's widest window (six characters
/// in either direction) can never read outside the buffer, which keeps the
/// rule groups free of bounds checks.
pub struct Word {
    upper: String,
    chars: Vec<char>,
    start_index: isize,
    end_index: isize,
}

impl Word {
    pub fn new(input: &str) -> Self {
        // Cedilla folds to a plain 's' before decomposition; NFD then splits
        // accented letters into base + combining marks, which are dropped.
        let folded: String = input
            .chars()
            .map(|c| if c == '\u{c7}' || c == '\u{e7}' { 's' } else { c })
            .collect();
        let normalized: String = folded.nfd().filter(|c| !is_combining_mark(*c)).collect();
        let upper = normalized.to_uppercase();

        let chars: Vec<char> = PREPAD.chars().chain(upper.chars()).chain(POSTPAD.chars()).collect();
        let start_index = PREPAD.len() as isize;
        let end_index = start_index + upper.chars().count() as isize - 1;
        Word {
            upper,
            chars,
            start_index,
            end_index,
        }
    }

    /// Index of the first character of the unpadded word within the buffer.
    pub fn start_index(&self) -> isize {
        self.start_index
    }

    /// Index of the last character of the unpadded word within the buffer.
    /// One less than `start_index` when the word is empty.
    pub fn end_index(&self) -> isize {
        self.end_index
    }

    /// Single-character window read. Out-of-range positions resolve to the
    /// pad character, which never matches a letter pattern.
    pub fn at(&self, index: isize) -> char {
        if index < 0 || index >= self.chars.len() as isize {
            return '-';
        }
        self.chars[index as usize]
    }

    /// Range window read over the padded buffer, clamped at both ends the way
    /// a Python slice would be. A fully out-of-range window yields "".
    pub fn slice(&self, from: isize, to: isize) -> String {
        let len = self.chars.len() as isize;
        let from = from.clamp(0, len);
        let to = to.clamp(0, len);
        if from >= to {
            return String::new();
        }
        self.chars[from as usize..to as usize].iter().collect()
    }

    /// Window read relative to the unpadded word's logical indices.
    pub fn letters(&self, from: isize, to: isize) -> String {
        self.slice(self.start_index + from, self.start_index + to)
    }

    /// Heuristic used by several encoder rules: names of Slavic or Germanic
    /// origin are pronounced differently in a handful of contexts.
    pub fn is_slavo_germanic(&self) -> bool {
        self.upper.contains('W')
            || self.upper.contains('K')
            || self.upper.contains("CZ")
            || self.upper.contains("WITZ")
    }
}
