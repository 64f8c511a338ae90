//! Pronounceable name generation
//!
//! Base names are built from two fixed alphabets, either by strict
//! consonant/vowel alternation or from a `C`/`V` template, then expanded
//! across the requested TLDs.

mod generator;
mod pattern;

pub use generator::NameGenerator;
pub use pattern::{Pattern, Slot};

use rand::Rng;

pub const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];
pub const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n',
    'p', 'q', 'r', 's', 't', 'v', 'w', 'x', 'y', 'z',
];

/// Letter class used by patterns and alternation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Consonant,
    Vowel,
}

impl CharClass {
    /// Class of a character, `None` if it belongs to neither alphabet
    pub fn of(ch: char) -> Option<Self> {
        if CONSONANTS.contains(&ch) {
            Some(CharClass::Consonant)
        } else if VOWELS.contains(&ch) {
            Some(CharClass::Vowel)
        } else {
            None
        }
    }

    pub fn alphabet(&self) -> &'static [char] {
        match self {
            CharClass::Consonant => CONSONANTS,
            CharClass::Vowel => VOWELS,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            CharClass::Consonant => CharClass::Vowel,
            CharClass::Vowel => CharClass::Consonant,
        }
    }

    /// Uniform pick from this class's alphabet
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        let alphabet = self.alphabet();
        alphabet[rng.gen_range(0..alphabet.len())]
    }
}

/// Whether every character alternates class with its neighbour
pub fn is_alternating(name: &str) -> bool {
    let classes: Option<Vec<CharClass>> = name.chars().map(CharClass::of).collect();
    match classes {
        Some(classes) => classes.windows(2).all(|pair| pair[0] != pair[1]),
        None => false,
    }
}
