//! `C`/`V` name templates

use rand::Rng;

use super::CharClass;

/// A single position in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Class(CharClass),
    Literal(char),
}

/// Parsed template such as `CVCC` or `CVxV`
///
/// `C` and `V` are matched case-insensitively; anything else is copied
/// verbatim into the generated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    slots: Vec<Slot>,
}

impl Pattern {
    pub fn parse(template: &str) -> Self {
        let slots = template
            .chars()
            .map(|ch| match ch {
                'C' | 'c' => Slot::Class(CharClass::Consonant),
                'V' | 'v' => Slot::Class(CharClass::Vowel),
                other => Slot::Literal(other),
            })
            .collect();
        Self { slots }
    }

    /// Number of characters this template produces
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn fill<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Class(class) => class.pick(rng),
                Slot::Literal(ch) => *ch,
            })
            .collect()
    }

    /// Whether `name` could have been produced by this template
    pub fn matches(&self, name: &str) -> bool {
        name.chars().count() == self.slots.len()
            && name.chars().zip(&self.slots).all(|(ch, slot)| match slot {
                Slot::Class(class) => CharClass::of(ch) == Some(*class),
                Slot::Literal(lit) => ch == *lit,
            })
    }
}
