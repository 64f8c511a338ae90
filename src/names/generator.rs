//! Candidate name generator

use rand::Rng;

use super::{CharClass, Pattern};
use crate::types::GenerationConfig;

/// Stateless generator of candidate domain names
///
/// Never fails: a template whose length disagrees with `length` silently
/// falls back to alternation, and affixes are clipped to the name length.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameGenerator;

impl NameGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate `count × tlds` candidates using the thread-local RNG
    pub fn generate(&self, config: &GenerationConfig) -> Vec<String> {
        self.generate_with_rng(config, &mut rand::thread_rng())
    }

    /// Same as [`generate`](Self::generate) with a caller-supplied RNG
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Vec<String> {
        let pattern = config
            .pattern
            .as_deref()
            .map(Pattern::parse)
            .filter(|p| p.len() == config.length);

        if config.pattern.is_some() && pattern.is_none() {
            tracing::debug!(
                pattern = config.pattern.as_deref().unwrap_or_default(),
                length = config.length,
                "Pattern length mismatch, falling back to alternation"
            );
        }

        let mut names = Vec::with_capacity(config.count * config.tlds.len());

        for _ in 0..config.count {
            let base = match &pattern {
                Some(pattern) => pattern.fill(rng),
                None => self.alternating(config.length, rng),
            };
            let base = apply_affixes(base, config.prefix.as_deref(), config.suffix.as_deref());

            for tld in &config.tlds {
                names.push(format!("{}.{}", base, tld));
            }
        }

        names
    }

    /// Strict consonant/vowel alternation with a random starting class
    pub fn alternating<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> String {
        let mut class = if rng.gen_bool(0.5) {
            CharClass::Consonant
        } else {
            CharClass::Vowel
        };

        let mut name = String::with_capacity(length);
        for _ in 0..length {
            name.push(class.pick(rng));
            class = class.other();
        }
        name
    }
}

/// Overwrite leading/trailing positions in place; length never changes
fn apply_affixes(base: String, prefix: Option<&str>, suffix: Option<&str>) -> String {
    let mut chars: Vec<char> = base.chars().collect();
    let len = chars.len();

    if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
        if !base.starts_with(prefix) {
            for (slot, ch) in chars.iter_mut().zip(prefix.chars()) {
                *slot = ch;
            }
        }
    }

    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        let current: String = chars.iter().collect();
        if !current.ends_with(suffix) {
            let suffix: Vec<char> = suffix.chars().collect();
            let take = suffix.len().min(len);
            chars[len - take..].copy_from_slice(&suffix[suffix.len() - take..]);
        }
    }

    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{is_alternating, CONSONANTS, VOWELS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn base(name: &str) -> &str {
        name.split('.').next().unwrap()
    }

    #[test]
    fn test_count_times_tlds() {
        let config = GenerationConfig::new(20, 4).with_tlds(["com", "io"]);
        let names = NameGenerator::new().generate_with_rng(&config, &mut rng());
        assert_eq!(names.len(), 40);

        // each base name appears once per tld, in tld order
        for pair in names.chunks(2) {
            assert_eq!(base(&pair[0]), base(&pair[1]));
            assert!(pair[0].ends_with(".com"));
            assert!(pair[1].ends_with(".io"));
            assert_eq!(pair[0].len(), 4 + 1 + 3);
            assert_eq!(pair[1].len(), 4 + 1 + 2);
        }
    }

    #[test]
    fn test_default_tld() {
        let names = NameGenerator::new().generate_with_rng(&GenerationConfig::new(3, 5), &mut rng());
        assert_eq!(names.len(), 3);
        assert!(names.iter().all(|n| n.ends_with(".com")));
    }

    #[test]
    fn test_empty_tlds_yield_nothing() {
        let config = GenerationConfig::new(5, 4).with_tlds(Vec::<String>::new());
        assert!(NameGenerator::new().generate_with_rng(&config, &mut rng()).is_empty());
    }

    #[test]
    fn test_alternation() {
        let gen = NameGenerator::new();
        let mut rng = rng();
        let mut starts_with_vowel = false;
        let mut starts_with_consonant = false;

        for _ in 0..200 {
            let name = gen.alternating(6, &mut rng);
            assert_eq!(name.len(), 6);
            assert!(name.chars().all(|c| CONSONANTS.contains(&c) || VOWELS.contains(&c)));
            assert!(is_alternating(&name), "{} is not alternating", name);
            match CharClass::of(name.chars().next().unwrap()) {
                Some(CharClass::Vowel) => starts_with_vowel = true,
                Some(CharClass::Consonant) => starts_with_consonant = true,
                None => unreachable!(),
            }
        }

        assert!(starts_with_vowel && starts_with_consonant);
    }

    #[test]
    fn test_pattern_cvcc() {
        let config = GenerationConfig::new(5, 4).with_pattern("CVCC");
        let names = NameGenerator::new().generate_with_rng(&config, &mut rng());
        let pattern = Pattern::parse("CVCC");

        assert_eq!(names.len(), 5);
        for name in &names {
            assert!(pattern.matches(base(name)), "{} does not match CVCC", name);
        }
    }

    #[test]
    fn test_pattern_length_mismatch_falls_back() {
        let config = GenerationConfig::new(50, 4).with_pattern("CVC");
        let names = NameGenerator::new().generate_with_rng(&config, &mut rng());

        assert_eq!(names.len(), 50);
        for name in &names {
            assert_eq!(base(name).len(), 4);
            assert!(is_alternating(base(name)));
        }
    }

    #[test]
    fn test_prefix_overwrites() {
        let config = GenerationConfig::new(30, 5).with_prefix("go");
        for name in NameGenerator::new().generate_with_rng(&config, &mut rng()) {
            assert!(name.starts_with("go"));
            assert_eq!(base(&name).len(), 5);
        }
    }

    #[test]
    fn test_suffix_overwrites() {
        let config = GenerationConfig::new(30, 5).with_suffix("ly").with_tlds(["io"]);
        for name in NameGenerator::new().generate_with_rng(&config, &mut rng()) {
            assert!(base(&name).ends_with("ly"));
            assert_eq!(base(&name).len(), 5);
        }
    }

    #[test]
    fn test_affixes_keep_length() {
        assert_eq!(apply_affixes("bako".into(), Some("go"), None), "goko");
        assert_eq!(apply_affixes("goko".into(), Some("go"), None), "goko");
        assert_eq!(apply_affixes("bako".into(), None, Some("ly")), "baly");
        assert_eq!(apply_affixes("bako".into(), Some("go"), Some("ly")), "goly");
        // longer affixes are clipped to the name
        assert_eq!(apply_affixes("bak".into(), Some("super"), None), "sup");
        assert_eq!(apply_affixes("bak".into(), None, Some("ified")), "ied");
        assert_eq!(apply_affixes("bako".into(), Some(""), Some("")), "bako");
    }

    #[test]
    fn test_thread_rng_structure() {
        let config = GenerationConfig::new(10, 6).with_tlds(["com", "net", "org"]);
        let names = NameGenerator::new().generate(&config);
        assert_eq!(names.len(), 30);
        assert!(names.iter().all(|n| is_alternating(base(n))));
    }
}
