//! Value generation port and its default random implementation
//!
//! Rules never produce randomness themselves; they ask a [`ValueSource`] for
//! values. The default rule table only relies on the bounded numeric
//! generators, [`ValueSource::word`], [`ValueSource::uuid`] and
//! [`ValueSource::recent`]. The person and company helpers exist for builder
//! descriptors that want friendlier data.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use uuid::Uuid;

const WORDS: &[&str] = &[
    "alpha", "bridge", "cobalt", "delta", "ember", "falcon", "garnet", "harbor", "indigo", "juniper",
    "kernel", "lantern", "meadow", "nimbus", "orchard", "pixel", "quartz", "ripple", "summit", "timber",
    "umbra", "vertex", "willow", "xenon", "yonder", "zephyr", "anchor", "beacon", "cipher", "dune",
];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry", "Ivy", "Jack",
    "Kate", "Liam", "Mia", "Noah", "Olivia", "Peter", "Quinn", "Ruby", "Sam", "Tina",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Brown", "Davis", "Evans", "Fisher", "Garcia", "Harris", "Johnson", "King", "Lopez",
    "Miller", "Nelson", "Parker", "Roberts", "Smith", "Taylor", "Williams", "Young", "Zhang", "Clark",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "test.org", "demo.net", "sample.io", "fake.dev"];

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Elm Dr", "Park Blvd", "Cedar Ln", "Maple Way", "Pine St", "River Rd",
    "Hill Ave", "Lake Dr", "Forest Ln", "Garden St", "Valley Rd", "Spring Ave", "Sunset Blvd",
];

const COMPANY_PREFIXES: &[&str] = &["Acme", "Global", "United", "Premium", "Elite", "Advanced", "Dynamic", "Smart"];
const COMPANY_SUFFIXES: &[&str] = &["Corp", "Inc", "LLC", "Solutions", "Systems", "Technologies", "Group"];

/// Seconds in the window considered "recent"
const RECENT_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Capability object producing plausible random scalar values
///
/// Ranges are half-open: `min` is inclusive and `max` exclusive. When
/// `max <= min`, implementations return `min`.
pub trait ValueSource: Send {
    /// Uniform 32-bit integer in `[min, max)`
    fn int(&mut self, min: i32, max: i32) -> i32;

    /// Uniform 64-bit integer in `[min, max)`
    fn long(&mut self, min: i64, max: i64) -> i64;

    /// Uniform double in `[min, max)`
    fn double(&mut self, min: f64, max: f64) -> f64;

    /// Random version 4 identifier
    fn uuid(&mut self) -> Uuid;

    /// Timestamp within the last day
    fn recent(&mut self) -> DateTime<Utc>;

    /// Decimal with two fractional digits in `[min, max)`
    fn decimal(&mut self, min: i64, max: i64) -> Decimal {
        let cents = self.long(min.saturating_mul(100), max.saturating_mul(100));
        Decimal::new(cents, 2)
    }

    fn boolean(&mut self) -> bool {
        self.int(0, 2) == 1
    }

    /// Pick one entry of a non-empty list
    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        if items.is_empty() {
            return "";
        }
        let index = self.long(0, items.len() as i64) as usize;
        items[index.min(items.len() - 1)]
    }

    /// Single lowercase word
    fn word(&mut self) -> String {
        self.pick(WORDS).to_string()
    }

    fn sentence(&mut self) -> String {
        let count = self.int(4, 9);
        let words: Vec<String> = (0..count).map(|_| self.word()).collect();
        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    fn full_name(&mut self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    fn email(&mut self) -> String {
        let name = self.first_name().to_lowercase();
        let number = self.int(1, 1000);
        let domain = self.pick(EMAIL_DOMAINS);
        format!("{}{:03}@{}", name, number, domain)
    }

    fn street(&mut self) -> String {
        let number = self.int(1, 10_000);
        format!("{} {}", number, self.pick(STREETS))
    }

    fn company_name(&mut self) -> String {
        format!("{} {}", self.pick(COMPANY_PREFIXES), self.pick(COMPANY_SUFFIXES))
    }
}

/// Default [`ValueSource`] backed by a [`StdRng`]
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a source seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source from an optional seed
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueSource for RandomSource {
    fn int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    fn long(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    fn double(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    fn uuid(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }

    fn recent(&mut self) -> DateTime<Utc> {
        let seconds_ago = self.long(0, RECENT_WINDOW_SECS);
        Utc::now() - Duration::seconds(seconds_ago)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_generation() {
        let mut first = RandomSource::seeded(12345);
        let mut second = RandomSource::seeded(12345);

        assert_eq!(first.email(), second.email());
        assert_eq!(first.full_name(), second.full_name());
        assert_eq!(first.uuid(), second.uuid());
        assert_eq!(first.int(1, 1_000_000_000), second.int(1, 1_000_000_000));
    }

    #[test]
    fn test_bounded_ranges() {
        let mut source = RandomSource::new();
        for _ in 0..200 {
            let value = source.int(1, 1_000_000_000);
            assert!((1..1_000_000_000).contains(&value));

            let value = source.double(1.0, 1000.0);
            assert!((1.0..1000.0).contains(&value));

            let value = source.decimal(1, 1000);
            assert!(value >= Decimal::new(1, 0) && value < Decimal::new(1000, 0));
            assert_eq!(value.scale(), 2);
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut source = RandomSource::new();
        assert_eq!(source.int(5, 5), 5);
        assert_eq!(source.long(10, 3), 10);
        assert_eq!(source.double(2.0, 2.0), 2.0);
    }

    #[test]
    fn test_text_generators() {
        let mut source = RandomSource::new();
        for _ in 0..50 {
            assert!(!source.word().is_empty());
            assert!(source.email().contains('@'));
            assert!(source.full_name().contains(' '));
            assert!(source.street().chars().next().unwrap().is_ascii_digit());
            assert!(source.sentence().ends_with('.'));
        }
    }

    #[test]
    fn test_uuid_is_v4() {
        let mut source = RandomSource::new();
        let id = source.uuid();
        assert_eq!(id.get_version_num(), 4);
        assert_ne!(id, source.uuid());
    }

    #[test]
    fn test_recent_is_within_last_day() {
        let mut source = RandomSource::new();
        let now = Utc::now();
        for _ in 0..50 {
            let ts = source.recent();
            assert!(ts <= Utc::now());
            assert!(ts > now - Duration::seconds(RECENT_WINDOW_SECS + 5));
        }
    }
}
