//! Bloom's Taxonomy levels and per-level item counts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// The six cognitive levels of Bloom's Taxonomy, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BloomLevel {
    Remembering,
    Understanding,
    Applying,
    Analyzing,
    Evaluating,
    Creating,
}

impl BloomLevel {
    /// All levels in canonical (column) order.
    pub const ALL: [BloomLevel; 6] = [
        BloomLevel::Remembering,
        BloomLevel::Understanding,
        BloomLevel::Applying,
        BloomLevel::Analyzing,
        BloomLevel::Evaluating,
        BloomLevel::Creating,
    ];

    /// Wire key used in the structured response.
    pub fn key(&self) -> &'static str {
        match self {
            BloomLevel::Remembering => "remembering",
            BloomLevel::Understanding => "understanding",
            BloomLevel::Applying => "applying",
            BloomLevel::Analyzing => "analyzing",
            BloomLevel::Evaluating => "evaluating",
            BloomLevel::Creating => "creating",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BloomLevel::Remembering => "Remembering",
            BloomLevel::Understanding => "Understanding",
            BloomLevel::Applying => "Applying",
            BloomLevel::Analyzing => "Analyzing",
            BloomLevel::Evaluating => "Evaluating",
            BloomLevel::Creating => "Creating",
        }
    }
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Number of exam items at each Bloom's level.
///
/// Field order matches [`BloomLevel::ALL`] and is preserved on serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BloomsDistribution {
    pub remembering: u32,
    pub understanding: u32,
    pub applying: u32,
    pub analyzing: u32,
    pub evaluating: u32,
    pub creating: u32,
}

impl BloomsDistribution {
    /// Creates a distribution from counts in canonical order.
    pub fn new(counts: [u32; 6]) -> Self {
        let [remembering, understanding, applying, analyzing, evaluating, creating] = counts;
        Self {
            remembering,
            understanding,
            applying,
            analyzing,
            evaluating,
            creating,
        }
    }

    /// Creates a distribution with `count` items at a single level.
    pub fn single(level: BloomLevel, count: u32) -> Self {
        let mut distribution = Self::default();
        *distribution.get_mut(level) = count;
        distribution
    }

    /// Returns the count for a level.
    pub fn get(&self, level: BloomLevel) -> u32 {
        match level {
            BloomLevel::Remembering => self.remembering,
            BloomLevel::Understanding => self.understanding,
            BloomLevel::Applying => self.applying,
            BloomLevel::Analyzing => self.analyzing,
            BloomLevel::Evaluating => self.evaluating,
            BloomLevel::Creating => self.creating,
        }
    }

    fn get_mut(&mut self, level: BloomLevel) -> &mut u32 {
        match level {
            BloomLevel::Remembering => &mut self.remembering,
            BloomLevel::Understanding => &mut self.understanding,
            BloomLevel::Applying => &mut self.applying,
            BloomLevel::Analyzing => &mut self.analyzing,
            BloomLevel::Evaluating => &mut self.evaluating,
            BloomLevel::Creating => &mut self.creating,
        }
    }

    /// Counts in canonical order.
    pub fn counts(&self) -> [u32; 6] {
        BloomLevel::ALL.map(|level| self.get(level))
    }

    /// Sum of all six counts, widened so model-supplied values cannot overflow.
    pub fn total(&self) -> u64 {
        self.counts().iter().map(|&c| u64::from(c)).sum()
    }
}

impl Add for BloomsDistribution {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        out += rhs;
        out
    }
}

impl AddAssign for BloomsDistribution {
    fn add_assign(&mut self, rhs: Self) {
        for level in BloomLevel::ALL {
            let slot = self.get_mut(level);
            *slot = slot.saturating_add(rhs.get(level));
        }
    }
}

impl std::iter::Sum for BloomsDistribution {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn levels_are_in_canonical_order() {
        let keys: Vec<_> = BloomLevel::ALL.iter().map(|l| l.key()).collect();
        assert_eq!(
            keys,
            vec!["remembering", "understanding", "applying", "analyzing", "evaluating", "creating"]
        );
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&BloomLevel::Analyzing).unwrap();
        assert_eq!(json, "\"analyzing\"");
    }

    #[test]
    fn single_sets_one_level() {
        let d = BloomsDistribution::single(BloomLevel::Evaluating, 3);
        assert_eq!(d.evaluating, 3);
        assert_eq!(d.total(), 3);
        assert_eq!(d.counts(), [0, 0, 0, 0, 3, 0]);
    }

    #[test]
    fn addition_is_element_wise() {
        let a = BloomsDistribution::new([1, 2, 3, 4, 5, 6]);
        let b = BloomsDistribution::new([6, 5, 4, 3, 2, 1]);
        assert_eq!((a + b).counts(), [7; 6]);
    }

    #[test]
    fn sum_of_empty_iterator_is_zero() {
        let total: BloomsDistribution = std::iter::empty().sum();
        assert_eq!(total, BloomsDistribution::default());
    }

    #[test]
    fn serializes_in_declaration_order() {
        let json = serde_json::to_string(&BloomsDistribution::new([1, 0, 0, 0, 0, 2])).unwrap();
        assert_eq!(
            json,
            r#"{"remembering":1,"understanding":0,"applying":0,"analyzing":0,"evaluating":0,"creating":2}"#
        );
    }

    proptest! {
        #[test]
        fn total_of_sum_equals_sum_of_totals(
            a in proptest::array::uniform6(0u32..10_000),
            b in proptest::array::uniform6(0u32..10_000),
        ) {
            let da = BloomsDistribution::new(a);
            let db = BloomsDistribution::new(b);
            prop_assert_eq!((da + db).total(), da.total() + db.total());
        }
    }
}
