//! Consistency checks over a normalized table.
//!
//! The model's arithmetic is not guaranteed exact, so these checks never
//! reject a result. They produce a [`ConsistencyReport`] that the caller logs
//! or shows next to the table. Integer sums must match exactly; percentages
//! are compared within a tolerance.

use std::collections::BTreeMap;
use std::fmt;

use super::blooms::BloomLevel;
use super::item_placement::parse_item_placement;
use super::result::TOSResult;

/// Default allowed drift between a reported and a recomputed percentage.
pub const DEFAULT_PERCENTAGE_TOLERANCE: f64 = 0.05;

/// Guards the tolerance comparison against binary rounding of decimal input.
const FLOAT_SLACK: f64 = 1e-9;

/// How many unplaced question numbers a [`ConsistencyFinding::MissingQuestions`]
/// lists by value.
pub const MISSING_QUESTIONS_SHOWN: usize = 10;

/// A column of the totals row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsColumn {
    TotalItems,
    NumberOfHours,
    Bloom(BloomLevel),
}

impl fmt::Display for TotalsColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalsColumn::TotalItems => write!(f, "totalItems"),
            TotalsColumn::NumberOfHours => write!(f, "numberOfHours"),
            TotalsColumn::Bloom(level) => write!(f, "bloomsDistribution.{}", level.key()),
        }
    }
}

/// One discrepancy found in a table.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsistencyFinding {
    /// A row's Bloom's counts do not add up to its item count.
    RowBloomsMismatch {
        row: usize,
        topic: String,
        blooms_total: u64,
        total_items: u32,
    },
    /// A row lists a different number of questions than its item count.
    PlacementCountMismatch {
        row: usize,
        topic: String,
        listed: usize,
        total_items: u32,
    },
    /// A row's item placement could not be parsed.
    UnparseablePlacement {
        row: usize,
        topic: String,
        reason: String,
    },
    /// A question number is claimed by more than one row (or twice by one).
    DuplicateQuestion {
        question: u32,
        first_row: usize,
        second_row: usize,
    },
    /// A question number is beyond the reported item total.
    QuestionOutOfRange { question: u32, row: usize, max: u32 },
    /// Question numbers in `1..=max` that no row lists. `first` holds at
    /// most [`MISSING_QUESTIONS_SHOWN`] of them in ascending order.
    MissingQuestions { count: u64, first: Vec<u32>, max: u32 },
    /// A totals column differs from the sum of the rows.
    TotalsMismatch {
        column: TotalsColumn,
        reported: u64,
        derived: u64,
    },
    /// A row percentage outside `[0, 100]`.
    RowPercentageOutOfRange {
        row: usize,
        topic: String,
        percentage: f64,
    },
    /// A row percentage that drifts from `100 × items / total` beyond tolerance.
    RowPercentageDrift {
        row: usize,
        topic: String,
        reported: f64,
        expected: f64,
    },
    /// The totals percentage does not round to 100.
    TotalPercentageNot100 { reported: f64 },
}

impl fmt::Display for ConsistencyFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowBloomsMismatch {
                row,
                topic,
                blooms_total,
                total_items,
            } => write!(
                f,
                "row {} ({}): Bloom's counts sum to {} but totalItems is {}",
                row, topic, blooms_total, total_items
            ),
            Self::PlacementCountMismatch {
                row,
                topic,
                listed,
                total_items,
            } => write!(
                f,
                "row {} ({}): itemPlacement lists {} questions but totalItems is {}",
                row, topic, listed, total_items
            ),
            Self::UnparseablePlacement { row, topic, reason } => {
                write!(f, "row {} ({}): {}", row, topic, reason)
            }
            Self::DuplicateQuestion {
                question,
                first_row,
                second_row,
            } => write!(
                f,
                "question {} is placed in rows {} and {}",
                question, first_row, second_row
            ),
            Self::QuestionOutOfRange { question, row, max } => write!(
                f,
                "row {}: question {} exceeds the {} reported items",
                row, question, max
            ),
            Self::MissingQuestions { count, first, max } => {
                write!(
                    f,
                    "{} of questions 1..={} are not placed in any row: {:?}",
                    count, max, first
                )?;
                if *count > first.len() as u64 {
                    write!(f, " and {} more", *count - first.len() as u64)?;
                }
                Ok(())
            }
            Self::TotalsMismatch {
                column,
                reported,
                derived,
            } => write!(
                f,
                "totals.{} is {} but the rows sum to {}",
                column, reported, derived
            ),
            Self::RowPercentageOutOfRange {
                row,
                topic,
                percentage,
            } => write!(
                f,
                "row {} ({}): percentage {} is outside 0..=100",
                row, topic, percentage
            ),
            Self::RowPercentageDrift {
                row,
                topic,
                reported,
                expected,
            } => write!(
                f,
                "row {} ({}): percentage {} should be {:.2}",
                row, topic, reported, expected
            ),
            Self::TotalPercentageNot100 { reported } => {
                write!(f, "totals.percentage {} does not round to 100", reported)
            }
        }
    }
}

/// All findings for one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsistencyReport {
    pub findings: Vec<ConsistencyFinding>,
}

impl ConsistencyReport {
    /// True when no discrepancies were found.
    pub fn is_consistent(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// True when there are no findings.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Iterates over the findings.
    pub fn iter(&self) -> impl Iterator<Item = &ConsistencyFinding> {
        self.findings.iter()
    }
}

/// Cross-checks a table's rows against its totals.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyChecker {
    percentage_tolerance: f64,
}

impl Default for ConsistencyChecker {
    fn default() -> Self {
        Self::new(DEFAULT_PERCENTAGE_TOLERANCE)
    }
}

impl ConsistencyChecker {
    /// Creates a checker with the given percentage tolerance.
    pub fn new(percentage_tolerance: f64) -> Self {
        Self {
            percentage_tolerance,
        }
    }

    /// The configured percentage tolerance.
    pub fn percentage_tolerance(&self) -> f64 {
        self.percentage_tolerance
    }

    /// Runs every check and collects the findings.
    pub fn check(&self, result: &TOSResult) -> ConsistencyReport {
        let mut findings = Vec::new();
        self.check_rows(result, &mut findings);
        self.check_placement_partition(result, &mut findings);
        self.check_totals(result, &mut findings);
        self.check_percentages(result, &mut findings);
        ConsistencyReport { findings }
    }

    fn check_rows(&self, result: &TOSResult, findings: &mut Vec<ConsistencyFinding>) {
        for (index, row) in result.table_rows.iter().enumerate() {
            let blooms_total = row.blooms_distribution.total();
            if blooms_total != u64::from(row.total_items) {
                findings.push(ConsistencyFinding::RowBloomsMismatch {
                    row: index,
                    topic: row.topic.clone(),
                    blooms_total,
                    total_items: row.total_items,
                });
            }

            match parse_item_placement(&row.item_placement) {
                Ok(numbers) if numbers.len() as u64 != u64::from(row.total_items) => {
                    findings.push(ConsistencyFinding::PlacementCountMismatch {
                        row: index,
                        topic: row.topic.clone(),
                        listed: numbers.len(),
                        total_items: row.total_items,
                    });
                }
                Ok(_) => {}
                Err(err) => findings.push(ConsistencyFinding::UnparseablePlacement {
                    row: index,
                    topic: row.topic.clone(),
                    reason: err.to_string(),
                }),
            }
        }
    }

    fn check_placement_partition(&self, result: &TOSResult, findings: &mut Vec<ConsistencyFinding>) {
        let max = result.totals.total_items;
        let mut owner: BTreeMap<u32, usize> = BTreeMap::new();

        for (index, row) in result.table_rows.iter().enumerate() {
            // Unparseable placements were already reported per row.
            let Ok(numbers) = parse_item_placement(&row.item_placement) else {
                continue;
            };
            for question in numbers {
                if question > max {
                    findings.push(ConsistencyFinding::QuestionOutOfRange {
                        question,
                        row: index,
                        max,
                    });
                }
                if let Some(&first_row) = owner.get(&question) {
                    findings.push(ConsistencyFinding::DuplicateQuestion {
                        question,
                        first_row,
                        second_row: index,
                    });
                } else {
                    owner.insert(question, index);
                }
            }
        }

        // `max` is model-reported, so the gap count is derived from the
        // placed numbers and only the first few gaps are enumerated.
        let placed_in_range = owner.range(..=max).count() as u64;
        let count = u64::from(max) - placed_in_range;
        if count > 0 {
            let first: Vec<u32> = (1..=max)
                .filter(|q| !owner.contains_key(q))
                .take(MISSING_QUESTIONS_SHOWN)
                .collect();
            findings.push(ConsistencyFinding::MissingQuestions { count, first, max });
        }
    }

    fn check_totals(&self, result: &TOSResult, findings: &mut Vec<ConsistencyFinding>) {
        let derived = result.derived_totals();
        let totals = &result.totals;

        let mut compare = |column: TotalsColumn, reported: u64, derived: u64| {
            if reported != derived {
                findings.push(ConsistencyFinding::TotalsMismatch {
                    column,
                    reported,
                    derived,
                });
            }
        };

        compare(
            TotalsColumn::TotalItems,
            u64::from(totals.total_items),
            derived.total_items,
        );
        compare(
            TotalsColumn::NumberOfHours,
            u64::from(totals.number_of_hours),
            derived.number_of_hours,
        );
        for level in BloomLevel::ALL {
            let derived_level: u64 = result
                .table_rows
                .iter()
                .map(|r| u64::from(r.blooms_distribution.get(level)))
                .sum();
            compare(
                TotalsColumn::Bloom(level),
                u64::from(totals.blooms_distribution.get(level)),
                derived_level,
            );
        }
    }

    fn check_percentages(&self, result: &TOSResult, findings: &mut Vec<ConsistencyFinding>) {
        for (index, row) in result.table_rows.iter().enumerate() {
            if !(0.0..=100.0).contains(&row.percentage) {
                findings.push(ConsistencyFinding::RowPercentageOutOfRange {
                    row: index,
                    topic: row.topic.clone(),
                    percentage: row.percentage,
                });
                continue;
            }
            if let Some(expected) = result.expected_percentage(row) {
                if (row.percentage - expected).abs() > self.percentage_tolerance + FLOAT_SLACK {
                    findings.push(ConsistencyFinding::RowPercentageDrift {
                        row: index,
                        topic: row.topic.clone(),
                        reported: row.percentage,
                        expected,
                    });
                }
            }
        }

        if !result.is_empty() && result.totals.percentage.round() != 100.0 {
            findings.push(ConsistencyFinding::TotalPercentageNot100 {
                reported: result.totals.percentage,
            });
        }
    }
}
