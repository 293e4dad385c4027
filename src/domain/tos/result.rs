//! Table of Specifications value types.
//!
//! These mirror the structured response contract field-for-field. Wire names
//! are camelCase; declaration order is the canonical serialization order.

use serde::{Deserialize, Serialize};

use super::blooms::BloomsDistribution;

/// One topic's contribution to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TOSRow {
    pub topic: String,
    pub intended_outcomes: String,
    pub reasoning: String,
    pub total_items: u32,
    pub number_of_hours: u32,
    pub blooms_distribution: BloomsDistribution,
    /// Comma-separated 1-based question numbers, e.g. `"1, 5, 10"`.
    pub item_placement: String,
    pub percentage: f64,
}

/// Column totals as reported by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TOSTotals {
    pub total_items: u32,
    pub number_of_hours: u32,
    pub blooms_distribution: BloomsDistribution,
    pub percentage: f64,
}

/// A complete Table of Specifications.
///
/// Produced once per successful analysis and never mutated afterwards;
/// exports take it by shared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TOSResult {
    pub table_rows: Vec<TOSRow>,
    pub totals: TOSTotals,
}

/// Totals recomputed from the rows, independent of what the model reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedTotals {
    pub total_items: u64,
    pub number_of_hours: u64,
    pub blooms_distribution: BloomsDistribution,
}

impl TOSResult {
    /// Returns true when the table has no topic rows.
    pub fn is_empty(&self) -> bool {
        self.table_rows.is_empty()
    }

    /// Number of topic rows.
    pub fn row_count(&self) -> usize {
        self.table_rows.len()
    }

    /// Sums the rows column by column.
    pub fn derived_totals(&self) -> DerivedTotals {
        DerivedTotals {
            total_items: self.table_rows.iter().map(|r| u64::from(r.total_items)).sum(),
            number_of_hours: self
                .table_rows
                .iter()
                .map(|r| u64::from(r.number_of_hours))
                .sum(),
            blooms_distribution: self.table_rows.iter().map(|r| r.blooms_distribution).sum(),
        }
    }

    /// The percentage a row should carry given the reported grand total.
    ///
    /// Returns `None` when the grand total is zero.
    pub fn expected_percentage(&self, row: &TOSRow) -> Option<f64> {
        if self.totals.total_items == 0 {
            return None;
        }
        Some(100.0 * f64::from(row.total_items) / f64::from(self.totals.total_items))
    }
}
