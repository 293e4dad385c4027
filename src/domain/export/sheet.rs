//! Spreadsheet layout for a Table of Specifications.
//!
//! Builds the grid, merged regions and column widths independent of any file
//! format. Adapters serialize a [`SheetLayout`] into an actual workbook.
//!
//! # Layout
//!
//! ```text
//!      A      B          C           D      E      F..K                  L          M
//! 1  Topic  Intended  Reasoning &  Total  No. of  Bloom's Taxonomy ...   Item       Percentage
//! 2  (merged down)                 Items  Hours   REMEMBERING..CREATING  Placement  (merged)
//! 3+ one row per topic
//! n  TOTAL
//! ```

use crate::domain::tos::{BloomLevel, BloomsDistribution, TOSResult};

use super::errors::ExportError;

/// Default sheet name.
pub const DEFAULT_SHEET_NAME: &str = "TOS-Analysis";

/// Label of the merged group header over the Bloom's columns.
pub const BLOOMS_GROUP_LABEL: &str = "Bloom's Taxonomy Level of Learning";

/// Label in the first column of the totals row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// Number of header rows.
pub const HEADER_ROWS: usize = 2;

/// Zero-based index of the first Bloom's column.
pub const FIRST_BLOOM_COLUMN: usize = 5;

/// Rendered in place of a zero Bloom's count on data rows.
pub const ZERO_COUNT_PLACEHOLDER: &str = "-";

const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Static description of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    /// Header text; Bloom's columns carry their level label here.
    pub header: &'static str,
    /// Width hint in characters.
    pub width: f64,
    /// Whether long text in this column should wrap.
    pub wrap_text: bool,
}

const fn column(header: &'static str, width: f64, wrap_text: bool) -> ColumnSpec {
    ColumnSpec {
        header,
        width,
        wrap_text,
    }
}

/// All thirteen columns in order.
pub const COLUMNS: [ColumnSpec; 13] = [
    column("Topic", 25.0, true),
    column("Intended Outcomes", 50.0, true),
    column("Reasoning & Process", 50.0, true),
    column("Total Items", 12.0, false),
    column("No. of Hours", 12.0, false),
    column("REMEMBERING", 15.0, false),
    column("UNDERSTANDING", 15.0, false),
    column("APPLYING", 15.0, false),
    column("ANALYZING", 15.0, false),
    column("EVALUATING", 15.0, false),
    column("CREATING", 15.0, false),
    column("Item Placement", 20.0, false),
    column("Percentage", 12.0, false),
];

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(u64),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// True for [`Cell::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// What a row represents; adapters style rows by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Data,
    Total,
}

/// A row of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

/// A rectangular merged region, zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

impl MergeRange {
    /// A region spanning both header rows in one column.
    fn header_column(col: usize) -> Self {
        Self {
            first_row: 0,
            first_col: col,
            last_row: HEADER_ROWS - 1,
            last_col: col,
        }
    }
}

/// A complete single-sheet layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub rows: Vec<SheetRow>,
    pub merges: Vec<MergeRange>,
    pub column_widths: Vec<f64>,
    pub wrap_columns: Vec<bool>,
}

impl SheetLayout {
    /// Lays out a table under the default sheet name.
    pub fn from_result(result: &TOSResult) -> Self {
        Self::build(result, DEFAULT_SHEET_NAME.to_string())
    }

    /// Lays out a table under a custom sheet name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidSheetName`] if [`validate_sheet_name`]
    /// rejects the name.
    pub fn with_sheet_name(result: &TOSResult, name: &str) -> Result<Self, ExportError> {
        validate_sheet_name(name)?;
        Ok(Self::build(result, name.to_string()))
    }

    fn build(result: &TOSResult, name: String) -> Self {
        let mut rows = Vec::with_capacity(result.table_rows.len() + HEADER_ROWS + 1);
        rows.push(SheetRow {
            kind: RowKind::Header,
            cells: group_header_cells(),
        });
        rows.push(SheetRow {
            kind: RowKind::Header,
            cells: level_header_cells(),
        });

        for row in &result.table_rows {
            let mut cells = vec![
                Cell::text(&row.topic),
                Cell::text(&row.intended_outcomes),
                Cell::text(&row.reasoning),
                Cell::Integer(u64::from(row.total_items)),
                Cell::Integer(u64::from(row.number_of_hours)),
            ];
            cells.extend(blooms_cells(&row.blooms_distribution, true));
            cells.push(Cell::text(&row.item_placement));
            cells.push(Cell::Text(format_row_percentage(row.percentage)));
            rows.push(SheetRow {
                kind: RowKind::Data,
                cells,
            });
        }

        let totals = &result.totals;
        let mut total_cells = vec![
            Cell::text(TOTAL_LABEL),
            Cell::Empty,
            Cell::Empty,
            Cell::Integer(u64::from(totals.total_items)),
            Cell::Integer(u64::from(totals.number_of_hours)),
        ];
        total_cells.extend(blooms_cells(&totals.blooms_distribution, false));
        total_cells.push(Cell::Empty);
        total_cells.push(Cell::Text(format_total_percentage(totals.percentage)));
        rows.push(SheetRow {
            kind: RowKind::Total,
            cells: total_cells,
        });

        Self {
            name,
            rows,
            merges: header_merges(),
            column_widths: COLUMNS.iter().map(|c| c.width).collect(),
            wrap_columns: COLUMNS.iter().map(|c| c.wrap_text).collect(),
        }
    }

    /// Number of rows including headers and totals.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Cell at a zero-based position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }
}

/// Formats a row percentage with one decimal place, e.g. `16.7%`.
pub fn format_row_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

/// Formats the totals percentage rounded to an integer, e.g. `100%`.
pub fn format_total_percentage(percentage: f64) -> String {
    format!("{:.0}%", percentage.round())
}

/// Checks a worksheet name against the spreadsheet naming rules: non-blank,
/// at most 31 characters, no control characters and none of `[ ] : * ? / \`.
pub fn validate_sheet_name(name: &str) -> Result<(), ExportError> {
    let invalid = |reason: &str| ExportError::InvalidSheetName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(invalid("name is longer than 31 characters"));
    }
    if name.contains(FORBIDDEN_SHEET_NAME_CHARS) {
        return Err(invalid("name contains one of [ ] : * ? / \\"));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("name contains a control character"));
    }
    Ok(())
}

fn group_header_cells() -> Vec<Cell> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(col, def)| match col {
            FIRST_BLOOM_COLUMN => Cell::text(BLOOMS_GROUP_LABEL),
            c if is_bloom_column(c) => Cell::Empty,
            _ => Cell::text(def.header),
        })
        .collect()
}

fn level_header_cells() -> Vec<Cell> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(col, def)| {
            if is_bloom_column(col) {
                Cell::text(def.header)
            } else {
                Cell::Empty
            }
        })
        .collect()
}

fn blooms_cells(distribution: &BloomsDistribution, dash_zero: bool) -> Vec<Cell> {
    BloomLevel::ALL
        .iter()
        .map(|&level| match distribution.get(level) {
            0 if dash_zero => Cell::text(ZERO_COUNT_PLACEHOLDER),
            count => Cell::Integer(u64::from(count)),
        })
        .collect()
}

fn is_bloom_column(col: usize) -> bool {
    (FIRST_BLOOM_COLUMN..FIRST_BLOOM_COLUMN + BloomLevel::ALL.len()).contains(&col)
}

fn header_merges() -> Vec<MergeRange> {
    let mut merges: Vec<MergeRange> = (0..COLUMNS.len())
        .filter(|&col| !is_bloom_column(col))
        .map(MergeRange::header_column)
        .collect();
    merges.push(MergeRange {
        first_row: 0,
        first_col: FIRST_BLOOM_COLUMN,
        last_row: 0,
        last_col: FIRST_BLOOM_COLUMN + BloomLevel::ALL.len() - 1,
    });
    merges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tos::sample::sample_result;

    #[test]
    fn sample_has_nine_rows_and_thirteen_columns() {
        let layout = SheetLayout::from_result(&sample_result());
        assert_eq!(layout.row_count(), 9);
        assert_eq!(layout.column_count(), 13);
        assert!(layout.rows.iter().all(|r| r.cells.len() == 13));
        assert_eq!(layout.name, "TOS-Analysis");
    }

    #[test]
    fn blooms_group_header_spans_columns_six_to_eleven() {
        let layout = SheetLayout::from_result(&sample_result());
        let group = MergeRange {
            first_row: 0,
            first_col: 5,
            last_row: 0,
            last_col: 10,
        };
        assert!(layout.merges.contains(&group));
        assert_eq!(
            layout.cell(0, 5),
            Some(&Cell::Text(BLOOMS_GROUP_LABEL.to_string()))
        );
        assert!((6..=10).all(|c| layout.cell(0, c) == Some(&Cell::Empty)));
    }

    #[test]
    fn single_row_headers_merge_vertically() {
        let layout = SheetLayout::from_result(&sample_result());
        for col in [0, 1, 2, 3, 4, 11, 12] {
            assert!(
                layout.merges.contains(&MergeRange {
                    first_row: 0,
                    first_col: col,
                    last_row: 1,
                    last_col: col,
                }),
                "column {}",
                col
            );
            assert_eq!(layout.cell(1, col), Some(&Cell::Empty));
        }
        assert_eq!(layout.merges.len(), 8);
    }

    #[test]
    fn second_header_row_lists_levels() {
        let layout = SheetLayout::from_result(&sample_result());
        let labels: Vec<_> = (5..=10).map(|c| layout.cell(1, c).cloned().unwrap()).collect();
        assert_eq!(
            labels,
            ["REMEMBERING", "UNDERSTANDING", "APPLYING", "ANALYZING", "EVALUATING", "CREATING"]
                .iter()
                .map(|s| Cell::Text(s.to_string()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn data_rows_dash_zero_counts_and_format_percentage() {
        let layout = SheetLayout::from_result(&sample_result());
        let first = &layout.rows[2];
        assert_eq!(first.kind, RowKind::Data);
        assert_eq!(first.cells[0], Cell::Text("Cell Biology".to_string()));
        assert_eq!(first.cells[3], Cell::Integer(1));
        assert_eq!(first.cells[4], Cell::Integer(3));
        assert_eq!(first.cells[5], Cell::Integer(1));
        assert!((6..=10).all(|c| first.cells[c] == Cell::Text("-".to_string())));
        assert_eq!(first.cells[11], Cell::Text("1".to_string()));
        assert_eq!(first.cells[12], Cell::Text("16.7%".to_string()));
    }

    #[test]
    fn totals_row_has_label_blanks_and_rounded_percentage() {
        let layout = SheetLayout::from_result(&sample_result());
        let total = layout.rows.last().unwrap();
        assert_eq!(total.kind, RowKind::Total);
        assert_eq!(total.cells[0], Cell::Text("TOTAL".to_string()));
        assert!(total.cells[1].is_empty() && total.cells[2].is_empty());
        assert_eq!(total.cells[3], Cell::Integer(6));
        assert_eq!(total.cells[4], Cell::Integer(18));
        assert!((5..=10).all(|c| total.cells[c] == Cell::Integer(1)));
        assert!(total.cells[11].is_empty());
        assert_eq!(total.cells[12], Cell::Text("100%".to_string()));
    }

    #[test]
    fn totals_row_keeps_zero_counts_numeric() {
        let mut result = sample_result();
        result.totals.blooms_distribution.creating = 0;
        let layout = SheetLayout::from_result(&result);
        assert_eq!(layout.rows.last().unwrap().cells[10], Cell::Integer(0));
    }

    #[test]
    fn empty_table_still_has_headers_and_totals() {
        let mut result = sample_result();
        result.table_rows.clear();
        let layout = SheetLayout::from_result(&result);
        assert_eq!(layout.row_count(), 3);
        assert_eq!(layout.rows[2].kind, RowKind::Total);
    }

    #[test]
    fn column_widths_are_fixed() {
        let layout = SheetLayout::from_result(&sample_result());
        assert_eq!(
            layout.column_widths,
            vec![25.0, 50.0, 50.0, 12.0, 12.0, 15.0, 15.0, 15.0, 15.0, 15.0, 15.0, 20.0, 12.0]
        );
        assert_eq!(
            layout.wrap_columns.iter().filter(|w| **w).count(),
            3
        );
    }

    #[test]
    fn percentages_format_like_the_table() {
        assert_eq!(format_row_percentage(16.666), "16.7%");
        assert_eq!(format_row_percentage(50.0), "50.0%");
        assert_eq!(format_total_percentage(99.96), "100%");
        assert_eq!(format_total_percentage(100.0), "100%");
    }

    #[test]
    fn sheet_name_is_validated() {
        let result = sample_result();
        assert!(SheetLayout::with_sheet_name(&result, "Midterm TOS").is_ok());
        assert!(SheetLayout::with_sheet_name(&result, "").is_err());
        assert!(SheetLayout::with_sheet_name(&result, "a/b").is_err());
        assert!(SheetLayout::with_sheet_name(&result, &"x".repeat(32)).is_err());
    }

    #[test]
    fn sheet_name_rejects_control_characters() {
        assert!(matches!(
            validate_sheet_name("Mid\u{000C}term"),
            Err(ExportError::InvalidSheetName { .. })
        ));
        assert!(validate_sheet_name(&"x".repeat(31)).is_ok());
    }
}
