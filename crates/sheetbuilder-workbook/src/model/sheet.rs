use std::collections::{BTreeMap, BTreeSet};

use sheetbuilder_common::{Orientation, Paper, SheetState};

use super::cell::Cell;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub number: u32,
    pub cells: BTreeMap<u32, Cell>,
    pub height: Option<f64>,
}

impl Row {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            cells: BTreeMap::new(),
            height: None,
        }
    }

    /// Column the next implicitly placed cell goes to.
    pub fn next_column(&self) -> u32 {
        self.cells
            .values()
            .next_back()
            .map_or(1, |c| c.column.saturating_add(c.colspan.max(1)))
    }

    pub fn cell(&self, column: u32) -> Option<&Cell> {
        self.cells.get(&column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSettings {
    pub orientation: Option<Orientation>,
    pub paper: Option<Paper>,
    pub fit_width: Option<u32>,
    pub fit_height: Option<u32>,
}

/// An inclusive, 1-based rectangle of merged cells anchored at its top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl MergedRange {
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }
}

/// Rows (or columns) `start..=end` form one outline level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineGroup {
    pub start: u32,
    pub end: u32,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: BTreeMap<u32, Row>,
    pub page: PageSettings,
    /// Frozen pane as `(column, row)`.
    pub freeze: Option<(u32, u32)>,
    pub state: Option<SheetState>,
    pub password: Option<String>,
    pub filter: bool,
    pub row_groups: Vec<OutlineGroup>,
    pub column_groups: Vec<OutlineGroup>,
    pub merged: Vec<MergedRange>,
    pub column_widths: BTreeMap<u32, f64>,
    pub auto_columns: BTreeSet<u32>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Number the next implicitly placed row gets.
    pub fn next_row_number(&self) -> u32 {
        self.rows.keys().next_back().map_or(1, |n| n.saturating_add(1))
    }

    pub fn row(&self, number: u32) -> Option<&Row> {
        self.rows.get(&number)
    }

    pub fn cell(&self, row: u32, column: u32) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.cells.get(&column))
    }

    pub fn cell_mut(&mut self, row: u32, column: u32) -> Option<&mut Cell> {
        self.rows.get_mut(&row).and_then(|r| r.cells.get_mut(&column))
    }

    /// The merged region covering `(row, col)`, if any.
    pub fn merged_region(&self, row: u32, col: u32) -> Option<&MergedRange> {
        self.merged.iter().find(|m| m.contains(row, col))
    }

    pub fn effective_state(&self) -> SheetState {
        self.state.unwrap_or(SheetState::Visible)
    }

    /// Rebuild [`Sheet::merged`] from the cell spans.
    pub fn rebuild_merged(&mut self) {
        self.merged = self
            .rows
            .values()
            .flat_map(|row| {
                row.cells.values().filter(|c| c.is_merged()).map(|c| MergedRange {
                    start_row: row.number,
                    start_col: c.column,
                    end_row: row.number.saturating_add(c.rowspan.max(1) - 1),
                    end_col: c.column.saturating_add(c.colspan.max(1) - 1),
                })
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_numbering_continues_after_gaps() {
        let mut sheet = Sheet::new("S");
        assert_eq!(sheet.next_row_number(), 1);
        sheet.rows.insert(5, Row::new(5));
        assert_eq!(sheet.next_row_number(), 6);

        let mut row = Row::new(1);
        assert_eq!(row.next_column(), 1);
        let mut wide = Cell::new(2);
        wide.colspan = 3;
        row.cells.insert(2, wide);
        assert_eq!(row.next_column(), 5);
    }

    #[test]
    fn implicit_numbering_saturates_instead_of_wrapping() {
        let mut sheet = Sheet::new("S");
        sheet.rows.insert(u32::MAX, Row::new(u32::MAX));
        assert_eq!(sheet.next_row_number(), u32::MAX);

        let mut row = Row::new(1);
        let mut wide = Cell::new(u32::MAX - 1);
        wide.colspan = 5;
        row.cells.insert(u32::MAX - 1, wide);
        assert_eq!(row.next_column(), u32::MAX);
    }

    #[test]
    fn merged_regions_follow_spans() {
        let mut sheet = Sheet::new("S");
        let mut row = Row::new(2);
        let mut cell = Cell::new(2);
        cell.colspan = 2;
        cell.rowspan = 3;
        row.cells.insert(2, cell);
        sheet.rows.insert(2, row);
        sheet.rebuild_merged();
        assert_eq!(
            sheet.merged,
            vec![MergedRange {
                start_row: 2,
                start_col: 2,
                end_row: 4,
                end_col: 3
            }]
        );
        assert!(sheet.merged_region(4, 3).is_some());
        assert!(sheet.merged_region(5, 3).is_none());
    }
}
