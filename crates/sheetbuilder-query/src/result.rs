use sheetbuilder_workbook::{CellRef, RowRef, SheetRef, Workbook};

use crate::criterion::Scope;
use crate::workbook::WorkbookCriterion;

/// Cells accepted by a query, with the rows and sheets derived from them.
///
/// A row is part of the result when one of its cells matched, or when it has
/// no cells and passed on its own; sheets follow the same rule one level up.
/// Everything is kept in document order.
#[derive(Debug, Clone, Default)]
pub struct CriteriaResult<'w> {
    cells: Vec<CellRef<'w>>,
    rows: Vec<RowRef<'w>>,
    sheets: Vec<SheetRef<'w>>,
}

impl<'w> CriteriaResult<'w> {
    /// Walk `workbook`, stopping once `max` cells have matched.
    pub(crate) fn evaluate(
        workbook: &'w Workbook,
        criterion: &WorkbookCriterion<'w>,
        max: usize,
    ) -> Self {
        let mut result = Self::default();
        if max == 0 {
            return result;
        }
        'sheets: for sheet in workbook.sheet_refs() {
            let mut rows = sheet.rows().peekable();
            if rows.peek().is_none() {
                if criterion.test(&Scope::sheet(sheet)) {
                    result.push_sheet(sheet);
                }
                continue;
            }
            for row in rows {
                if row.is_empty() {
                    if criterion.test(&Scope::row(row)) {
                        result.push_row(row);
                    }
                    continue;
                }
                for cell in row.cells() {
                    if !criterion.test(&Scope::cell(cell)) {
                        continue;
                    }
                    result.push_row(row);
                    result.cells.push(cell);
                    if result.cells.len() >= max {
                        break 'sheets;
                    }
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            cells = result.cells.len(),
            rows = result.rows.len(),
            sheets = result.sheets.len(),
            "query evaluated"
        );
        result
    }

    fn push_sheet(&mut self, sheet: SheetRef<'w>) {
        if self.sheets.last() != Some(&sheet) {
            self.sheets.push(sheet);
        }
    }

    fn push_row(&mut self, row: RowRef<'w>) {
        self.push_sheet(row.sheet());
        if self.rows.last() != Some(&row) {
            self.rows.push(row);
        }
    }

    pub fn cells(&self) -> &[CellRef<'w>] {
        &self.cells
    }

    pub fn rows(&self) -> &[RowRef<'w>] {
        &self.rows
    }

    pub fn sheets(&self) -> &[SheetRef<'w>] {
        &self.sheets
    }

    pub fn first_cell(&self) -> Option<CellRef<'w>> {
        self.cells.first().copied()
    }

    pub fn first_row(&self) -> Option<RowRef<'w>> {
        self.rows.first().copied()
    }

    pub fn first_sheet(&self) -> Option<SheetRef<'w>> {
        self.sheets.first().copied()
    }

    /// Number of matched cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellRef<'w>> + '_ {
        self.cells.iter().copied()
    }
}

impl<'w> IntoIterator for CriteriaResult<'w> {
    type Item = CellRef<'w>;
    type IntoIter = std::vec::IntoIter<CellRef<'w>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a, 'w> IntoIterator for &'a CriteriaResult<'w> {
    type Item = CellRef<'w>;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, CellRef<'w>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}
