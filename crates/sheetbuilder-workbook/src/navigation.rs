//! Read-only, position-aware views over a built workbook.
//!
//! [`SheetRef`], [`RowRef`] and [`CellRef`] are cheap `Copy` handles. Cell
//! neighbours step over spans (`below` skips the rowspan, `right` the colspan)
//! while the right diagonals look one column over. A position covered by a
//! merged region resolves to the region's anchor.

use core::fmt;
use std::sync::Arc;

use sheetbuilder_common::{CellPosition, CellValue};

use crate::model::{Cell, PageSettings, Row, Sheet, Style, Workbook};

impl Workbook {
    pub fn sheet_refs(&self) -> impl Iterator<Item = SheetRef<'_>> {
        (0..self.sheets().len()).map(move |index| SheetRef {
            workbook: self,
            index,
        })
    }

    pub fn sheet_ref(&self, name: &str) -> Option<SheetRef<'_>> {
        self.sheet_index(name).map(|index| SheetRef {
            workbook: self,
            index,
        })
    }
}

#[derive(Clone, Copy)]
pub struct SheetRef<'w> {
    workbook: &'w Workbook,
    index: usize,
}

impl<'w> SheetRef<'w> {
    pub fn workbook(&self) -> &'w Workbook {
        self.workbook
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn sheet(&self) -> &'w Sheet {
        &self.workbook.sheets()[self.index]
    }

    pub fn name(&self) -> &'w str {
        &self.sheet().name
    }

    pub fn page(&self) -> &'w PageSettings {
        &self.sheet().page
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'w>> + 'w {
        let sheet = *self;
        self.sheet().rows.keys().map(move |&number| RowRef { sheet, number })
    }

    pub fn row(&self, number: u32) -> Option<RowRef<'w>> {
        self.sheet()
            .rows
            .contains_key(&number)
            .then_some(RowRef {
                sheet: *self,
                number,
            })
    }

    /// The cell at `(row, column)`, or the anchor of the merged region covering it.
    pub fn cell_at(&self, row: u32, column: u32) -> Option<CellRef<'w>> {
        if row == 0 || column == 0 {
            return None;
        }
        let sheet = self.sheet();
        let (row, column) = if sheet.cell(row, column).is_some() {
            (row, column)
        } else {
            let region = sheet.merged_region(row, column)?;
            (region.start_row, region.start_col)
        };
        sheet.cell(row, column)?;
        Some(CellRef {
            row: RowRef { sheet: *self, number: row },
            column,
        })
    }

    pub fn previous(&self) -> Option<SheetRef<'w>> {
        self.index.checked_sub(1).map(|index| SheetRef {
            workbook: self.workbook,
            index,
        })
    }

    pub fn next(&self) -> Option<SheetRef<'w>> {
        let index = self.index + 1;
        (index < self.workbook.sheets().len()).then_some(SheetRef {
            workbook: self.workbook,
            index,
        })
    }
}

impl PartialEq for SheetRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.workbook, other.workbook) && self.index == other.index
    }
}

impl fmt::Debug for SheetRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SheetRef").field(&self.name()).finish()
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct RowRef<'w> {
    sheet: SheetRef<'w>,
    number: u32,
}

impl<'w> RowRef<'w> {
    pub fn sheet(&self) -> SheetRef<'w> {
        self.sheet
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn row(&self) -> &'w Row {
        // Rows are never removed from a built workbook.
        &self.sheet.sheet().rows[&self.number]
    }

    pub fn cells(&self) -> impl Iterator<Item = CellRef<'w>> + 'w {
        let row = *self;
        self.row().cells.keys().map(move |&column| CellRef { row, column })
    }

    pub fn cell(&self, column: u32) -> Option<CellRef<'w>> {
        self.row().cells.contains_key(&column).then_some(CellRef {
            row: *self,
            column,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.row().cells.is_empty()
    }

    pub fn above(&self) -> Option<RowRef<'w>> {
        self.above_by(1)
    }

    pub fn below(&self) -> Option<RowRef<'w>> {
        self.below_by(1)
    }

    pub fn above_by(&self, rows: u32) -> Option<RowRef<'w>> {
        self.number
            .checked_sub(rows)
            .and_then(|n| self.sheet.row(n))
    }

    pub fn below_by(&self, rows: u32) -> Option<RowRef<'w>> {
        self.number
            .checked_add(rows)
            .and_then(|n| self.sheet.row(n))
    }
}

impl fmt::Debug for RowRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowRef({}!{})", self.sheet.name(), self.number)
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct CellRef<'w> {
    row: RowRef<'w>,
    column: u32,
}

impl<'w> CellRef<'w> {
    pub fn row(&self) -> RowRef<'w> {
        self.row
    }

    pub fn sheet(&self) -> SheetRef<'w> {
        self.row.sheet
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> CellPosition {
        CellPosition::new(self.row.number, self.column)
    }

    pub fn cell(&self) -> &'w Cell {
        &self.row.row().cells[&self.column]
    }

    pub fn value(&self) -> &'w CellValue {
        &self.cell().value
    }

    pub fn style(&self) -> Option<&'w Arc<Style>> {
        self.cell().style.as_ref()
    }

    pub fn name(&self) -> Option<&'w str> {
        self.cell().name.as_deref()
    }

    fn neighbour(&self, drow: i64, dcol: i64) -> Option<CellRef<'w>> {
        let target = self.position().offset(drow, dcol)?;
        self.sheet().cell_at(target.row, target.column)
    }

    fn colspan(&self) -> i64 {
        self.cell().colspan.max(1) as i64
    }

    fn rowspan(&self) -> i64 {
        self.cell().rowspan.max(1) as i64
    }

    pub fn above(&self) -> Option<CellRef<'w>> {
        self.neighbour(-1, 0)
    }

    pub fn below(&self) -> Option<CellRef<'w>> {
        self.neighbour(self.rowspan(), 0)
    }

    pub fn left(&self) -> Option<CellRef<'w>> {
        self.neighbour(0, -1)
    }

    pub fn right(&self) -> Option<CellRef<'w>> {
        self.neighbour(0, self.colspan())
    }

    pub fn above_left(&self) -> Option<CellRef<'w>> {
        self.neighbour(-1, -1)
    }

    pub fn above_right(&self) -> Option<CellRef<'w>> {
        self.neighbour(-1, 1)
    }

    pub fn below_left(&self) -> Option<CellRef<'w>> {
        self.neighbour(self.rowspan(), -1)
    }

    pub fn below_right(&self) -> Option<CellRef<'w>> {
        self.neighbour(self.rowspan(), 1)
    }
}

impl fmt::Debug for CellRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellRef({}!{})", self.sheet().name(), self.position())
    }
}
