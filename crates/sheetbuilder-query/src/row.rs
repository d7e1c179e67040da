use sheetbuilder_common::letters_to_column;
use sheetbuilder_workbook::RowRef;

use crate::cell::CellCriterion;
use crate::criterion::{Scope, ScopeCriterion};

/// Conditions on the cells of a row, selected by column.
///
/// Column letters that do not name a column select nothing.
#[derive(Debug, Default)]
pub struct RowCriterion<'w> {
    inner: ScopeCriterion<'w>,
}

impl<'w> RowCriterion<'w> {
    fn disjunctive() -> Self {
        Self {
            inner: ScopeCriterion::disjunctive(),
        }
    }

    pub(crate) fn into_inner(self) -> ScopeCriterion<'w> {
        self.inner
    }

    fn columns(&mut self, from: Option<u32>, to: Option<u32>) -> &mut Self {
        self.inner.push(move |scope: &Scope<'w>| {
            let (Some(from), Some(to), Some(cell)) = (from, to, scope.cell) else {
                return false;
            };
            (from..=to).contains(&cell.column())
        });
        self
    }

    fn nest_cell<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut CellCriterion<'w>),
    {
        let mut cell = CellCriterion::default();
        build(&mut cell);
        self.inner.nest(cell.into_inner());
        self
    }

    pub fn cell(&mut self, column: u32) -> &mut Self {
        self.columns(Some(column), Some(column))
    }

    pub fn cells(&mut self, from: u32, to: u32) -> &mut Self {
        self.columns(Some(from), Some(to))
    }

    pub fn cell_at(&mut self, column: &str) -> &mut Self {
        let column = letters_to_column(column);
        self.columns(column, column)
    }

    pub fn cells_between(&mut self, from: &str, to: &str) -> &mut Self {
        self.columns(letters_to_column(from), letters_to_column(to))
    }

    /// Cells in any column that pass the conditions added in `build`.
    pub fn cell_matching<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut CellCriterion<'w>),
    {
        self.nest_cell(build)
    }

    pub fn cell_with<F>(&mut self, column: u32, build: F) -> &mut Self
    where
        F: FnOnce(&mut CellCriterion<'w>),
    {
        self.cell(column).nest_cell(build)
    }

    pub fn cells_with<F>(&mut self, from: u32, to: u32, build: F) -> &mut Self
    where
        F: FnOnce(&mut CellCriterion<'w>),
    {
        self.cells(from, to).nest_cell(build)
    }

    pub fn cell_at_with<F>(&mut self, column: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut CellCriterion<'w>),
    {
        self.cell_at(column).nest_cell(build)
    }

    pub fn cells_between_with<F>(&mut self, from: &str, to: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut CellCriterion<'w>),
    {
        self.cells_between(from, to).nest_cell(build)
    }

    pub fn or<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut RowCriterion<'w>),
    {
        let mut nested = RowCriterion::disjunctive();
        build(&mut nested);
        self.inner.nest(nested.inner);
        self
    }

    pub fn having(&mut self, predicate: impl Fn(RowRef<'w>) -> bool + 'w) -> &mut Self {
        self.inner
            .push(move |scope: &Scope<'w>| scope.row.is_some_and(&predicate));
        self
    }
}
