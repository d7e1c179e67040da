use sheetbuilder_common::SheetState;
use sheetbuilder_workbook::SheetRef;

use crate::criterion::{Scope, ScopeCriterion};
use crate::page::PageCriterion;
use crate::row::RowCriterion;

/// Conditions on the rows of a sheet and on the sheet itself.
#[derive(Debug, Default)]
pub struct SheetCriterion<'w> {
    inner: ScopeCriterion<'w>,
}

impl<'w> SheetCriterion<'w> {
    fn disjunctive() -> Self {
        Self {
            inner: ScopeCriterion::disjunctive(),
        }
    }

    pub(crate) fn into_inner(self) -> ScopeCriterion<'w> {
        self.inner
    }

    fn numbers(&mut self, from: u32, to: u32) -> &mut Self {
        self.inner.push(move |scope: &Scope<'w>| {
            scope
                .row
                .is_some_and(|row| (from..=to).contains(&row.number()))
        });
        self
    }

    /// Rows passing the conditions added in `build`.
    pub fn row<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut RowCriterion<'w>),
    {
        let mut row = RowCriterion::default();
        build(&mut row);
        self.inner.nest(row.into_inner());
        self
    }

    pub fn row_number(&mut self, number: u32) -> &mut Self {
        self.numbers(number, number)
    }

    /// Rows `from..=to`.
    pub fn rows(&mut self, from: u32, to: u32) -> &mut Self {
        self.numbers(from, to)
    }

    pub fn row_number_with<F>(&mut self, number: u32, build: F) -> &mut Self
    where
        F: FnOnce(&mut RowCriterion<'w>),
    {
        self.numbers(number, number).row(build)
    }

    pub fn rows_with<F>(&mut self, from: u32, to: u32, build: F) -> &mut Self
    where
        F: FnOnce(&mut RowCriterion<'w>),
    {
        self.numbers(from, to).row(build)
    }

    pub fn page<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut PageCriterion<'w>),
    {
        let mut page = PageCriterion::default();
        build(&mut page);
        self.inner
            .push(move |scope: &Scope<'w>| page.test(scope.sheet.page()));
        self
    }

    /// Sheets in `state`; sheets without an explicit state are visible.
    pub fn state(&mut self, state: SheetState) -> &mut Self {
        self.inner.push(move |scope: &Scope<'w>| {
            scope.sheet.sheet().effective_state() == state
        });
        self
    }

    pub fn or<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut SheetCriterion<'w>),
    {
        let mut nested = SheetCriterion::disjunctive();
        build(&mut nested);
        self.inner.nest(nested.inner);
        self
    }

    pub fn having(&mut self, predicate: impl Fn(SheetRef<'w>) -> bool + 'w) -> &mut Self {
        self.inner
            .push(move |scope: &Scope<'w>| predicate(scope.sheet));
        self
    }
}
