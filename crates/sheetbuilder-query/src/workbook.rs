use sheetbuilder_workbook::SheetRef;

use crate::criterion::{Scope, ScopeCriterion};
use crate::sheet::SheetCriterion;

/// Root of a query: selects sheets and, through nested criteria, their rows
/// and cells.
#[derive(Debug, Default)]
pub struct WorkbookCriterion<'w> {
    inner: ScopeCriterion<'w>,
}

impl<'w> WorkbookCriterion<'w> {
    fn disjunctive() -> Self {
        Self {
            inner: ScopeCriterion::disjunctive(),
        }
    }

    pub(crate) fn test(&self, scope: &Scope<'w>) -> bool {
        self.inner.test(scope)
    }

    /// Sheets called `name`.
    pub fn sheet(&mut self, name: &str) -> &mut Self {
        let name = name.to_string();
        self.inner
            .push(move |scope: &Scope<'w>| scope.sheet.name() == name);
        self
    }

    pub fn sheet_with<F>(&mut self, name: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut SheetCriterion<'w>),
    {
        self.sheet(name).sheet_matching(build)
    }

    /// Any sheet, narrowed by the conditions added in `build`.
    pub fn sheet_matching<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut SheetCriterion<'w>),
    {
        let mut sheet = SheetCriterion::default();
        build(&mut sheet);
        self.inner.nest(sheet.into_inner());
        self
    }

    pub fn or<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut WorkbookCriterion<'w>),
    {
        let mut nested = WorkbookCriterion::disjunctive();
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
