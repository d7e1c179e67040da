use core::fmt;

use smallvec::SmallVec;
use sheetbuilder_workbook::{CellRef, RowRef, SheetRef};

/// A boxed test over `T`.
pub type Condition<'w, T> = Box<dyn Fn(&T) -> bool + 'w>;

/// A list of conditions joined either by AND (the default) or by OR.
///
/// A criterion without conditions accepts everything in both modes, so an
/// empty `or(...)` group never narrows the enclosing criterion.
pub struct Criterion<'w, T> {
    conditions: SmallVec<[Condition<'w, T>; 4]>,
    disjoint: bool,
}

impl<'w, T: 'w> Criterion<'w, T> {
    pub fn conjunctive() -> Self {
        Self {
            conditions: SmallVec::new(),
            disjoint: false,
        }
    }

    pub fn disjunctive() -> Self {
        Self {
            conditions: SmallVec::new(),
            disjoint: true,
        }
    }

    pub fn is_disjoint(&self) -> bool {
        self.disjoint
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn push(&mut self, condition: impl Fn(&T) -> bool + 'w) {
        self.conditions.push(Box::new(condition));
    }

    /// Add `nested` as a single clause of this criterion.
    pub fn nest(&mut self, nested: Criterion<'w, T>) {
        self.push(move |subject| nested.test(subject));
    }

    pub fn test(&self, subject: &T) -> bool {
        if self.conditions.is_empty() {
            return true;
        }
        if self.disjoint {
            self.conditions.iter().any(|c| c(subject))
        } else {
            self.conditions.iter().all(|c| c(subject))
        }
    }
}

impl<'w, T: 'w> Default for Criterion<'w, T> {
    fn default() -> Self {
        Self::conjunctive()
    }
}

impl<T> fmt::Debug for Criterion<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Criterion")
            .field("conditions", &self.conditions.len())
            .field("disjoint", &self.disjoint)
            .finish()
    }
}

/// The element under test while walking a workbook.
///
/// Cells are tested with all three levels set. A row without cells is tested
/// with `cell: None` and a sheet without rows with `row: None` as well, so
/// they only pass when no condition needs the missing level.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'w> {
    pub sheet: SheetRef<'w>,
    pub row: Option<RowRef<'w>>,
    pub cell: Option<CellRef<'w>>,
}

impl<'w> Scope<'w> {
    pub fn sheet(sheet: SheetRef<'w>) -> Self {
        Self {
            sheet,
            row: None,
            cell: None,
        }
    }

    pub fn row(row: RowRef<'w>) -> Self {
        Self {
            sheet: row.sheet(),
            row: Some(row),
            cell: None,
        }
    }

    pub fn cell(cell: CellRef<'w>) -> Self {
        Self {
            sheet: cell.sheet(),
            row: Some(cell.row()),
            cell: Some(cell),
        }
    }
}

/// Shared state of the scope-level criteria (workbook, sheet, row, cell).
pub(crate) type ScopeCriterion<'w> = Criterion<'w, Scope<'w>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_accept_everything() {
        assert!(Criterion::<'_, u32>::conjunctive().test(&1));
        assert!(Criterion::<'_, u32>::disjunctive().test(&1));
    }

    #[test]
    fn conjunction_and_disjunction() {
        let mut all = Criterion::conjunctive();
        all.push(|n: &u32| *n > 1);
        all.push(|n: &u32| *n < 5);
        assert!(all.test(&3));
        assert!(!all.test(&7));

        let mut any = Criterion::disjunctive();
        any.push(|n: &u32| *n == 1);
        any.push(|n: &u32| *n == 7);
        assert!(any.test(&7));
        assert!(!any.test(&3));

        // (n > 1) AND (n == 1 OR n == 7)
        let mut outer = Criterion::conjunctive();
        outer.push(|n: &u32| *n > 1);
        outer.nest(any);
        assert!(outer.test(&7));
        assert!(!outer.test(&1));
        assert_eq!(outer.len(), 2);
    }
}
