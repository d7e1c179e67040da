//! Predicate queries over a built [`Workbook`].
//!
//! Criteria mirror the workbook tree: a [`WorkbookCriterion`] holds sheet
//! conditions, which hold row conditions, which hold cell conditions. Calls
//! at one level are AND-ed; `or(...)` adds a single clause whose own
//! conditions are OR-ed.
//!
//! ```
//! use sheetbuilder_query::SpreadsheetCriteria;
//! use sheetbuilder_workbook::SpreadsheetBuilder;
//!
//! let workbook = SpreadsheetBuilder::new()
//!     .build(|w| {
//!         w.sheet("Prices", |s| {
//!             s.row_with(|r| {
//!                 r.cell("Apples")?.cell(3)?;
//!                 Ok(())
//!             })?;
//!             Ok(())
//!         })?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let criteria = SpreadsheetCriteria::new(&workbook);
//! let apples = criteria.find(|w| {
//!     w.sheet_with("Prices", |s| {
//!         s.row(|r| {
//!             r.cell_with(2, |c| {
//!                 c.number_matching(|n| n > 2.0);
//!             });
//!         });
//!     });
//! });
//! assert_eq!(apples.unwrap().position().to_string(), "B1");
//! ```

mod cell;
mod criterion;
mod page;
mod result;
mod row;
mod sheet;
mod style;
mod workbook;

pub use cell::CellCriterion;
pub use criterion::{Condition, Criterion, Scope};
pub use page::PageCriterion;
pub use result::CriteriaResult;
pub use row::RowCriterion;
pub use sheet::SheetCriterion;
pub use style::{BorderCriterion, FontCriterion, StyleCriterion};
pub use workbook::WorkbookCriterion;

use sheetbuilder_workbook::{CellRef, Workbook};

/// Entry point for querying one workbook.
#[derive(Debug, Clone, Copy)]
pub struct SpreadsheetCriteria<'w> {
    workbook: &'w Workbook,
}

impl<'w> SpreadsheetCriteria<'w> {
    pub fn new(workbook: &'w Workbook) -> Self {
        Self { workbook }
    }

    /// Every cell, plus the empty rows and sheets.
    pub fn all(&self) -> CriteriaResult<'w> {
        self.query(|_| {})
    }

    pub fn query<F>(&self, build: F) -> CriteriaResult<'w>
    where
        F: FnOnce(&mut WorkbookCriterion<'w>),
    {
        self.query_limited(usize::MAX, build)
    }

    /// Like [`query`](Self::query) but stops after `max` matching cells.
    pub fn query_limited<F>(&self, max: usize, build: F) -> CriteriaResult<'w>
    where
        F: FnOnce(&mut WorkbookCriterion<'w>),
    {
        let mut criterion = WorkbookCriterion::default();
        build(&mut criterion);
        CriteriaResult::evaluate(self.workbook, &criterion, max)
    }

    /// First matching cell; evaluation stops there.
    pub fn find<F>(&self, build: F) -> Option<CellRef<'w>>
    where
        F: FnOnce(&mut WorkbookCriterion<'w>),
    {
        self.query_limited(1, build).first_cell()
    }

    pub fn exists<F>(&self, build: F) -> bool
    where
        F: FnOnce(&mut WorkbookCriterion<'w>),
    {
        self.find(build).is_some()
    }
}
