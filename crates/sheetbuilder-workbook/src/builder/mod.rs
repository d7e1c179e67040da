//! Declarative construction of a [`Workbook`].
//!
//! Every level of the tree is populated through a closure that receives a
//! definition handle:
//!
//! ```
//! use sheetbuilder_workbook::{HasStyle, SpreadsheetBuilder};
//!
//! let workbook = SpreadsheetBuilder::new()
//!     .build(|w| {
//!         w.style("header", |s| {
//!             s.font(|f| {
//!                 f.size(14.0);
//!                 Ok(())
//!             })?;
//!             Ok(())
//!         })?;
//!         w.sheet("Summary", |s| {
//!             s.row_with(|r| {
//!                 r.style("header")?;
//!                 r.cell("Total")?;
//!                 r.cell_with(|c| {
//!                     c.formula("=SUM(#{amounts})");
//!                     Ok(())
//!                 })?;
//!                 Ok(())
//!             })?;
//!             s.row_with(|r| {
//!                 r.cell_with(|c| {
//!                     c.value(42).name("amounts")?;
//!                     Ok(())
//!                 })?;
//!                 Ok(())
//!             })?;
//!             Ok(())
//!         })?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let sheet = workbook.sheet("Summary").unwrap();
//! assert_eq!(
//!     sheet.cell(1, 2).unwrap().formula.as_deref(),
//!     Some("=SUM('Summary'!A2)")
//! );
//! ```
//!
//! Formulas and name links are resolved after the build (or after each sheet,
//! see [`ResolutionScope`](crate::ResolutionScope)), so names may be used before
//! the cell carrying them has been defined.

mod cell;
mod dimension;
mod link;
mod row;
mod sheet;
mod style;

pub use cell::{CellDefinition, CommentDefinition};
pub use dimension::{
    Dimension, DimensionModifier, HEIGHT_POINTS_PER_CM, HEIGHT_POINTS_PER_INCH,
    WIDTH_POINTS_PER_CM, WIDTH_POINTS_PER_INCH,
};
pub use link::LinkDefinition;
pub use row::RowDefinition;
pub use sheet::SheetDefinition;
pub use style::{
    BorderDefinition, FontDefinition, HasStyle, PageDefinition, StyleDefinition, StyleList,
};

use sheetbuilder_common::{BuildError, normalize_sheet_name};

use crate::config::{BuildConfig, ResolutionScope};
use crate::model::Workbook;
use crate::pending::{Pending, PendingQueue};

/// State shared by every definition handle of one build.
#[derive(Debug)]
pub(crate) struct BuildContext {
    pub(crate) workbook: Workbook,
    pub(crate) pending: PendingQueue,
    pub(crate) config: BuildConfig,
}

impl BuildContext {
    pub(crate) fn defer(&mut self, item: Pending) {
        self.pending.push(item);
    }

    pub(crate) fn resolve_pending(&mut self) -> Result<(), BuildError> {
        self.pending.resolve_all(&mut self.workbook)
    }

    /// Bookkeeping run after each `sheet(...)` closure.
    fn finish_sheet(&mut self, index: usize) -> Result<(), BuildError> {
        let sheet = self.workbook.sheet_at_mut(index);
        for row in sheet.rows.values_mut() {
            for cell in row.cells.values_mut() {
                if !cell.rich_text.is_empty() {
                    cell.value = sheetbuilder_common::CellValue::Text(cell.rich_text_string());
                }
            }
        }
        sheet.rebuild_merged();
        if self.config.resolution == ResolutionScope::Sheet {
            self.resolve_pending()?;
        }
        Ok(())
    }
}

/// A reusable bundle of named style declarations.
pub trait Stylesheet {
    fn declare_styles(&self, workbook: &mut WorkbookDefinition<'_>) -> Result<(), BuildError>;
}

/// Entry point of the builder API.
#[derive(Debug, Default)]
pub struct SpreadsheetBuilder {
    workbook: Workbook,
    config: BuildConfig,
}

impl SpreadsheetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            workbook: Workbook::new(),
            config,
        }
    }

    /// Build on top of an existing workbook: its sheets, styles and names are
    /// kept and new definitions are applied additively.
    pub fn from_template(workbook: Workbook) -> Self {
        Self {
            workbook,
            config: BuildConfig::default(),
        }
    }

    pub fn config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build<F>(self, f: F) -> Result<Workbook, BuildError>
    where
        F: FnOnce(&mut WorkbookDefinition<'_>) -> Result<(), BuildError>,
    {
        let mut ctx = BuildContext {
            workbook: self.workbook,
            pending: PendingQueue::default(),
            config: self.config,
        };
        f(&mut WorkbookDefinition { ctx: &mut ctx })?;
        ctx.resolve_pending()?;
        Ok(ctx.workbook)
    }
}

pub struct WorkbookDefinition<'a> {
    ctx: &'a mut BuildContext,
}

impl WorkbookDefinition<'_> {
    pub fn config(&self) -> BuildConfig {
        self.ctx.config
    }

    /// The workbook as built so far.
    pub fn workbook(&self) -> &Workbook {
        &self.ctx.workbook
    }

    /// Define (or extend) the sheet called `name`.
    pub fn sheet<F>(&mut self, name: &str, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut SheetDefinition<'_>) -> Result<(), BuildError>,
    {
        let name = if self.ctx.config.sheet_name_normalization {
            normalize_sheet_name(name)
        } else {
            name.to_string()
        };
        let index = self.ctx.workbook.ensure_sheet(&name);
        f(&mut SheetDefinition::new(self.ctx, index))?;
        self.ctx.finish_sheet(index)?;
        Ok(self)
    }

    /// Declare a named style. Redefining a name replaces the previous
    /// declaration unless the style has already been used.
    pub fn style<F>(&mut self, name: &str, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut StyleDefinition) -> Result<(), BuildError>,
    {
        let spec = StyleDefinition::evaluate(f)?;
        self.ctx.workbook.styles_mut().define(name, spec)?;
        Ok(self)
    }

    pub fn apply<S: Stylesheet + ?Sized>(&mut self, stylesheet: &S) -> Result<&mut Self, BuildError> {
        stylesheet.declare_styles(self)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Headings;

    impl Stylesheet for Headings {
        fn declare_styles(&self, w: &mut WorkbookDefinition<'_>) -> Result<(), BuildError> {
            w.style("h1", |s| {
                s.font(|f| {
                    f.size(22.0);
                    Ok(())
                })?;
                Ok(())
            })?;
            w.style("h2", |s| {
                s.base("h1").font(|f| {
                    f.size(16.0);
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        }
    }

    #[test]
    fn stylesheet_declares_through_style_entry_point() {
        let wb = SpreadsheetBuilder::new()
            .build(|w| {
                w.apply(&Headings)?;
                Ok(())
            })
            .unwrap();
        assert_eq!(wb.styles().names(), vec!["h1", "h2"]);
        assert_eq!(wb.styles().definition("h2").unwrap().base.as_deref(), Some("h1"));
    }

    #[test]
    fn sheet_is_reused_by_name() {
        let wb = SpreadsheetBuilder::new()
            .build(|w| {
                w.sheet("Data", |s| {
                    s.row_with(|r| r.cell("a").map(|_| ()))?;
                    Ok(())
                })?;
                w.sheet("Other", |_| Ok(()))?;
                w.sheet("Data", |s| {
                    s.row_with(|r| r.cell("b").map(|_| ()))?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();
        assert_eq!(wb.sheet_names(), vec!["Data", "Other"]);
        assert_eq!(wb.sheet("Data").unwrap().rows.len(), 2);
    }

    #[test]
    fn sheet_names_are_normalized() {
        let wb = SpreadsheetBuilder::new()
            .build(|w| {
                w.sheet(" Q1/Q2 ", |_| Ok(()))?;
                Ok(())
            })
            .unwrap();
        assert!(wb.sheet("Q1_Q2").is_some());
    }
}
