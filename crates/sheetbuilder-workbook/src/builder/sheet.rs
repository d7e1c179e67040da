use sheetbuilder_common::{BuildError, MAX_ROW, SheetState, letters_to_column};

use super::BuildContext;
use super::row::RowDefinition;
use super::style::{PageDefinition, StyleList};
use crate::model::{OutlineGroup, Row, Sheet};

/// Extend an inclusive span with another one.
pub(crate) fn widen(span: &mut Option<(u32, u32)>, start: u32, end: u32) {
    *span = Some(match *span {
        Some((s, e)) => (s.min(start), e.max(end)),
        None => (start, end),
    });
}

pub(crate) fn parse_column(letters: &str) -> Result<u32, BuildError> {
    letters_to_column(letters).ok_or_else(|| BuildError::InvalidColumn(letters.to_string()))
}

pub struct SheetDefinition<'a> {
    ctx: &'a mut BuildContext,
    index: usize,
    /// Rows touched through this handle, for outline groups.
    span: Option<(u32, u32)>,
}

impl<'a> SheetDefinition<'a> {
    pub(crate) fn new(ctx: &'a mut BuildContext, index: usize) -> Self {
        Self {
            ctx,
            index,
            span: None,
        }
    }

    fn sheet_mut(&mut self) -> &mut Sheet {
        self.ctx.workbook.sheet_at_mut(self.index)
    }

    pub fn name(&self) -> &str {
        self.ctx
            .workbook
            .sheet_at(self.index)
            .map_or("", |s| s.name.as_str())
    }

    /// Append an empty row.
    pub fn row(&mut self) -> Result<&mut Self, BuildError> {
        self.row_with(|_| Ok(()))
    }

    /// Append a row after the highest row defined so far.
    pub fn row_with<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut RowDefinition<'_>) -> Result<(), BuildError>,
    {
        let number = self.sheet_mut().next_row_number();
        self.row_at(number, f)
    }

    /// Define (or extend) the row with the given 1-based number.
    pub fn row_at<F>(&mut self, number: u32, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut RowDefinition<'_>) -> Result<(), BuildError>,
    {
        if number == 0 || number > MAX_ROW {
            return Err(BuildError::InvalidArgument(format!(
                "Row number must be between 1 and {MAX_ROW}, got {number}"
            )));
        }
        self.sheet_mut()
            .rows
            .entry(number)
            .or_insert_with(|| Row::new(number));
        f(&mut RowDefinition::new(
            self.ctx,
            self.index,
            number,
            StyleList::default(),
        ))?;
        widen(&mut self.span, number, number);
        Ok(self)
    }

    /// Freeze the pane at the given column and row.
    pub fn freeze(&mut self, column: u32, row: u32) -> &mut Self {
        self.sheet_mut().freeze = Some((column, row));
        self
    }

    pub fn freeze_at(&mut self, column: &str, row: u32) -> Result<&mut Self, BuildError> {
        let column = parse_column(column)?;
        Ok(self.freeze(column, row))
    }

    /// Rows defined inside `f` form one outline group.
    pub fn group<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut SheetDefinition<'_>) -> Result<(), BuildError>,
    {
        self.outline(false, f)
    }

    /// Like [`SheetDefinition::group`], initially collapsed.
    pub fn collapse<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut SheetDefinition<'_>) -> Result<(), BuildError>,
    {
        self.outline(true, f)
    }

    fn outline<F>(&mut self, collapsed: bool, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut SheetDefinition<'_>) -> Result<(), BuildError>,
    {
        let mut inner = SheetDefinition::new(self.ctx, self.index);
        f(&mut inner)?;
        let span = inner.span;
        if let Some((start, end)) = span {
            self.sheet_mut().row_groups.push(OutlineGroup {
                start,
                end,
                collapsed,
            });
            widen(&mut self.span, start, end);
        }
        Ok(self)
    }

    pub fn state(&mut self, state: SheetState) -> &mut Self {
        self.sheet_mut().state = Some(state);
        self
    }

    pub fn password(&mut self, password: &str) -> &mut Self {
        self.sheet_mut().password = Some(password.to_string());
        self
    }

    /// Turn on the auto filter.
    pub fn filter_auto(&mut self) -> &mut Self {
        self.sheet_mut().filter = true;
        self
    }

    pub fn page<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut PageDefinition<'_>) -> Result<(), BuildError>,
    {
        f(&mut PageDefinition {
            page: &mut self.sheet_mut().page,
        })?;
        Ok(self)
    }
}
