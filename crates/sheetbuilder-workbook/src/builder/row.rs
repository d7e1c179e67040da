use sheetbuilder_common::{BuildError, IntoCellValue, MAX_COLUMN};

use super::BuildContext;
use super::cell::CellDefinition;
use super::dimension::{Dimension, DimensionModifier};
use super::sheet::{parse_column, widen};
use super::style::{HasStyle, StyleList};
use crate::model::{Cell, OutlineGroup, Row, StyleRegistry};

pub struct RowDefinition<'a> {
    ctx: &'a mut BuildContext,
    sheet: usize,
    number: u32,
    /// Styles applied to every cell created afterwards in this row.
    styles: StyleList,
    /// Columns touched through this handle, for outline groups.
    span: Option<(u32, u32)>,
}

impl<'a> RowDefinition<'a> {
    pub(crate) fn new(ctx: &'a mut BuildContext, sheet: usize, number: u32, styles: StyleList) -> Self {
        Self {
            ctx,
            sheet,
            number,
            styles,
            span: None,
        }
    }

    fn row_mut(&mut self) -> &mut Row {
        let number = self.number;
        self.ctx
            .workbook
            .sheet_at_mut(self.sheet)
            .rows
            .entry(number)
            .or_insert_with(|| Row::new(number))
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Append a cell holding `value`.
    pub fn cell(&mut self, value: impl IntoCellValue) -> Result<&mut Self, BuildError> {
        let value = value.into_cell_value();
        self.cell_with(move |c| {
            c.value(value);
            Ok(())
        })
    }

    /// Append an empty cell.
    pub fn empty_cell(&mut self) -> Result<&mut Self, BuildError> {
        self.cell_with(|_| Ok(()))
    }

    /// Append a cell after the last cell of the row, skipping its colspan.
    pub fn cell_with<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut CellDefinition<'_>) -> Result<(), BuildError>,
    {
        let column = self.row_mut().next_column();
        self.cell_at(column, f)
    }

    /// Define (or extend) the cell at the 1-based `column`.
    pub fn cell_at<F>(&mut self, column: u32, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut CellDefinition<'_>) -> Result<(), BuildError>,
    {
        if column == 0 || column > MAX_COLUMN {
            return Err(BuildError::InvalidArgument(format!(
                "Column number must be between 1 and {MAX_COLUMN}, got {column}"
            )));
        }
        self.row_mut()
            .cells
            .entry(column)
            .or_insert_with(|| Cell::new(column));
        let mut cell = CellDefinition::new(
            self.ctx,
            self.sheet,
            self.number,
            column,
            self.styles.clone(),
        );
        f(&mut cell)?;
        let colspan = cell.finish()?;
        widen(&mut self.span, column, column.saturating_add(colspan - 1));
        Ok(self)
    }

    /// Same as [`RowDefinition::cell_at`] with a column given as letters.
    pub fn cell_at_column<F>(&mut self, column: &str, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut CellDefinition<'_>) -> Result<(), BuildError>,
    {
        let column = parse_column(column)?;
        self.cell_at(column, f)
    }

    /// Cells defined inside `f` form one column outline group.
    pub fn group<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut RowDefinition<'_>) -> Result<(), BuildError>,
    {
        self.outline(false, f)
    }

    /// Like [`RowDefinition::group`], initially collapsed.
    pub fn collapse<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut RowDefinition<'_>) -> Result<(), BuildError>,
    {
        self.outline(true, f)
    }

    fn outline<F>(&mut self, collapsed: bool, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut RowDefinition<'_>) -> Result<(), BuildError>,
    {
        let mut inner = RowDefinition::new(self.ctx, self.sheet, self.number, self.styles.clone());
        f(&mut inner)?;
        let span = inner.span;
        if let Some((start, end)) = span {
            self.ctx
                .workbook
                .sheet_at_mut(self.sheet)
                .column_groups
                .push(OutlineGroup {
                    start,
                    end,
                    collapsed,
                });
            widen(&mut self.span, start, end);
        }
        Ok(self)
    }

    /// Row height, in points unless converted.
    pub fn height(&mut self, value: f64) -> DimensionModifier<'_> {
        let row = self.row_mut();
        DimensionModifier::new(row.height.insert(value), value, Dimension::Height)
    }
}

impl HasStyle for RowDefinition<'_> {
    fn style_target(&mut self) -> (&StyleRegistry, &mut StyleList) {
        (self.ctx.workbook.styles(), &mut self.styles)
    }
}
