use std::sync::Arc;

use sheetbuilder_common::{
    BuildError, CellPosition, ImageType, IntoCellValue, MAX_COLUMN, MAX_ROW, validate_name,
};

use super::BuildContext;
use super::dimension::{Dimension, DimensionModifier};
use super::link::LinkDefinition;
use super::style::{FontDefinition, HasStyle, StyleList};
use crate::model::cell::{DEFAULT_COMMENT_HEIGHT, DEFAULT_COMMENT_WIDTH};
use crate::model::{Cell, Comment, Font, Image, Row, StyleRegistry};
use crate::pending::{CellAddress, Pending};

pub struct CellDefinition<'a> {
    ctx: &'a mut BuildContext,
    sheet: usize,
    row: u32,
    column: u32,
    styles: StyleList,
}

impl<'a> CellDefinition<'a> {
    pub(crate) fn new(
        ctx: &'a mut BuildContext,
        sheet: usize,
        row: u32,
        column: u32,
        styles: StyleList,
    ) -> Self {
        Self {
            ctx,
            sheet,
            row,
            column,
            styles,
        }
    }

    pub(crate) fn address(&self) -> CellAddress {
        CellAddress {
            sheet: self.sheet,
            row: self.row,
            column: self.column,
        }
    }

    pub(crate) fn context(&mut self) -> &mut BuildContext {
        &mut *self.ctx
    }

    fn row_mut(&mut self) -> &mut Row {
        let number = self.row;
        self.ctx
            .workbook
            .sheet_at_mut(self.sheet)
            .rows
            .entry(number)
            .or_insert_with(|| Row::new(number))
    }

    fn cell_mut(&mut self) -> &mut Cell {
        let column = self.column;
        self.row_mut()
            .cells
            .entry(column)
            .or_insert_with(|| Cell::new(column))
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn value(&mut self, value: impl IntoCellValue) -> &mut Self {
        self.cell_mut().value = value.into_cell_value();
        self
    }

    /// Formula text; `#{name}` placeholders are replaced by the named cell's
    /// reference once the enclosing scope is resolved.
    pub fn formula(&mut self, text: &str) -> &mut Self {
        let cell = self.address();
        self.ctx.defer(Pending::Formula {
            cell,
            text: text.to_string(),
        });
        self
    }

    /// Register a workbook-level name pointing at this cell.
    pub fn name(&mut self, name: &str) -> Result<&mut Self, BuildError> {
        validate_name(name)?;
        let sheet = self
            .ctx
            .workbook
            .sheet_at(self.sheet)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        self.ctx
            .workbook
            .define_name(name, &sheet, CellPosition::new(self.row, self.column))?;
        self.cell_mut().name = Some(name.to_string());
        Ok(self)
    }

    pub fn comment(&mut self, text: &str) -> Result<&mut Self, BuildError> {
        self.comment_with(|c| {
            c.text(text);
            Ok(())
        })
    }

    pub fn comment_with<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut CommentDefinition) -> Result<(), BuildError>,
    {
        let mut def = CommentDefinition::default();
        f(&mut def)?;
        let comment = def.into_comment()?;
        self.cell_mut().comment = Some(comment);
        Ok(self)
    }

    pub fn link(&mut self) -> LinkDefinition<'_, 'a> {
        LinkDefinition::new(self)
    }

    pub fn colspan(&mut self, span: u32) -> Result<&mut Self, BuildError> {
        self.cell_mut().colspan = bounded_span("colspan", self.column, span, MAX_COLUMN)?;
        Ok(self)
    }

    pub fn rowspan(&mut self, span: u32) -> Result<&mut Self, BuildError> {
        self.cell_mut().rowspan = bounded_span("rowspan", self.row, span, MAX_ROW)?;
        Ok(self)
    }

    /// Column width, in points unless converted.
    pub fn width(&mut self, value: f64) -> DimensionModifier<'_> {
        let column = self.column;
        let sheet = self.ctx.workbook.sheet_at_mut(self.sheet);
        sheet.auto_columns.remove(&column);
        let slot = sheet.column_widths.entry(column).or_insert(value);
        DimensionModifier::new(slot, value, Dimension::Width)
    }

    /// Size the column to fit its content.
    pub fn width_auto(&mut self) -> &mut Self {
        let column = self.column;
        let sheet = self.ctx.workbook.sheet_at_mut(self.sheet);
        sheet.column_widths.remove(&column);
        sheet.auto_columns.insert(column);
        self
    }

    /// Row height, in points unless converted.
    pub fn height(&mut self, value: f64) -> DimensionModifier<'_> {
        let row = self.row_mut();
        DimensionModifier::new(row.height.insert(value), value, Dimension::Height)
    }

    /// Append a plain rich-text run.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.cell_mut().push_text(text, None);
        self
    }

    /// Append a rich-text run with its own font.
    pub fn text_with_font<F>(&mut self, text: &str, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut FontDefinition<'_>) -> Result<(), BuildError>,
    {
        let mut font = Font::default();
        f(&mut FontDefinition::new(&mut font))?;
        self.cell_mut().push_text(text, Some(font));
        Ok(self)
    }

    pub fn image(&mut self, image_type: ImageType, source: &str) -> &mut Self {
        self.cell_mut().image = Some(Image {
            image_type,
            source: source.to_string(),
        });
        self
    }

    pub fn png(&mut self, source: &str) -> &mut Self {
        self.image(ImageType::Png, source)
    }

    pub fn jpeg(&mut self, source: &str) -> &mut Self {
        self.image(ImageType::Jpeg, source)
    }

    pub fn pict(&mut self, source: &str) -> &mut Self {
        self.image(ImageType::Pict, source)
    }

    pub fn emf(&mut self, source: &str) -> &mut Self {
        self.image(ImageType::Emf, source)
    }

    pub fn wmf(&mut self, source: &str) -> &mut Self {
        self.image(ImageType::Wmf, source)
    }

    pub fn dib(&mut self, source: &str) -> &mut Self {
        self.image(ImageType::Dib, source)
    }

    /// Lay the collected styles over the cell's current style and report the colspan.
    pub(crate) fn finish(mut self) -> Result<u32, BuildError> {
        if let Some(style) = self.styles.materialize(self.ctx.workbook.styles_mut())? {
            let cell = self.cell_mut();
            cell.style = Some(match cell.style.take() {
                Some(existing) if !Arc::ptr_eq(&existing, &style) => {
                    let mut merged = (*existing).clone();
                    merged.merge(&style);
                    Arc::new(merged)
                }
                _ => style,
            });
        }
        Ok(self.cell_mut().colspan.max(1))
    }
}

impl HasStyle for CellDefinition<'_> {
    fn style_target(&mut self) -> (&StyleRegistry, &mut StyleList) {
        (self.ctx.workbook.styles(), &mut self.styles)
    }
}

/// `span` cells starting at `start` must end at or before `max`.
fn bounded_span(kind: &str, start: u32, span: u32, max: u32) -> Result<u32, BuildError> {
    if span == 0 {
        return Err(BuildError::InvalidArgument(format!(
            "{kind} must be at least 1"
        )));
    }
    match start.checked_add(span - 1) {
        Some(end) if end <= max => Ok(span),
        _ => Err(BuildError::InvalidArgument(format!(
            "{kind} {span} reaches past the sheet limit of {max}"
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct CommentDefinition {
    author: Option<String>,
    text: Option<String>,
    width: u32,
    height: u32,
}

impl Default for CommentDefinition {
    fn default() -> Self {
        Self {
            author: None,
            text: None,
            width: DEFAULT_COMMENT_WIDTH,
            height: DEFAULT_COMMENT_HEIGHT,
        }
    }
}

impl CommentDefinition {
    pub fn author(&mut self, author: &str) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.text = Some(text.to_string());
        self
    }

    /// Box width in cells.
    pub fn width(&mut self, cells: u32) -> &mut Self {
        self.width = cells.max(1);
        self
    }

    /// Box height in cells.
    pub fn height(&mut self, cells: u32) -> &mut Self {
        self.height = cells.max(1);
        self
    }

    fn into_comment(self) -> Result<Comment, BuildError> {
        let text = self.text.ok_or(BuildError::MissingCommentText)?;
        Ok(Comment {
            author: self.author,
            text,
            width: self.width,
            height: self.height,
        })
    }
}
