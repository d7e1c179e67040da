//! Declarative spreadsheet construction.
//!
//! [`SpreadsheetBuilder`] turns nested closures into an in-memory [`Workbook`]
//! with named styles, named cells and deferred formula/link resolution. The
//! built workbook can be walked with [`SheetRef`]/[`RowRef`]/[`CellRef`] or
//! exchanged as a JSON data document through [`JsonAdapter`].

pub mod backends;
pub mod builder;
pub mod config;
pub mod data_row;
pub mod error;
pub mod model;
pub mod navigation;
pub mod pending;
pub mod traits;

#[cfg(feature = "json")]
pub use backends::{DataSpreadsheetParser, JsonAdapter, to_data};
pub use builder::{
    BorderDefinition, CellDefinition, CommentDefinition, Dimension, DimensionModifier,
    FontDefinition, HasStyle, LinkDefinition, PageDefinition, RowDefinition, SheetDefinition,
    SpreadsheetBuilder, StyleDefinition, Stylesheet, WorkbookDefinition,
};
pub use config::{BuildConfig, BuildMode, ResolutionScope};
pub use data_row::DataRow;
pub use error::IoError;
pub use model::{
    Border, Borders, Cell, Comment, Font, Hyperlink, Image, MergedRange, NamedCell,
    OutlineGroup, PageSettings, RichTextPart, Row, Sheet, Style, StyleRegistry, StyleSpec,
    Workbook,
};
pub use navigation::{CellRef, RowRef, SheetRef};
pub use traits::{BackendCaps, SaveDestination, WorkbookReader, WorkbookWriter};

// Re-export for convenience
pub use sheetbuilder_common::{
    BorderSide, BorderStyle, BuildError, CellPosition, CellValue, Color, FontStyle,
    ForegroundFill, HorizontalAlignment, ImageType, IntoCellValue, IntoColor, Keyword, MAX_COLUMN,
    MAX_ROW, Orientation, Paper, SheetState, VerticalAlignment,
};
