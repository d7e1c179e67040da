//! Meta crate that re-exports the sheetbuilder building blocks. Queries and
//! the JSON data document are on by default and can be switched off through
//! feature flags; the underlying crates stay reachable for deeper use.

pub use sheetbuilder_common as common;
pub use sheetbuilder_workbook as workbook;

#[cfg(feature = "query")]
pub use sheetbuilder_query as query;

pub use sheetbuilder_workbook::{
    BuildConfig, BuildError, BuildMode, CellRef, CellValue, Color, DataRow, IoError,
    ResolutionScope, RowRef, SheetRef, SpreadsheetBuilder, Stylesheet, Workbook,
    WorkbookReader, WorkbookWriter,
};

#[cfg(feature = "json")]
pub use sheetbuilder_workbook::{DataSpreadsheetParser, JsonAdapter, to_data};

#[cfg(feature = "query")]
pub use sheetbuilder_query::{CriteriaResult, SpreadsheetCriteria};
