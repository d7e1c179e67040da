//! Seams between the in-memory [`Workbook`] and file formats.

use std::io::Read;
use std::path::Path;

use crate::model::Workbook;

#[derive(Clone, Debug, Default)]
pub struct BackendCaps {
    pub read: bool,
    pub write: bool,
    pub styles: bool,
    pub named_cells: bool,
    pub formulas: bool,
    pub merged_cells: bool,
    pub rich_text: bool,
    pub hyperlinks: bool,
    pub comments: bool,
}

/// Where [`WorkbookWriter::save_to`] puts the encoded document.
pub enum SaveDestination<'a> {
    /// The path the writer was opened from.
    InPlace,
    Path(&'a Path),
    Writer(&'a mut dyn std::io::Write),
    /// Return the encoded document.
    Bytes,
}

/// A source of complete workbooks, e.g. templates for
/// [`SpreadsheetBuilder::from_template`](crate::SpreadsheetBuilder::from_template).
pub trait WorkbookReader {
    type Error: std::error::Error + Send + Sync + 'static;

    fn capabilities(&self) -> BackendCaps;

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized;

    fn open_reader(reader: Box<dyn Read + Send + Sync>) -> Result<Self, Self::Error>
    where
        Self: Sized;

    fn open_bytes(data: Vec<u8>) -> Result<Self, Self::Error>
    where
        Self: Sized;

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error>;

    fn read_workbook(&mut self) -> Result<Workbook, Self::Error>;
}

/// A sink that encodes a built workbook.
pub trait WorkbookWriter {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_workbook(&mut self, workbook: &Workbook) -> Result<(), Self::Error>;

    fn save(&mut self) -> Result<(), Self::Error>;

    fn save_to(&mut self, dest: SaveDestination<'_>) -> Result<Option<Vec<u8>>, Self::Error>;
}
