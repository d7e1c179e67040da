//! Data-document backend over `serde_json::Value`.

mod export;
mod parser;

pub use export::to_data;
pub use parser::DataSpreadsheetParser;

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::IoError;
use crate::builder::SpreadsheetBuilder;
use crate::config::BuildConfig;
use crate::model::Workbook;
use crate::traits::{BackendCaps, SaveDestination, WorkbookReader, WorkbookWriter};

/// Reads workbooks from, and writes them to, JSON data documents.
#[derive(Debug)]
pub struct JsonAdapter {
    data: Value,
    path: Option<PathBuf>,
    config: BuildConfig,
    caps: BackendCaps,
}

impl Default for JsonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonAdapter {
    pub fn new() -> Self {
        Self {
            data: Value::Null,
            path: None,
            config: BuildConfig::default(),
            caps: BackendCaps {
                read: true,
                write: true,
                styles: true,
                named_cells: true,
                formulas: true,
                merged_cells: true,
                rich_text: true,
                hyperlinks: true,
                comments: true,
            },
        }
    }

    pub fn from_value(data: Value) -> Self {
        Self {
            data,
            ..Self::new()
        }
    }

    /// Configuration used when the document is built into a workbook.
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    pub fn to_json_string(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    fn write_to(&self, writer: &mut dyn Write) -> Result<(), IoError> {
        serde_json::to_writer_pretty(&mut *writer, &self.data)?;
        writer.flush()?;
        Ok(())
    }
}

impl WorkbookReader for JsonAdapter {
    type Error = IoError;

    fn capabilities(&self) -> BackendCaps {
        self.caps.clone()
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        let file = File::open(path.as_ref())?;
        let data: Value = serde_json::from_reader(BufReader::new(file))?;
        Ok(JsonAdapter {
            data,
            path: Some(path.as_ref().to_path_buf()),
            ..JsonAdapter::new()
        })
    }

    fn open_reader(reader: Box<dyn Read + Send + Sync>) -> Result<Self, Self::Error> {
        let data: Value = serde_json::from_reader(reader)?;
        Ok(JsonAdapter::from_value(data))
    }

    fn open_bytes(data: Vec<u8>) -> Result<Self, Self::Error> {
        let data: Value = serde_json::from_slice(&data)?;
        Ok(JsonAdapter::from_value(data))
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        let sheets = match &self.data {
            Value::Array(sheets) => sheets,
            Value::Object(map) => match map.get("sheets") {
                Some(Value::Array(sheets)) => sheets,
                _ => return Ok(Vec::new()),
            },
            _ => return Ok(Vec::new()),
        };
        Ok(sheets
            .iter()
            .filter_map(|sheet| sheet.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    fn read_workbook(&mut self) -> Result<Workbook, Self::Error> {
        let builder = SpreadsheetBuilder::with_config(self.config);
        Ok(DataSpreadsheetParser::with_builder(builder).parse(&self.data)?)
    }
}

impl WorkbookWriter for JsonAdapter {
    type Error = IoError;

    fn write_workbook(&mut self, workbook: &Workbook) -> Result<(), Self::Error> {
        self.data = to_data(workbook);
        Ok(())
    }

    fn save(&mut self) -> Result<(), Self::Error> {
        if let Some(path) = &self.path {
            let mut file = File::create(path)?;
            self.write_to(&mut file)?;
        }
        Ok(())
    }

    fn save_to(&mut self, dest: SaveDestination<'_>) -> Result<Option<Vec<u8>>, Self::Error> {
        match dest {
            SaveDestination::InPlace => self.save().map(|_| None),
            SaveDestination::Path(path) => {
                let mut file = File::create(path)?;
                self.write_to(&mut file)?;
                self.path = Some(path.to_path_buf());
                Ok(None)
            }
            SaveDestination::Writer(writer) => {
                self.write_to(writer)?;
                Ok(None)
            }
            SaveDestination::Bytes => Ok(Some(serde_json::to_vec_pretty(&self.data)?)),
        }
    }
}
