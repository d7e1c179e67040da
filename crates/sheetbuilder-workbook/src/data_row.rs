use rustc_hash::FxHashMap;

use crate::navigation::{CellRef, RowRef};

/// A row whose cells are addressed by column label instead of position.
#[derive(Debug, Clone)]
pub struct DataRow<'w> {
    row: RowRef<'w>,
    columns: FxHashMap<String, u32>,
}

impl<'w> DataRow<'w> {
    /// Labels are the text of each cell of `headers`, keyed to that cell's column.
    pub fn from_headers(row: RowRef<'w>, headers: RowRef<'w>) -> Self {
        let columns = headers
            .cells()
            .filter(|c| !c.value().is_empty())
            .map(|c| (c.value().to_string(), c.column()))
            .collect();
        Self { row, columns }
    }

    /// Labels given explicitly as `label -> column`.
    pub fn from_mapping<I, K>(mapping: I, row: RowRef<'w>) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        let columns = mapping.into_iter().map(|(k, c)| (k.into(), c)).collect();
        Self { row, columns }
    }

    pub fn row(&self) -> RowRef<'w> {
        self.row
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// The cell under `label`, or `None` when the label is unknown or the
    /// row has no cell in that column.
    pub fn get(&self, label: &str) -> Option<CellRef<'w>> {
        self.columns.get(label).and_then(|&c| self.row.cell(c))
    }
}
