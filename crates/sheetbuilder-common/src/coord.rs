//! 1-based cell coordinates and spreadsheet column letters.
//!
//! Rows and columns are always 1-based here: column `1` is `A`, `26` is `Z`,
//! `27` is `AA`. [`column_to_letters`] and [`letters_to_column`] are exact
//! inverses over the supported range.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest column Excel accepts (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;
/// Largest row Excel accepts.
pub const MAX_ROW: u32 = 1_048_576;

/// Format a 1-based column number as letters (`1` -> `A`, `27` -> `AA`).
///
/// Returns an empty string for `0`, which is not a valid column.
pub fn column_to_letters(column: u32) -> String {
    let mut buf = Vec::new();
    let mut col = column;
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        buf.push(b'A' + rem);
        col = (col - 1) / 26;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}

/// Parse column letters into a 1-based column number. Letters are case-insensitive.
pub fn letters_to_column(letters: &str) -> Option<u32> {
    let letters = letters.trim();
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for ch in letters.bytes() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let val = (ch.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col.checked_mul(26)?.checked_add(val)?;
    }
    Some(col)
}

/// A 1-based (row, column) position within a sheet.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub row: u32,
    pub column: u32,
}

impl CellPosition {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Offset by signed deltas. Returns `None` when the result leaves the sheet.
    pub fn offset(self, drow: i64, dcol: i64) -> Option<Self> {
        let row = self.row as i64 + drow;
        let column = self.column as i64 + dcol;
        if row < 1 || column < 1 || row > MAX_ROW as i64 || column > MAX_COLUMN as i64 {
            return None;
        }
        Some(Self::new(row as u32, column as u32))
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_letters(self.column), self.row)
    }
}
