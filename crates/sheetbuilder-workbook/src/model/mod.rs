//! In-memory document tree: workbook, sheets, rows, cells and styles.

pub mod cell;
pub mod sheet;
pub mod style;
pub mod workbook;

pub use cell::{Cell, Comment, Hyperlink, Image, RichTextPart};
pub use sheet::{MergedRange, OutlineGroup, PageSettings, Row, Sheet};
pub use style::{Border, Borders, Font, Style};
pub use workbook::{NamedCell, StyleRegistry, StyleSpec, Workbook};
