use std::sync::Arc;

use sheetbuilder_common::{CellValue, ImageType};

use super::style::{Font, Style};

/// Default comment box size, in cells.
pub const DEFAULT_COMMENT_WIDTH: u32 = 3;
pub const DEFAULT_COMMENT_HEIGHT: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub author: Option<String>,
    pub text: String,
    pub width: u32,
    pub height: u32,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            author: None,
            text: text.into(),
            width: DEFAULT_COMMENT_WIDTH,
            height: DEFAULT_COMMENT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hyperlink {
    /// Link to a named cell; `location` is the refers-to formula of the name.
    Document { name: String, location: String },
    Url(String),
    /// Full `mailto:` address including any query parameters.
    Email(String),
    File(String),
}

impl Hyperlink {
    /// The address a spreadsheet application would follow.
    pub fn address(&self) -> &str {
        match self {
            Hyperlink::Document { location, .. } => location,
            Hyperlink::Url(url) | Hyperlink::Email(url) | Hyperlink::File(url) => url,
        }
    }
}

/// Record of a picture anchored at a cell. The picture bytes are never fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub image_type: ImageType,
    pub source: String,
}

/// A run of text with its own font inside a rich-text cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RichTextPart {
    pub text: String,
    pub font: Option<Font>,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub column: u32,
    pub value: CellValue,
    pub formula: Option<String>,
    pub name: Option<String>,
    pub comment: Option<Comment>,
    pub link: Option<Hyperlink>,
    pub image: Option<Image>,
    pub rich_text: Vec<RichTextPart>,
    pub colspan: u32,
    pub rowspan: u32,
    pub style: Option<Arc<Style>>,
}

impl Cell {
    pub fn new(column: u32) -> Self {
        Self {
            column,
            value: CellValue::Empty,
            formula: None,
            name: None,
            comment: None,
            link: None,
            image: None,
            rich_text: Vec::new(),
            colspan: 1,
            rowspan: 1,
            style: None,
        }
    }

    /// Whether this cell anchors a merged region.
    pub fn is_merged(&self) -> bool {
        self.colspan > 1 || self.rowspan > 1
    }

    /// Append a rich-text run, tracking its character offsets.
    pub fn push_text(&mut self, text: impl Into<String>, font: Option<Font>) {
        let text = text.into();
        let start = self.rich_text.last().map_or(0, |p| p.end);
        let end = start + text.chars().count();
        self.rich_text.push(RichTextPart {
            text,
            font,
            start,
            end,
        });
    }

    /// Concatenated text of all rich-text runs.
    pub fn rich_text_string(&self) -> String {
        self.rich_text.iter().map(|p| p.text.as_str()).collect()
    }
}
