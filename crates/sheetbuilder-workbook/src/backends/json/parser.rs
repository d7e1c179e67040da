//! Builds a workbook from a plain data document (`serde_json::Value`).
//!
//! The document mirrors the builder tree:
//!
//! ```json
//! {
//!   "styles": [{ "name": "header", "font": { "style": "bold" } }],
//!   "sheets": [{
//!     "name": "Summary",
//!     "rows": [
//!       { "styles": ["header"], "cells": ["Name", "Total"] },
//!       ["Apples", { "value": 42, "name": "apples" }]
//!     ]
//!   }]
//! }
//! ```
//!
//! Schemas are closed: unknown keys, values of the wrong type and missing
//! `name` properties fail with [`BuildError::InvalidProperty`] carrying the
//! breadcrumb of the offending entry, e.g. `sheets[0].rows[1].cells[1].name`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use sheetbuilder_common::{
    BorderSide, BorderStyle, BuildError, CellValue, FontStyle, ForegroundFill,
    HorizontalAlignment, ImageType, Keyword, Orientation, Paper, SheetState, VerticalAlignment,
};
use url::Url;

use crate::builder::{
    BorderDefinition, CellDefinition, DimensionModifier, FontDefinition, HasStyle,
    PageDefinition, RowDefinition, SheetDefinition, SpreadsheetBuilder, StyleDefinition,
    WorkbookDefinition,
};
use crate::model::Workbook;

static DIMENSION_IN_CM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s?cm$").expect("valid regex"));
static DIMENSION_IN_INCHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s?in(ch(es)?)?$").expect("valid regex"));
static DIMENSION_IN_POINTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s?(p(oin)?ts?)?$").expect("valid regex"));

const WORKBOOK_KEYS: &[&str] = &["styles", "sheets"];
const SHEET_KEYS: &[&str] = &["name", "state", "password", "filter", "freeze", "page", "rows"];
const PAGE_KEYS: &[&str] = &["orientation", "paper", "fit"];
const FIT_KEYS: &[&str] = &["width", "height"];
const FREEZE_KEYS: &[&str] = &["column", "row"];
// Row styles go first so they reach every cell of the row.
const ROW_KEYS: &[&str] = &["number", "styles", "cells"];
const CELL_KEYS: &[&str] = &[
    "column", "value", "text", "name", "formula", "comment", "link", "colspan", "rowspan",
    "width", "height", "image", "styles",
];
const COMMENT_KEYS: &[&str] = &["author", "text"];
const STYLE_KEYS: &[&str] = &[
    "name",
    "base",
    "foreground",
    "background",
    "fill",
    "font",
    "indent",
    "rotation",
    "wrap",
    "format",
    "align",
    "borders",
];
const ALIGN_KEYS: &[&str] = &["vertical", "horizontal"];
const FONT_KEYS: &[&str] = &["color", "size", "name", "style", "styles", "content"];
const BORDER_KEYS: &[&str] = &["side", "style", "color"];

/// Default sheet for top-level rows given without a sheet map.
const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Feeds a data document into a [`SpreadsheetBuilder`].
#[derive(Debug, Default)]
pub struct DataSpreadsheetParser {
    builder: SpreadsheetBuilder,
}

impl DataSpreadsheetParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse into a preconfigured builder, e.g. one made from a template.
    pub fn with_builder(builder: SpreadsheetBuilder) -> Self {
        Self { builder }
    }

    /// Build a fresh workbook from `document`.
    pub fn build(document: &Value) -> Result<Workbook, BuildError> {
        Self::new().parse(document)
    }

    pub fn parse(self, document: &Value) -> Result<Workbook, BuildError> {
        if document.is_null() {
            return Err(invalid("No Data", "", document));
        }
        self.builder.build(|w| Self::apply(w, document))
    }

    /// Apply `document` inside an ongoing build.
    pub fn apply(w: &mut WorkbookDefinition<'_>, document: &Value) -> Result<(), BuildError> {
        let parser = Parser {
            detect_dates: w.config().detect_dates,
        };
        match document {
            Value::Null => Err(invalid("No Data", "", document)),
            Value::Object(map) => parser.workbook(w, map),
            Value::Array(_) => parser.sheets(w, "sheets", document),
            other => Err(invalid("Unsupported definition type", "", other)),
        }
    }
}

#[derive(Clone, Copy)]
struct Parser {
    detect_dates: bool,
}

impl Parser {
    fn workbook(self, w: &mut WorkbookDefinition<'_>, map: &Map<String, Value>) -> Result<(), BuildError> {
        visit("", map, WORKBOOK_KEYS, |path, key, value| match key {
            "styles" => each_item(path, value, |item_path, item| {
                let style = with_map(item_path, item, &["name"])?;
                let name = text(&style["name"]);
                w.style(&name, |s| self.style(s, item_path, style))?;
                Ok(())
            }),
            "sheets" => self.sheets(w, path, value),
            _ => Ok(()),
        })
    }

    fn sheets(self, w: &mut WorkbookDefinition<'_>, path: &str, value: &Value) -> Result<(), BuildError> {
        each_item(path, value, |item_path, item| match item {
            Value::Object(_) => {
                let sheet = with_map(item_path, item, &["name"])?;
                let name = text(&sheet["name"]);
                w.sheet(&name, |s| self.sheet(s, item_path, sheet))?;
                Ok(())
            }
            rows => {
                w.sheet(DEFAULT_SHEET_NAME, |s| self.rows(s, item_path, rows))?;
                Ok(())
            }
        })
    }

    fn sheet(self, s: &mut SheetDefinition<'_>, path: &str, map: &Map<String, Value>) -> Result<(), BuildError> {
        visit(path, map, SHEET_KEYS, |path, key, value| match key {
            "state" => {
                s.state(SheetState::parse_keyword(&text(value))?);
                Ok(())
            }
            "password" => {
                s.password(&text(value));
                Ok(())
            }
            "filter" => {
                if boolean(path, value)? {
                    s.filter_auto();
                }
                Ok(())
            }
            "freeze" => freeze(s, path, value),
            "page" => {
                let page = with_map(path, value, &[])?;
                s.page(|p| self.page(p, path, page))?;
                Ok(())
            }
            "rows" => self.rows(s, path, value),
            _ => Ok(()),
        })
    }

    fn page(self, p: &mut PageDefinition<'_>, path: &str, map: &Map<String, Value>) -> Result<(), BuildError> {
        visit(path, map, PAGE_KEYS, |path, key, value| match key {
            "orientation" => {
                p.orientation(Orientation::parse_keyword(&text(value))?);
                Ok(())
            }
            "paper" => {
                p.paper(Paper::parse_keyword(&text(value))?);
                Ok(())
            }
            "fit" => {
                let fit = with_map(path, value, &[])?;
                visit(path, fit, FIT_KEYS, |path, key, value| {
                    let pages = count(path, value)?;
                    if key == "width" {
                        p.fit_width(pages);
                    } else {
                        p.fit_height(pages);
                    }
                    Ok(())
                })
            }
            _ => Ok(()),
        })
    }

    fn rows(self, s: &mut SheetDefinition<'_>, path: &str, value: &Value) -> Result<(), BuildError> {
        each_item(path, value, |item_path, item| match item {
            Value::Array(_) => {
                s.row_with(|r| self.cells(r, &join(item_path, "cells"), item))?;
                Ok(())
            }
            _ => {
                let row = with_map(item_path, item, &[])?;
                self.row(s, item_path, row)
            }
        })
    }

    fn row(self, s: &mut SheetDefinition<'_>, path: &str, map: &Map<String, Value>) -> Result<(), BuildError> {
        if let Some(nested) = only_key(map, "group") {
            let path = join(path, "group");
            s.group(|g| self.rows(g, &path, nested))?;
            return Ok(());
        }
        if let Some(nested) = only_key(map, "collapse") {
            let path = join(path, "collapse");
            s.collapse(|g| self.rows(g, &path, nested))?;
            return Ok(());
        }
        match map.get("number") {
            Some(number) => {
                let number = count(&join(path, "number"), number)?;
                s.row_at(number, |r| self.row_body(r, path, map))?;
            }
            None => {
                s.row_with(|r| self.row_body(r, path, map))?;
            }
        }
        Ok(())
    }

    fn row_body(self, r: &mut RowDefinition<'_>, path: &str, map: &Map<String, Value>) -> Result<(), BuildError> {
        visit(path, map, ROW_KEYS, |path, key, value| match key {
            "styles" => styles(self, r, path, value),
            "cells" => self.cells(r, path, value),
            _ => Ok(()),
        })
    }

    fn cells(self, r: &mut RowDefinition<'_>, path: &str, value: &Value) -> Result<(), BuildError> {
        each_item(path, value, |item_path, item| self.cell(r, item_path, item))
    }

    fn cell(self, r: &mut RowDefinition<'_>, path: &str, item: &Value) -> Result<(), BuildError> {
        let Value::Object(map) = item else {
            let value = self.value(path, item)?;
            r.cell(value)?;
            return Ok(());
        };
        if let Some(nested) = only_key(map, "group") {
            let path = join(path, "group");
            r.group(|g| self.cells(g, &path, nested))?;
            return Ok(());
        }
        if let Some(nested) = only_key(map, "collapse") {
            let path = join(path, "collapse");
            r.collapse(|g| self.cells(g, &path, nested))?;
            return Ok(());
        }
        match map.get("column") {
            Some(column @ Value::Number(_)) => {
                let column = count(&join(path, "column"), column)?;
                r.cell_at(column, |c| self.cell_body(c, path, map))?;
            }
            Some(letters) => {
                r.cell_at_column(&text(letters), |c| self.cell_body(c, path, map))?;
            }
            None => {
                r.cell_with(|c| self.cell_body(c, path, map))?;
            }
        }
        Ok(())
    }

    fn cell_body(self, c: &mut CellDefinition<'_>, path: &str, map: &Map<String, Value>) -> Result<(), BuildError> {
        visit(path, map, CELL_KEYS, |path, key, value| match key {
            "value" => {
                c.value(self.value(path, value)?);
                Ok(())
            }
            "text" => self.text(c, path, value),
            "name" => {
                c.name(&text(value))?;
                Ok(())
            }
            "formula" => {
                c.formula(&text(value));
                Ok(())
            }
            "comment" => comment(c, path, value),
            "link" => link(c, value),
            "colspan" => {
                c.colspan(count(path, value)?)?;
                Ok(())
            }
            "rowspan" => {
                c.rowspan(count(path, value)?)?;
                Ok(())
            }
            "width" => {
                if value.as_str() == Some("auto") {
                    c.width_auto();
                } else {
                    let length = Length::parse(path, value)?;
                    length.apply(c.width(length.amount()));
                }
                Ok(())
            }
            "height" => {
                let length = Length::parse(path, value)?;
                length.apply(c.height(length.amount()));
                Ok(())
            }
            "image" => image(c, path, value),
            "styles" => styles(self, c, path, value),
            _ => Ok(()),
        })
    }

    fn value(self, path: &str, value: &Value) -> Result<CellValue, BuildError> {
        Ok(match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Boolean(*b),
            Value::Number(_) => CellValue::Number(number(path, value)?),
            Value::String(s) if self.detect_dates => CellValue::Text(s.clone()).detect_date(),
            Value::String(s) => CellValue::Text(s.clone()),
            other => return Err(invalid("Unsupported cell value", path, other)),
        })
    }

    fn text(self, c: &mut CellDefinition<'_>, path: &str, value: &Value) -> Result<(), BuildError> {
        if !value.is_array() {
            c.value(self.value(path, value)?);
            return Ok(());
        }
        each_item(path, value, |item_path, item| {
            let Value::Object(_) = item else {
                c.text(&text(item));
                return Ok(());
            };
            let part = with_map(item_path, item, &["content"])?;
            let content = text(&part["content"]);
            match part.get("font") {
                None => {
                    c.text(&content);
                }
                Some(font) => {
                    let font_path = join(item_path, "font");
                    let font = with_map(&font_path, font, &[])?;
                    c.text_with_font(&content, |f| self.font(f, &font_path, font))?;
                }
            }
            Ok(())
        })
    }

    fn style(self, s: &mut StyleDefinition, path: &str, map: &Map<String, Value>) -> Result<(), BuildError> {
        visit(path, map, STYLE_KEYS, |path, key, value| match key {
            "base" => {
                s.base(&text(value));
                Ok(())
            }
            "foreground" => {
                s.foreground(text(value))?;
                Ok(())
            }
            "background" => {
                s.background(text(value))?;
                Ok(())
            }
            "fill" => {
                s.fill(ForegroundFill::parse_keyword(&text(value))?);
                Ok(())
            }
            "font" => {
                let font = with_map(path, value, &[])?;
                s.font(|f| self.font(f, path, font))?;
                Ok(())
            }
            "indent" => {
                s.indent(count(path, value)?);
                Ok(())
            }
            "rotation" => {
                s.rotation(count(path, value)?)?;
                Ok(())
            }
            "wrap" => {
                if boolean(path, value)? {
                    s.wrap();
                }
                Ok(())
            }
            "format" => {
                s.format(&text(value));
                Ok(())
            }
            "align" => {
                let align = with_map(path, value, &[])?;
                visit(path, align, ALIGN_KEYS, |_, key, value| {
                    if key == "vertical" {
                        s.align_vertical(VerticalAlignment::parse_keyword(&text(value))?);
                    } else {
                        s.align_horizontal(HorizontalAlignment::parse_keyword(&text(value))?);
                    }
                    Ok(())
                })
            }
            "borders" => each_item(path, value, |item_path, item| {
                let border = with_map(item_path, item, &[])?;
                let sides = border_sides(item_path, border)?;
                s.border_sides(&sides, |b| self.border(b, item_path, border))?;
                Ok(())
            }),
            _ => Ok(()),
        })
    }

    fn font(self, f: &mut FontDefinition<'_>, path: &str, map: &Map<String, Value>) -> Result<(), BuildError> {
        visit(path, map, FONT_KEYS, |path, key, value| match key {
            "color" => {
                f.color(text(value))?;
                Ok(())
            }
            "size" => {
                f.size(number(path, value)?);
                Ok(())
            }
            "name" => {
                f.name(&text(value));
                Ok(())
            }
            "style" => {
                f.style(FontStyle::parse_keyword(&text(value))?);
                Ok(())
            }
            "styles" => each_item(path, value, |_, item| {
                f.style(FontStyle::parse_keyword(&text(item))?);
                Ok(())
            }),
            _ => Ok(()),
        })
    }

    fn border(self, b: &mut BorderDefinition, path: &str, map: &Map<String, Value>) -> Result<(), BuildError> {
        visit(path, map, BORDER_KEYS, |_, key, value| match key {
            "style" => {
                b.style(BorderStyle::parse_keyword(&text(value))?);
                Ok(())
            }
            "color" => {
                b.color(text(value))?;
                Ok(())
            }
            _ => Ok(()),
        })
    }
}

fn styles<T: HasStyle>(parser: Parser, target: &mut T, path: &str, value: &Value) -> Result<(), BuildError> {
    each_item(path, value, |item_path, item| {
        if let Value::String(name) = item {
            target.style(name)?;
        } else {
            let style = with_map(item_path, item, &[])?;
            target.style_with(|s| parser.style(s, item_path, style))?;
        }
        Ok(())
    })
}

fn freeze(s: &mut SheetDefinition<'_>, path: &str, value: &Value) -> Result<(), BuildError> {
    let map = with_map(path, value, &[])?;
    let mut row = 0;
    let mut column = 0;
    let mut letters = None;
    visit(path, map, FREEZE_KEYS, |path, key, value| {
        match (key, value) {
            ("row", _) => row = count(path, value)?,
            ("column", Value::Number(_)) => column = count(path, value)?,
            _ => letters = Some(text(value)),
        }
        Ok(())
    })?;
    match letters {
        Some(letters) => {
            s.freeze_at(&letters, row)?;
        }
        None => {
            s.freeze(column, row);
        }
    }
    Ok(())
}

fn comment(c: &mut CellDefinition<'_>, path: &str, value: &Value) -> Result<(), BuildError> {
    if let Value::String(text) = value {
        c.comment(text)?;
        return Ok(());
    }
    let map = with_map(path, value, &[])?;
    c.comment_with(|comment| {
        visit(path, map, COMMENT_KEYS, |_, key, value| {
            if key == "author" {
                comment.author(&text(value));
            } else {
                comment.text(&text(value));
            }
            Ok(())
        })
    })?;
    Ok(())
}

/// http(s) goes to a URL, `mailto:` to an email, `file:` to a file; anything
/// else is taken as the name of a cell.
fn link(c: &mut CellDefinition<'_>, value: &Value) -> Result<(), BuildError> {
    let target = text(value);
    let scheme = Url::parse(&target).ok().map(|url| url.scheme().to_string());
    match scheme.as_deref() {
        Some("http" | "https") => c.link().url(&target),
        Some("mailto") => c.link().email(&target["mailto:".len()..]),
        Some("file") => c.link().file(&target["file:".len()..]),
        _ => c.link().name(&target)?,
    }
    Ok(())
}

fn image(c: &mut CellDefinition<'_>, path: &str, value: &Value) -> Result<(), BuildError> {
    if value.is_object() {
        let map = with_map(path, value, &["url", "type"])?;
        let kind = text(&map["type"]).to_lowercase();
        let source = text(&map["url"]);
        let image_type = ImageType::from_extension(&kind)
            .ok_or_else(|| invalid("Unknown image type", &join(path, "type"), &map["type"]))?;
        if Url::parse(&source).is_err() {
            return Err(invalid("Malformed image URL", &join(path, "url"), &map["url"]));
        }
        c.image(image_type, &source);
        return Ok(());
    }

    let source = text(value);
    if Url::parse(&source).is_err() {
        return Err(invalid("Malformed image URL", path, value));
    }
    let lower = source.to_lowercase();
    let image_type = ImageType::EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .and_then(|ext| ImageType::from_extension(ext))
        .ok_or_else(|| {
            invalid(
                format!(
                    "Could not determine image type. Please be sure that the URL ends with one of following extensions: {}",
                    ImageType::EXTENSIONS.join(",")
                ),
                path,
                value,
            )
        })?;
    c.image(image_type, &source);
    Ok(())
}

/// A missing or empty `side` means all four sides.
fn border_sides(path: &str, map: &Map<String, Value>) -> Result<Vec<BorderSide>, BuildError> {
    let all = BorderSide::ALL.to_vec();
    let Some(side) = map.get("side") else {
        return Ok(all);
    };
    let path = join(path, "side");
    let mut sides = Vec::new();
    match side {
        Value::Array(_) => each_item(&path, side, |item_path, item| {
            let side = BorderSide::parse_keyword(&text(item))
                .map_err(|e| e.at_path(item_path, item.to_string()))?;
            sides.push(side);
            Ok(())
        })?,
        single => sides.push(
            BorderSide::parse_keyword(&text(single)).map_err(|e| e.at_path(&path, single.to_string()))?,
        ),
    }
    Ok(if sides.is_empty() { all } else { sides })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Length {
    Points(f64),
    Centimeters(f64),
    Inches(f64),
}

impl Length {
    fn parse(path: &str, value: &Value) -> Result<Self, BuildError> {
        if value.is_number() {
            return Ok(Length::Points(number(path, value)?));
        }
        let dimension = text(value);
        let amount = |re: &Regex| {
            re.captures(&dimension)
                .and_then(|caps| caps[1].parse::<f64>().ok())
        };
        if let Some(v) = amount(&DIMENSION_IN_CM) {
            Ok(Length::Centimeters(v))
        } else if let Some(v) = amount(&DIMENSION_IN_INCHES) {
            Ok(Length::Inches(v))
        } else if let Some(v) = amount(&DIMENSION_IN_POINTS) {
            Ok(Length::Points(v))
        } else {
            Err(invalid("Invalid dimension format", path, value))
        }
    }

    fn amount(self) -> f64 {
        match self {
            Length::Points(v) | Length::Centimeters(v) | Length::Inches(v) => v,
        }
    }

    fn apply(self, modifier: DimensionModifier<'_>) {
        match self {
            Length::Points(_) => modifier.points(),
            Length::Centimeters(_) => modifier.cm(),
            Length::Inches(_) => modifier.inch(),
        }
    }
}

/* ───────────────────────────── helpers ───────────────────────────── */

fn invalid(message: impl Into<String>, path: &str, value: &Value) -> BuildError {
    BuildError::invalid_property(message, path, value.to_string())
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Strings as-is, everything else in its JSON form.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn number(path: &str, value: &Value) -> Result<f64, BuildError> {
    value
        .as_f64()
        .ok_or_else(|| invalid("Value must be number", path, value))
}

/// A whole, non-negative number as used for indices and spans.
fn count(path: &str, value: &Value) -> Result<u32, BuildError> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).map_err(|_| invalid("Value is out of range", path, value));
    }
    let n = number(path, value)?;
    if n < 0.0 {
        return Err(invalid("Value must be positive", path, value));
    }
    if n.fract() != 0.0 {
        return Err(invalid("Value must be whole number", path, value));
    }
    if n > u32::MAX as f64 {
        return Err(invalid("Value is out of range", path, value));
    }
    Ok(n as u32)
}

fn boolean(path: &str, value: &Value) -> Result<bool, BuildError> {
    value
        .as_bool()
        .ok_or_else(|| invalid("Value must be boolean", path, value))
}

fn with_map<'v>(
    path: &str,
    value: &'v Value,
    required: &[&str],
) -> Result<&'v Map<String, Value>, BuildError> {
    let Value::Object(map) = value else {
        return Err(invalid("Definition must be map", path, value));
    };
    if let Some(missing) = required.iter().find(|key| !map.contains_key(**key)) {
        return Err(invalid(
            format!("Definition is missing '{missing}' property"),
            path,
            value,
        ));
    }
    Ok(map)
}

/// The value of `key` when it is the map's only entry.
fn only_key<'v>(map: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    if map.len() == 1 { map.get(key) } else { None }
}

/// Run `handle` for every item of a list with its `path[i]` breadcrumb.
fn each_item<F>(path: &str, value: &Value, mut handle: F) -> Result<(), BuildError>
where
    F: FnMut(&str, &Value) -> Result<(), BuildError>,
{
    let Value::Array(items) = value else {
        return Err(invalid("Value must be iterable!", path, value));
    };
    for (index, item) in items.iter().enumerate() {
        let item_path = format!("{path}[{index}]");
        handle(&item_path, item).map_err(|e| e.at_path(&item_path, item.to_string()))?;
    }
    Ok(())
}

/// Reject unknown keys, then run `handle` for the known ones in `keys` order.
/// Errors other than [`BuildError::InvalidProperty`] are wrapped with the
/// entry's path.
fn visit<F>(path: &str, map: &Map<String, Value>, keys: &[&str], mut handle: F) -> Result<(), BuildError>
where
    F: FnMut(&str, &str, &Value) -> Result<(), BuildError>,
{
    if let Some((key, value)) = map.iter().find(|(key, _)| !keys.contains(&key.as_str())) {
        return Err(invalid(format!("Unknown property: {key}"), path, value));
    }
    for &key in keys {
        if let Some(value) = map.get(key) {
            let entry_path = join(path, key);
            handle(&entry_path, key, value).map_err(|e| e.at_path(&entry_path, value.to_string()))?;
        }
    }
    Ok(())
}
