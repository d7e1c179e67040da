use std::collections::BTreeSet;

use serde_json::{Map, Value, json};
use sheetbuilder_common::{BorderSide, CellValue, Keyword};

use crate::model::{Cell, Comment, Font, Hyperlink, PageSettings, Row, Sheet, Style, Workbook};

/// Render `workbook` as a data document that
/// [`DataSpreadsheetParser`](super::DataSpreadsheetParser) reads back.
///
/// Cell styles are written inline in their composed form. Column widths and
/// row heights are attached to the first cell of their column or row.
pub fn to_data(workbook: &Workbook) -> Value {
    let mut doc = Map::new();
    let registry = workbook.styles();
    let styles: Vec<Value> = registry
        .names()
        .into_iter()
        .filter_map(|name| {
            let spec = registry.definition(name)?;
            let mut map = style_map(&spec.patch);
            map.insert("name".into(), json!(name));
            if let Some(base) = &spec.base {
                map.insert("base".into(), json!(base));
            }
            Some(Value::Object(map))
        })
        .collect();
    if !styles.is_empty() {
        doc.insert("styles".into(), Value::Array(styles));
    }
    doc.insert(
        "sheets".into(),
        workbook.sheets().iter().map(sheet_data).collect(),
    );
    Value::Object(doc)
}

fn sheet_data(sheet: &Sheet) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), json!(sheet.name));
    if let Some(state) = sheet.state {
        map.insert("state".into(), json!(state.name()));
    }
    if let Some(password) = &sheet.password {
        map.insert("password".into(), json!(password));
    }
    if sheet.filter {
        map.insert("filter".into(), json!(true));
    }
    if let Some((column, row)) = sheet.freeze {
        map.insert("freeze".into(), json!({ "column": column, "row": row }));
    }
    if let Some(page) = page_data(&sheet.page) {
        map.insert("page".into(), page);
    }
    let mut sized_columns = BTreeSet::new();
    let rows: Vec<Value> = sheet
        .rows
        .values()
        .map(|row| row_data(sheet, row, &mut sized_columns))
        .collect();
    map.insert("rows".into(), Value::Array(rows));
    Value::Object(map)
}

fn page_data(page: &PageSettings) -> Option<Value> {
    let mut map = Map::new();
    if let Some(orientation) = page.orientation {
        map.insert("orientation".into(), json!(orientation.name()));
    }
    if let Some(paper) = page.paper {
        map.insert("paper".into(), json!(paper.name()));
    }
    let mut fit = Map::new();
    if let Some(width) = page.fit_width {
        fit.insert("width".into(), json!(width));
    }
    if let Some(height) = page.fit_height {
        fit.insert("height".into(), json!(height));
    }
    if !fit.is_empty() {
        map.insert("fit".into(), Value::Object(fit));
    }
    (!map.is_empty()).then_some(Value::Object(map))
}

fn row_data(sheet: &Sheet, row: &Row, sized_columns: &mut BTreeSet<u32>) -> Value {
    let mut cells = Vec::with_capacity(row.cells.len());
    for (index, cell) in row.cells.values().enumerate() {
        let mut map = cell_data(cell);
        if index == 0 {
            if let Some(height) = row.height {
                map.insert("height".into(), json!(height));
            }
        }
        if sized_columns.insert(cell.column) {
            if let Some(width) = sheet.column_widths.get(&cell.column) {
                map.insert("width".into(), json!(width));
            } else if sheet.auto_columns.contains(&cell.column) {
                map.insert("width".into(), json!("auto"));
            }
        }
        cells.push(Value::Object(map));
    }
    json!({ "number": row.number, "cells": cells })
}

fn cell_data(cell: &Cell) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("column".into(), json!(cell.column));
    if cell.rich_text.is_empty() {
        if let Some(value) = value_data(&cell.value) {
            map.insert("value".into(), value);
        }
    } else {
        let parts: Vec<Value> = cell
            .rich_text
            .iter()
            .map(|part| match &part.font {
                Some(font) => json!({ "content": part.text, "font": font_data(font) }),
                None => json!(part.text),
            })
            .collect();
        map.insert("text".into(), Value::Array(parts));
    }
    if let Some(formula) = &cell.formula {
        map.insert("formula".into(), json!(formula));
    }
    if let Some(name) = &cell.name {
        map.insert("name".into(), json!(name));
    }
    if let Some(comment) = &cell.comment {
        map.insert("comment".into(), comment_data(comment));
    }
    if let Some(link) = &cell.link {
        let target = match link {
            Hyperlink::Document { name, .. } => name.clone(),
            Hyperlink::File(path) => format!("file:{path}"),
            Hyperlink::Url(url) | Hyperlink::Email(url) => url.clone(),
        };
        map.insert("link".into(), json!(target));
    }
    if cell.colspan > 1 {
        map.insert("colspan".into(), json!(cell.colspan));
    }
    if cell.rowspan > 1 {
        map.insert("rowspan".into(), json!(cell.rowspan));
    }
    if let Some(image) = &cell.image {
        map.insert(
            "image".into(),
            json!({ "url": image.source, "type": image.image_type.name().to_lowercase() }),
        );
    }
    if let Some(style) = cell.style.as_deref().filter(|s| !s.is_empty()) {
        map.insert("styles".into(), json!([style_map(style)]));
    }
    map
}

/// Dates and date-times are written in the ISO form the parser detects;
/// times have no counterpart there and stay text.
fn value_data(value: &CellValue) -> Option<Value> {
    match value {
        CellValue::Empty => None,
        CellValue::Number(n) => serde_json::Number::from_f64(*n).map(Value::Number),
        CellValue::Boolean(b) => Some(json!(b)),
        CellValue::Text(s) => Some(json!(s)),
        CellValue::Date(d) => Some(json!(format!("{}T00:00:00Z", d.format("%Y-%m-%d")))),
        CellValue::DateTime(dt) => Some(json!(format!("{}Z", dt.format("%Y-%m-%dT%H:%M:%S%.f")))),
        CellValue::Time(t) => Some(json!(t.format("%H:%M:%S").to_string())),
    }
}

fn comment_data(comment: &Comment) -> Value {
    match &comment.author {
        None => json!(comment.text),
        Some(author) => json!({ "author": author, "text": comment.text }),
    }
}

fn font_data(font: &Font) -> Value {
    let mut map = Map::new();
    if let Some(color) = font.color {
        map.insert("color".into(), json!(color.to_hex()));
    }
    if let Some(size) = font.size {
        map.insert("size".into(), json!(size));
    }
    if let Some(name) = &font.name {
        map.insert("name".into(), json!(name));
    }
    let styles: Vec<&str> = font.styles().into_iter().map(|s| s.name()).collect();
    if !styles.is_empty() {
        map.insert("styles".into(), json!(styles));
    }
    Value::Object(map)
}

fn style_map(style: &Style) -> Map<String, Value> {
    let mut map = Map::new();
    if let Some(color) = style.foreground {
        map.insert("foreground".into(), json!(color.to_hex()));
    }
    if let Some(color) = style.background {
        map.insert("background".into(), json!(color.to_hex()));
    }
    if let Some(fill) = style.fill {
        map.insert("fill".into(), json!(fill.name()));
    }
    if let Some(font) = &style.font {
        map.insert("font".into(), font_data(font));
    }
    if let Some(indent) = style.indent {
        map.insert("indent".into(), json!(indent));
    }
    if let Some(rotation) = style.rotation {
        map.insert("rotation".into(), json!(rotation));
    }
    if let Some(wrap) = style.wrap {
        map.insert("wrap".into(), json!(wrap));
    }
    if let Some(format) = &style.format {
        map.insert("format".into(), json!(format));
    }
    let mut align = Map::new();
    if let Some(v) = style.vertical_alignment {
        align.insert("vertical".into(), json!(v.name()));
    }
    if let Some(h) = style.horizontal_alignment {
        align.insert("horizontal".into(), json!(h.name()));
    }
    if !align.is_empty() {
        map.insert("align".into(), Value::Object(align));
    }
    let borders: Vec<Value> = BorderSide::ALL
        .iter()
        .filter_map(|&side| {
            let border = style.borders.get(side)?;
            let mut b = Map::new();
            b.insert("side".into(), json!(side.name()));
            if let Some(s) = border.style {
                b.insert("style".into(), json!(s.name()));
            }
            if let Some(c) = border.color {
                b.insert("color".into(), json!(c.to_hex()));
            }
            Some(Value::Object(b))
        })
        .collect();
    if !borders.is_empty() {
        map.insert("borders".into(), Value::Array(borders));
    }
    map
}
