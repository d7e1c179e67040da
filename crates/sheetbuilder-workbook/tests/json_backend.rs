#![cfg(feature = "json")]

use chrono::NaiveDate;
use serde_json::json;
use sheetbuilder_workbook::{
    BorderSide, BuildConfig, CellValue, Color, DataSpreadsheetParser, FontStyle, Hyperlink,
    ImageType, JsonAdapter, Orientation, Paper, SaveDestination, SheetState, SpreadsheetBuilder,
    WorkbookReader, WorkbookWriter, to_data,
};

fn document() -> serde_json::Value {
    json!({
        "styles": [
            { "name": "header", "foreground": "#dddddd", "font": { "styles": ["bold"], "size": 12 } },
            { "name": "framed", "base": "header", "borders": [{ "side": ["top", "bottom"], "style": "thin", "color": "teal" }] }
        ],
        "sheets": [
            {
                "name": "Summary",
                "state": "visible",
                "filter": true,
                "freeze": { "column": "A", "row": 1 },
                "page": { "orientation": "landscape", "paper": "A4", "fit": { "width": 1 } },
                "rows": [
                    { "styles": ["header"], "cells": ["Item", "Amount", { "value": "Since", "width": "3cm" }] },
                    ["Apples", { "value": 3, "name": "apples" }, "2024-02-29T10:15:00Z"],
                    { "number": 5, "cells": [
                        { "column": "B", "formula": "=#{apples}*2", "styles": ["framed", { "wrap": true }] },
                        { "link": "apples", "text": ["Go to ", { "content": "apples", "font": { "style": "italic" } }] },
                        { "link": "mailto:me@example.com", "comment": { "author": "me", "text": "write" } },
                        { "image": "https://example.com/logo.png", "colspan": 2, "height": "1 inch" }
                    ] },
                    { "group": [ ["in group"], { "collapse": [["hidden"]] } ] }
                ]
            },
            { "name": "Other", "state": "hidden", "rows": [[{ "link": "https://example.com" }]] }
        ]
    })
}

#[test]
fn full_document_builds() {
    let wb = DataSpreadsheetParser::build(&document()).unwrap();
    assert_eq!(wb.sheet_names(), vec!["Summary", "Other"]);

    let sheet = wb.sheet("Summary").unwrap();
    assert!(sheet.filter);
    assert_eq!(sheet.freeze, Some((1, 1)));
    assert_eq!(sheet.page.orientation, Some(Orientation::Landscape));
    assert_eq!(sheet.page.paper, Some(Paper::A4));
    assert_eq!(sheet.page.fit_width, Some(1));
    assert!((sheet.column_widths[&3] - 14.0).abs() < 1e-9);

    let header = sheet.cell(1, 1).unwrap().style.clone().unwrap();
    assert!(header.font.as_ref().unwrap().has_style(FontStyle::Bold));
    assert_eq!(header.foreground, Some(Color::from_rgb(0xDDDDDD)));

    let since = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap();
    assert_eq!(sheet.cell(2, 3).unwrap().value, CellValue::DateTime(since));

    let formula = sheet.cell(5, 2).unwrap();
    assert_eq!(formula.formula.as_deref(), Some("='Summary'!B2*2"));
    let framed = formula.style.clone().unwrap();
    assert_eq!(framed.wrap, Some(true));
    assert_eq!(framed.foreground, Some(Color::from_rgb(0xDDDDDD)));
    assert_eq!(
        framed.borders.get(BorderSide::Top).unwrap().color,
        Color::preset("teal")
    );
    assert!(framed.borders.get(BorderSide::Left).is_none());

    let link = sheet.cell(5, 3).unwrap();
    assert_eq!(link.value, CellValue::Text("Go to apples".into()));
    assert_eq!(
        link.link,
        Some(Hyperlink::Document {
            name: "apples".into(),
            location: "'Summary'!B2".into()
        })
    );
    let mail = sheet.cell(5, 4).unwrap();
    assert_eq!(mail.link.as_ref().unwrap().address(), "mailto:me@example.com");
    assert_eq!(mail.comment.as_ref().unwrap().author.as_deref(), Some("me"));

    let image = sheet.cell(5, 5).unwrap();
    assert_eq!(image.image.as_ref().unwrap().image_type, ImageType::Png);
    assert_eq!(image.colspan, 2);
    assert_eq!(sheet.row(5).unwrap().height, Some(72.0));

    assert_eq!(sheet.row_groups.len(), 2);
    assert_eq!(sheet.row(7).unwrap().cell(1).unwrap().value, CellValue::Text("hidden".into()));

    let other = wb.sheet("Other").unwrap();
    assert_eq!(other.state, Some(SheetState::Hidden));
    assert_eq!(
        other.cell(1, 1).unwrap().link,
        Some(Hyperlink::Url("https://example.com".into()))
    );
}

#[test]
fn date_detection_can_be_turned_off() {
    let builder =
        SpreadsheetBuilder::with_config(BuildConfig::default().with_date_detection(false));
    let wb = DataSpreadsheetParser::with_builder(builder)
        .parse(&json!([[["2024-02-29T10:15:00Z", "2023-02-29T10:15:00Z"]]]))
        .unwrap();
    let sheet = wb.sheet("Sheet1").unwrap();
    assert_eq!(
        sheet.cell(1, 1).unwrap().value,
        CellValue::Text("2024-02-29T10:15:00Z".into())
    );

    let wb = DataSpreadsheetParser::build(&json!([[["2023-02-29T10:15:00Z"]]])).unwrap();
    assert_eq!(
        wb.sheet("Sheet1").unwrap().cell(1, 1).unwrap().value,
        CellValue::Text("2023-02-29T10:15:00Z".into())
    );
}

#[test]
fn export_parses_back_to_the_same_content() {
    let wb = DataSpreadsheetParser::build(&document()).unwrap();
    let exported = to_data(&wb);
    let again = DataSpreadsheetParser::build(&exported).unwrap();

    assert_eq!(again.sheet_names(), wb.sheet_names());
    for (a, b) in wb.sheets().iter().zip(again.sheets()) {
        assert_eq!(a.rows.len(), b.rows.len(), "rows of {}", a.name);
        for (row_a, row_b) in a.rows.values().zip(b.rows.values()) {
            assert_eq!(row_a.number, row_b.number);
            for (cell_a, cell_b) in row_a.cells.values().zip(row_b.cells.values()) {
                assert_eq!(cell_a.column, cell_b.column);
                assert_eq!(cell_a.value, cell_b.value);
                assert_eq!(cell_a.formula, cell_b.formula);
                assert_eq!(cell_a.name, cell_b.name);
                assert_eq!(cell_a.link, cell_b.link);
                assert_eq!(cell_a.colspan, cell_b.colspan);
                assert_eq!(cell_a.style.as_deref(), cell_b.style.as_deref());
            }
        }
        assert_eq!(a.merged, b.merged);
        assert_eq!(a.freeze, b.freeze);
        assert_eq!(a.page, b.page);
    }
    assert_eq!(again.styles().names(), wb.styles().names());
}

#[test]
fn adapter_saves_and_reopens_files() {
    let wb = DataSpreadsheetParser::build(&document()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");

    let mut writer = JsonAdapter::new();
    writer.write_workbook(&wb).unwrap();
    writer.save_to(SaveDestination::Path(&path)).unwrap();

    let mut reader = JsonAdapter::open_path(&path).unwrap();
    assert_eq!(reader.sheet_names().unwrap(), vec!["Summary", "Other"]);
    let reopened = reader.read_workbook().unwrap();
    assert_eq!(
        reopened.sheet("Summary").unwrap().cell(2, 2).unwrap().value,
        CellValue::Number(3.0)
    );

    let bytes = writer.save_to(SaveDestination::Bytes).unwrap().unwrap();
    let from_bytes = JsonAdapter::open_bytes(bytes).unwrap();
    assert_eq!(from_bytes.data(), writer.data());
    assert!(writer.to_json_string().unwrap().contains("\"Summary\""));
}

#[test]
fn build_errors_surface_through_the_adapter() {
    let mut adapter = JsonAdapter::from_value(json!({ "sheets": [{ "name": "S", "colour": 1 }] }));
    let err = adapter.read_workbook().unwrap_err();
    let build = err.as_build_error().unwrap();
    assert!(build.is_invalid_property());
    assert!(err.to_string().contains("Unknown property: colour"));
}
