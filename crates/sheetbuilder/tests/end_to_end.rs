#![cfg(all(feature = "json", feature = "query"))]

use serde_json::json;
use sheetbuilder::{CellValue, DataSpreadsheetParser, SpreadsheetCriteria};

#[test]
fn data_document_can_be_queried_and_navigated() {
    let wb = DataSpreadsheetParser::build(&json!({
        "sheets": [{
            "name": "Stock",
            "rows": [
                ["Item", "Count"],
                ["Apples", { "value": 3, "name": "apples" }],
                ["Pears", 7],
                [{ "value": "Total", "styles": [{ "font": { "style": "bold" } }] }, { "formula": "=#{apples}+B3" }]
            ]
        }]
    }))
    .unwrap();

    let criteria = SpreadsheetCriteria::new(&wb);
    let pears = criteria
        .find(|w| {
            w.sheet_with("Stock", |s| {
                s.row(|r| {
                    r.cell_at_with("A", |c| {
                        c.string("Pears");
                    });
                });
            });
        })
        .unwrap();
    assert_eq!(pears.right().unwrap().value(), &CellValue::Number(7.0));
    assert_eq!(pears.above().unwrap().right().unwrap().name(), Some("apples"));

    let total = criteria
        .find(|w| {
            w.sheet_matching(|s| {
                s.row(|r| {
                    r.cell_matching(|c| {
                        c.style(|st| {
                            st.font(|f| {
                                f.style(&[sheetbuilder::workbook::FontStyle::Bold]);
                            });
                        });
                    });
                });
            });
        })
        .unwrap();
    let formula = total.right().unwrap().cell().formula.clone();
    assert_eq!(formula.as_deref(), Some("='Stock'!B2+B3"));
}
