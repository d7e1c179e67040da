use std::cell::Cell;

use chrono::{NaiveDate, TimeZone, Utc};
use sheetbuilder_query::{CellCriterion, SpreadsheetCriteria};
use sheetbuilder_workbook::{
    BorderStyle, Color, FontStyle, HasStyle, Orientation, SheetState, SpreadsheetBuilder,
    Workbook,
};

fn label(cell: sheetbuilder_workbook::CellRef<'_>) -> String {
    cell.value().to_string()
}

/// "Orders" has a header row, two data rows, an empty row 5 and a styled
/// total; "Archive" is hidden and "Blank" has no rows at all.
fn orders() -> Workbook {
    SpreadsheetBuilder::new()
        .build(|w| {
            w.style("total", |s| {
                s.foreground("#ffff00")?
                    .font(|f| {
                        f.style(FontStyle::Bold).size(14.0);
                        Ok(())
                    })?
                    .border(|b| {
                        b.style(BorderStyle::Thin);
                        Ok(())
                    })?;
                Ok(())
            })?;
            w.sheet("Orders", |s| {
                s.page(|p| {
                    p.orientation(Orientation::Landscape);
                    Ok(())
                })?;
                s.row_with(|r| {
                    r.cell("Item")?.cell("Qty")?.cell("Shipped")?;
                    Ok(())
                })?;
                s.row_with(|r| {
                    r.cell("Apples")?.cell(3)?;
                    r.cell_with(|c| {
                        c.value(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
                        Ok(())
                    })?;
                    Ok(())
                })?;
                s.row_with(|r| {
                    r.cell("Pears")?.cell(12)?.cell(false)?;
                    Ok(())
                })?;
                s.row_at(5, |_| Ok(()))?;
                s.row_at(6, |r| {
                    r.cell_with(|c| {
                        c.value("Total").colspan(2)?.comment("sum of quantities")?;
                        Ok(())
                    })?;
                    r.cell_with(|c| {
                        c.value(15).name("total")?.style("total")?;
                        Ok(())
                    })?;
                    Ok(())
                })?;
                Ok(())
            })?;
            w.sheet("Archive", |s| {
                s.state(SheetState::Hidden);
                s.row_with(|r| {
                    r.cell("Apples")?.cell(1)?;
                    Ok(())
                })?;
                Ok(())
            })?;
            w.sheet("Blank", |_| Ok(()))?;
            Ok(())
        })
        .unwrap()
}

#[test]
fn all_returns_every_cell_and_the_empty_rows_and_sheets() {
    let wb = orders();
    let result = SpreadsheetCriteria::new(&wb).all();
    assert_eq!(result.len(), 3 + 3 + 3 + 2 + 2);
    let rows: Vec<(&str, u32)> = result
        .rows()
        .iter()
        .map(|r| (r.sheet().name(), r.number()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Orders", 1),
            ("Orders", 2),
            ("Orders", 3),
            ("Orders", 5),
            ("Orders", 6),
            ("Archive", 1)
        ]
    );
    let sheets: Vec<&str> = result.sheets().iter().map(|s| s.name()).collect();
    assert_eq!(sheets, vec!["Orders", "Archive", "Blank"]);
}

#[test]
fn matched_cells_derive_their_rows_and_sheets() {
    let wb = orders();
    let criteria = SpreadsheetCriteria::new(&wb);
    let apples = criteria.query(|w| {
        w.sheet_matching(|s| {
            s.row(|r| {
                r.cell_matching(|c| {
                    c.string("Apples");
                });
            });
        });
    });
    assert_eq!(apples.len(), 2);
    let positions: Vec<String> = apples
        .iter()
        .map(|c| format!("{}!{}", c.sheet().name(), c.position()))
        .collect();
    assert_eq!(positions, vec!["Orders!A2", "Archive!A1"]);
    assert_eq!(apples.rows().len(), 2);
    assert_eq!(apples.sheets().len(), 2);
    assert_eq!(apples.first_sheet().unwrap().name(), "Orders");
    assert_eq!(apples.first_row().unwrap().number(), 2);
}

#[test]
fn conditions_at_one_level_are_and_ed() {
    let wb = orders();
    let criteria = SpreadsheetCriteria::new(&wb);
    let result = criteria.query(|w| {
        w.sheet_with("Orders", |s| {
            s.rows_with(2, 3, |r| {
                r.cell_with(2, |c| {
                    c.number_matching(|n| n > 2.0).number_matching(|n| n < 10.0);
                });
            });
        });
    });
    assert_eq!(result.len(), 1);
    assert_eq!(result.first_cell().unwrap().position().to_string(), "B2");
}

#[test]
fn or_adds_one_disjunctive_clause() {
    let wb = orders();
    let criteria = SpreadsheetCriteria::new(&wb);
    let result = criteria.query(|w| {
        w.sheet("Orders").sheet_matching(|s| {
            s.row(|r| {
                r.cell_at("A").cell_matching(|c| {
                    c.or(|any| {
                        any.string("Apples").string("Pears");
                    });
                });
            });
        });
    });
    let found: Vec<String> = result.iter().map(label).collect();
    assert_eq!(found, vec!["Apples", "Pears"]);

    // an empty `or` does not narrow anything
    let unchanged = criteria.query(|w| {
        w.sheet("Orders").or(|_| {});
    });
    assert_eq!(unchanged.len(), 3 + 3 + 3 + 2);

    let either_sheet = criteria.query(|w| {
        w.or(|any| {
            any.sheet("Archive").sheet("Blank");
        });
    });
    let sheets: Vec<&str> = either_sheet.sheets().iter().map(|s| s.name()).collect();
    assert_eq!(sheets, vec!["Archive", "Blank"]);
    assert_eq!(either_sheet.len(), 2);
}

#[test]
fn row_level_conditions_keep_empty_rows() {
    let wb = orders();
    let criteria = SpreadsheetCriteria::new(&wb);
    let result = criteria.query(|w| {
        w.sheet_with("Orders", |s| {
            s.rows(4, 5);
        });
    });
    assert!(result.is_empty());
    assert_eq!(result.rows().len(), 1);
    assert_eq!(result.first_row().unwrap().number(), 5);

    // a cell condition rules the empty row out
    let result = criteria.query(|w| {
        w.sheet_with("Orders", |s| {
            s.rows_with(4, 5, |r| {
                r.cell(1);
            });
        });
    });
    assert!(result.rows().is_empty());
}

#[test]
fn typed_value_conditions() {
    let wb = orders();
    let criteria = SpreadsheetCriteria::new(&wb);
    let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    let dated = criteria.find(|w| {
        w.sheet_matching(|s| {
            s.row(|r| {
                r.cell_matching(|c| {
                    c.local_date(march);
                });
            });
        });
    });
    assert_eq!(dated.unwrap().position().to_string(), "C2");

    let instant = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    assert!(criteria.exists(|w| {
        w.sheet_matching(|s| {
            s.row(|r| {
                r.cell_matching(|c| {
                    c.date(instant);
                });
            });
        });
    }));

    let shipped = criteria.find(|w| {
        w.sheet_matching(|s| {
            s.row(|r| {
                r.cell_matching(|c| {
                    c.bool(false);
                });
            });
        });
    });
    assert_eq!(shipped.unwrap().position().to_string(), "C3");

    let twelve = criteria.find(|w| {
        w.sheet_matching(|s| {
            s.row(|r| {
                r.cell_matching(|c| {
                    c.value(12);
                });
            });
        });
    });
    assert_eq!(twelve.unwrap().position().to_string(), "B3");
}

fn matching_cells<F>(wb: &Workbook, build: F) -> Vec<String>
where
    F: FnOnce(&mut CellCriterion<'_>),
{
    SpreadsheetCriteria::new(wb)
        .query(|w| {
            w.sheet_matching(|s| {
                s.row(|r| {
                    r.cell_matching(build);
                });
            });
        })
        .iter()
        .map(|c| c.position().to_string())
        .collect()
}

#[test]
fn spans_names_comments_and_styles() {
    let wb = orders();
    let colspan = matching_cells(&wb, |c| {
        c.colspan(2);
    });
    assert_eq!(colspan, vec!["A6"]);

    let commented = matching_cells(&wb, |c| {
        c.comment_matching(|comment| comment.text.starts_with("sum"));
    });
    assert_eq!(commented, vec!["A6"]);

    let named = matching_cells(&wb, |c| {
        c.name("total");
    });
    assert_eq!(named, vec!["C6"]);

    let styled = matching_cells(&wb, |c| {
        c.style(|st| {
            st.foreground(Color::from_rgb(0xFFFF00))
                .font(|f| {
                    f.style(&[FontStyle::Bold]).size(14.0);
                })
                .border(|b| {
                    b.style(BorderStyle::Thin);
                });
        });
    });
    assert_eq!(styled, vec!["C6"]);

    let unstyled_bold = matching_cells(&wb, |c| {
        c.string("Item").style(|st| {
            st.font(|f| {
                f.style(&[FontStyle::Bold]);
            });
        });
    });
    assert!(unstyled_bold.is_empty());
}

#[test]
fn sheet_state_and_page_conditions() {
    let wb = orders();
    let criteria = SpreadsheetCriteria::new(&wb);
    let hidden = criteria.query(|w| {
        w.sheet_matching(|s| {
            s.state(SheetState::Hidden);
        });
    });
    assert_eq!(hidden.first_sheet().unwrap().name(), "Archive");
    assert_eq!(hidden.len(), 2);

    let landscape = criteria.query(|w| {
        w.sheet_matching(|s| {
            s.page(|p| {
                p.orientation(Orientation::Landscape);
            });
        });
    });
    let sheets: Vec<&str> = landscape.sheets().iter().map(|s| s.name()).collect();
    assert_eq!(sheets, vec!["Orders"]);
}

#[test]
fn find_stops_at_the_first_match() {
    let wb = SpreadsheetBuilder::new()
        .build(|w| {
            w.sheet("Big", |s| {
                for _ in 0..10 {
                    s.row_with(|r| {
                        for _ in 0..10 {
                            r.cell("X")?;
                        }
                        Ok(())
                    })?;
                }
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

    let calls = Cell::new(0usize);
    let criteria = SpreadsheetCriteria::new(&wb);
    let first = criteria.find(|w| {
        w.sheet_matching(|s| {
            s.row(|r| {
                r.cell_matching(|c| {
                    c.string("X").having(|_| {
                        calls.set(calls.get() + 1);
                        true
                    });
                });
            });
        });
    });
    assert_eq!(first.unwrap().position().to_string(), "A1");
    assert_eq!(calls.get(), 1);

    assert_eq!(criteria.query(|w| {
        w.sheet("Big");
    }).len(), 100);
    assert_eq!(criteria.query_limited(7, |_| {}).len(), 7);
    assert!(!criteria.exists(|w| {
        w.sheet("Missing");
    }));
}
