use sheetbuilder_workbook::{BuildError, CellRef, CellValue, DataRow, SpreadsheetBuilder, Workbook};

fn text(value: &CellValue) -> &str {
    value.as_text().unwrap_or_default()
}

fn label(cell: Option<CellRef<'_>>) -> &str {
    cell.map_or("", |c| text(c.value()))
}

/// Three rows of `[x, y, z]` where only the middle row's `y` spans two columns.
fn grid() -> Workbook {
    SpreadsheetBuilder::new()
        .build(|w| {
            w.sheet("Grid", |s| {
                s.row_with(|r| {
                    r.cell("A")?.cell("B")?.cell("C")?;
                    Ok(())
                })?;
                s.row_with(|r| {
                    r.cell("D")?;
                    r.cell_with(|c| {
                        c.value("E").colspan(2)?;
                        Ok(())
                    })?;
                    r.cell("F")?;
                    Ok(())
                })?;
                s.row_with(|r| {
                    r.cell("G")?.cell("H")?.cell("I")?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap()
}

/// Three rows of `[x, y (colspan 2), z]`.
fn banded_grid() -> Workbook {
    SpreadsheetBuilder::new()
        .build(|w| {
            w.sheet("Grid", |s| {
                for [x, y, z] in [["A", "B", "C"], ["D", "E", "F"], ["G", "H", "I"]] {
                    s.row_with(|r| {
                        r.cell(x)?;
                        r.cell_with(|c| {
                            c.value(y).colspan(2)?;
                            Ok(())
                        })?;
                        r.cell(z)?;
                        Ok(())
                    })?;
                }
                Ok(())
            })?;
            Ok(())
        })
        .unwrap()
}

fn neighbours(cell: CellRef<'_>) -> Vec<&str> {
    vec![
        label(cell.above_left()),
        label(cell.above()),
        label(cell.above_right()),
        label(cell.left()),
        label(cell.right()),
        label(cell.below_left()),
        label(cell.below()),
        label(cell.below_right()),
    ]
}

#[test]
fn neighbours_of_a_merged_cell() {
    let wb = grid();
    let sheet = wb.sheet_ref("Grid").unwrap();
    let e = sheet.cell_at(2, 2).unwrap();
    assert_eq!(text(e.value()), "E");
    assert_eq!(
        neighbours(e),
        vec!["A", "B", "C", "D", "F", "G", "H", "I"]
    );
}

#[test]
fn diagonals_resolve_covered_positions_to_their_anchor() {
    let wb = banded_grid();
    let sheet = wb.sheet_ref("Grid").unwrap();
    let e = sheet.cell_at(2, 2).unwrap();
    assert_eq!(
        neighbours(e),
        vec!["A", "B", "B", "D", "F", "G", "H", "H"]
    );
}

#[test]
fn covered_positions_resolve_to_the_anchor() {
    let wb = banded_grid();
    let sheet = wb.sheet_ref("Grid").unwrap();
    let c = sheet.cell_at(1, 4).unwrap();
    assert_eq!(text(c.value()), "C");
    assert_eq!(c.left().unwrap().position(), sheet.cell_at(1, 2).unwrap().position());
    assert_eq!(sheet.cell_at(1, 3).unwrap(), sheet.cell_at(1, 2).unwrap());
}

#[test]
fn edges_have_no_neighbours() {
    let wb = banded_grid();
    let a = wb.sheet_ref("Grid").unwrap().cell_at(1, 1).unwrap();
    assert!(a.above().is_none());
    assert!(a.left().is_none());
    assert!(a.above_left().is_none());
    let i = wb.sheet_ref("Grid").unwrap().cell_at(3, 4).unwrap();
    assert!(i.right().is_none());
    assert!(i.below().is_none());
}

#[test]
fn rowspan_moves_below_past_the_region() -> Result<(), BuildError> {
    let wb = SpreadsheetBuilder::new().build(|w| {
        w.sheet("S", |s| {
            s.row_with(|r| {
                r.cell_with(|c| {
                    c.value("tall").rowspan(2)?;
                    Ok(())
                })?;
                r.cell("side")?;
                Ok(())
            })?;
            s.row_with(|r| r.cell_at(2, |c| {
                c.value("side 2");
                Ok(())
            }).map(|_| ()))?;
            s.row_with(|r| r.cell("bottom").map(|_| ()))?;
            Ok(())
        })?;
        Ok(())
    })?;
    let sheet = wb.sheet_ref("S").unwrap();
    let tall = sheet.cell_at(1, 1).unwrap();
    assert_eq!(text(tall.below().unwrap().value()), "bottom");
    let side2 = sheet.cell_at(2, 2).unwrap();
    assert_eq!(text(side2.left().unwrap().value()), "tall");
    Ok(())
}

#[test]
fn rows_and_sheets_walk_in_order() {
    let wb = SpreadsheetBuilder::new()
        .build(|w| {
            w.sheet("One", |s| {
                s.row()?;
                s.row_at(4, |_| Ok(()))?;
                Ok(())
            })?;
            w.sheet("Two", |_| Ok(()))?;
            Ok(())
        })
        .unwrap();
    let one = wb.sheet_ref("One").unwrap();
    let two = one.next().unwrap();
    assert_eq!(two.name(), "Two");
    assert!(two.next().is_none());
    assert_eq!(two.previous().unwrap(), one);
    assert!(one.previous().is_none());

    let first = one.row(1).unwrap();
    assert!(first.above().is_none());
    assert!(first.below().is_none());
    assert_eq!(first.below_by(3).unwrap().number(), 4);
    assert_eq!(one.row(4).unwrap().above_by(3).unwrap(), first);
}

#[test]
fn data_rows_address_cells_by_label() {
    let wb = SpreadsheetBuilder::new()
        .build(|w| {
            w.sheet("People", |s| {
                s.row_with(|r| {
                    r.cell("Name")?.cell("Age")?.cell("City")?;
                    Ok(())
                })?;
                s.row_with(|r| {
                    r.cell("Ann")?.cell(31)?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
    let sheet = wb.sheet_ref("People").unwrap();
    let headers = sheet.row(1).unwrap();
    let row = DataRow::from_headers(sheet.row(2).unwrap(), headers);
    assert_eq!(text(row.get("Name").unwrap().value()), "Ann");
    assert_eq!(row.get("Age").unwrap().value().as_number(), Some(31.0));
    assert!(row.get("City").is_none());
    assert!(row.get("Email").is_none());

    let mapped = DataRow::from_mapping([("who", 1)], sheet.row(2).unwrap());
    assert_eq!(text(mapped.get("who").unwrap().value()), "Ann");
}
