//! Excel identifier rules for named cells and sheet names.

use crate::coord::{CellPosition, letters_to_column};
use crate::error::BuildError;

/// Longest defined name Excel accepts.
pub const MAX_NAME_LEN: usize = 255;
/// Longest sheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const SHEET_NAME_FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

fn looks_like_a1(name: &str) -> bool {
    let split = name
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(name.len());
    let (letters, digits) = name.split_at(split);
    if letters.is_empty() || letters.len() > 3 || digits.is_empty() {
        return false;
    }
    digits.bytes().all(|b| b.is_ascii_digit())
        && letters_to_column(letters).is_some_and(|c| c <= crate::coord::MAX_COLUMN)
}

fn looks_like_r1c1(name: &str) -> bool {
    if name.eq_ignore_ascii_case("r") || name.eq_ignore_ascii_case("c") {
        return true;
    }
    let upper = name.to_ascii_uppercase();
    let Some(rest) = upper.strip_prefix('R') else {
        return false;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    let Some(rest) = rest.strip_prefix('C') else {
        return false;
    };
    rest.bytes().all(|b| b.is_ascii_digit())
}

fn valid_first(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '\\'
}

fn valid_rest(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '.' || ch == '\\'
}

/// Whether `name` is a legal workbook-level defined name.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.chars().count() <= MAX_NAME_LEN
        && valid_first(first)
        && chars.all(valid_rest)
        && !looks_like_a1(name)
        && !looks_like_r1c1(name)
}

/// Suggest a legal spelling of `name`: illegal characters become `_` and a `_`
/// prefix is added when the name would start illegally or read as a cell reference.
pub fn fix_name(name: &str) -> String {
    let mut fixed: String = name
        .chars()
        .map(|c| if valid_rest(c) { c } else { '_' })
        .collect();
    let needs_prefix = match fixed.chars().next() {
        None => true,
        Some(first) => !valid_first(first),
    };
    if needs_prefix || looks_like_a1(&fixed) || looks_like_r1c1(&fixed) {
        fixed.insert(0, '_');
    }
    fixed.chars().take(MAX_NAME_LEN).collect()
}

/// Check a name eagerly, reporting a suggested fix when it is not legal.
pub fn validate_name(name: &str) -> Result<(), BuildError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(BuildError::InvalidIdentifier {
            name: name.to_string(),
            suggestion: fix_name(name),
        })
    }
}

/// Make a sheet name safe: trim, replace forbidden characters and cap the length.
pub fn normalize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if SHEET_NAME_FORBIDDEN.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_matches('\'').to_string();
    if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        cleaned
    }
}

/// The refers-to formula of a single cell: `'Sheet 1'!B3`. Quotes in the sheet
/// name are doubled.
pub fn refers_to_formula(sheet: &str, position: CellPosition) -> String {
    format!("'{}'!{}", sheet.replace('\'', "''"), position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in ["total", "_x", "Net.Income", "\\tmp", "Total2024", "ABCD1"] {
            assert!(is_valid_name(name), "{name}");
        }
    }

    #[test]
    fn invalid_names() {
        for name in ["", "1total", "A1", "xfd10", "R1C1", "r", "net income", "a-b"] {
            assert!(!is_valid_name(name), "{name}");
        }
    }

    #[test]
    fn suggestions_are_valid() {
        assert_eq!(fix_name("net income"), "net_income");
        assert_eq!(fix_name("1total"), "_1total");
        assert_eq!(fix_name("A1"), "_A1");
        for name in ["", "1total", "A1", "R1C1", "net income", "a-b", "%%"] {
            assert!(is_valid_name(&fix_name(name)), "{name}");
        }
    }

    #[test]
    fn validate_reports_suggestion() {
        let err = validate_name("my cell").unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidIdentifier {
                name: "my cell".into(),
                suggestion: "my_cell".into()
            }
        );
    }

    #[test]
    fn sheet_names() {
        assert_eq!(normalize_sheet_name("  Q1/Q2 "), "Q1_Q2");
        assert_eq!(normalize_sheet_name(""), "Sheet");
        assert_eq!(normalize_sheet_name(&"x".repeat(40)).len(), 31);
    }

    #[test]
    fn refers_to_quotes_sheet() {
        let pos = CellPosition::new(3, 2);
        assert_eq!(refers_to_formula("Sheet1", pos), "'Sheet1'!B3");
        assert_eq!(refers_to_formula("Bob's", pos), "'Bob''s'!B3");
    }
}
