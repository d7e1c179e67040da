use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/* ───────────────────── ISO-8601 date-time detection ─────────────────────
Only full date-time strings with an explicit offset are recognised
(`2024-02-29T10:15:00Z`, `2023-01-31T08:00:00.5+02:00`). Day numbers are
validated per month, including leap years, so `2023-02-29T…` stays text.
------------------------------------------------------------------------- */

static ISO_DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:[1-9]\d{3}-(?:(?:0[1-9]|1[0-2])-(?:0[1-9]|1\d|2[0-8])|(?:0[13-9]|1[0-2])-(?:29|30)|(?:0[13578]|1[02])-31)",
        r"|(?:[1-9]\d(?:0[48]|[2468][048]|[13579][26])|(?:[2468][048]|[13579][26])00)-02-29)",
        r"T(?:[01]\d|2[0-3]):[0-5]\d:[0-5]\d(?:\.\d{1,9})?(?:Z|[+-][01]\d:[0-5]\d)$",
    ))
    .expect("valid regex")
});

/// Whether `text` is a strict ISO-8601 date-time with offset.
pub fn is_iso_date_time(text: &str) -> bool {
    ISO_DATE_TIME.is_match(text)
}

/// Parse a strict ISO-8601 date-time, normalised to UTC.
pub fn parse_iso_date_time(text: &str) -> Option<NaiveDateTime> {
    if !is_iso_date_time(text) {
        return None;
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// The value stored in a cell.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Boolean(bool),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            CellValue::Empty => state.write_u8(0),
            CellValue::Number(n) => n.to_bits().hash(state),
            CellValue::Boolean(b) => b.hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Date(d) => d.hash(state),
            CellValue::DateTime(dt) => dt.hash(state),
            CellValue::Time(t) => t.hash(state),
        }
    }
}

impl Eq for CellValue {}

impl Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Boolean(b) => write!(f, "{b}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            CellValue::Time(t) => write!(f, "{t}"),
        }
    }
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Calendar date of a date or date-time value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    /// Date-time of a date (at midnight) or date-time value.
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Time of day of a time or date-time value.
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            CellValue::Time(t) => Some(*t),
            CellValue::DateTime(dt) => Some(dt.time()),
            _ => None,
        }
    }

    /// Seconds since midnight, the unit time-of-day values compare in.
    pub fn seconds_from_midnight(&self) -> Option<u32> {
        self.as_time().map(|t| t.num_seconds_from_midnight())
    }

    /// Text value upgraded to a date-time when it is a strict ISO-8601 string.
    pub fn detect_date(self) -> Self {
        match self {
            CellValue::Text(s) => match parse_iso_date_time(&s) {
                Some(dt) => CellValue::DateTime(dt),
                None => CellValue::Text(s),
            },
            other => other,
        }
    }
}

/// Conversion of builder arguments into cell values.
pub trait IntoCellValue {
    fn into_cell_value(self) -> CellValue;
}

impl IntoCellValue for CellValue {
    fn into_cell_value(self) -> CellValue {
        self
    }
}

macro_rules! number_into_value {
    ($($t:ty),*) => {
        $(impl IntoCellValue for $t {
            fn into_cell_value(self) -> CellValue {
                CellValue::Number(self as f64)
            }
        })*
    };
}

number_into_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl IntoCellValue for bool {
    fn into_cell_value(self) -> CellValue {
        CellValue::Boolean(self)
    }
}

impl IntoCellValue for &str {
    fn into_cell_value(self) -> CellValue {
        CellValue::Text(self.to_string())
    }
}

impl IntoCellValue for String {
    fn into_cell_value(self) -> CellValue {
        CellValue::Text(self)
    }
}

impl IntoCellValue for &String {
    fn into_cell_value(self) -> CellValue {
        CellValue::Text(self.clone())
    }
}

impl IntoCellValue for NaiveDate {
    fn into_cell_value(self) -> CellValue {
        CellValue::Date(self)
    }
}

impl IntoCellValue for NaiveDateTime {
    fn into_cell_value(self) -> CellValue {
        CellValue::DateTime(self)
    }
}

impl IntoCellValue for NaiveTime {
    fn into_cell_value(self) -> CellValue {
        CellValue::Time(self)
    }
}

impl<T: IntoCellValue> IntoCellValue for Option<T> {
    fn into_cell_value(self) -> CellValue {
        self.map_or(CellValue::Empty, IntoCellValue::into_cell_value)
    }
}
