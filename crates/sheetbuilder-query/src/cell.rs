use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use sheetbuilder_common::{CellValue, IntoCellValue};
use sheetbuilder_workbook::{CellRef, Comment, Style};

use crate::criterion::{Scope, ScopeCriterion};
use crate::style::StyleCriterion;

static EMPTY_STYLE: Lazy<Style> = Lazy::new(Style::default);

/// Conditions on a single cell. Rows and sheets without cells never pass a
/// cell condition.
#[derive(Debug, Default)]
pub struct CellCriterion<'w> {
    inner: ScopeCriterion<'w>,
}

impl<'w> CellCriterion<'w> {
    fn disjunctive() -> Self {
        Self {
            inner: ScopeCriterion::disjunctive(),
        }
    }

    pub(crate) fn into_inner(self) -> ScopeCriterion<'w> {
        self.inner
    }

    fn on_cell(&mut self, test: impl Fn(CellRef<'w>) -> bool + 'w) -> &mut Self {
        self.inner
            .push(move |scope: &Scope<'w>| scope.cell.is_some_and(&test));
        self
    }

    fn on_value(&mut self, test: impl Fn(&CellValue) -> bool + 'w) -> &mut Self {
        self.on_cell(move |cell| test(cell.value()))
    }

    /// Date or date-time value at the given instant, read as UTC.
    pub fn date(&mut self, instant: DateTime<Utc>) -> &mut Self {
        self.on_value(move |v| v.as_date_time().is_some_and(|dt| dt.and_utc() == instant))
    }

    pub fn date_matching(&mut self, predicate: impl Fn(DateTime<Utc>) -> bool + 'w) -> &mut Self {
        self.on_value(move |v| v.as_date_time().is_some_and(|dt| predicate(dt.and_utc())))
    }

    pub fn local_date(&mut self, date: NaiveDate) -> &mut Self {
        self.on_value(move |v| v.as_date() == Some(date))
    }

    pub fn local_date_matching(&mut self, predicate: impl Fn(NaiveDate) -> bool + 'w) -> &mut Self {
        self.on_value(move |v| v.as_date().is_some_and(&predicate))
    }

    pub fn local_date_time(&mut self, date_time: NaiveDateTime) -> &mut Self {
        self.on_value(move |v| v.as_date_time() == Some(date_time))
    }

    pub fn local_date_time_matching(
        &mut self,
        predicate: impl Fn(NaiveDateTime) -> bool + 'w,
    ) -> &mut Self {
        self.on_value(move |v| v.as_date_time().is_some_and(&predicate))
    }

    pub fn local_time(&mut self, time: NaiveTime) -> &mut Self {
        self.on_value(move |v| v.as_time() == Some(time))
    }

    pub fn local_time_matching(&mut self, predicate: impl Fn(NaiveTime) -> bool + 'w) -> &mut Self {
        self.on_value(move |v| v.as_time().is_some_and(&predicate))
    }

    pub fn number(&mut self, number: f64) -> &mut Self {
        self.on_value(move |v| v.as_number() == Some(number))
    }

    pub fn number_matching(&mut self, predicate: impl Fn(f64) -> bool + 'w) -> &mut Self {
        self.on_value(move |v| v.as_number().is_some_and(&predicate))
    }

    pub fn string(&mut self, text: &str) -> &mut Self {
        let text = text.to_string();
        self.on_value(move |v| v.as_text() == Some(text.as_str()))
    }

    pub fn string_matching(&mut self, predicate: impl Fn(&str) -> bool + 'w) -> &mut Self {
        self.on_value(move |v| v.as_text().is_some_and(&predicate))
    }

    /// Exact value, compared the way [`CellValue`] compares.
    pub fn value(&mut self, value: impl IntoCellValue) -> &mut Self {
        let value = value.into_cell_value();
        self.on_value(move |v| *v == value)
    }

    pub fn bool(&mut self, flag: bool) -> &mut Self {
        self.on_value(move |v| v.as_bool() == Some(flag))
    }

    pub fn style<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut StyleCriterion<'w>),
    {
        let mut style = StyleCriterion::default();
        build(&mut style);
        self.on_cell(move |cell| {
            let composed = cell.style().map_or(&*EMPTY_STYLE, |s| &**s);
            style.test(composed)
        })
    }

    pub fn rowspan(&mut self, span: u32) -> &mut Self {
        self.on_cell(move |cell| cell.cell().rowspan.max(1) == span)
    }

    pub fn rowspan_matching(&mut self, predicate: impl Fn(u32) -> bool + 'w) -> &mut Self {
        self.on_cell(move |cell| predicate(cell.cell().rowspan.max(1)))
    }

    pub fn colspan(&mut self, span: u32) -> &mut Self {
        self.on_cell(move |cell| cell.cell().colspan.max(1) == span)
    }

    pub fn colspan_matching(&mut self, predicate: impl Fn(u32) -> bool + 'w) -> &mut Self {
        self.on_cell(move |cell| predicate(cell.cell().colspan.max(1)))
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        let name = name.to_string();
        self.on_cell(move |cell| cell.name() == Some(name.as_str()))
    }

    pub fn name_matching(&mut self, predicate: impl Fn(&str) -> bool + 'w) -> &mut Self {
        self.on_cell(move |cell| cell.name().is_some_and(&predicate))
    }

    /// Comment whose text equals `text`.
    pub fn comment(&mut self, text: &str) -> &mut Self {
        let text = text.to_string();
        self.on_cell(move |cell| {
            cell.cell()
                .comment
                .as_ref()
                .is_some_and(|c| c.text == text)
        })
    }

    pub fn comment_matching(&mut self, predicate: impl Fn(&Comment) -> bool + 'w) -> &mut Self {
        self.on_cell(move |cell| cell.cell().comment.as_ref().is_some_and(&predicate))
    }

    /// One clause that passes when any condition added inside `build` passes.
    pub fn or<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut CellCriterion<'w>),
    {
        let mut nested = CellCriterion::disjunctive();
        build(&mut nested);
        self.inner.nest(nested.inner);
        self
    }

    pub fn having(&mut self, predicate: impl Fn(CellRef<'w>) -> bool + 'w) -> &mut Self {
        self.on_cell(predicate)
    }
}
