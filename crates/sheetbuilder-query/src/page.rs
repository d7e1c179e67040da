use sheetbuilder_common::{Orientation, Paper};
use sheetbuilder_workbook::PageSettings;

use crate::criterion::Criterion;

#[derive(Debug, Default)]
pub struct PageCriterion<'w> {
    inner: Criterion<'w, PageSettings>,
}

impl<'w> PageCriterion<'w> {
    pub(crate) fn test(&self, page: &PageSettings) -> bool {
        self.inner.test(page)
    }

    pub fn orientation(&mut self, orientation: Orientation) -> &mut Self {
        self.inner.push(move |p| p.orientation == Some(orientation));
        self
    }

    pub fn paper(&mut self, paper: Paper) -> &mut Self {
        self.inner.push(move |p| p.paper == Some(paper));
        self
    }

    pub fn having(&mut self, predicate: impl Fn(&PageSettings) -> bool + 'w) -> &mut Self {
        self.inner.push(predicate);
        self
    }
}
