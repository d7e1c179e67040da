use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use sheetbuilder_common::{BuildError, CellPosition, refers_to_formula};

use super::sheet::Sheet;
use super::style::Style;

/// A named style as declared: an optional base plus the properties it sets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSpec {
    pub base: Option<String>,
    pub patch: Style,
}

/// Named style definitions and the cache of composed styles.
///
/// Composing a set of names seals every definition it touched; sealed names
/// can no longer be redefined. The cache is keyed by the ordered name list.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    definitions: FxHashMap<String, StyleSpec>,
    sealed: FxHashSet<String>,
    cache: FxHashMap<Vec<String>, Arc<Style>>,
}

impl StyleRegistry {
    /// Register `spec` under `name`; the last definition wins until sealed.
    pub fn define(&mut self, name: &str, spec: StyleSpec) -> Result<(), BuildError> {
        if self.sealed.contains(name) {
            return Err(BuildError::StyleSealed {
                name: name.to_string(),
            });
        }
        self.definitions.insert(name.to_string(), spec);
        Ok(())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn is_sealed(&self, name: &str) -> bool {
        self.sealed.contains(name)
    }

    pub fn definition(&self, name: &str) -> Option<&StyleSpec> {
        self.definitions.get(name)
    }

    /// Defined names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The sealed, shared style composed from `names` in order.
    pub fn compose(&mut self, names: &[String]) -> Result<Arc<Style>, BuildError> {
        if let Some(cached) = self.cache.get(names) {
            return Ok(Arc::clone(cached));
        }
        let mut style = Style::default();
        let mut touched = Vec::new();
        for name in names {
            self.apply_named(name, &mut style, &mut Vec::new(), &mut touched)?;
        }
        for name in touched {
            self.sealed.insert(name);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(names = ?names, "sealed composed style");
        let style = Arc::new(style);
        self.cache.insert(names.to_vec(), Arc::clone(&style));
        Ok(style)
    }

    /// Overlay an anonymous definition; its base (if any) is applied first.
    pub fn apply_spec(&mut self, spec: &StyleSpec, target: &mut Style) -> Result<(), BuildError> {
        let mut touched = Vec::new();
        if let Some(base) = &spec.base {
            self.apply_named(base, target, &mut Vec::new(), &mut touched)?;
        }
        target.merge(&spec.patch);
        for name in touched {
            self.sealed.insert(name);
        }
        Ok(())
    }

    fn apply_named(
        &self,
        name: &str,
        target: &mut Style,
        visiting: &mut Vec<String>,
        touched: &mut Vec<String>,
    ) -> Result<(), BuildError> {
        if visiting.iter().any(|v| v == name) {
            return Err(BuildError::CyclicStyle {
                name: name.to_string(),
            });
        }
        let spec = self
            .definitions
            .get(name)
            .ok_or_else(|| BuildError::UndefinedStyle {
                name: name.to_string(),
            })?;
        if let Some(base) = &spec.base {
            visiting.push(name.to_string());
            self.apply_named(base, target, visiting, touched)?;
            visiting.pop();
        }
        target.merge(&spec.patch);
        touched.push(name.to_string());
        Ok(())
    }
}

/// A workbook-scoped name bound to a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCell {
    pub name: String,
    pub sheet: String,
    pub position: CellPosition,
    /// Absolute reference to the cell, e.g. `'Sheet1'!B3`.
    pub refers_to: String,
}

#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    sheet_index: FxHashMap<String, usize>,
    styles: StyleRegistry,
    names: BTreeMap<String, NamedCell>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheet_index(name).map(|i| &self.sheets[i])
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheet_index(name).map(|i| &mut self.sheets[i])
    }

    pub fn sheet_at(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub(crate) fn sheet_at_mut(&mut self, index: usize) -> &mut Sheet {
        &mut self.sheets[index]
    }

    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheet_index.get(name).copied()
    }

    /// Index of the sheet called `name`, appending an empty one when missing.
    pub fn ensure_sheet(&mut self, name: &str) -> usize {
        if let Some(idx) = self.sheet_index(name) {
            return idx;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(sheet = name, "created sheet");
        let idx = self.sheets.len();
        self.sheets.push(Sheet::new(name));
        self.sheet_index.insert(name.to_string(), idx);
        idx
    }

    /// Append a fully formed sheet, replacing any sheet with the same name.
    pub fn insert_sheet(&mut self, sheet: Sheet) -> usize {
        match self.sheet_index(&sheet.name) {
            Some(idx) => {
                self.sheets[idx] = sheet;
                idx
            }
            None => {
                let idx = self.sheets.len();
                self.sheet_index.insert(sheet.name.clone(), idx);
                self.sheets.push(sheet);
                idx
            }
        }
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    pub fn names(&self) -> impl Iterator<Item = &NamedCell> {
        self.names.values()
    }

    pub fn named_cell(&self, name: &str) -> Option<&NamedCell> {
        self.names.get(name)
    }

    /// Bind `name` to the cell at `position` of `sheet`.
    pub fn define_name(
        &mut self,
        name: &str,
        sheet: &str,
        position: CellPosition,
    ) -> Result<&NamedCell, BuildError> {
        if self.names.contains_key(name) {
            return Err(BuildError::DuplicateName {
                name: name.to_string(),
            });
        }
        let named = NamedCell {
            name: name.to_string(),
            sheet: sheet.to_string(),
            position,
            refers_to: refers_to_formula(sheet, position),
        };
        Ok(self.names.entry(name.to_string()).or_insert(named))
    }
}
