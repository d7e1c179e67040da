//! Deferred formulas and links.
//!
//! Formulas and name links may refer to cells that are named later in the
//! document, so they are queued while the tree is built and applied in
//! registration order once the enclosing scope is complete.

use std::collections::VecDeque;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sheetbuilder_common::BuildError;

use crate::model::{Cell, Hyperlink, Workbook};

static NAME_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\{(.+?)\}").expect("valid regex"));

/// Location of a cell inside the workbook being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub sheet: usize,
    pub row: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Formula { cell: CellAddress, text: String },
    Link { cell: CellAddress, name: String },
}

impl Pending {
    pub fn cell(&self) -> CellAddress {
        match self {
            Pending::Formula { cell, .. } | Pending::Link { cell, .. } => *cell,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    items: VecDeque<Pending>,
}

impl PendingQueue {
    pub fn push(&mut self, item: Pending) {
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pending> {
        self.items.iter()
    }

    /// Drain the queue in FIFO order, applying each item to `workbook`.
    ///
    /// Stops at the first unresolved name; items after it stay queued.
    pub fn resolve_all(&mut self, workbook: &mut Workbook) -> Result<(), BuildError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(pending = self.items.len(), "resolving pending items");
        while let Some(item) = self.items.front() {
            resolve(item, workbook)?;
            self.items.pop_front();
        }
        Ok(())
    }
}

/// Replace every `#{name}` in `text` with the refers-to formula of `name`.
pub fn expand_names(text: &str, workbook: &Workbook) -> Result<String, BuildError> {
    let mut missing = None;
    let expanded = NAME_PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        let name = &caps[1];
        match workbook.named_cell(name) {
            Some(named) => named.refers_to.clone(),
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });
    match missing {
        Some(name) => Err(BuildError::UnresolvedReference { name }),
        None => Ok(expanded.into_owned()),
    }
}

fn target<'w>(workbook: &'w mut Workbook, addr: CellAddress) -> Result<&'w mut Cell, BuildError> {
    workbook
        .sheet_at_mut(addr.sheet)
        .cell_mut(addr.row, addr.column)
        .ok_or_else(|| {
            BuildError::InvalidArgument(format!(
                "pending item refers to a missing cell at row {}, column {}",
                addr.row, addr.column
            ))
        })
}

fn resolve(item: &Pending, workbook: &mut Workbook) -> Result<(), BuildError> {
    match item {
        Pending::Formula { cell, text } => {
            let formula = expand_names(text, workbook)?;
            target(workbook, *cell)?.formula = Some(formula);
        }
        Pending::Link { cell, name } => {
            let location = workbook
                .named_cell(name)
                .map(|n| n.refers_to.clone())
                .ok_or_else(|| BuildError::UnresolvedReference { name: name.clone() })?;
            target(workbook, *cell)?.link = Some(Hyperlink::Document {
                name: name.clone(),
                location,
            });
        }
    }
    Ok(())
}
