use sheetbuilder_common::{BuildError, validate_name};
use url::form_urlencoded::byte_serialize;

use super::cell::CellDefinition;
use crate::model::{Hyperlink, Workbook};
use crate::pending::Pending;

/// Chooses the target of a cell hyperlink. Consumed by the first call.
pub struct LinkDefinition<'c, 'a> {
    cell: &'c mut CellDefinition<'a>,
}

impl<'c, 'a> LinkDefinition<'c, 'a> {
    pub(crate) fn new(cell: &'c mut CellDefinition<'a>) -> Self {
        Self { cell }
    }

    fn set(self, link: Hyperlink) {
        let addr = self.cell.address();
        if let Some(cell) = cell_in(&mut self.cell.context().workbook, addr) {
            cell.link = Some(link);
        }
    }

    /// Link to a named cell. The name is checked now; it may be defined
    /// anywhere in the workbook and is looked up on resolution.
    pub fn name(self, name: &str) -> Result<(), BuildError> {
        validate_name(name)?;
        let cell = self.cell.address();
        self.cell.context().defer(Pending::Link {
            cell,
            name: name.to_string(),
        });
        Ok(())
    }

    pub fn url(self, url: &str) {
        self.set(Hyperlink::Url(url.to_string()));
    }

    pub fn email(self, address: &str) {
        self.set(Hyperlink::Email(format!("mailto:{address}")));
    }

    /// `mailto:` link with query parameters. A parameter without a value is
    /// emitted as a bare key.
    pub fn email_with_params<K, V>(self, address: &str, params: impl IntoIterator<Item = (K, Option<V>)>)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query: Vec<String> = params
            .into_iter()
            .map(|(key, value)| {
                let key = encode(key.as_ref());
                match value {
                    Some(value) => format!("{key}={}", encode(value.as_ref())),
                    None => key,
                }
            })
            .collect();
        let mut href = format!("mailto:{address}");
        if !query.is_empty() {
            href.push('?');
            href.push_str(&query.join("&"));
        }
        self.set(Hyperlink::Email(href));
    }

    pub fn file(self, path: &str) {
        self.set(Hyperlink::File(path.to_string()));
    }
}

fn encode(text: &str) -> String {
    byte_serialize(text.as_bytes()).collect()
}

fn cell_in(
    workbook: &mut Workbook,
    addr: crate::pending::CellAddress,
) -> Option<&mut crate::model::Cell> {
    workbook
        .sheet_at_mut(addr.sheet)
        .cell_mut(addr.row, addr.column)
}
