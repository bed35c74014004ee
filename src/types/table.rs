use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default column width in character units.
pub const DEFAULT_COLUMN_WIDTH: u32 = 10;

fn default_width() -> u32 {
    DEFAULT_COLUMN_WIDTH
}

/// A column of the exported sheet.
///
/// Position in the column list determines the spreadsheet column letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Display text of the header cell
    pub header: String,
    /// Key looked up in each [`Row`]
    pub key: String,
    /// Width in character units
    #[serde(default = "default_width")]
    pub width: u32,
    /// Long-text column: data cells get the wrap style
    #[serde(default)]
    pub wrap: bool,
}

impl Column {
    pub fn new(header: impl Into<String>, key: impl Into<String>, width: u32) -> Self {
        Self {
            header: header.into(),
            key: key.into(),
            width,
            wrap: false,
        }
    }

    /// Mark the column as long text.
    #[must_use]
    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }
}

/// One data row: column key to text value.
///
/// Keys the row does not carry read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(HashMap<String, String>);

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `""` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Row {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
