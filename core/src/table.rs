//! Normalized rows with a lookup index.
//!
//! A [`Table`] is built once from a single parse call and never changes
//! afterwards. Lookups by key column are O(1) via the internal `HashMap`.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::normalize::{FieldValue, NormalizedRow, TableSchema, normalize_row};
use crate::parser::{SplitMode, parse_table_with};

/// Ordered rows plus an index from key-column value to row.
///
/// When two rows share a key value, the row that comes later in the input
/// owns the key. Integer key columns are indexed by their decimal form.
/// Rows whose key column is absent or blank are kept but not indexed.
///
/// # Examples
///
/// ```
/// use mounttab_core::{Table, TableSchema};
///
/// let schema = TableSchema::plain().with_key_column("NAME");
/// let table = Table::parse("NAME  SIZE", ["sda   10", "sdb   20"], &schema).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get("sdb").unwrap().text("SIZE"), Some("20"));
/// assert!(table.get("sdc").is_none());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    rows: Vec<NormalizedRow>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    key_column: Option<String>,
}

impl Table {
    /// Builds a table from already normalized rows.
    pub fn build(rows: Vec<NormalizedRow>, key_column: Option<&str>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        if let Some(column) = key_column {
            for (position, row) in rows.iter().enumerate() {
                let Some(key) = row.get(column).and_then(index_key) else {
                    continue;
                };
                if let Some(previous) = index.insert(key.clone(), position) {
                    warn!(
                        key = key.as_str(),
                        column,
                        previous_row = previous + 1,
                        row = position + 1,
                        "Duplicate key, later row takes over the index entry"
                    );
                }
            }
        }

        Self {
            rows,
            index,
            key_column: key_column.map(String::from),
        }
    }

    /// Parses, normalizes and indexes `lines` with positional splitting.
    ///
    /// # Errors
    ///
    /// Fails with the first [`TableError`](crate::TableError) encountered;
    /// no table is produced in that case.
    pub fn parse<I, S>(header: &str, lines: I, schema: &TableSchema) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse_with(header, lines, schema, SplitMode::Positional)
    }

    /// Parses, normalizes and indexes `lines` with the given split mode.
    ///
    /// # Errors
    ///
    /// Fails with the first [`TableError`](crate::TableError) encountered;
    /// no table is produced in that case.
    pub fn parse_with<I, S>(
        header: &str,
        lines: I,
        schema: &TableSchema,
        mode: SplitMode,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw_rows = parse_table_with(header, lines, mode)?;
        let rows = raw_rows
            .iter()
            .enumerate()
            .map(|(i, raw)| normalize_row(raw, schema, i + 1))
            .collect::<Result<Vec<_>>>()?;
        let table = Self::build(rows, schema.key_column.as_deref());
        debug!(rows = table.len(), indexed = table.index.len(), "Built table");
        Ok(table)
    }

    /// All rows in input order.
    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    /// Iterates rows in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedRow> {
        self.rows.iter()
    }

    /// Returns the row owning `key` in the key column.
    pub fn get(&self, key: &str) -> Option<&NormalizedRow> {
        self.index.get(key).map(|&position| &self.rows[position])
    }

    /// Returns `true` if some row owns `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Indexed key values, in row order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<(&str, usize)> = self
            .index
            .iter()
            .map(|(key, &position)| (key.as_str(), position))
            .collect();
        keys.sort_by_key(|&(_, position)| position);
        keys.into_iter().map(|(key, _)| key).collect()
    }

    /// Name of the key column, if the table is indexed.
    pub fn key_column(&self) -> Option<&str> {
        self.key_column.as_deref()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn index_key(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) if !s.is_empty() => Some(s.clone()),
        FieldValue::Integer(n) => Some(n.to_string()),
        _ => None,
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a NormalizedRow;
    type IntoIter = std::slice::Iter<'a, NormalizedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
