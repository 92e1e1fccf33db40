//! Per-column type coercion of raw rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::flags::well_known_mount_flags;
use crate::options::{OptionListDecoder, OptionMap};
use crate::parser::RawRow;

/// Typed layout of a table: which columns are integers, which one holds an
/// option list, and which one keys the lookup index.
///
/// # Examples
///
/// ```
/// use mounttab_core::TableSchema;
///
/// let schema = TableSchema::fstab();
/// assert_eq!(schema.key_column.as_deref(), Some("fs_file"));
/// assert!(schema.is_integer("fs_passno"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSchema {
    /// Columns parsed as base-10 integers, `0` when absent.
    pub integer_columns: Vec<String>,
    /// Column decoded with the option-list decoder.
    pub options_column: Option<String>,
    /// Column whose values key the table's lookup index.
    pub key_column: Option<String>,
    /// Flags added as `false` to every decoded option map.
    pub flag_defaults: Vec<String>,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::plain()
    }
}

impl TableSchema {
    /// Schema with no typed columns; every column stays a string.
    pub fn plain() -> Self {
        Self {
            integer_columns: Vec::new(),
            options_column: None,
            key_column: None,
            flag_defaults: Vec::new(),
        }
    }

    /// Schema of `/etc/fstab`.
    pub fn fstab() -> Self {
        Self {
            integer_columns: vec!["fs_freq".to_string(), "fs_passno".to_string()],
            options_column: Some("fs_mntops".to_string()),
            key_column: Some("fs_file".to_string()),
            flag_defaults: well_known_mount_flags(),
        }
    }

    /// Adds an integer column.
    pub fn with_integer_column(mut self, column: &str) -> Self {
        self.integer_columns.push(column.to_string());
        self
    }

    /// Sets the options column.
    pub fn with_options_column(mut self, column: &str) -> Self {
        self.options_column = Some(column.to_string());
        self
    }

    /// Sets the key column.
    pub fn with_key_column(mut self, column: &str) -> Self {
        self.key_column = Some(column.to_string());
        self
    }

    /// Replaces the defaulted flag set.
    pub fn with_flag_defaults<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flag_defaults = flags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if `column` is declared as an integer column.
    pub fn is_integer(&self, column: &str) -> bool {
        self.integer_columns.iter().any(|c| c == column)
    }

    fn is_options(&self, column: &str) -> bool {
        self.options_column.as_deref() == Some(column)
    }
}

/// A normalized column value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Value of a declared integer column.
    Integer(i64),
    /// Untyped column value.
    Text(String),
    /// Decoded option list.
    Options(OptionMap),
}

impl FieldValue {
    /// Returns the string value of an untyped column.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value of an integer column.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the decoded option map.
    pub fn as_options(&self) -> Option<&OptionMap> {
        match self {
            FieldValue::Options(opts) => Some(opts),
            _ => None,
        }
    }
}

/// A row after type coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRow {
    fields: IndexMap<String, FieldValue>,
}

impl NormalizedRow {
    /// Returns the value of `column`.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Returns the string value of an untyped column.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(FieldValue::as_text)
    }

    /// Returns the value of an integer column.
    pub fn integer(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(FieldValue::as_integer)
    }

    /// Returns the option map of the options column.
    pub fn options(&self, column: &str) -> Option<&OptionMap> {
        self.get(column).and_then(FieldValue::as_options)
    }

    /// Returns `true` if any option column of this row has `flag` set.
    pub fn flag(&self, flag: &str) -> bool {
        self.fields
            .values()
            .filter_map(FieldValue::as_options)
            .any(|opts| opts.flag(flag))
    }

    /// Returns `true` if `column` is present.
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Iterates `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Applies `schema` to a raw row.
///
/// Integer columns absent from `raw` become `0`. The options column is always
/// present in the result, decoded from the empty string if the line did not
/// reach it. `line` is the 1-based data-line number used in errors.
///
/// # Errors
///
/// Returns [`TableError::MalformedField`] if an integer column holds a
/// non-numeric value.
///
/// # Examples
///
/// ```
/// use mounttab_core::{RawRow, TableSchema, normalize_row};
///
/// let mut raw = RawRow::new();
/// raw.insert("fs_file", "/boot");
/// raw.insert("fs_mntops", "ro");
///
/// let row = normalize_row(&raw, &TableSchema::fstab(), 1).unwrap();
/// assert_eq!(row.integer("fs_passno"), Some(0));
/// assert!(row.flag("ro"));
/// assert!(!row.flag("rw"));
/// ```
pub fn normalize_row(raw: &RawRow, schema: &TableSchema, line: usize) -> Result<NormalizedRow> {
    let decoder = OptionListDecoder::default();
    let mut fields = IndexMap::with_capacity(raw.len() + schema.integer_columns.len());

    for (column, value) in raw.iter() {
        let normalized = if schema.is_integer(column) {
            FieldValue::Integer(parse_integer(column, value, line)?)
        } else if schema.is_options(column) {
            FieldValue::Options(decoder.decode(value).with_defaults(&schema.flag_defaults))
        } else {
            FieldValue::Text(value.to_string())
        };
        fields.insert(column.to_string(), normalized);
    }

    for column in &schema.integer_columns {
        if !fields.contains_key(column) {
            fields.insert(column.clone(), FieldValue::Integer(0));
        }
    }
    if let Some(column) = &schema.options_column {
        if !fields.contains_key(column) {
            let empty = OptionMap::new().with_defaults(&schema.flag_defaults);
            fields.insert(column.clone(), FieldValue::Options(empty));
        }
    }

    Ok(NormalizedRow { fields })
}

fn parse_integer(column: &str, value: &str, line: usize) -> Result<i64> {
    value.parse().map_err(|_| TableError::MalformedField {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OptionValue, WELL_KNOWN_MOUNT_FLAGS};

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        let mut row = RawRow::new();
        for (k, v) in pairs {
            row.insert(*k, *v);
        }
        row
    }

    #[test]
    fn test_integers_parsed_and_defaulted() {
        let row = normalize_row(
            &raw(&[("fs_file", "/"), ("fs_freq", "1")]),
            &TableSchema::fstab(),
            1,
        )
        .unwrap();
        assert_eq!(row.integer("fs_freq"), Some(1));
        assert_eq!(row.integer("fs_passno"), Some(0));
        assert_eq!(row.text("fs_file"), Some("/"));
    }

    #[test]
    fn test_signed_integers_accepted() {
        let row = normalize_row(&raw(&[("fs_freq", "-1")]), &TableSchema::fstab(), 1).unwrap();
        assert_eq!(row.integer("fs_freq"), Some(-1));
    }

    #[test]
    fn test_non_numeric_integer_is_malformed_field() {
        let err = normalize_row(&raw(&[("fs_passno", "two")]), &TableSchema::fstab(), 7)
            .unwrap_err();
        assert_eq!(
            err,
            TableError::MalformedField {
                line: 7,
                column: "fs_passno".into(),
                value: "two".into(),
            }
        );
    }

    #[test]
    fn test_empty_integer_value_is_malformed_field() {
        let err = normalize_row(&raw(&[("fs_freq", "")]), &TableSchema::fstab(), 1).unwrap_err();
        assert!(matches!(err, TableError::MalformedField { .. }));
    }

    #[test]
    fn test_options_column_gets_flag_defaults() {
        let row = normalize_row(
            &raw(&[("fs_mntops", "ro,nfsvers=3")]),
            &TableSchema::fstab(),
            1,
        )
        .unwrap();
        let opts = row.options("fs_mntops").unwrap();
        assert_eq!(opts.value("nfsvers"), Some("3"));
        for flag in WELL_KNOWN_MOUNT_FLAGS {
            assert!(opts.contains(flag), "{flag}");
        }
        assert_eq!(opts.get("ro"), Some(&OptionValue::Flag(true)));
        assert_eq!(opts.get("rw"), Some(&OptionValue::Flag(false)));
    }

    #[test]
    fn test_missing_options_column_still_present() {
        let row = normalize_row(&raw(&[("fs_spec", "/dev/sda1")]), &TableSchema::fstab(), 1)
            .unwrap();
        let opts = row.options("fs_mntops").unwrap();
        assert_eq!(opts.len(), WELL_KNOWN_MOUNT_FLAGS.len());
        assert!(opts.iter().all(|(_, v)| *v == OptionValue::Flag(false)));
    }

    #[test]
    fn test_plain_schema_passes_strings_through() {
        let row = normalize_row(&raw(&[("A", "1"), ("B", "x=y")]), &TableSchema::plain(), 1)
            .unwrap();
        assert_eq!(row.text("A"), Some("1"));
        assert_eq!(row.text("B"), Some("x=y"));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_schema_deserializes_with_defaults() {
        let schema: TableSchema =
            serde_json::from_str(r#"{"key_column": "name", "flag_defaults": []}"#).unwrap();
        assert_eq!(schema.key_column.as_deref(), Some("name"));
        assert_eq!(schema.options_column, None);
        assert!(schema.integer_columns.is_empty());
        assert!(schema.flag_defaults.is_empty());
    }
}
