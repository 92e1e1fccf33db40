//! Positional table parsing.
//!
//! A table is a header line followed by data lines. The header names the
//! columns and, through the position of each name, fixes where every column
//! starts. Data lines are cut at those offsets rather than split on
//! whitespace, so a value that contains spaces stays in its column and a
//! line that stops early simply lacks its trailing columns.
//!
//! # Examples
//!
//! ```
//! use mounttab_core::parse_table;
//!
//! let rows = parse_table("A   B   C", ["x   y", "1   2   3"]).unwrap();
//! assert_eq!(rows[0].get("A"), Some("x"));
//! assert_eq!(rows[0].get("B"), Some("y"));
//! assert!(!rows[0].contains("C"));
//! assert_eq!(rows[1].get("C"), Some("3"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::heading::HeadingSpec;

/// How data lines are cut into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Cut each line at the header's character offsets.
    #[default]
    Positional,
    /// Split each line on runs of whitespace into at most as many fields as
    /// the header has columns; the last field keeps the rest of the line.
    ///
    /// Used for files whose columns are not aligned with the header at all.
    Whitespace,
}

/// Column values of one data line, in header order.
///
/// Columns the line did not reach are absent, which is distinct from a
/// column that is present but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    fields: IndexMap<String, String>,
}

impl RawRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Returns the value of `column`, if the line reached it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Returns `true` if `column` is present.
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Number of present columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no column is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl HeadingSpec {
    /// Splits one data line according to `mode`.
    pub fn split_line(&self, line: &str, mode: SplitMode) -> RawRow {
        match mode {
            SplitMode::Positional => self.split_positional(line),
            SplitMode::Whitespace => self.split_whitespace(line),
        }
    }

    fn split_positional(&self, line: &str) -> RawRow {
        let chars: Vec<char> = line.chars().collect();
        let mut row = RawRow::new();

        for (index, column) in self.columns().iter().enumerate() {
            // Offsets increase, so no later column is reachable either.
            if chars.len() <= column.offset {
                break;
            }
            let end = match self.span(index) {
                Some((_, Some(next))) => next.min(chars.len()),
                _ => chars.len(),
            };
            let value: String = chars[column.offset..end].iter().collect();
            row.insert(column.name.as_str(), value.trim());
        }

        row
    }

    fn split_whitespace(&self, line: &str) -> RawRow {
        let mut row = RawRow::new();
        let mut rest = line.trim();
        let last = self.len() - 1;

        for (index, column) in self.columns().iter().enumerate() {
            if rest.is_empty() {
                break;
            }
            if index == last {
                row.insert(column.name.as_str(), rest);
                break;
            }
            match rest.split_once(char::is_whitespace) {
                Some((field, tail)) => {
                    row.insert(column.name.as_str(), field);
                    rest = tail.trim_start();
                }
                None => {
                    row.insert(column.name.as_str(), rest);
                    rest = "";
                }
            }
        }

        row
    }
}

/// Parses data lines against a header using character offsets.
///
/// Every data line yields exactly one [`RawRow`], in input order.
///
/// # Errors
///
/// Returns [`TableError::MalformedHeader`](crate::TableError::MalformedHeader)
/// if `header` has no columns.
pub fn parse_table<I, S>(header: &str, lines: I) -> Result<Vec<RawRow>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_table_with(header, lines, SplitMode::Positional)
}

/// Parses data lines against a header using the given [`SplitMode`].
///
/// # Errors
///
/// Returns [`TableError::MalformedHeader`](crate::TableError::MalformedHeader)
/// if `header` has no columns.
pub fn parse_table_with<I, S>(header: &str, lines: I, mode: SplitMode) -> Result<Vec<RawRow>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let heading = HeadingSpec::from_header(header)?;
    let rows: Vec<RawRow> = lines
        .into_iter()
        .map(|line| heading.split_line(line.as_ref(), mode))
        .collect();
    debug!(columns = heading.len(), rows = rows.len(), mode = ?mode, "Parsed table");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TableError;

    fn fields(row: &RawRow) -> Vec<(&str, &str)> {
        row.iter().collect()
    }

    #[test]
    fn test_short_line_omits_trailing_column() {
        let rows = parse_table("A   B   C", ["x   y"]).unwrap();
        assert_eq!(fields(&rows[0]), vec![("A", "x"), ("B", "y")]);
        assert!(!rows[0].contains("C"));
    }

    #[test]
    fn test_last_column_takes_rest_of_line() {
        let rows = parse_table("NAME  COMMENT", ["foo   has  inner   spacing  "]).unwrap();
        assert_eq!(rows[0].get("COMMENT"), Some("has  inner   spacing"));
    }

    #[test]
    fn test_value_with_spaces_stays_in_its_column() {
        let rows = parse_table("KEY        VALUE", ["two words  x"]).unwrap();
        assert_eq!(rows[0].get("KEY"), Some("two words"));
        assert_eq!(rows[0].get("VALUE"), Some("x"));
    }

    #[test]
    fn test_line_ending_at_column_start_omits_column() {
        // "x   " is 4 characters; B starts at offset 4.
        let rows = parse_table("A   B", ["x   "]).unwrap();
        assert_eq!(fields(&rows[0]), vec![("A", "x")]);
    }

    #[test]
    fn test_reaching_column_with_whitespace_gives_empty_value() {
        let rows = parse_table("A   B   C", ["x        "]).unwrap();
        assert_eq!(rows[0].get("B"), Some(""));
        assert_eq!(rows[0].get("C"), Some(""));
    }

    #[test]
    fn test_offsets_win_over_tokens() {
        // A token straddling a boundary is cut, not re-aligned.
        let rows = parse_table("A   B   C", ["abcdefgh  z"]).unwrap();
        assert_eq!(rows[0].get("A"), Some("abcd"));
        assert_eq!(rows[0].get("B"), Some("efgh"));
        assert_eq!(rows[0].get("C"), Some("z"));
    }

    #[test]
    fn test_multibyte_characters_are_not_split() {
        let rows = parse_table("A  B", ["éé ü"]).unwrap();
        assert_eq!(rows[0].get("A"), Some("éé"));
        assert_eq!(rows[0].get("B"), Some("ü"));
    }

    #[test]
    fn test_one_row_per_data_line() {
        let lines = vec!["a", "", "b   c", "   "];
        let rows = parse_table("X   Y", &lines).unwrap();
        assert_eq!(rows.len(), lines.len());
        assert!(rows[1].is_empty());
        assert_eq!(fields(&rows[3]), vec![("X", "")]);
    }

    #[test]
    fn test_whitespace_mode_ignores_alignment() {
        let header = "A   B   C";
        let rows = parse_table_with(
            header,
            ["UUID=2c839365-37c7 /boot xfs defaults 0 0", "x y"],
            SplitMode::Whitespace,
        )
        .unwrap();
        assert_eq!(rows[0].get("A"), Some("UUID=2c839365-37c7"));
        assert_eq!(rows[0].get("B"), Some("/boot"));
        assert_eq!(rows[0].get("C"), Some("xfs defaults 0 0"));
        assert_eq!(fields(&rows[1]), vec![("A", "x"), ("B", "y")]);
    }

    #[test]
    fn test_empty_header_fails_in_both_modes() {
        for mode in [SplitMode::Positional, SplitMode::Whitespace] {
            let err = parse_table_with("  ", ["x"], mode).unwrap_err();
            assert!(matches!(err, TableError::MalformedHeader { .. }));
        }
    }
}
