//! Column layout derived from a header line.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// A named column and the character offset at which it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingColumn {
    /// Column name, as written in the header.
    pub name: String,
    /// Character (not byte) offset of the name within the header line.
    pub offset: usize,
}

/// Ordered column layout of a positional table.
///
/// Offsets are strictly increasing. Each column spans from its own offset to
/// the next column's offset; the last column runs to the end of the line.
///
/// # Examples
///
/// ```
/// use mounttab_core::HeadingSpec;
///
/// let spec = HeadingSpec::from_header("A   B   C").unwrap();
/// assert_eq!(spec.names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
/// assert_eq!(spec.columns()[2].offset, 8);
/// assert_eq!(spec.span(1), Some((4, Some(8))));
/// assert_eq!(spec.span(2), Some((8, None)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingSpec {
    columns: Vec<HeadingColumn>,
}

impl HeadingSpec {
    /// Tokenizes `header` on runs of whitespace, remembering where each token
    /// starts.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MalformedHeader`] if the header has no tokens.
    pub fn from_header(header: &str) -> Result<Self> {
        let mut columns = Vec::new();
        let mut name = String::new();
        let mut start: Option<usize> = None;

        for (pos, ch) in header.chars().enumerate() {
            if ch.is_whitespace() {
                if let Some(offset) = start.take() {
                    columns.push(HeadingColumn {
                        name: std::mem::take(&mut name),
                        offset,
                    });
                }
            } else {
                start.get_or_insert(pos);
                name.push(ch);
            }
        }
        if let Some(offset) = start {
            columns.push(HeadingColumn { name, offset });
        }

        if columns.is_empty() {
            return Err(TableError::MalformedHeader {
                header: header.to_string(),
            });
        }
        Ok(Self { columns })
    }

    /// Columns in header order.
    pub fn columns(&self) -> &[HeadingColumn] {
        &self.columns
    }

    /// Column names in header order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of columns. Never zero.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`; a heading spec has at least one column.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Start offset and exclusive end offset of column `index`.
    ///
    /// The end is `None` for the last column.
    pub fn span(&self, index: usize) -> Option<(usize, Option<usize>)> {
        let column = self.columns.get(index)?;
        let end = self.columns.get(index + 1).map(|next| next.offset);
        Some((column.offset, end))
    }
}
