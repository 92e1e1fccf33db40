//! Parser configuration.
//!
//! Describes how a table file is read: the synthetic header that fixes the
//! column layout, how data lines are split, which columns are typed, and the
//! comment character. Every top-level field is optional in YAML and falls
//! back to the `/etc/fstab` configuration. A `schema` that is given starts
//! from an untyped schema, so only the columns it names are typed.
//!
//! # Example YAML
//!
//! ```yaml
//! header: "NAME      SIZE   FLAGS"
//! split_mode: positional
//! comment_char: ";"
//! schema:
//!   integer_columns: [SIZE]
//!   options_column: FLAGS
//!   key_column: NAME
//!   flag_defaults: [ro, rw]
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use mounttab_core::{FS_HEADINGS, HeadingSpec, SplitMode, TableSchema};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SourceError};
use crate::filter::COMMENT_CHAR;

/// How to turn file content into a [`Table`](mounttab_core::Table).
///
/// # Examples
///
/// ```
/// use mounttab_source::ParserConfig;
/// use mounttab_core::SplitMode;
///
/// let yaml = "
/// header: 'A   B'
/// split_mode: positional
/// schema: { integer_columns: [B], key_column: A }
/// ";
/// let config = ParserConfig::from_yaml_str(yaml).unwrap();
/// assert_eq!(config.header, "A   B");
/// assert_eq!(config.schema.key_column.as_deref(), Some("A"));
/// assert_eq!(config.split_mode, SplitMode::Positional);
/// // unspecified fields keep the fstab defaults
/// assert_eq!(config.comment_char, '#');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Header line injected before the data lines.
    pub header: String,
    /// How data lines are cut into columns.
    pub split_mode: SplitMode,
    /// Typed columns and key column.
    pub schema: TableSchema,
    /// Character starting a comment.
    pub comment_char: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::fstab()
    }
}

impl ParserConfig {
    /// Configuration for `/etc/fstab`.
    pub fn fstab() -> Self {
        Self {
            header: FS_HEADINGS.to_string(),
            split_mode: SplitMode::Whitespace,
            schema: TableSchema::fstab(),
            comment_char: COMMENT_CHAR,
        }
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](SourceError::Io) if the file cannot be read,
    /// [`YamlError`](SourceError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](SourceError::InvalidConfig) if the schema refers to
    /// columns the header does not define.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| SourceError::io(path, e))?;
        let config: Self = serde_yaml::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus I/O.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](SourceError::Io) if the file cannot be written, or
    /// [`YamlError`](SourceError::YamlError) if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| SourceError::io(path, e))?;
        serde_yaml::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Checks that every column named by the schema exists in the header and
    /// that the key column is not the options column.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](SourceError::InvalidConfig) naming the first
    /// problem found.
    pub fn validate(&self) -> Result<()> {
        let heading = HeadingSpec::from_header(&self.header)
            .map_err(|_| SourceError::InvalidConfig("header defines no columns".to_string()))?;
        let known: Vec<&str> = heading.names().collect();

        let referenced = self
            .schema
            .integer_columns
            .iter()
            .map(|c| ("integer column", c))
            .chain(self.schema.options_column.iter().map(|c| ("options column", c)))
            .chain(self.schema.key_column.iter().map(|c| ("key column", c)));

        for (role, column) in referenced {
            if !known.contains(&column.as_str()) {
                return Err(SourceError::InvalidConfig(format!(
                    "{role} '{column}' is not in the header"
                )));
            }
        }

        if let (Some(key), Some(options)) = (&self.schema.key_column, &self.schema.options_column) {
            if key == options {
                return Err(SourceError::InvalidConfig(format!(
                    "key column '{key}' cannot also be the options column"
                )));
            }
        }
        Ok(())
    }
}
