//! Content ingestion.
//!
//! Reads raw content from a [`TableSource`], filters it down to active lines,
//! and hands those to the core parser together with the configured header.
//!
//! ```no_run
//! use mounttab_source::{ParserConfig, TableSource, load_fstab, load_table};
//!
//! let fstab = load_fstab("/etc/fstab").unwrap();
//! for entry in fstab.iter() {
//!     println!("{} on {:?}", entry.fs_spec(), entry.fs_file());
//! }
//!
//! let config = ParserConfig::load("crypttab.yml").unwrap();
//! let table = load_table(&TableSource::file("/etc/crypttab"), &config).unwrap();
//! println!("{} rows", table.len());
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use mounttab_core::{Fstab, Table};
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{Result, SourceError};
use crate::filter::{active_lines, active_lines_with};

/// Where table content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// A file on disk.
    File(PathBuf),
    /// Content already held in memory.
    Inline(String),
}

impl TableSource {
    /// A file source.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        TableSource::File(path.into())
    }

    /// An in-memory source.
    pub fn inline(content: impl Into<String>) -> Self {
        TableSource::Inline(content.into())
    }

    /// Reads the whole content of this source.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](SourceError::Io) if the file cannot be read.
    pub fn read_content(&self) -> Result<String> {
        match self {
            TableSource::File(path) => {
                debug!(path = %path.display(), "Reading table file");
                std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))
            }
            TableSource::Inline(content) => Ok(content.clone()),
        }
    }
}

/// Reads `source` and parses it with `config`.
///
/// # Errors
///
/// Returns [`Io`](SourceError::Io) if the content cannot be read and
/// [`Table`](SourceError::Table) if it cannot be parsed.
pub fn load_table(source: &TableSource, config: &ParserConfig) -> Result<Table> {
    let content = source.read_content()?;
    parse_content(&content, config)
}

/// Parses already-read content with `config`.
///
/// # Errors
///
/// Returns [`Table`](SourceError::Table) if the content cannot be parsed.
pub fn parse_content(content: &str, config: &ParserConfig) -> Result<Table> {
    let lines = active_lines_with(content, config.comment_char);
    debug!(active_lines = lines.len(), mode = ?config.split_mode, "Parsing table content");
    let table = Table::parse_with(&config.header, lines, &config.schema, config.split_mode)?;
    Ok(table)
}

/// Reads everything from `reader` and parses it with `config`.
///
/// # Errors
///
/// Returns [`Io`](SourceError::Io) (with `<reader>` as the path) if reading
/// fails, and [`Table`](SourceError::Table) if parsing fails.
pub fn read_table(mut reader: impl Read, config: &ParserConfig) -> Result<Table> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| SourceError::io("<reader>", e))?;
    parse_content(&content, config)
}

/// Parses `/etc/fstab` content.
///
/// # Errors
///
/// Returns [`Table`](SourceError::Table) if a numeric field is malformed.
///
/// # Examples
///
/// ```
/// use mounttab_source::parse_fstab;
///
/// let fstab = parse_fstab("# comment\n/dev/sda1 /boot xfs ro 1 2\n").unwrap();
/// let boot = fstab.mounted_on("/boot").unwrap();
/// assert!(boot.is_read_only());
/// assert_eq!(boot.fs_passno(), 2);
/// ```
pub fn parse_fstab(content: &str) -> Result<Fstab> {
    let lines = active_lines(content);
    debug!(active_lines = lines.len(), "Parsing fstab content");
    Ok(Fstab::parse_lines(lines)?)
}

/// Reads and parses an fstab file.
///
/// # Errors
///
/// Returns [`Io`](SourceError::Io) if the file cannot be read and
/// [`Table`](SourceError::Table) if it cannot be parsed.
pub fn load_fstab(path: impl AsRef<Path>) -> Result<Fstab> {
    let content = TableSource::file(path.as_ref()).read_content()?;
    parse_fstab(&content)
}

#[cfg(test)]
mod tests {
    use mounttab_core::TableError;

    use super::*;

    #[test]
    fn test_inline_source_returns_content() {
        let source = TableSource::inline("a b");
        assert_eq!(source.read_content().unwrap(), "a b");
    }

    #[test]
    fn test_parse_content_uses_config_comment_char() {
        let config = ParserConfig::from_yaml_str(
            "header: 'NAME  VALUE'\ncomment_char: ';'\nschema: { integer_columns: [], options_column: null, key_column: NAME }\nsplit_mode: whitespace\n",
        )
        .unwrap();
        let table = parse_content("; header comment\nalpha 1 ; trailing\n# not a comment\n", &config).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("alpha").unwrap().text("VALUE"), Some("1"));
        assert_eq!(table.get("#").unwrap().text("VALUE"), Some("not a comment"));
    }

    #[test]
    fn test_parse_fstab_ignores_comments_and_blank_lines() {
        let content = "#\n# /etc/fstab\n#\n\n/dev/sda1 / xfs defaults 0 0\n\n/dev/sda2 swap swap defaults 0 0\n";
        let fstab = parse_fstab(content).unwrap();
        assert_eq!(fstab.len(), 2);
        assert_eq!(fstab.mount_points(), vec!["/", "swap"]);
    }

    #[test]
    fn test_parse_fstab_propagates_malformed_field() {
        let err = parse_fstab("/dev/sda1 / xfs defaults zero 0\n").unwrap_err();
        assert!(matches!(
            err,
            SourceError::Table(TableError::MalformedField { line: 1, .. })
        ));
    }

    #[test]
    fn test_read_table_from_reader() {
        let table = read_table("/dev/sda1 / xfs ro\n".as_bytes(), &ParserConfig::fstab()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("/").unwrap().flag("ro"));
    }
}
