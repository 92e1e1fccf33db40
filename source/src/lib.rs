//! Content ingestion and configuration for mount tables.
//!
//! This crate sits between raw files and the pure parser in
//! `mounttab-core`: it strips comments and blank lines, reads content from
//! files, readers or strings, and loads the YAML [`ParserConfig`] that tells
//! the parser which header and schema to use.
//!
//! # Quick start
//!
//! ```no_run
//! use mounttab_source::{ParserConfig, TableSource, load_fstab, load_table};
//!
//! // Typed /etc/fstab access
//! let fstab = load_fstab("/etc/fstab").unwrap();
//! if let Some(root) = fstab.mounted_on("/") {
//!     println!("root is {} ({:?})", root.fs_spec(), root.fs_vfstype());
//! }
//!
//! // Any table shape, described in YAML
//! let config = ParserConfig::load("layout.yml").unwrap();
//! let table = load_table(&TableSource::file("data.tab"), &config).unwrap();
//! println!("{} rows", table.len());
//! ```

mod config;
mod error;
mod filter;
mod loader;

pub use config::ParserConfig;
pub use error::{Result, SourceError};
pub use filter::{COMMENT_CHAR, active_lines, active_lines_with};
pub use loader::{TableSource, load_fstab, load_table, parse_content, parse_fstab, read_table};
