//! Positional table parsing and option-list decoding.
//!
//! This crate turns header-aligned, whitespace-delimited configuration tables
//! (the `/etc/fstab` shape) into typed, queryable rows:
//!
//! - [`parse_table`] — cut data lines into [`RawRow`]s at the character
//!   offsets of a header line, tolerating short and ragged lines.
//! - [`decode_options`] — turn `rw,nfsvers=3` into an [`OptionMap`].
//! - [`normalize_row`] — apply a [`TableSchema`]: integer columns, the
//!   options column, and the [well-known flag](WELL_KNOWN_MOUNT_FLAGS)
//!   defaults.
//! - [`Table`] — normalized rows plus a lookup index on a key column.
//! - [`Fstab`] — typed accessors for `/etc/fstab` on top of [`Table`].
//!
//! Parsing is a pure function of its input. Reading files and stripping
//! comments is done by the caller (see the `mounttab-source` crate).
//!
//! # Example
//!
//! ```
//! use mounttab_core::*;
//!
//! let schema = TableSchema::fstab();
//! let table = Table::parse(
//!     FS_HEADINGS,
//!     ["/dev/sda1                             /boot                   xfs        ro,nfsvers=3 1"],
//!     &schema,
//! )
//! .unwrap();
//!
//! let boot = table.get("/boot").unwrap();
//! assert_eq!(boot.text("fs_spec"), Some("/dev/sda1"));
//! assert_eq!(boot.integer("fs_freq"), Some(1));
//! assert_eq!(boot.integer("fs_passno"), Some(0));
//!
//! let opts = boot.options("fs_mntops").unwrap();
//! assert!(opts.flag("ro"));
//! assert!(!opts.flag("rw"));
//! assert_eq!(opts.value("nfsvers"), Some("3"));
//! ```

mod error;
mod flags;
mod fstab;
mod heading;
mod normalize;
mod options;
mod parser;
mod table;

pub use error::{Result, TableError};
pub use flags::{MountFlag, UnknownMountFlag, WELL_KNOWN_MOUNT_FLAGS, well_known_mount_flags};
pub use fstab::{FS_HEADINGS, Fstab, FstabEntry};
pub use heading::{HeadingColumn, HeadingSpec};
pub use normalize::{FieldValue, NormalizedRow, TableSchema, normalize_row};
pub use options::{
    OptionListDecoder, OptionMap, OptionValue, decode_options, encode_options,
};
pub use parser::{RawRow, SplitMode, parse_table, parse_table_with};
pub use table::Table;
