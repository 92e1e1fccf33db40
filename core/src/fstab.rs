//! Typed view of `/etc/fstab`.
//!
//! The file has no header of its own, so [`FS_HEADINGS`] is injected as the
//! header line. Column names follow `fstab(5)`:
//!
//! - `fs_spec` - the device to mount
//! - `fs_file` - the mount point
//! - `fs_vfstype` - the filesystem type
//! - `fs_mntops` - mount options, decoded into an [`OptionMap`]
//! - `fs_freq` - dump frequency, `0` when absent
//! - `fs_passno` - fsck pass number, `0` when absent
//!
//! # Examples
//!
//! ```
//! use mounttab_core::{Fstab, MountFlag};
//!
//! let fstab = Fstab::parse_lines([
//!     "/dev/mapper/rhel-root /      xfs defaults 0 0",
//!     "/dev/sdd1             /data3 xfs rw,relatime,seclabel 0 0",
//! ])
//! .unwrap();
//!
//! assert_eq!(fstab.len(), 2);
//! let data = fstab.mounted_on("/data3").unwrap();
//! assert_eq!(data.fs_spec(), "/dev/sdd1");
//! assert!(data.flag(MountFlag::Relatime));
//! assert!(!data.flag(MountFlag::Ro));
//! ```

use std::sync::LazyLock;

use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::flags::MountFlag;
use crate::normalize::{NormalizedRow, TableSchema};
use crate::options::OptionMap;
use crate::parser::SplitMode;
use crate::table::Table;

/// Synthetic header line laid out like a typical fstab.
pub const FS_HEADINGS: &str = "fs_spec                               fs_file                 fs_vfstype fs_mntops    fs_freq fs_passno";

static NO_OPTIONS: LazyLock<OptionMap> = LazyLock::new(OptionMap::new);

/// Parsed `/etc/fstab`, keyed by mount point.
#[derive(Debug, Clone)]
pub struct Fstab {
    table: Table,
}

impl Fstab {
    /// Parses comment-free, non-blank fstab lines.
    ///
    /// Fields are split on whitespace because real fstab files are not
    /// aligned with [`FS_HEADINGS`].
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MalformedField`](crate::TableError::MalformedField)
    /// if `fs_freq` or `fs_passno` is not an integer.
    pub fn parse_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = Table::parse_with(
            FS_HEADINGS,
            lines,
            &TableSchema::fstab(),
            SplitMode::Whitespace,
        )?;
        Ok(Self { table })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterates entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = FstabEntry<'_>> {
        self.table.iter().map(FstabEntry::new)
    }

    /// Returns the entry mounted on `path`; the last one if several are.
    pub fn mounted_on(&self, path: &str) -> Option<FstabEntry<'_>> {
        self.table.get(path).map(FstabEntry::new)
    }

    /// Mount points in file order.
    pub fn mount_points(&self) -> Vec<&str> {
        self.table.keys()
    }

    /// The underlying generic table.
    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl Serialize for Fstab {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.table.rows())
    }
}

/// One fstab line.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct FstabEntry<'a> {
    row: &'a NormalizedRow,
}

impl<'a> FstabEntry<'a> {
    fn new(row: &'a NormalizedRow) -> Self {
        Self { row }
    }

    /// The device or remote filesystem to mount.
    pub fn fs_spec(&self) -> &'a str {
        self.row.text("fs_spec").unwrap_or_default()
    }

    /// The mount point, if the line has one.
    pub fn fs_file(&self) -> Option<&'a str> {
        self.row.text("fs_file")
    }

    /// The filesystem type, if the line has one.
    pub fn fs_vfstype(&self) -> Option<&'a str> {
        self.row.text("fs_vfstype")
    }

    /// Mount options, well-known flags included.
    pub fn fs_mntops(&self) -> &'a OptionMap {
        self.row
            .options("fs_mntops")
            .unwrap_or_else(|| &*NO_OPTIONS)
    }

    /// Dump frequency.
    pub fn fs_freq(&self) -> i64 {
        self.row.integer("fs_freq").unwrap_or(0)
    }

    /// fsck pass number.
    pub fn fs_passno(&self) -> i64 {
        self.row.integer("fs_passno").unwrap_or(0)
    }

    /// Returns `true` if the well-known `flag` is set.
    pub fn flag(&self, flag: MountFlag) -> bool {
        self.fs_mntops().flag(flag.as_str())
    }

    /// Returns `true` if option `name` is set, well-known or not.
    pub fn has_option(&self, name: &str) -> bool {
        self.fs_mntops().flag(name)
    }

    /// Returns the value of a `key=value` option.
    pub fn option_value(&self, name: &str) -> Option<&'a str> {
        self.fs_mntops().value(name)
    }

    /// Returns `true` if mounted read-only.
    pub fn is_read_only(&self) -> bool {
        self.flag(MountFlag::Ro)
    }

    /// Returns `true` if explicitly mounted read-write.
    pub fn is_read_write(&self) -> bool {
        self.flag(MountFlag::Rw)
    }

    /// The underlying normalized row.
    pub fn row(&self) -> &'a NormalizedRow {
        self.row
    }
}
