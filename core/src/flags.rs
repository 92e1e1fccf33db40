//! Well-known mount flags.
//!
//! These flags are guaranteed to be present in every decoded mount option
//! map so that callers can query them without checking for existence first.
//! The `rq`, `sw` and `xx` entries are not documented in `mount(8)` but are
//! still found in older fstab files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flag names defaulted to `false` in every mount option map, in table order.
pub const WELL_KNOWN_MOUNT_FLAGS: &[&str] = &[
    "rw", "rq", "ro", "sw", "xx", "relatime", "seclabel", "attr2", "inode64", "noquota",
];

/// A well-known mount flag.
///
/// # Examples
///
/// ```
/// use mounttab_core::MountFlag;
///
/// let flag: MountFlag = "relatime".parse().unwrap();
/// assert_eq!(flag, MountFlag::Relatime);
/// assert_eq!(flag.as_str(), "relatime");
/// assert!("bogus".parse::<MountFlag>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountFlag {
    /// Read-write.
    Rw,
    /// Read-quota (legacy).
    Rq,
    /// Read-only.
    Ro,
    /// Swap entry (legacy).
    Sw,
    /// Ignore entry (legacy).
    Xx,
    /// Relative access-time updates.
    Relatime,
    /// SELinux security labels.
    Seclabel,
    /// XFS extended attribute format v2.
    Attr2,
    /// XFS 64-bit inode numbers.
    Inode64,
    /// Quota accounting disabled.
    Noquota,
}

impl MountFlag {
    /// All well-known flags, in the same order as [`WELL_KNOWN_MOUNT_FLAGS`].
    pub const ALL: [MountFlag; 10] = [
        MountFlag::Rw,
        MountFlag::Rq,
        MountFlag::Ro,
        MountFlag::Sw,
        MountFlag::Xx,
        MountFlag::Relatime,
        MountFlag::Seclabel,
        MountFlag::Attr2,
        MountFlag::Inode64,
        MountFlag::Noquota,
    ];

    /// Returns the option token for this flag.
    pub fn as_str(self) -> &'static str {
        match self {
            MountFlag::Rw => "rw",
            MountFlag::Rq => "rq",
            MountFlag::Ro => "ro",
            MountFlag::Sw => "sw",
            MountFlag::Xx => "xx",
            MountFlag::Relatime => "relatime",
            MountFlag::Seclabel => "seclabel",
            MountFlag::Attr2 => "attr2",
            MountFlag::Inode64 => "inode64",
            MountFlag::Noquota => "noquota",
        }
    }
}

impl fmt::Display for MountFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a name that is not a well-known mount flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mount flag: {0}")]
pub struct UnknownMountFlag(pub String);

impl FromStr for MountFlag {
    type Err = UnknownMountFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MountFlag::ALL
            .iter()
            .copied()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| UnknownMountFlag(s.to_string()))
    }
}

/// Returns the well-known mount flags as owned strings.
///
/// Used as the default flag set of [`TableSchema::fstab`](crate::TableSchema::fstab).
pub fn well_known_mount_flags() -> Vec<String> {
    WELL_KNOWN_MOUNT_FLAGS.iter().map(|f| f.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_constant_table() {
        let names: Vec<&str> = MountFlag::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, WELL_KNOWN_MOUNT_FLAGS);
    }

    #[test]
    fn test_from_str_roundtrips_every_flag() {
        for flag in MountFlag::ALL {
            assert_eq!(flag.as_str().parse::<MountFlag>(), Ok(flag));
        }
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert_eq!(
            "defaults".parse::<MountFlag>(),
            Err(UnknownMountFlag("defaults".to_string()))
        );
    }
}
