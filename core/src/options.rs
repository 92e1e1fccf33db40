//! Option-list decoding.
//!
//! Turns a delimited option string such as
//! `rw,relatime,nfsvers=3,rsize=32768` into an [`OptionMap`]. Bare tokens map
//! to [`OptionValue::Flag`]`(true)`; `key=value` tokens are split on the
//! first separator only, so values may themselves contain `=`.
//!
//! # Examples
//!
//! ```
//! use mounttab_core::{OptionValue, decode_options};
//!
//! let opts = decode_options("ro,nfsvers=3,context=a=b");
//! assert!(opts.flag("ro"));
//! assert_eq!(opts.value("nfsvers"), Some("3"));
//! assert_eq!(opts.get("context"), Some(&OptionValue::Value("a=b".into())));
//! assert!(decode_options("").is_empty());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of a single decoded option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Bare option (`noatime`), or a defaulted well-known flag (`false`).
    Flag(bool),
    /// Explicit `key=value` option.
    Value(String),
}

impl OptionValue {
    /// Returns `true` for a set flag and for any explicit value.
    pub fn is_set(&self) -> bool {
        match self {
            OptionValue::Flag(set) => *set,
            OptionValue::Value(_) => true,
        }
    }

    /// Returns the explicit value, if this is a `key=value` option.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Flag(_) => None,
            OptionValue::Value(v) => Some(v),
        }
    }
}

/// Mapping from option name to value.
///
/// Keeps source token order, with defaulted flags appended after the decoded
/// tokens. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMap {
    entries: IndexMap<String, OptionValue>,
}

impl OptionMap {
    /// Creates an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an option, replacing (but keeping the position of) any
    /// previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) -> Option<OptionValue> {
        self.entries.insert(name.into(), value)
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    /// Returns `true` if an entry named `name` exists, set or not.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns `true` if `name` is present and set.
    ///
    /// Absent options and defaulted flags both report `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(OptionValue::is_set)
    }

    /// Returns the explicit value of a `key=value` option.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(OptionValue::as_str)
    }

    /// Adds every flag in `flags` that is not already present, as `false`.
    pub fn with_defaults<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for flag in flags {
            let flag = flag.as_ref();
            if !self.entries.contains_key(flag) {
                self.entries
                    .insert(flag.to_string(), OptionValue::Flag(false));
            }
        }
        self
    }

    /// Number of entries, defaulted flags included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, OptionValue> {
        self.entries.iter()
    }

    /// Iterates option names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a OptionMap {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = indexmap::map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for OptionMap {
    fn from_iter<T: IntoIterator<Item = (K, OptionValue)>>(iter: T) -> Self {
        let mut map = OptionMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Decoder for delimited option lists.
///
/// The default decoder splits tokens on `,` and keys from values on `=`,
/// which is the `fs_mntops` convention. Other separators can be configured
/// for formats that reuse the same shape.
///
/// # Examples
///
/// ```
/// use mounttab_core::OptionListDecoder;
///
/// let decoder = OptionListDecoder::new()
///     .with_token_separator(';')
///     .with_kv_separator(':');
/// let opts = decoder.decode("verbose; level:3");
/// assert!(opts.flag("verbose"));
/// assert_eq!(opts.value("level"), Some("3"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionListDecoder {
    token_separator: char,
    kv_separator: Option<char>,
}

impl Default for OptionListDecoder {
    fn default() -> Self {
        Self {
            token_separator: ',',
            kv_separator: Some('='),
        }
    }
}

impl OptionListDecoder {
    /// Creates a decoder with the default `,` / `=` separators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the separator between tokens.
    pub fn with_token_separator(mut self, separator: char) -> Self {
        self.token_separator = separator;
        self
    }

    /// Sets the separator between a key and its value.
    pub fn with_kv_separator(mut self, separator: char) -> Self {
        self.kv_separator = Some(separator);
        self
    }

    /// Treats every token as a bare flag, even if it contains `=`.
    pub fn without_kv_separator(mut self) -> Self {
        self.kv_separator = None;
        self
    }

    /// Decodes `input` into an option map.
    ///
    /// Tokens are trimmed; empty tokens are skipped. When a key appears more
    /// than once the last occurrence wins.
    pub fn decode(&self, input: &str) -> OptionMap {
        let mut map = OptionMap::new();
        for token in input.split(self.token_separator) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match self.kv_separator.and_then(|sep| token.split_once(sep)) {
                Some((key, value)) => map.insert(key, OptionValue::Value(value.to_string())),
                None => map.insert(token, OptionValue::Flag(true)),
            };
        }
        map
    }

    /// Encodes `options` back into a delimited string.
    ///
    /// Unset flags are omitted, so defaulted well-known flags do not leak
    /// into the output.
    pub fn encode(&self, options: &OptionMap) -> String {
        let sep = self.kv_separator.unwrap_or('=');
        let tokens: Vec<String> = options
            .iter()
            .filter_map(|(name, value)| match value {
                OptionValue::Flag(true) => Some(name.clone()),
                OptionValue::Flag(false) => None,
                OptionValue::Value(v) => Some(format!("{name}{sep}{v}")),
            })
            .collect();
        tokens.join(&self.token_separator.to_string())
    }
}

/// Decodes a comma-separated option list with the default separators.
pub fn decode_options(input: &str) -> OptionMap {
    OptionListDecoder::default().decode(input)
}

/// Encodes an option map as a comma-separated option list.
pub fn encode_options(options: &OptionMap) -> String {
    OptionListDecoder::default().encode(options)
}
