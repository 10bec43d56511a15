//! Message registry: per-locale tables built from layered message files.
//!
//! The registry maps normalized locale codes to message tables. Each table is
//! the merge of up to four source files, lowest to highest priority:
//!
//! 1. base-language defaults (`defaults/en.properties`)
//! 2. region-specific defaults (`defaults/en_us.properties`)
//! 3. base-language overrides (`overrides/en.properties`)
//! 4. region-specific overrides (`overrides/en_us.properties`)
//!
//! Later layers overwrite keys from earlier layers but never remove keys the
//! later layer does not mention. Administrators can therefore override a
//! single key for one region without touching the base-language file or the
//! shipped defaults.
//!
//! A registry is immutable once built. Rebuilding (on reload) produces a new
//! registry value; the resolver swaps it in as a whole.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::locale::LocaleCode;
use crate::properties;

/// Filename extension of message files.
pub const MESSAGE_FILE_EXT: &str = "properties";

/// Messages for a single locale: key to pattern.
#[derive(Debug, Clone, Default)]
pub struct MessageTable {
    patterns: HashMap<String, String>,
}

impl MessageTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a message pattern by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.patterns.get(key).map(String::as_str)
    }

    /// Insert a single pattern, overwriting any existing value.
    pub fn insert(&mut self, key: impl Into<String>, pattern: impl Into<String>) {
        self.patterns.insert(key.into(), pattern.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over all keys in this table.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Apply one layer: every entry overwrites the current value for its key.
    fn apply_layer(&mut self, layer: HashMap<String, String>) {
        self.patterns.extend(layer);
    }
}

/// All loaded locales and their merged message tables.
///
/// Keys are kept sorted so that variant discovery is a deterministic scan.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tables: BTreeMap<LocaleCode, MessageTable>,
}

impl Registry {
    /// Build a registry by scanning two layered source directories.
    ///
    /// A missing directory or file is not an error; it contributes nothing.
    /// A file that exists but cannot be read is skipped with a diagnostic,
    /// and loading continues with the remaining layers and locales.
    pub fn load(defaults_dir: &Path, overrides_dir: &Path) -> Registry {
        let defaults = index_message_files(defaults_dir);
        let overrides = index_message_files(overrides_dir);

        let discovered: BTreeSet<LocaleCode> =
            defaults.keys().chain(overrides.keys()).cloned().collect();

        let mut tables = BTreeMap::new();
        for locale in discovered {
            let mut table = MessageTable::new();
            let base = locale.base();

            merge_layer(&mut table, &defaults, &base);
            if locale != base {
                merge_layer(&mut table, &defaults, &locale);
            }
            merge_layer(&mut table, &overrides, &base);
            if locale != base {
                merge_layer(&mut table, &overrides, &locale);
            }

            debug!(locale = %locale, entries = table.len(), "loaded locale");
            tables.insert(locale, table);
        }

        Registry { tables }
    }

    /// The message table for a locale, if that locale was loaded.
    pub fn table(&self, locale: &LocaleCode) -> Option<&MessageTable> {
        self.tables.get(locale)
    }

    /// The smallest loaded region variant of a base language, if any.
    ///
    /// Requesting `zh` when only `zh_cn` and `zh_tw` are loaded yields
    /// `zh_cn`: the lexicographically first sibling, a deterministic choice.
    pub fn variant_of(&self, base: &LocaleCode) -> Option<&LocaleCode> {
        if base.is_blank() {
            return None;
        }
        let prefix = format!("{base}_");
        // BTreeMap iteration is sorted, so the first prefix match is smallest.
        self.tables
            .keys()
            .find(|code| code.as_str().starts_with(&prefix))
    }

    /// All loaded locale codes, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &LocaleCode> {
        self.tables.keys()
    }

    /// All loaded locales with their tables, sorted by code.
    pub fn iter(&self) -> impl Iterator<Item = (&LocaleCode, &MessageTable)> {
        self.tables.iter()
    }

    /// Number of loaded locales.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no locales were loaded.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn insert_table(&mut self, locale: LocaleCode, table: MessageTable) {
        self.tables.insert(locale, table);
    }
}

/// Merge one source file into a table, if the directory index has it.
fn merge_layer(
    table: &mut MessageTable,
    index: &BTreeMap<LocaleCode, PathBuf>,
    locale: &LocaleCode,
) {
    let Some(path) = index.get(locale) else {
        return;
    };
    match properties::load_file(path) {
        Ok(entries) => table.apply_layer(entries),
        Err(err) => warn!("skipping unreadable message file: {err}"),
    }
}

/// Map message files in a directory to their normalized locale codes.
///
/// Codes come from filenames minus the extension, normalized; `en-US` and
/// `en_us` on disk both index as `en_us`. Anything that normalizes to blank
/// is skipped. If several filenames normalize to the same code, the first in
/// sorted filename order wins (deterministic across platforms).
fn index_message_files(dir: &Path) -> BTreeMap<LocaleCode, PathBuf> {
    let mut index = BTreeMap::new();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        // Absent directory contributes no locales.
        Err(_) => return index,
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(MESSAGE_FILE_EXT)
        })
        .collect();
    paths.sort();

    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let code = LocaleCode::normalize(stem);
        if !code.is_blank() {
            index.entry(code).or_insert(path);
        }
    }
    index
}
