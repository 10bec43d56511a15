//! Translation coverage and placeholder-consistency validation.
//!
//! Purely diagnostic: the report never influences resolution. It answers two
//! questions administrators ask after editing message files: which keys a
//! locale is missing relative to the fallback language, and which patterns
//! reference a different set of positional arguments than the fallback
//! pattern does (a common source of formatting failures at runtime).

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::locale::LocaleCode;
use crate::registry::Registry;

// Placeholder extraction pattern (cached for reuse across reports).
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{(\d+)\}").expect("valid regex"))
}

/// Coverage findings for a single locale.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleCoverage {
    /// The locale code this entry describes.
    pub locale: String,

    /// Number of message keys the locale's merged table carries.
    pub entries: usize,

    /// Keys present in the fallback locale's table but absent here.
    pub missing_keys: Vec<String>,

    /// Keys whose placeholder indices differ from the fallback pattern's.
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
}

/// A pattern whose `{n}` indices disagree with the fallback pattern.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceholderMismatch {
    pub key: String,
    pub expected: Vec<usize>,
    pub found: Vec<usize>,
}

/// Coverage report across all loaded locales.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    /// The locale the other locales are measured against.
    pub fallback_locale: String,

    /// Per-locale findings, sorted by locale code.
    pub locales: Vec<LocaleCoverage>,
}

impl CoverageReport {
    /// Whether every locale covers every fallback key with consistent
    /// placeholders.
    pub fn is_complete(&self) -> bool {
        self.locales
            .iter()
            .all(|l| l.missing_keys.is_empty() && l.placeholder_mismatches.is_empty())
    }
}

/// Validate a registry against its fallback locale's table.
///
/// Locales are compared key-by-key with the fallback table; a registry with
/// no fallback table produces a report with no baseline findings (entries
/// counts only).
pub fn validate(registry: &Registry) -> CoverageReport {
    let fallback = LocaleCode::fallback();
    let baseline = registry.table(&fallback);

    let mut locales = Vec::new();
    for (code, table) in registry.iter() {
        let mut missing_keys = Vec::new();
        let mut placeholder_mismatches = Vec::new();

        if let Some(baseline) = baseline {
            for key in baseline.keys() {
                let Some(pattern) = table.get(key) else {
                    if *code != fallback {
                        missing_keys.push(key.to_string());
                    }
                    continue;
                };
                let expected = placeholder_indices(baseline.get(key).unwrap_or_default());
                let found = placeholder_indices(pattern);
                if expected != found {
                    placeholder_mismatches.push(PlaceholderMismatch {
                        key: key.to_string(),
                        expected: expected.into_iter().collect(),
                        found: found.into_iter().collect(),
                    });
                }
            }
            missing_keys.sort();
            placeholder_mismatches.sort_by(|a, b| a.key.cmp(&b.key));
        }

        locales.push(LocaleCoverage {
            locale: code.to_string(),
            entries: table.len(),
            missing_keys,
            placeholder_mismatches,
        });
    }

    CoverageReport {
        fallback_locale: fallback.to_string(),
        locales,
    }
}

/// The set of positional indices a pattern references.
fn placeholder_indices(pattern: &str) -> BTreeSet<usize> {
    placeholder_regex()
        .captures_iter(pattern)
        .filter_map(|cap| cap[1].parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MessageTable;

    fn registry_with(tables: &[(&str, &[(&str, &str)])]) -> Registry {
        let mut registry = Registry::default();
        for (code, entries) in tables {
            let mut table = MessageTable::new();
            for (key, pattern) in *entries {
                table.insert(*key, *pattern);
            }
            registry.insert_table(LocaleCode::normalize(code), table);
        }
        registry
    }

    // ==================== Coverage Tests ====================

    #[test]
    fn test_complete_registry_is_complete() {
        let registry = registry_with(&[
            ("en", &[("greeting", "Hello, {0}!")]),
            ("es", &[("greeting", "¡Hola, {0}!")]),
        ]);
        let report = validate(&registry);
        assert!(report.is_complete());
        assert_eq!(report.fallback_locale, "en");
    }

    #[test]
    fn test_missing_key_is_reported() {
        let registry = registry_with(&[
            ("en", &[("greeting", "hi"), ("farewell", "bye")]),
            ("fr", &[("greeting", "salut")]),
        ]);
        let report = validate(&registry);
        let fr = report.locales.iter().find(|l| l.locale == "fr").unwrap();
        assert_eq!(fr.missing_keys, vec!["farewell"]);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_fallback_locale_reports_no_missing_keys() {
        let registry = registry_with(&[("en", &[("k", "v")])]);
        let report = validate(&registry);
        let en = report.locales.iter().find(|l| l.locale == "en").unwrap();
        assert!(en.missing_keys.is_empty());
    }

    #[test]
    fn test_placeholder_mismatch_is_reported() {
        let registry = registry_with(&[
            ("en", &[("k", "{0} joined {1}")]),
            ("de", &[("k", "{0} ist beigetreten")]),
        ]);
        let report = validate(&registry);
        let de = report.locales.iter().find(|l| l.locale == "de").unwrap();
        assert_eq!(de.placeholder_mismatches.len(), 1);
        assert_eq!(de.placeholder_mismatches[0].expected, vec![0, 1]);
        assert_eq!(de.placeholder_mismatches[0].found, vec![0]);
    }

    #[test]
    fn test_placeholder_order_is_irrelevant() {
        let registry = registry_with(&[
            ("en", &[("k", "{0} and {1}")]),
            ("ja", &[("k", "{1}と{0}")]),
        ]);
        let report = validate(&registry);
        assert!(report.is_complete());
    }

    #[test]
    fn test_no_fallback_table_yields_counts_only() {
        let registry = registry_with(&[("fr", &[("k", "v")])]);
        let report = validate(&registry);
        assert_eq!(report.locales.len(), 1);
        assert_eq!(report.locales[0].entries, 1);
        assert!(report.is_complete());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let registry = registry_with(&[("en", &[("k", "{0}")])]);
        let report = validate(&registry);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"fallback_locale\":\"en\""));
    }
}
