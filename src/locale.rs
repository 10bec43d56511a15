//! Locale code type: normalized language / language+region identifiers.
//!
//! All locale strings entering the engine pass through [`LocaleCode::normalize`]
//! exactly once, so every code stored in or compared against the registry is
//! lowercase, underscore-separated, and trimmed. Client locales arrive in many
//! shapes (`en-US`, `EN_us`, ` en_US `); they all collapse to `en_us` here.

use std::fmt;

/// Ultimate fallback language code. The shipped default message files are
/// guaranteed to exist for this language, so resolution can always terminate
/// on it.
pub const FALLBACK_LOCALE: &str = "en";

/// A normalized locale code: `language` or `language_region`.
///
/// Invariants (upheld by construction in [`LocaleCode::normalize`]):
/// - never contains a hyphen
/// - never contains uppercase characters
/// - blank only when the raw input was blank (the blank code is the
///   "no locale" sentinel)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Normalize a raw locale string into its canonical form.
    ///
    /// Total function: blank or whitespace-only input yields the blank
    /// sentinel code; any other input is trimmed, hyphens are replaced with
    /// underscores, and the result is lowercased with Rust's locale-invariant
    /// case mapping (never the process locale).
    pub fn normalize(raw: &str) -> LocaleCode {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return LocaleCode(String::new());
        }
        LocaleCode(trimmed.replace('-', "_").to_lowercase())
    }

    /// The fixed ultimate fallback locale (`en`).
    pub fn fallback() -> LocaleCode {
        LocaleCode(FALLBACK_LOCALE.to_string())
    }

    /// Whether this is the blank "no locale" sentinel.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// The base-language truncation: everything before the first underscore,
    /// or the code itself if it has no region suffix.
    pub fn base(&self) -> LocaleCode {
        match self.0.split_once('_') {
            Some((base, _)) => LocaleCode(base.to_string()),
            None => self.clone(),
        }
    }

    /// Whether the code carries a region suffix (`en_us` does, `en` does not).
    pub fn has_region(&self) -> bool {
        self.0.contains('_')
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Normalization Tests ====================

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(LocaleCode::normalize("EN").as_str(), "en");
        assert_eq!(LocaleCode::normalize("Fr").as_str(), "fr");
    }

    #[test]
    fn test_normalize_replaces_hyphen() {
        assert_eq!(LocaleCode::normalize("en-US").as_str(), "en_us");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(LocaleCode::normalize("  en_US  ").as_str(), "en_us");
    }

    #[test]
    fn test_normalize_equivalent_spellings() {
        let expected = LocaleCode::normalize("en_us");
        assert_eq!(LocaleCode::normalize("en-US"), expected);
        assert_eq!(LocaleCode::normalize("EN_us"), expected);
        assert_eq!(LocaleCode::normalize("en_US"), expected);
    }

    #[test]
    fn test_normalize_blank_is_sentinel() {
        assert!(LocaleCode::normalize("").is_blank());
        assert!(LocaleCode::normalize("   ").is_blank());
        assert!(LocaleCode::normalize("\t\n").is_blank());
    }

    #[test]
    fn test_normalize_nonblank_never_blank() {
        assert!(!LocaleCode::normalize("x").is_blank());
    }

    // ==================== Base Truncation Tests ====================

    #[test]
    fn test_base_strips_region() {
        assert_eq!(LocaleCode::normalize("en_us").base().as_str(), "en");
        assert_eq!(LocaleCode::normalize("zh_cn").base().as_str(), "zh");
    }

    #[test]
    fn test_base_of_bare_language_is_identity() {
        let en = LocaleCode::normalize("en");
        assert_eq!(en.base(), en);
    }

    #[test]
    fn test_base_truncates_at_first_underscore() {
        assert_eq!(LocaleCode::normalize("a_b_c").base().as_str(), "a");
    }

    #[test]
    fn test_has_region() {
        assert!(LocaleCode::normalize("en_us").has_region());
        assert!(!LocaleCode::normalize("en").has_region());
    }

    // ==================== Fallback Constant Tests ====================

    #[test]
    fn test_fallback_constant() {
        assert_eq!(LocaleCode::fallback().as_str(), FALLBACK_LOCALE);
        assert!(!LocaleCode::fallback().has_region());
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in ".{0,32}") {
            let once = LocaleCode::normalize(&raw);
            let twice = LocaleCode::normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalized_has_no_hyphen_or_uppercase(raw in ".{0,32}") {
            let code = LocaleCode::normalize(&raw);
            prop_assert!(!code.as_str().contains('-'));
            prop_assert!(!code.as_str().chars().any(|c| c.is_uppercase()));
        }

        #[test]
        fn prop_hyphen_and_underscore_agree(
            lang in "[a-zA-Z]{2,3}",
            region in "[a-zA-Z]{2}",
        ) {
            let hyphenated = format!("{lang}-{region}");
            let underscored = format!("{lang}_{region}");
            prop_assert_eq!(
                LocaleCode::normalize(&hyphenated),
                LocaleCode::normalize(&underscored)
            );
        }
    }
}
