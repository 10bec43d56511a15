//! Fallback chain construction.
//!
//! A resolution call probes locales in a fixed order: the requested locale,
//! its base language, the configured default locale, its base language, and
//! finally the engine-wide fallback language. The chain is recomputed per
//! call (it depends only on its two inputs, never on registry state) and is
//! cheap: at most five candidates.

use crate::locale::LocaleCode;

/// Build the ordered, deduplicated candidate list for one resolution.
///
/// Insertion order is preserved, duplicates are collapsed to their first
/// occurrence, and blank codes are never inserted. The result always ends
/// with (or is exactly) the ultimate fallback locale, so it is never empty.
pub fn fallback_chain(requested: &LocaleCode, configured_default: &LocaleCode) -> Vec<LocaleCode> {
    fn push(chain: &mut Vec<LocaleCode>, code: LocaleCode) {
        if !code.is_blank() && !chain.contains(&code) {
            chain.push(code);
        }
    }

    let mut chain: Vec<LocaleCode> = Vec::with_capacity(5);
    if !requested.is_blank() {
        push(&mut chain, requested.clone());
        push(&mut chain, requested.base());
    }
    if !configured_default.is_blank() {
        push(&mut chain, configured_default.clone());
        push(&mut chain, configured_default.base());
    }
    push(&mut chain, LocaleCode::fallback());
    chain
}
