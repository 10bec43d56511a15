//! Message resolution façade.
//!
//! `Localizer` ties the engine together: it owns the registry snapshot, asks
//! the fallback chain for candidate locales, probes tables (with variant
//! discovery for region-less candidates), and formats the first pattern it
//! finds. Every public resolution method is total: it never returns an error
//! and never panics. A key that resolves nowhere is returned verbatim, which
//! keeps missing translations visible without interrupting the caller.
//!
//! # Concurrency
//!
//! The registry lives behind an `RwLock<Arc<Registry>>` used purely as a
//! snapshot slot. Readers clone the `Arc` (the lock is held only for the
//! clone), then resolve against an immutable registry; `reload` builds the
//! replacement registry outside the lock and swaps the `Arc` in one write.
//! Concurrent readers therefore never observe a partially-built registry.
//! Serializing concurrent `reload` calls is the caller's responsibility.

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::fallback::fallback_chain;
use crate::format::format_pattern;
use crate::locale::LocaleCode;
use crate::registry::Registry;

/// Settings collaborator: supplies the configured default locale.
///
/// Re-read on every resolution, so a live settings source can change the
/// default without a reload.
pub trait LocaleSettings: Send + Sync {
    fn default_locale(&self) -> String;
}

/// Per-caller locale collaborator: maps an opaque caller id to that caller's
/// preferred locale. May return a blank or unrecognized string; resolution
/// degrades through the fallback chain either way.
pub trait LocaleLookup: Send + Sync {
    fn locale_of(&self, caller_id: &str) -> String;
}

/// Layered message resolver.
pub struct Localizer {
    defaults_dir: PathBuf,
    overrides_dir: PathBuf,
    settings: Arc<dyn LocaleSettings>,
    registry: RwLock<Arc<Registry>>,
}

impl Localizer {
    /// Build a localizer, loading the registry from the two layered source
    /// directories immediately.
    pub fn new(
        defaults_dir: impl Into<PathBuf>,
        overrides_dir: impl Into<PathBuf>,
        settings: Arc<dyn LocaleSettings>,
    ) -> Localizer {
        let defaults_dir = defaults_dir.into();
        let overrides_dir = overrides_dir.into();
        let registry = Registry::load(&defaults_dir, &overrides_dir);
        info!(locales = registry.len(), "loaded message registry");
        Localizer {
            defaults_dir,
            overrides_dir,
            settings,
            registry: RwLock::new(Arc::new(registry)),
        }
    }

    /// Resolve a message for an explicitly supplied locale string.
    ///
    /// The locale may be in any accepted spelling (`en-US`, `EN_us`, blank);
    /// it is normalized here. Returns the key itself when no candidate locale
    /// provides the key.
    pub fn resolve(&self, locale: &str, key: &str, args: &[&dyn Display]) -> String {
        self.resolve_normalized(&LocaleCode::normalize(locale), key, args)
    }

    /// Resolve a message using the configured default locale, for console or
    /// system-context output that has no requesting caller.
    pub fn resolve_default(&self, key: &str, args: &[&dyn Display]) -> String {
        let configured = LocaleCode::normalize(&self.settings.default_locale());
        self.resolve_normalized(&configured, key, args)
    }

    /// Resolve a message for a caller via the locale lookup collaborator.
    pub fn resolve_for(
        &self,
        lookup: &dyn LocaleLookup,
        caller_id: &str,
        key: &str,
        args: &[&dyn Display],
    ) -> String {
        self.resolve(&lookup.locale_of(caller_id), key, args)
    }

    /// Rebuild the registry from disk and swap it in atomically.
    ///
    /// In-flight resolutions keep the snapshot they already cloned; new
    /// resolutions see the replacement. Not safe to call reentrantly from
    /// multiple threads at once; the reload trigger must be serialized by the
    /// caller.
    pub fn reload(&self) {
        let rebuilt = Arc::new(Registry::load(&self.defaults_dir, &self.overrides_dir));
        info!(locales = rebuilt.len(), "reloaded message registry");
        *self.registry.write().expect("registry lock poisoned") = rebuilt;
    }

    /// Sorted list of currently loaded locale codes.
    pub fn locales(&self) -> Vec<LocaleCode> {
        self.snapshot().locales().cloned().collect()
    }

    /// The current registry snapshot.
    pub fn snapshot(&self) -> Arc<Registry> {
        Arc::clone(&self.registry.read().expect("registry lock poisoned"))
    }

    fn resolve_normalized(&self, requested: &LocaleCode, key: &str, args: &[&dyn Display]) -> String {
        let registry = self.snapshot();
        let configured = LocaleCode::normalize(&self.settings.default_locale());

        for candidate in fallback_chain(requested, &configured) {
            if let Some(pattern) = registry.table(&candidate).and_then(|t| t.get(key)) {
                return self.materialize(pattern, key, args);
            }

            // A bare base language with no direct table entry may still be
            // served by a sibling region variant (e.g. "zh" via "zh_cn").
            if !candidate.has_region() {
                if let Some(pattern) = registry
                    .variant_of(&candidate)
                    .and_then(|variant| registry.table(variant))
                    .and_then(|t| t.get(key))
                {
                    return self.materialize(pattern, key, args);
                }
            }
        }

        key.to_string()
    }

    /// Format a found pattern, degrading to the raw pattern on any
    /// substitution failure.
    fn materialize(&self, pattern: &str, key: &str, args: &[&dyn Display]) -> String {
        match format_pattern(pattern, args) {
            Ok(formatted) => formatted,
            Err(err) => {
                let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                warn!(
                    key,
                    args = rendered.join(", "),
                    "failed to format message pattern: {err}"
                );
                pattern.to_string()
            }
        }
    }
}
