//! Layered localization resolution engine.
//!
//! Given per-locale message files organized in precedence layers (base
//! defaults, region defaults, base overrides, region overrides), this crate
//! builds an in-memory registry per locale and resolves a
//! `(locale, key, args)` triple to a display string, degrading through a
//! deterministic fallback chain when a locale or key is missing and safely
//! substituting positional arguments into message patterns.
//!
//! # Architecture
//!
//! - `locale`: normalized locale codes and the ultimate fallback constant
//! - `properties`: `key=pattern` message file parsing
//! - `registry`: per-locale tables merged from the four precedence layers
//! - `fallback`: candidate locale ordering for one resolution
//! - `format`: positional `{0}` placeholder substitution
//! - `resolver`: the `Localizer` façade callers talk to
//! - `validator`: coverage and placeholder-consistency reports
//! - `config`: environment-backed settings for the binary and embedders
//!
//! # Example
//!
//! ```rust,ignore
//! use locale_resolver::{Config, Localizer};
//! use std::sync::Arc;
//!
//! let config = Config::from_env()?;
//! let localizer = Localizer::new(
//!     config.defaults_dir(),
//!     config.overrides_dir(),
//!     Arc::new(config),
//! );
//! let line = localizer.resolve("en-US", "greeting", &[&"Alex"]);
//! ```
//!
//! Resolution never fails: an unknown key renders as the key itself and a
//! pattern that cannot be formatted renders unformatted, so localization is
//! never a point of failure for the surrounding system.

pub mod config;
pub mod fallback;
pub mod format;
pub mod locale;
pub mod properties;
pub mod registry;
pub mod resolver;
pub mod validator;

pub use config::Config;
pub use format::FormatError;
pub use locale::{LocaleCode, FALLBACK_LOCALE};
pub use properties::LoadError;
pub use registry::{MessageTable, Registry};
pub use resolver::{LocaleLookup, LocaleSettings, Localizer};
pub use validator::{CoverageReport, LocaleCoverage, PlaceholderMismatch};
