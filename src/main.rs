use std::fmt::Display;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;

use locale_resolver::{validator, Config, Localizer};

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_resolver=info".parse()?),
        )
        .init();

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(lang_dir = %config.lang_dir.display(), "loading message registry");

    let localizer = Localizer::new(
        config.defaults_dir(),
        config.overrides_dir(),
        Arc::new(config),
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        // Print the coverage report as JSON
        Some("--coverage") => {
            let report = validator::validate(&localizer.snapshot());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        // Resolve a single key: <locale> <key> [args...]
        Some(locale) => {
            let Some(key) = args.get(1) else {
                bail!("usage: locale-resolver <locale> <key> [args...] | --coverage");
            };
            let rest: Vec<&dyn Display> =
                args[2..].iter().map(|a| a as &dyn Display).collect();
            println!("{}", localizer.resolve(locale, key, &rest));
        }
        None => {
            let codes: Vec<String> = localizer
                .locales()
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("loaded locales: {}", codes.join(", "));
        }
    }

    Ok(())
}
