//! Check every translation catalog against the canonical one.
//!
//! Usage:
//!   cargo run --bin check-locales             # embedded catalogs
//!   LOCALES_DIR=locales cargo run --bin check-locales
//!
//! Exits with an error if any enabled language has no catalog or its catalog
//! is missing keys.

use anyhow::{bail, Context, Result};
use landing_kit::config::Config;
use landing_kit::i18n::{CatalogSet, CatalogValidator};
use tracing::{error, info, warn};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("check_locales=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let catalogs = CatalogSet::load(config.locales_dir.as_deref())
        .context("Failed to load translation catalogs")?;

    let mut error_count = 0;
    for (language, report) in CatalogValidator::check_set(&catalogs) {
        for message in &report.errors {
            error!("[{}] {}", language, message);
        }
        for message in &report.warnings {
            warn!("[{}] {}", language, message);
        }
        if report.is_clean() {
            info!(
                "✓ {} ({} keys)",
                language.name(),
                catalogs.get(language).entries().len()
            );
        }
        error_count += report.errors.len();
    }

    if error_count > 0 {
        bail!("{} catalog error(s) found", error_count);
    }
    Ok(())
}
