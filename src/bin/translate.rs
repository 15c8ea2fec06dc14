//! Resolve translation keys from the command line.
//!
//! Usage:
//!   cargo run --bin translate -- <lang> <key> [fallback]
//!
//! Unsupported languages resolve against the default catalog, and a missing
//! key prints the fallback (or the key itself). Lookup counters are logged to
//! stderr on exit.

use anyhow::{Context, Result};
use landing_kit::config::Config;
use landing_kit::i18n::{CatalogSet, LookupMetrics, Translator};
use tracing::{debug, info};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translate=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: translate <lang> <key> [fallback]");
        return Ok(());
    }

    let config = Config::from_env()?;
    let catalogs = CatalogSet::load(config.locales_dir.as_deref())
        .context("Failed to load translation catalogs")?;

    let translator = Translator::for_code(&catalogs, &args[1]);
    debug!("Resolving '{}' in '{}'", args[2], translator.language());

    let text = match args.get(3) {
        Some(fallback) => translator.t_or(&args[2], fallback),
        None => translator.t(&args[2]),
    };
    println!("{}", text);

    let report = LookupMetrics::global().report();
    info!(
        "Lookups: {} hit(s), {} default fallback(s), {} key echo(es), {:.1}% hit rate",
        report.hits, report.default_fallbacks, report.key_echoes, report.hit_rate
    );
    Ok(())
}
