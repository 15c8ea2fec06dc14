//! Submit a contact-form message to the webhook.
//!
//! Usage:
//!   landing-kit --name "Jane Doe" --email jane@example.com --message "Hello" \
//!       [--company Acme] [--lang es]
//!
//! Optional environment variables:
//! - WEBHOOK_URL (defaults to the production webhook)
//! - DEFAULT_LANGUAGE (defaults to en)
//! - LOCALES_DIR (defaults to the embedded catalogs)
//! - CLIENT_USER_AGENT / CLIENT_REFERRER
//! - APP_ENV (defaults to development)

use anyhow::{bail, Context, Result};
use landing_kit::analytics::DataLayer;
use landing_kit::config::Config;
use landing_kit::contact::{ContactClient, ContactForm, FormStatus};
use landing_kit::i18n::{CatalogSet, Translator};
use tracing::info;

fn print_usage() {
    eprintln!(
        "Usage: landing-kit --name <name> --email <email> --message <message> \
         [--company <company>] [--lang <code>]"
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("landing_kit=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let config = Config::from_env()?;
    let catalogs = CatalogSet::load(config.locales_dir.as_deref())
        .context("Failed to load translation catalogs")?;

    let mut form = ContactForm::new();
    let mut language = config.default_language.clone();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .with_context(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--lang" => language = value.clone(),
            field if field.starts_with("--") => form.set_field(&field[2..], value.as_str())?,
            other => bail!("Unexpected argument: {}", other),
        }
    }

    let translator = Translator::for_code(&catalogs, &language);
    let client = ContactClient::from_config(&config);
    let mut analytics = DataLayer::from_config(&config);

    info!(
        "Submitting contact form to {} ({})",
        client.endpoint(),
        translator.language()
    );
    form.submit(&client, &translator, &mut analytics).await?;

    if let Some(message) = form.status_message(&translator) {
        println!("{}", message);
    }

    if let FormStatus::Failed(message) = form.status() {
        bail!("{}", message);
    }
    Ok(())
}
