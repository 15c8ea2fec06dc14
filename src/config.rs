use anyhow::{Context, Result};

/// Production webhook receiving contact-form submissions
pub const DEFAULT_WEBHOOK_URL: &str = "https://hook.eu2.make.com/wschb6ywmba8hmf5kbq8s8qce8gcmin1";

#[derive(Debug, Clone)]
pub struct Config {
    // Deployment
    pub environment: String,

    // Contact webhook
    pub webhook_url: String,

    // Localization
    pub default_language: String,
    pub locales_dir: Option<String>,

    // Client metadata attached to submissions
    pub client_user_agent: Option<String>,
    pub client_referrer: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let webhook_url =
            std::env::var("WEBHOOK_URL").unwrap_or_else(|_| DEFAULT_WEBHOOK_URL.to_string());
        reqwest::Url::parse(&webhook_url)
            .with_context(|| format!("WEBHOOK_URL is not a valid URL: {}", webhook_url))?;

        Ok(Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),

            webhook_url,

            default_language: std::env::var("DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),
            locales_dir: std::env::var("LOCALES_DIR").ok().filter(|v| !v.is_empty()),

            client_user_agent: std::env::var("CLIENT_USER_AGENT").ok(),
            // An empty referrer is meaningful (direct visit), so it is kept
            client_referrer: std::env::var("CLIENT_REFERRER").ok(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "APP_ENV",
        "WEBHOOK_URL",
        "DEFAULT_LANGUAGE",
        "LOCALES_DIR",
        "CLIENT_USER_AGENT",
        "CLIENT_REFERRER",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().expect("defaults should load");
        assert_eq!(config.environment, "development");
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.default_language, "en");
        assert!(config.locales_dir.is_none());
        assert!(config.client_user_agent.is_none());
        assert!(config.client_referrer.is_none());
        assert!(!config.is_production());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("WEBHOOK_URL", "http://localhost:9999/hook");
        std::env::set_var("DEFAULT_LANGUAGE", "es");
        std::env::set_var("LOCALES_DIR", "/srv/locales");
        std::env::set_var("CLIENT_USER_AGENT", "landing-kit/0.1");
        std::env::set_var("CLIENT_REFERRER", "");

        let config = Config::from_env().expect("overrides should load");
        assert!(config.is_production());
        assert_eq!(config.webhook_url, "http://localhost:9999/hook");
        assert_eq!(config.default_language, "es");
        assert_eq!(config.locales_dir.as_deref(), Some("/srv/locales"));
        assert_eq!(config.client_user_agent.as_deref(), Some("landing-kit/0.1"));
        assert_eq!(config.client_referrer.as_deref(), Some(""));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_empty_locales_dir_is_none() {
        clear_env();
        std::env::set_var("LOCALES_DIR", "");

        let config = Config::from_env().unwrap();
        assert!(config.locales_dir.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_webhook_url() {
        clear_env();
        std::env::set_var("WEBHOOK_URL", "not a url");

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("WEBHOOK_URL"));

        clear_env();
    }
}
