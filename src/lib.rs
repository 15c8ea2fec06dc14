pub mod analytics;
pub mod config;
pub mod contact;
pub mod i18n;
