use regex::Regex;
use std::sync::OnceLock;

static NON_DIAL_REGEX: OnceLock<Regex> = OnceLock::new();

/// `mailto:` link for the contact-info block
pub fn mailto_href(email: &str) -> String {
    format!("mailto:{}", email.trim())
}

/// `tel:` link keeping only `+` and ASCII digits from a display-formatted number
pub fn tel_href(phone: &str) -> String {
    let regex = NON_DIAL_REGEX.get_or_init(|| Regex::new(r"[^+0-9]").unwrap());
    format!("tel:{}", regex.replace_all(phone, ""))
}
