use std::{collections::HashMap, fs};

use tracing::warn;

pub const SETTINGS_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".into(),
            page_size: client_core::listing::DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
        }
    }
}

pub fn load_settings() -> Settings {
    let raw = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the flat `storefront.toml` table, then environment.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url").and_then(value_as_string) {
                    settings.api_base_url = v;
                }
                if let Some(v) = file_cfg.get("page_size").and_then(value_as_string) {
                    apply_number(&mut settings.page_size, "page_size", &v);
                }
                if let Some(v) = file_cfg
                    .get("request_timeout_secs")
                    .and_then(value_as_string)
                {
                    apply_number(&mut settings.request_timeout_secs, "request_timeout_secs", &v);
                }
            }
            Err(err) => warn!(error = %err, file = SETTINGS_FILE, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("STOREFRONT_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__PAGE_SIZE") {
        apply_number(&mut settings.page_size, "APP__PAGE_SIZE", &v);
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        apply_number(&mut settings.request_timeout_secs, "APP__REQUEST_TIMEOUT_SECS", &v);
    }

    settings
}

fn value_as_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

fn apply_number<T>(target: &mut T, key: &str, raw: &str)
where
    T: std::str::FromStr + PartialEq + Default,
{
    match raw.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => *target = parsed,
        _ => warn!(key, value = raw, "ignoring invalid numeric setting"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
