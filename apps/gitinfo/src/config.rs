use std::{collections::HashMap, fs, path::Path};

use client_core::{transport::DEFAULT_USER_AGENT, DEFAULT_API_BASE_URL};

pub const SETTINGS_FILE: &str = "gitinfo.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub user_agent: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the optional settings file, then environment variables.
/// Later sources win; a later `APP__*` variable beats its short form.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("user_agent") {
                settings.user_agent = v.clone();
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
        }
    }

    for key in ["GITINFO_API_BASE_URL", "APP__API_BASE_URL"] {
        if let Some(v) = env(key) {
            settings.api_base_url = v;
        }
    }
    for key in ["GITINFO_USER_AGENT", "APP__USER_AGENT"] {
        if let Some(v) = env(key) {
            settings.user_agent = v;
        }
    }
    for key in ["RUST_LOG", "APP__LOG_FILTER"] {
        if let Some(v) = env(key) {
            settings.log_filter = v;
        }
    }

    settings.api_base_url = normalize_api_base_url(&settings.api_base_url);
    if settings.user_agent.trim().is_empty() {
        settings.user_agent = DEFAULT_USER_AGENT.into();
    }
    settings
}

pub fn normalize_api_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
