//! # Application configuration — `messenger.toml`
//!
//! Every value that identifies an external service lives here instead of in
//! the code: backend origins, the hosted chat project and community room, and
//! the email domain accepted at signup.
//!
//! ## Structure
//!
//! ```toml
//! [backend]
//! url = "https://chat-app-v84a.onrender.com"
//! secondary_url = ""            # empty = no secondary backend
//!
//! [chat]
//! project_id = "..."
//! community_chat_id = "..."
//! community_access_key = "..."
//! sdk_url = "/chat-engine-embed.js"   # vendor bundle, same-origin path or URL
//!
//! [signup]
//! email_suffix = "greenriver.edu"
//! ```
//!
//! Each key can be overridden by an environment-style variable (see
//! [`AppConfig::recognized_options`]). A missing or empty file is equivalent to
//! [`AppConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub signup: SignupConfig,
}

/// REST backend origins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Second backend mirrored on user deletion. Empty disables it.
    #[serde(default)]
    pub secondary_url: String,
}

/// Hosted chat service identifiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_project_id")]
    pub project_id: String,
    #[serde(default = "default_community_chat_id")]
    pub community_chat_id: String,
    #[serde(default = "default_community_access_key")]
    pub community_access_key: String,
    /// Script that defines `window.ChatEngineEmbed`. Loaded before the widget
    /// is mounted.
    #[serde(default = "default_sdk_url")]
    pub sdk_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignupConfig {
    #[serde(default = "default_email_suffix")]
    pub email_suffix: String,
}

fn default_backend_url() -> String {
    "https://chat-app-v84a.onrender.com".to_string()
}

fn default_project_id() -> String {
    "6f431e64-6b7f-4b28-951c-f5d4dcc32068".to_string()
}

fn default_community_chat_id() -> String {
    "253688".to_string()
}

fn default_community_access_key() -> String {
    "ca-95c2a9f1-e62a-46a2-bc09-614689f854bd".to_string()
}

fn default_sdk_url() -> String {
    "/chat-engine-embed.js".to_string()
}

fn default_email_suffix() -> String {
    "greenriver.edu".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            secondary_url: String::new(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            community_chat_id: default_community_chat_id(),
            community_access_key: default_community_access_key(),
            sdk_url: default_sdk_url(),
        }
    }
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            email_suffix: default_email_suffix(),
        }
    }
}

/// Every recognised option as `(toml key, override variable)`.
const RECOGNIZED_OPTIONS: &[(&str, &str)] = &[
    ("backend.url", "MESSENGER_BACKEND_URL"),
    ("backend.secondary_url", "MESSENGER_BACKEND_SECONDARY_URL"),
    ("chat.project_id", "MESSENGER_CHAT_PROJECT_ID"),
    ("chat.community_chat_id", "MESSENGER_CHAT_COMMUNITY_CHAT_ID"),
    ("chat.community_access_key", "MESSENGER_CHAT_COMMUNITY_ACCESS_KEY"),
    ("chat.sdk_url", "MESSENGER_CHAT_SDK_URL"),
    ("signup.email_suffix", "MESSENGER_SIGNUP_EMAIL_SUFFIX"),
];

impl AppConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "messenger.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// All options this configuration understands, with their override variables.
    pub fn recognized_options() -> &'static [(&'static str, &'static str)] {
        RECOGNIZED_OPTIONS
    }

    /// Apply overrides from `lookup`, which maps a variable name such as
    /// `MESSENGER_BACKEND_URL` to its value. Returns the keys that changed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();
        for &(key, var) in RECOGNIZED_OPTIONS {
            let Some(value) = lookup(var) else {
                continue;
            };
            let slot = match key {
                "backend.url" => &mut self.backend.url,
                "backend.secondary_url" => &mut self.backend.secondary_url,
                "chat.project_id" => &mut self.chat.project_id,
                "chat.community_chat_id" => &mut self.chat.community_chat_id,
                "chat.community_access_key" => &mut self.chat.community_access_key,
                "chat.sdk_url" => &mut self.chat.sdk_url,
                "signup.email_suffix" => &mut self.signup.email_suffix,
                _ => continue,
            };
            *slot = value.trim().to_string();
            applied.push(key);
        }
        applied
    }

    /// Check that required values are present and URLs look like URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("backend.url", &self.backend.url)?;
        if !self.backend.secondary_url.is_empty() {
            check_url("backend.secondary_url", &self.backend.secondary_url)?;
        }
        if !self.chat.sdk_url.starts_with('/') {
            check_url("chat.sdk_url", &self.chat.sdk_url)?;
        }
        for (key, value) in [
            ("chat.project_id", &self.chat.project_id),
            ("chat.community_chat_id", &self.chat.community_chat_id),
            ("chat.community_access_key", &self.chat.community_access_key),
            ("signup.email_suffix", &self.signup.email_suffix),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// Primary backend origin without a trailing slash.
    pub fn backend_url(&self) -> &str {
        self.backend.url.trim_end_matches('/')
    }

    /// Secondary backend origin, if one is configured.
    pub fn secondary_url(&self) -> Option<&str> {
        let url = self.backend.secondary_url.trim_end_matches('/');
        (!url.is_empty()).then_some(url)
    }
}

fn check_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| ConfigError::Invalid(format!("{key} is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid(format!(
            "{key} must use http or https, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.signup.email_suffix, "greenriver.edu");
        assert!(config.secondary_url().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [backend]
            url = "http://localhost:3000/"
            secondary_url = "http://localhost:3001"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend_url(), "http://localhost:3000");
        assert_eq!(config.secondary_url(), Some("http://localhost:3001"));
        assert_eq!(config.chat, ChatConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        let applied = config.apply_overrides(|var| match var {
            "MESSENGER_SIGNUP_EMAIL_SUFFIX" => Some("example.org".to_string()),
            "MESSENGER_CHAT_COMMUNITY_CHAT_ID" => Some(" 42 ".to_string()),
            _ => None,
        });
        assert_eq!(applied, vec!["chat.community_chat_id", "signup.email_suffix"]);
        assert_eq!(config.signup.email_suffix, "example.org");
        assert_eq!(config.chat.community_chat_id, "42");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.backend.url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.backend.secondary_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.chat.project_id = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.chat.sdk_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sdk_url_accepts_paths_and_urls() {
        let mut config = AppConfig::default();
        assert_eq!(config.chat.sdk_url, "/chat-engine-embed.js");
        config.validate().unwrap();

        let applied = config.apply_overrides(|var| {
            (var == "MESSENGER_CHAT_SDK_URL").then(|| "https://cdn.example.com/chat.js".to_string())
        });
        assert_eq!(applied, vec!["chat.sdk_url"]);
        config.validate().unwrap();

        config.chat.sdk_url = "chat.js".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_every_option_is_overridable() {
        let mut config = AppConfig::default();
        let applied = config.apply_overrides(|_| Some("x".to_string()));
        assert_eq!(applied.len(), AppConfig::recognized_options().len());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
