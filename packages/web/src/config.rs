//! Startup configuration: the bundled `messenger.toml` plus build-time overrides.

use api::AppConfig;

const BUNDLED_CONFIG: &str = include_str!("../messenger.toml");

/// Override variables captured when the web bundle was built.
fn build_env(var: &str) -> Option<String> {
    let value = match var {
        "MESSENGER_BACKEND_URL" => option_env!("MESSENGER_BACKEND_URL"),
        "MESSENGER_BACKEND_SECONDARY_URL" => option_env!("MESSENGER_BACKEND_SECONDARY_URL"),
        "MESSENGER_CHAT_PROJECT_ID" => option_env!("MESSENGER_CHAT_PROJECT_ID"),
        "MESSENGER_CHAT_COMMUNITY_CHAT_ID" => option_env!("MESSENGER_CHAT_COMMUNITY_CHAT_ID"),
        "MESSENGER_CHAT_COMMUNITY_ACCESS_KEY" => option_env!("MESSENGER_CHAT_COMMUNITY_ACCESS_KEY"),
        "MESSENGER_CHAT_SDK_URL" => option_env!("MESSENGER_CHAT_SDK_URL"),
        "MESSENGER_SIGNUP_EMAIL_SUFFIX" => option_env!("MESSENGER_SIGNUP_EMAIL_SUFFIX"),
        _ => None,
    };
    value.map(str::to_string)
}

/// Load, override and validate the configuration, falling back to the
/// defaults when the result is unusable.
pub fn load() -> AppConfig {
    load_from(BUNDLED_CONFIG, build_env)
}

fn load_from<F>(text: &str, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    for (key, var) in AppConfig::recognized_options() {
        tracing::info!("Config option {} (override: {})", key, var);
    }

    let mut config = match AppConfig::from_toml(text) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}; using defaults", e);
            AppConfig::default()
        }
    };

    for key in config.apply_overrides(lookup) {
        tracing::info!("Config option {} overridden at build time", key);
    }

    if let Err(e) = config.validate() {
        tracing::error!("{}; using defaults", e);
        return AppConfig::default();
    }

    tracing::info!(
        "Backend {} (secondary: {})",
        config.backend_url(),
        config.secondary_url().unwrap_or("none")
    );
    config
}
