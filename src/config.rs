use dioxus::prelude::*;
use serde::Deserialize;

use crate::effects::SpotlightOptions;
use crate::error::ConfigError;
use crate::preferences::Theme;

/// Deployment-tunable knobs for the effects and the contact form. Every field
/// has a default, so a partial `config.json` is valid.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub spotlight_enabled: bool,
    pub spotlight_on_touch: bool,
    pub spotlight_size: String,
    pub spotlight_color_light: String,
    pub spotlight_color_dark: String,
    pub contact_submit_delay_ms: u32,
    pub contact_success_reset_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            spotlight_enabled: true,
            spotlight_on_touch: false,
            spotlight_size: "350px".to_string(),
            spotlight_color_light: "rgba(99, 102, 241, 0.07)".to_string(),
            spotlight_color_dark: "rgba(99, 102, 241, 0.08)".to_string(),
            contact_submit_delay_ms: 1500,
            contact_success_reset_ms: 5000,
        }
    }
}

impl SiteConfig {
    pub fn spotlight_options(&self, theme: Theme) -> SpotlightOptions {
        let color = match theme {
            Theme::Dark => &self.spotlight_color_dark,
            Theme::Light => &self.spotlight_color_light,
        };
        SpotlightOptions {
            size: self.spotlight_size.clone(),
            color: color.clone(),
            enabled: self.spotlight_enabled,
            enable_on_touch: self.spotlight_on_touch,
        }
    }

    /// Builds a config from environment-style variables; unset names keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            spotlight_enabled: parse_bool(&lookup, "SPOTLIGHT_ENABLED", defaults.spotlight_enabled)?,
            spotlight_on_touch: parse_bool(&lookup, "SPOTLIGHT_ON_TOUCH", defaults.spotlight_on_touch)?,
            spotlight_size: lookup("SPOTLIGHT_SIZE").unwrap_or(defaults.spotlight_size),
            spotlight_color_light: lookup("SPOTLIGHT_COLOR_LIGHT").unwrap_or(defaults.spotlight_color_light),
            spotlight_color_dark: lookup("SPOTLIGHT_COLOR_DARK").unwrap_or(defaults.spotlight_color_dark),
            contact_submit_delay_ms: parse_positive(
                &lookup,
                "CONTACT_SUBMIT_DELAY_MS",
                defaults.contact_submit_delay_ms,
            )?,
            contact_success_reset_ms: parse_positive(
                &lookup,
                "CONTACT_SUCCESS_RESET_MS",
                defaults.contact_success_reset_ms,
            )?,
        })
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    fallback: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(fallback);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { name, value }),
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    fallback: u32,
) -> Result<u32, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(fallback);
    };
    match value.trim().parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::InvalidNumber { name, value }),
    }
}

pub fn use_site_config() -> Resource<SiteConfig> {
    use_resource(|| async move {
        match fetch_site_config().await {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("config: {err}; using defaults");
                SiteConfig::default()
            }
        }
    })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_site_config() -> Result<SiteConfig, ConfigError> {
    match fetch_config_from("/config.json").await {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::debug!("config: /config.json unavailable ({err})");
            fetch_config_from("/assets/config.json").await
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<SiteConfig, ConfigError> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| ConfigError::Fetch(err.to_string()))?;
    if !response.ok() {
        return Err(ConfigError::Fetch(format!("{path}: status {}", response.status())));
    }
    response
        .json::<SiteConfig>()
        .await
        .map_err(|err| ConfigError::Decode(err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_site_config() -> Result<SiteConfig, ConfigError> {
    SiteConfig::from_lookup(|name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SiteConfig =
            serde_json::from_str(r#"{"spotlightEnabled": false, "contactSubmitDelayMs": 200}"#)
                .expect("config should decode");
        assert_eq!(
            config,
            SiteConfig {
                spotlight_enabled: false,
                contact_submit_delay_ms: 200,
                ..SiteConfig::default()
            }
        );
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(SiteConfig::from_lookup(lookup_from(&[])), Ok(SiteConfig::default()));
    }

    #[test]
    fn environment_overrides_are_parsed() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("SPOTLIGHT_ON_TOUCH", "Yes"),
            ("SPOTLIGHT_SIZE", "280px"),
            ("CONTACT_SUCCESS_RESET_MS", " 3000 "),
        ]))
        .expect("config should load");
        assert!(config.spotlight_on_touch);
        assert_eq!(config.spotlight_size, "280px");
        assert_eq!(config.contact_success_reset_ms, 3000);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            SiteConfig::from_lookup(lookup_from(&[("SPOTLIGHT_ENABLED", "maybe")])),
            Err(ConfigError::InvalidBool {
                name: "SPOTLIGHT_ENABLED",
                value: "maybe".to_string(),
            })
        );
        assert_eq!(
            SiteConfig::from_lookup(lookup_from(&[("CONTACT_SUBMIT_DELAY_MS", "0")])),
            Err(ConfigError::InvalidNumber {
                name: "CONTACT_SUBMIT_DELAY_MS",
                value: "0".to_string(),
            })
        );
    }

    #[test]
    fn spotlight_colour_follows_theme() {
        let config = SiteConfig::default();
        assert_eq!(
            config.spotlight_options(Theme::Dark).color,
            "rgba(99, 102, 241, 0.08)"
        );
        assert_eq!(
            config.spotlight_options(Theme::Light).color,
            "rgba(99, 102, 241, 0.07)"
        );
        assert!(!config.spotlight_options(Theme::Dark).enable_on_touch);
    }
}
