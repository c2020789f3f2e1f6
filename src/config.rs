/// Runtime configuration with built-in defaults
///
/// Every constant the UI depends on lives here. The host page may embed a JSON
/// blob in `<script type="application/json" id="veil-config">` to override any
/// subset of fields; missing fields keep their defaults.
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Element id of the optional configuration blob
pub const CONFIG_ELEMENT_ID: &str = "veil-config";

/// Shortcut shown on the home placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickLink {
    pub name: String,
    pub url: String,
}

impl QuickLink {
    pub fn new(name: &str, url: &str) -> Self {
        QuickLink {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Search URL used when input is not a URL. `{query}` is replaced with the
    /// percent-encoded input.
    pub search_template: String,
    pub default_scheme: String,
    pub stealth_storage_key: String,
    pub disguise_title: String,
    pub disguise_icon: String,
    pub disguise_redirect: String,
    pub title_max_chars: usize,
    pub proxy_poll_ms: u32,
    pub clock_refresh_ms: u32,
    pub meteor_respawn_ms: u32,
    pub quick_links: Vec<QuickLink>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            search_template: "https://duckduckgo.com/search?q={query}&source=web".to_string(),
            default_scheme: "https".to_string(),
            stealth_storage_key: "stealthModeEnabled".to_string(),
            disguise_title: "Calculator - Google Search".to_string(),
            disguise_icon: "ixlicon.png".to_string(),
            disguise_redirect: "https://www.ixl.com".to_string(),
            title_max_chars: 24,
            proxy_poll_ms: 100,
            clock_refresh_ms: 1_000,
            meteor_respawn_ms: 10_000,
            quick_links: vec![
                QuickLink::new("DuckDuckGo", "https://duckduckgo.com/"),
                QuickLink::new("Wikipedia", "https://www.wikipedia.org/"),
                QuickLink::new("GitHub", "https://github.com/"),
            ],
        }
    }
}

impl AppConfig {
    /// Parse a JSON override blob on top of the defaults.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: AppConfig =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if !self.search_template.contains("{query}") {
            return Err(AppError::Config(
                "searchTemplate must contain {query}".to_string(),
            ));
        }
        if self.default_scheme.is_empty() {
            return Err(AppError::Config("defaultScheme must not be empty".to_string()));
        }
        if let Some(link) = self.quick_links.iter().find(|l| url::Url::parse(&l.url).is_err()) {
            return Err(AppError::Config(format!(
                "quick link {:?} has an invalid url {:?}",
                link.name, link.url
            )));
        }
        if self.title_max_chars == 0 {
            return Err(AppError::Config("titleMaxChars must be positive".to_string()));
        }
        Ok(())
    }

    /// Load the configuration embedded in the current document, falling back to
    /// defaults when it is absent or invalid.
    pub fn load_from_document() -> Self {
        let blob = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match blob {
            Some(json) if !json.trim().is_empty() => match AppConfig::from_json(&json) {
                Ok(config) => {
                    log::debug!("Loaded configuration from #{}", CONFIG_ELEMENT_ID);
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring configuration blob: {}", e);
                    AppConfig::default()
                }
            },
            _ => AppConfig::default(),
        }
    }
}
