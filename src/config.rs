use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level configuration for the recipe finder
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// Active provider: "edamam", "mealdb" or "static"
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Quiet period before a search-as-you-type query is dispatched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub edamam: EdamamConfig,
    #[serde(default)]
    pub mealdb: MealDbConfig,
}

/// Edamam recipe search API settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EdamamConfig {
    /// Application id (can also be set via EDAMAM_APP_ID)
    pub app_id: Option<String>,
    /// Application key (can also be set via EDAMAM_APP_KEY)
    pub app_key: Option<String>,
    /// Value for the Edamam-Account-User header, required on some plans
    pub account_user: Option<String>,
    /// Base URL override, for proxies and tests
    pub base_url: Option<String>,
}

impl EdamamConfig {
    /// Config value first, then the well-known environment variable
    pub fn resolved_app_id(&self) -> Option<String> {
        non_empty(self.app_id.clone()).or_else(|| non_empty(std::env::var("EDAMAM_APP_ID").ok()))
    }

    pub fn resolved_app_key(&self) -> Option<String> {
        non_empty(self.app_key.clone())
            .or_else(|| non_empty(std::env::var("EDAMAM_APP_KEY").ok()))
    }
}

/// TheMealDB settings
#[derive(Debug, Deserialize, Clone)]
pub struct MealDbConfig {
    /// API key embedded in the URL path; "1" is the public test key
    #[serde(default = "default_mealdb_key")]
    pub api_key: String,
    pub base_url: Option<String>,
}

impl Default for MealDbConfig {
    fn default() -> Self {
        Self {
            api_key: default_mealdb_key(),
            base_url: None,
        }
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            timeout: default_timeout(),
            debounce_ms: default_debounce_ms(),
            edamam: EdamamConfig::default(),
            mealdb: MealDbConfig::default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Default value functions
fn default_provider() -> String {
    "edamam".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_mealdb_key() -> String {
    "1".to_string()
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__EDAMAM__APP_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`FinderConfig::load`] for the precedence rules.
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("recipe-finder").required(false))
        // Use double underscore for nested: RECIPE_FINDER__MEALDB__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        let config = FinderConfig::default();
        assert_eq!(config.provider, "edamam");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.mealdb.api_key, "1");
        assert!(config.edamam.app_id.is_none());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            provider = "mealdb"
            timeout = 3

            [edamam]
            app_id = "abc"
            app_key = "def"

            [mealdb]
            base_url = "http://localhost:9999"
        "#;

        let config: FinderConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.provider, "mealdb");
        assert_eq!(config.timeout, 3);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.edamam.app_id.as_deref(), Some("abc"));
        assert_eq!(config.mealdb.api_key, "1");
        assert_eq!(
            config.mealdb.base_url.as_deref(),
            Some("http://localhost:9999")
        );
    }

    #[test]
    fn test_configured_credentials_win_over_environment() {
        let config = EdamamConfig {
            app_id: Some("from-config".to_string()),
            app_key: Some("key-from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_app_id().as_deref(), Some("from-config"));
        assert_eq!(
            config.resolved_app_key().as_deref(),
            Some("key-from-config")
        );
    }

    #[test]
    fn test_env_values_keep_leading_zeros() {
        std::env::set_var("RECIPE_FINDER__EDAMAM__APP_ID", "01234567");
        std::env::set_var("RECIPE_FINDER__TIMEOUT", "7");

        let loaded = FinderConfig::load();

        std::env::remove_var("RECIPE_FINDER__EDAMAM__APP_ID");
        std::env::remove_var("RECIPE_FINDER__TIMEOUT");

        let config = loaded.unwrap();
        assert_eq!(config.edamam.app_id.as_deref(), Some("01234567"));
        assert_eq!(config.timeout, 7);
    }
}
