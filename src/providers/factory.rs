use crate::config::FinderConfig;
use crate::error::RecipeError;
use crate::providers::{EdamamSource, MealDbSource, RecipeSource, StaticSource};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The upstream providers a deployment can be pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Edamam,
    MealDb,
    Static,
}

impl ProviderKind {
    /// Provider name string used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Edamam => "edamam",
            ProviderKind::MealDb => "mealdb",
            ProviderKind::Static => "static",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "edamam" => Ok(ProviderKind::Edamam),
            "mealdb" | "themealdb" => Ok(ProviderKind::MealDb),
            "static" => Ok(ProviderKind::Static),
            other => Err(RecipeError::ConfigFailure(format!(
                "Unknown provider: {}",
                other
            ))),
        }
    }
}

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a source instance from configuration
    pub fn create(
        kind: ProviderKind,
        config: &FinderConfig,
    ) -> Result<Box<dyn RecipeSource>, RecipeError> {
        let timeout = Duration::from_secs(config.timeout.max(1));
        match kind {
            ProviderKind::Edamam => Ok(Box::new(EdamamSource::new(&config.edamam, timeout)?)),
            ProviderKind::MealDb => Ok(Box::new(MealDbSource::new(&config.mealdb, timeout)?)),
            ProviderKind::Static => Ok(Box::new(StaticSource::new())),
        }
    }

    /// Create the source named by `config.provider`
    pub fn from_config(config: &FinderConfig) -> Result<Box<dyn RecipeSource>, RecipeError> {
        Self::create(config.provider.parse()?, config)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["edamam", "mealdb", "static"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EdamamConfig;

    #[test]
    fn test_parse_provider_kind() {
        assert_eq!("edamam".parse::<ProviderKind>().unwrap(), ProviderKind::Edamam);
        assert_eq!(" MealDB ".parse::<ProviderKind>().unwrap(), ProviderKind::MealDb);
        assert_eq!("static".parse::<ProviderKind>().unwrap(), ProviderKind::Static);
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = FinderConfig {
            provider: "spoonacular".to_string(),
            ..Default::default()
        };
        let result = ProviderFactory::from_config(&config);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(matches!(e, RecipeError::ConfigFailure(_)));
            assert!(e.to_string().contains("Unknown provider"));
        }
    }

    #[test]
    fn test_create_each_provider() {
        let config = FinderConfig {
            edamam: EdamamConfig {
                app_id: Some("id".to_string()),
                app_key: Some("key".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        for name in ProviderFactory::available_providers() {
            let kind: ProviderKind = name.parse().unwrap();
            let source = ProviderFactory::create(kind, &config).unwrap();
            assert_eq!(source.provider_name(), name);
            assert!(source.check_config().is_ok());
        }
    }
}
