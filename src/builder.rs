use std::time::Duration;

use log::info;

use crate::config::FinderConfig;
use crate::providers::{ProviderFactory, ProviderKind, RecipeSource};
use crate::{RecipeError, RecipeFinder};

/// Builder for configuring a [`RecipeFinder`]
#[derive(Default)]
pub struct RecipeFinderBuilder {
    config: Option<FinderConfig>,
    provider: Option<ProviderKind>,
    timeout: Option<Duration>,
    credentials: Option<(String, String)>,
    base_url: Option<String>,
    source: Option<Box<dyn RecipeSource>>,
}

impl RecipeFinderBuilder {
    /// Use this configuration instead of loading one from file/environment
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{FinderConfig, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder()
    ///     .config(FinderConfig::default());
    /// ```
    pub fn config(mut self, config: FinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Select the active provider
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{ProviderKind, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder()
    ///     .provider(ProviderKind::MealDb);
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a timeout for HTTP requests (rounded up to whole seconds)
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeFinder::builder()
    ///     .timeout(Duration::from_secs(3));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set Edamam app id and key directly instead of relying on
    /// environment variables or config files
    pub fn credentials(mut self, app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        self.credentials = Some((app_id.into(), app_key.into()));
        self
    }

    /// Point the active provider at a different host (proxies, tests)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Use a custom source; provider, credentials and base URL are ignored
    pub fn source(mut self, source: Box<dyn RecipeSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the finder
    ///
    /// # Errors
    /// Returns [`RecipeError::ConfigFailure`] if:
    /// - configuration cannot be loaded
    /// - the provider name is unknown
    /// - the selected provider is missing its credentials
    ///
    /// # Example
    /// ```
    /// # use recipe_finder::{FinderConfig, ProviderKind, RecipeFinder};
    /// let finder = RecipeFinder::builder()
    ///     .config(FinderConfig::default())
    ///     .provider(ProviderKind::Static)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(finder.provider_name(), "static");
    /// ```
    pub fn build(self) -> Result<RecipeFinder, RecipeError> {
        let source = match self.source {
            Some(source) => source,
            None => {
                let mut config = match self.config {
                    Some(config) => config,
                    None => FinderConfig::load()?,
                };

                let kind = match self.provider {
                    Some(kind) => kind,
                    None => config.provider.parse()?,
                };

                if let Some(timeout) = self.timeout {
                    config.timeout = timeout.as_secs_f64().ceil() as u64;
                }
                if let Some((app_id, app_key)) = self.credentials {
                    config.edamam.app_id = Some(app_id);
                    config.edamam.app_key = Some(app_key);
                }
                if let Some(url) = self.base_url {
                    match kind {
                        ProviderKind::Edamam => config.edamam.base_url = Some(url),
                        ProviderKind::MealDb => config.mealdb.base_url = Some(url),
                        ProviderKind::Static => {}
                    }
                }

                ProviderFactory::create(kind, &config)?
            }
        };

        source.check_config()?;
        info!("Using recipe provider '{}'", source.provider_name());
        Ok(RecipeFinder::new(source))
    }
}
