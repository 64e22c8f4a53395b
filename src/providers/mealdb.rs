use crate::config::MealDbConfig;
use crate::error::RecipeError;
use crate::model::Recipe;
use crate::providers::http::{self, build_client, classify_transport, endpoint, read_json};
use crate::providers::normalize::{ingredient_line, text, title};
use crate::providers::{is_complete, require_input, RecipeSource};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.themealdb.com";

/// TheMealDB numbers its ingredient/measure columns 1 through 20
const INGREDIENT_SLOTS: usize = 20;

#[derive(Debug, Deserialize)]
struct MealsResponse {
    /// `null` when nothing matched
    #[serde(default)]
    meals: Option<Vec<Map<String, Value>>>,
}

/// TheMealDB JSON API (v1)
pub struct MealDbSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MealDbSource {
    /// Create a new TheMealDB source from configuration
    pub fn new(config: &MealDbConfig, timeout: Duration) -> Result<Self, RecipeError> {
        Ok(MealDbSource {
            client: build_client(timeout)?,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: config.api_key.trim().to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, RecipeError> {
        Ok(MealDbSource {
            client: build_client(http::DEFAULT_TIMEOUT)?,
            base_url,
            api_key: api_key.trim().to_string(),
        })
    }

    fn api_key(&self) -> Result<&str, RecipeError> {
        if self.api_key.is_empty() {
            return Err(RecipeError::ConfigFailure(
                "TheMealDB API key is missing".to_string(),
            ));
        }
        Ok(&self.api_key)
    }

    async fn fetch_meals(
        &self,
        script: &str,
        param: (&str, &str),
    ) -> Result<Vec<Map<String, Value>>, RecipeError> {
        let key = self.api_key()?;
        let url = endpoint(&self.base_url, &["api", "json", "v1", key, script])?;
        debug!("Requesting {} with {}={}", script, param.0, param.1);

        let response = self
            .client
            .get(url)
            .query(&[param])
            .send()
            .await
            .map_err(classify_transport)?;
        let body: MealsResponse = read_json(response).await?;
        Ok(body.meals.unwrap_or_default())
    }
}

fn ingredients(meal: &Map<String, Value>) -> Vec<String> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|i| {
            let ingredient = text(meal.get(&format!("strIngredient{}", i)));
            let measure = text(meal.get(&format!("strMeasure{}", i)));
            ingredient_line(&measure, &ingredient)
        })
        .collect()
}

/// Instructions keep their line breaks; only the outer whitespace goes
fn instructions(meal: &Map<String, Value>) -> String {
    match meal.get("strInstructions") {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Map one TheMealDB meal object onto [`Recipe`]
fn normalize(meal: &Map<String, Value>) -> Recipe {
    let source_url = text(meal.get("strSource"));
    Recipe {
        id: text(meal.get("idMeal")),
        title: title(meal.get("strMeal")),
        image_url: text(meal.get("strMealThumb")),
        source: host_of(&source_url),
        source_url,
        servings: 0,
        calories: 0,
        total_time_minutes: 0,
        ingredients: ingredients(meal),
        instructions: instructions(meal),
        video_url: text(meal.get("strYoutube")),
        area: text(meal.get("strArea")),
        category: text(meal.get("strCategory")),
    }
}

/// Site name for the source label, e.g. "www.bbcgoodfood.com"
fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[async_trait]
impl RecipeSource for MealDbSource {
    fn provider_name(&self) -> &str {
        "mealdb"
    }

    fn check_config(&self) -> Result<(), RecipeError> {
        self.api_key().map(|_| ())
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipeError> {
        let query = require_input(query, "Search query")?;
        let meals = self.fetch_meals("search.php", ("s", query)).await?;

        let total = meals.len();
        let recipes: Vec<Recipe> = meals.iter().map(normalize).filter(is_complete).collect();
        if recipes.len() < total {
            debug!("Dropped {} incomplete meals", total - recipes.len());
        }
        Ok(recipes)
    }

    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, RecipeError> {
        let id = require_input(id, "Recipe id")?;
        let meals = self.fetch_meals("lookup.php", ("i", id)).await?;
        Ok(meals.first().map(normalize).filter(is_complete))
    }
}
