use crate::config::EdamamConfig;
use crate::error::RecipeError;
use crate::model::Recipe;
use crate::providers::http::{self, build_client, classify_transport, endpoint, read_json, redact};
use crate::providers::normalize::{capitalize, clean_lines, count, first_of, text, title};
use crate::providers::{is_complete, require_input, RecipeSource};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.edamam.com";

/// Fields requested on search so the response stays small
const SEARCH_FIELDS: &[&str] = &[
    "uri",
    "label",
    "image",
    "source",
    "url",
    "yield",
    "calories",
    "totalTime",
    "ingredientLines",
    "cuisineType",
    "dishType",
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(default)]
    recipe: Value,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    recipe: Value,
}

/// Edamam recipe search API (v2)
pub struct EdamamSource {
    client: Client,
    base_url: String,
    app_id: Option<String>,
    app_key: Option<String>,
    account_user: Option<String>,
}

impl EdamamSource {
    /// Create a new Edamam source from configuration
    ///
    /// Missing credentials are not an error here; see [`RecipeSource::check_config`].
    pub fn new(config: &EdamamConfig, timeout: Duration) -> Result<Self, RecipeError> {
        Ok(EdamamSource {
            client: build_client(timeout)?,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            app_id: config.resolved_app_id(),
            app_key: config.resolved_app_key(),
            account_user: config.account_user.clone(),
        })
    }

    /// Create a new Edamam source with explicit credentials
    pub fn with_credentials(app_id: String, app_key: String) -> Result<Self, RecipeError> {
        Self::with_base_url(app_id, app_key, DEFAULT_BASE_URL.to_string())
    }

    #[doc(hidden)]
    pub fn with_base_url(
        app_id: String,
        app_key: String,
        base_url: String,
    ) -> Result<Self, RecipeError> {
        Ok(EdamamSource {
            client: build_client(http::DEFAULT_TIMEOUT)?,
            base_url,
            app_id: Some(app_id).filter(|s| !s.trim().is_empty()),
            app_key: Some(app_key).filter(|s| !s.trim().is_empty()),
            account_user: None,
        })
    }

    fn credentials(&self) -> Result<(&str, &str), RecipeError> {
        match (self.app_id.as_deref(), self.app_key.as_deref()) {
            (Some(id), Some(key)) => Ok((id, key)),
            _ => Err(RecipeError::ConfigFailure(
                "Edamam API credentials are missing. Set EDAMAM_APP_ID and EDAMAM_APP_KEY."
                    .to_string(),
            )),
        }
    }

    fn get(&self, mut url: Url, params: &[(&str, &str)]) -> RequestBuilder {
        url.query_pairs_mut().extend_pairs(params);
        debug!("Requesting {}", redact(&url, &["app_id", "app_key"]));

        let request = self.client.get(url);
        match &self.account_user {
            Some(user) => request.header("Edamam-Account-User", user),
            None => request,
        }
    }
}

/// Edamam identifies recipes by an ontology URI; the id is its fragment
fn id_from_uri(uri: &str) -> String {
    if let Some((_, id)) = uri.rsplit_once("#recipe_") {
        return id.trim().to_string();
    }
    uri.rsplit(['#', '/']).next().unwrap_or_default().trim().to_string()
}

fn ingredients(recipe: &Value) -> Vec<String> {
    if let Some(lines) = recipe.get("ingredientLines").and_then(Value::as_array) {
        return clean_lines(lines.iter().map(|l| text(Some(l))));
    }
    recipe
        .get("ingredients")
        .and_then(Value::as_array)
        .map(|items| clean_lines(items.iter().map(|i| text(i.get("text")))))
        .unwrap_or_default()
}

/// Map one Edamam recipe object onto [`Recipe`]
fn normalize(recipe: &Value) -> Recipe {
    let instructions = recipe
        .get("instructionLines")
        .and_then(Value::as_array)
        .map(|lines| clean_lines(lines.iter().map(|l| text(Some(l)))).join("\n"))
        .unwrap_or_default();

    Recipe {
        id: id_from_uri(&text(recipe.get("uri"))),
        title: title(recipe.get("label")),
        image_url: text(recipe.get("image")),
        source: text(recipe.get("source")),
        source_url: text(recipe.get("url")),
        servings: count(recipe.get("yield")),
        calories: count(recipe.get("calories")),
        total_time_minutes: count(recipe.get("totalTime")),
        ingredients: ingredients(recipe),
        instructions,
        video_url: String::new(),
        area: capitalize(&first_of(recipe.get("cuisineType"))),
        category: capitalize(&first_of(recipe.get("dishType"))),
    }
}

#[async_trait]
impl RecipeSource for EdamamSource {
    fn provider_name(&self) -> &str {
        "edamam"
    }

    fn check_config(&self) -> Result<(), RecipeError> {
        self.credentials().map(|_| ())
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipeError> {
        let query = require_input(query, "Search query")?;
        let (app_id, app_key) = self.credentials()?;

        let url = endpoint(&self.base_url, &["api", "recipes", "v2"])?;
        let mut params = vec![
            ("type", "public"),
            ("app_id", app_id),
            ("app_key", app_key),
            ("q", query),
        ];
        params.extend(SEARCH_FIELDS.iter().map(|f| ("field", *f)));

        let response = self
            .get(url, &params)
            .send()
            .await
            .map_err(classify_transport)?;
        let body: SearchResponse = read_json(response).await?;

        let total = body.hits.len();
        let recipes: Vec<Recipe> = body
            .hits
            .iter()
            .map(|hit| normalize(&hit.recipe))
            .filter(is_complete)
            .collect();
        if recipes.len() < total {
            debug!("Dropped {} incomplete hits", total - recipes.len());
        }

        Ok(recipes)
    }

    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, RecipeError> {
        let id = require_input(id, "Recipe id")?;
        let (app_id, app_key) = self.credentials()?;

        let url = endpoint(&self.base_url, &["api", "recipes", "v2", id])?;
        let params = [("type", "public"), ("app_id", app_id), ("app_key", app_key)];

        let response = self
            .get(url, &params)
            .send()
            .await
            .map_err(classify_transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Edamam has no recipe {}", id);
            return Ok(None);
        }

        let body: LookupResponse = read_json(response).await?;
        Ok(Some(normalize(&body.recipe)).filter(is_complete))
    }
}
