use serde::Serialize;

/// Provider-agnostic recipe record handed to callers
///
/// `id` and `title` are always non-empty. Numeric fields use 0 for "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub source: String,
    pub source_url: String,
    pub servings: u32,
    pub calories: u32,
    pub total_time_minutes: u32,
    /// "measure ingredient" lines in provider order
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub video_url: String,
    pub area: String,
    pub category: String,
}

impl Recipe {
    /// YouTube link rewritten into its embeddable form
    pub fn video_embed_url(&self) -> Option<String> {
        if self.video_url.trim().is_empty() {
            return None;
        }
        Some(self.video_url.replace("watch?v=", "embed/"))
    }

    /// "Area • Category" line, skipping whichever part is missing
    pub fn tags(&self) -> String {
        [self.area.as_str(), self.category.as_str()]
            .iter()
            .filter(|s| !s.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" • ")
    }

    /// Plain text details view
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');

        let tags = self.tags();
        if !tags.is_empty() {
            out.push_str(&tags);
            out.push('\n');
        }

        let mut facts = Vec::new();
        if self.servings > 0 {
            facts.push(format!("servings: {}", self.servings));
        }
        if self.calories > 0 {
            facts.push(format!("calories: {}", self.calories));
        }
        if self.total_time_minutes > 0 {
            facts.push(format!("time: {} minutes", self.total_time_minutes));
        }
        if !facts.is_empty() {
            out.push_str(&facts.join(", "));
            out.push('\n');
        }

        if !self.image_url.is_empty() {
            out.push_str(&format!("image: {}\n", self.image_url));
        }

        if !self.ingredients.is_empty() {
            out.push_str("\nIngredients\n");
            for ingredient in &self.ingredients {
                out.push_str(&format!("  - {}\n", ingredient));
            }
        }

        if !self.instructions.trim().is_empty() {
            out.push_str("\nInstructions\n");
            out.push_str(self.instructions.trim_end());
            out.push('\n');
        }

        if let Some(video) = self.video_embed_url() {
            out.push_str(&format!("\nvideo: {}\n", video));
        }

        match (self.source.is_empty(), self.source_url.is_empty()) {
            (false, false) => out.push_str(&format!("source: {} ({})\n", self.source, self.source_url)),
            (false, true) => out.push_str(&format!("source: {}\n", self.source)),
            (true, false) => out.push_str(&format!("source: {}\n", self.source_url)),
            (true, true) => {}
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Recipe {
        Recipe {
            id: "52874".to_string(),
            title: "Beef and Mustard Pie".to_string(),
            area: "British".to_string(),
            category: "Beef".to_string(),
            ingredients: vec!["1kg Beef".to_string(), "2 tbs Plain Flour".to_string()],
            instructions: "Preheat the oven.\r\nBrown the beef.".to_string(),
            video_url: "https://www.youtube.com/watch?v=nMyBC9staMU".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_video_embed_url() {
        assert_eq!(
            sample().video_embed_url().as_deref(),
            Some("https://www.youtube.com/embed/nMyBC9staMU")
        );
        assert_eq!(Recipe::default().video_embed_url(), None);
    }

    #[test]
    fn test_tags_skip_missing_parts() {
        assert_eq!(sample().tags(), "British • Beef");
        let recipe = Recipe {
            category: "Dessert".to_string(),
            ..Default::default()
        };
        assert_eq!(recipe.tags(), "Dessert");
    }

    #[test]
    fn test_to_text_keeps_ingredient_order_and_line_breaks() {
        let text = sample().to_text();
        let beef = text.find("1kg Beef").unwrap();
        let flour = text.find("2 tbs Plain Flour").unwrap();
        assert!(beef < flour);
        assert!(text.contains("Preheat the oven.\r\nBrown the beef."));
        assert!(text.contains("video: https://www.youtube.com/embed/nMyBC9staMU"));
        assert!(!text.contains("servings"));
    }
}
