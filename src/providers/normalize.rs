use html_escape::decode_html_entities;
use serde_json::Value;

/// Trimmed string, or empty when the value is absent or not a string
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Display title with HTML entities decoded
pub fn title(value: Option<&Value>) -> String {
    let raw = text(value);
    decode_html_entities(&decode_html_entities(&raw))
        .trim()
        .to_string()
}

/// Non-negative whole number; missing, negative or non-numeric becomes 0
pub fn count(value: Option<&Value>) -> u32 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// First string in an array field, e.g. `cuisineType`
pub fn first_of(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_array)
        .and_then(|items| items.iter().map(|v| text(Some(v))).find(|s| !s.is_empty()))
        .unwrap_or_default()
}

/// "measure ingredient" line; `None` when the ingredient name is blank
pub fn ingredient_line(measure: &str, ingredient: &str) -> Option<String> {
    let ingredient = ingredient.trim();
    if ingredient.is_empty() {
        return None;
    }
    let measure = measure.trim();
    if measure.is_empty() {
        Some(ingredient.to_string())
    } else {
        Some(format!("{} {}", measure, ingredient))
    }
}

/// Drop blank lines, keep order
pub fn clean_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|l| l.as_ref().trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Capitalise the first letter of a lower-case tag ("italian" -> "Italian")
pub fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
