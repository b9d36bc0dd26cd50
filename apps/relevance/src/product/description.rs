//! Extraction of the product fields the prompt needs from a product-API body.

use serde_json::Value;

use crate::product::ProductError;

/// Brand, title, subtitle, features, description and overview in one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDescription(String);

impl ProductDescription {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fields read from the product API. Everything but `title` is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    pub title: String,
    pub brand: String,
    pub subtitle: String,
    pub features: String,
    pub description: String,
    pub overview: String,
    pub image_count: usize,
    pub answered_questions: String,
}

impl ProductRecord {
    /// Reads a product-API body. A missing `title` is the only failure.
    pub fn from_json(body: &Value) -> Result<Self, ProductError> {
        let title = body
            .get("title")
            .map(render_field)
            .ok_or(ProductError::MissingField("title"))?;

        let field = |key: &str| body.get(key).map(render_field).unwrap_or_default();

        Ok(ProductRecord {
            title,
            brand: field("brand"),
            subtitle: field("subtitle"),
            features: field("features"),
            description: field("description"),
            overview: field("overview"),
            image_count: body
                .get("images")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            answered_questions: field("answered_questions"),
        })
    }

    /// Joins the prompt fields with single spaces; absent fields leave empty segments.
    pub fn to_description(&self) -> ProductDescription {
        ProductDescription::new(format!(
            "{} {} {} {} {} {}",
            self.brand, self.title, self.subtitle, self.features, self.description, self.overview
        ))
    }
}

fn render_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_field)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_record_builds_description_in_order() {
        let body = json!({
            "title": "Hindi Alphabet Chart",
            "brand": "Acme",
            "subtitle": "Laminated",
            "features": ["Waterproof", "A3 size"],
            "description": "Learn letters.",
            "overview": "Kids 3+",
            "images": ["a.jpg", "b.jpg"]
        });
        let record = ProductRecord::from_json(&body).unwrap();
        assert_eq!(record.image_count, 2);
        assert_eq!(
            record.to_description().as_str(),
            "Acme Hindi Alphabet Chart Laminated Waterproof, A3 size Learn letters. Kids 3+"
        );
    }

    #[test]
    fn test_missing_optional_fields_become_empty_segments() {
        let body = json!({
            "title": "Hindi Alphabet Chart",
            "features": ["Waterproof"]
        });
        let record = ProductRecord::from_json(&body).unwrap();
        assert_eq!(record.brand, "");
        assert_eq!(record.subtitle, "");
        assert_eq!(record.description, "");
        assert_eq!(record.overview, "");

        let description = record.to_description();
        assert_eq!(description.as_str(), " Hindi Alphabet Chart  Waterproof  ");
        assert!(description.as_str().contains("Hindi Alphabet Chart"));
        assert!(description.as_str().contains("Waterproof"));
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let body = json!({"brand": "Acme", "features": []});
        let err = ProductRecord::from_json(&body).unwrap_err();
        assert!(matches!(err, ProductError::MissingField("title")));
    }

    #[test]
    fn test_null_fields_render_empty() {
        let body = json!({"title": "Pen", "brand": null, "overview": {"material": "steel"}});
        let record = ProductRecord::from_json(&body).unwrap();
        assert_eq!(record.brand, "");
        assert_eq!(record.overview, r#"{"material":"steel"}"#);
    }
}
