//! Keyword and scored-record types shared by the checker, normalizer and writer.

use std::fmt;

use serde::{Serialize, Serializer};

/// A search term read from the first column of the input sheet.
/// Kept exactly as read: no dedup, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Keyword(pub String);

impl Keyword {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Keyword {
    fn from(value: &str) -> Self {
        Keyword(value.to_string())
    }
}

/// Keyword classification requested from the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Category {
    Brand,
    ShopIntent,
    BrowseIntent,
    /// A label the model produced that is not one of the three known ones.
    Other(String),
    /// No category in the reply.
    #[default]
    Unclassified,
}

impl Category {
    /// Best-effort parse: case, spaces, `_` and `-` are ignored for the known labels.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Category::Unclassified;
        }
        let folded: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "brand" => Category::Brand,
            "shopintent" => Category::ShopIntent,
            "browseintent" => Category::BrowseIntent,
            _ => Category::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Brand => "Brand",
            Category::ShopIntent => "Shop Intent",
            Category::BrowseIntent => "Browse Intent",
            Category::Other(label) => label,
            Category::Unclassified => "",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One output row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeywordRecord {
    #[serde(rename = "Keyword")]
    pub keyword: String,
    /// The model is asked for 0-5 in one place and 0-10 in another; stored as returned.
    #[serde(rename = "Relevance Score")]
    pub relevance_score: f64,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Search Intent Cohort Classification")]
    pub cohort: String,
}

/// The normalized result of a run: fixed columns, zero or more rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RelevanceTable {
    records: Vec<KeywordRecord>,
}

impl RelevanceTable {
    /// Output column order.
    pub const COLUMNS: [&'static str; 4] = [
        "Keyword",
        "Relevance Score",
        "Category",
        "Search Intent Cohort Classification",
    ];

    pub fn new(records: Vec<KeywordRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &'static [&'static str; 4] {
        &Self::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[KeywordRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_known_labels() {
        assert_eq!(Category::parse("Brand"), Category::Brand);
        assert_eq!(Category::parse("shop intent"), Category::ShopIntent);
        assert_eq!(Category::parse("Browse_Intent"), Category::BrowseIntent);
        assert_eq!(Category::parse("  SHOP-INTENT "), Category::ShopIntent);
    }

    #[test]
    fn test_category_parse_unknown_and_empty() {
        assert_eq!(
            Category::parse("Navigational"),
            Category::Other("Navigational".to_string())
        );
        assert_eq!(Category::parse("   "), Category::Unclassified);
        assert_eq!(Category::Unclassified.to_string(), "");
    }

    #[test]
    fn test_record_serializes_with_column_names() {
        let record = KeywordRecord {
            keyword: "red shoes".to_string(),
            relevance_score: 5.0,
            category: Category::ShopIntent,
            cohort: "footwear".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for column in RelevanceTable::COLUMNS {
            assert!(keys.contains(&column), "missing column {column}");
        }
        assert_eq!(value["Category"], "Shop Intent");
        assert_eq!(value["Relevance Score"], 5.0);
    }

    #[test]
    fn test_empty_table_keeps_columns() {
        let table = RelevanceTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.columns().len(), 4);
    }
}
