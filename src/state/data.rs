/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer, the classifier, and the UI layer.

use serde::{Deserialize, Serialize};

/// The closed set of catalog categories.
///
/// Each variant maps to its canonical Chinese label, which is what the
/// database stores and what the classifier is constrained to return.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[serde(rename = "动物")]
    Animals,
    #[serde(rename = "花鸟")]
    FlowersBirds,
    #[serde(rename = "人物")]
    People,
    #[serde(rename = "山水")]
    Landscapes,
    #[serde(rename = "其他")]
    #[default]
    Others,
}

impl Category {
    /// All categories, in the order the UI presents them
    pub const ALL: [Category; 5] = [
        Category::Animals,
        Category::FlowersBirds,
        Category::People,
        Category::Landscapes,
        Category::Others,
    ];

    /// The canonical label, as stored in the database
    pub fn label(&self) -> &'static str {
        match self {
            Category::Animals => "动物",
            Category::FlowersBirds => "花鸟",
            Category::People => "人物",
            Category::Landscapes => "山水",
            Category::Others => "其他",
        }
    }

    /// Parse a stored label back into a category
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single artwork record in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    /// Unique id, immutable after creation
    pub id: String,
    /// Display title of the piece
    pub title: String,
    /// Either a `data:image/jpeg;base64,` payload (uploads) or a remote URL (seed data)
    pub image_url: String,
    pub category: Category,
    pub description: String,
    /// Needlework techniques used (针法)
    pub needlework: String,
    /// Rank within the catalog; unique across all records
    pub display_order: i64,
    /// Creation timestamp in epoch milliseconds, immutable
    pub created_at: i64,
}

/// Metadata proposed by the image classifier.
///
/// Exactly these four fields; anything else in the response payload is a
/// contract violation and fails parsing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalysisResult {
    pub title: String,
    pub category: Category,
    pub description: String,
    pub needlework: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(Category::from_label("刺绣"), None);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::Landscapes).unwrap();
        assert_eq!(json, "\"山水\"");

        let parsed: Category = serde_json::from_str("\"花鸟\"").unwrap();
        assert_eq!(parsed, Category::FlowersBirds);
    }
}
