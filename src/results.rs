use serde::{Deserialize, Serialize};

/// One article found on a listing page
///
/// Field order is the column order of the CSV output, and the uppercased
/// field names are its header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ArticleRecord {
    /// Text of the article heading, as rendered
    pub title: String,

    /// Text of the category label, as rendered
    pub category: String,
}

impl ArticleRecord {
    /// Create a new article record
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
        }
    }
}
