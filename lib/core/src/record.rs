use serde::{Deserialize, Serialize};

/// Rating value - opaque passthrough from whatever metadata source filled it.
/// Sources emit either a number or a sentinel string like "N/A".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Rating {
    Number(f64),
    Text(String),
}

impl Default for Rating {
    fn default() -> Self {
        Rating::Text("N/A".to_string())
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Number(n) => write!(f, "{}", n),
            Rating::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Rating {
    fn from(n: f64) -> Self {
        Rating::Number(n)
    }
}

impl From<&str> for Rating {
    fn from(s: &str) -> Self {
        Rating::Text(s.to_string())
    }
}

/// One catalog entry.
///
/// `clean_description` and `categories` are produced by an external enrichment
/// step and may lag behind `title`/`description`; the feature builder filters
/// on [`Record::is_vectorizable`] rather than assuming they are filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    /// Comma-joined author list, may be empty.
    #[serde(default)]
    pub author: String,
    /// Raw description, possibly HTML-bearing.
    #[serde(default)]
    pub description: String,
    /// Plain-text description with HTML already stripped.
    #[serde(default)]
    pub clean_description: String,
    /// Comma-separated category labels.
    #[serde(default)]
    pub categories: String,
    #[serde(default)]
    pub rating: Rating,
}

impl Record {
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: String::new(),
            description: String::new(),
            clean_description: String::new(),
            categories: String::new(),
            rating: Rating::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_clean_description(mut self, clean_description: impl Into<String>) -> Self {
        self.clean_description = clean_description.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = categories.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_rating(mut self, rating: impl Into<Rating>) -> Self {
        self.rating = rating.into();
        self
    }

    /// The identity used for dedup and lookup: trimmed, case-folded title.
    #[inline]
    #[must_use]
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }

    /// Category labels split on comma, trimmed and lower-cased.
    /// Entries with no alphanumeric content (stray parentheses, blank commas)
    /// are dropped.
    #[must_use]
    pub fn category_labels(&self) -> Vec<String> {
        self.categories
            .split(',')
            .map(|c| c.trim().to_lowercase())
            .filter(|c| c.chars().any(|ch| ch.is_alphanumeric()))
            .collect()
    }

    /// Whether this record can participate in the similarity space.
    /// Records without a usable clean description can be neither seeds
    /// nor results.
    #[inline]
    #[must_use]
    pub fn is_vectorizable(&self) -> bool {
        !self.clean_description.trim().is_empty()
    }
}

/// Normalize a title for matching: trim + case-fold.
#[inline]
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
