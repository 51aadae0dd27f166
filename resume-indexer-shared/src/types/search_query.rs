//! Search query types for the resume indexer.
//!
//! This module defines the query shapes the HTTP layer can run against the
//! search index. Query bodies are built by the search backend; these types
//! only carry the user's parameters.

use serde::{Deserialize, Serialize};

/// Page size for listing every indexed document.
pub const MATCH_ALL_PAGE_SIZE: usize = 1000;

/// Page size for candidate searches (keyword and context).
pub const CANDIDATE_PAGE_SIZE: usize = 50;

/// Search query parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchQuery {
    /// Every document, first page only.
    MatchAll,

    /// Full-text match on the candidate's name.
    ByName { name: String },

    /// Field-boosted fuzzy search over skills, experience and accomplishments,
    /// optionally restricted to a minimum number of years of experience.
    Keywords {
        keyword: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_experience: Option<i64>,
    },

    /// Fuzzy search across every resume field.
    Context { prompt: String },
}

impl SearchQuery {
    /// Create a name query.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self::ByName { name: name.into() }
    }

    /// Create a keyword query.
    ///
    /// # Example
    ///
    /// ```
    /// use resume_indexer_shared::SearchQuery;
    ///
    /// let query = SearchQuery::keywords("rust", Some(3));
    /// assert_eq!(query.size(), Some(50));
    /// ```
    pub fn keywords(keyword: impl Into<String>, min_experience: Option<i64>) -> Self {
        Self::Keywords {
            keyword: keyword.into(),
            min_experience,
        }
    }

    /// Create a context query.
    pub fn context(prompt: impl Into<String>) -> Self {
        Self::Context {
            prompt: prompt.into(),
        }
    }

    /// Number of hits to request, or `None` to use the engine default.
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::MatchAll => Some(MATCH_ALL_PAGE_SIZE),
            Self::ByName { .. } => None,
            Self::Keywords { .. } | Self::Context { .. } => Some(CANDIDATE_PAGE_SIZE),
        }
    }

    /// Validate the query parameters.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        let (field, text) = match self {
            Self::MatchAll => return Ok(()),
            Self::ByName { name } => ("name", name),
            Self::Keywords {
                keyword,
                min_experience,
            } => {
                if matches!(min_experience, Some(years) if *years < 0) {
                    return Err("min_experience cannot be negative".to_string());
                }
                ("keyword", keyword)
            }
            Self::Context { prompt } => ("prompt", prompt),
        };

        if text.trim().is_empty() {
            return Err(format!("{} cannot be empty", field));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(SearchQuery::MatchAll.size(), Some(MATCH_ALL_PAGE_SIZE));
        assert_eq!(SearchQuery::by_name("Ann").size(), None);
        assert_eq!(SearchQuery::keywords("rust", None).size(), Some(CANDIDATE_PAGE_SIZE));
        assert_eq!(SearchQuery::context("backend").size(), Some(CANDIDATE_PAGE_SIZE));
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        assert!(SearchQuery::by_name("  ").validate().is_err());
        assert!(SearchQuery::keywords("", None).validate().is_err());
        assert!(SearchQuery::context("\t").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_experience() {
        let err = SearchQuery::keywords("rust", Some(-1)).validate().unwrap_err();
        assert!(err.contains("min_experience"));
    }

    #[test]
    fn test_validate_accepts_valid_queries() {
        assert!(SearchQuery::MatchAll.validate().is_ok());
        assert!(SearchQuery::by_name("Ann").validate().is_ok());
        assert!(SearchQuery::keywords("rust", Some(0)).validate().is_ok());
        assert!(SearchQuery::context("distributed systems").validate().is_ok());
    }
}
