//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the resume search index.

use std::str::FromStr;

use serde_json::{json, Value};

/// The default name of the search index.
pub const DEFAULT_INDEX_NAME: &str = "resumes";

/// How documents are written during re-indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Documents are keyed by `file_name`; re-indexing replaces them.
    #[default]
    Upsert,
    /// Documents get engine-generated ids; re-indexing without clearing the
    /// index duplicates them.
    Append,
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upsert" => Ok(Self::Upsert),
            "append" => Ok(Self::Append),
            other => Err(format!(
                "invalid write mode '{}', expected 'upsert' or 'append'",
                other
            )),
        }
    }
}

/// Configuration for the search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The index name used for all operations.
    pub name: String,
    /// How documents are written.
    pub write_mode: WriteMode,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `name` - The index name
    /// * `write_mode` - Whether documents are upserted by `file_name` or appended
    pub fn new(name: impl Into<String>, write_mode: WriteMode) -> Self {
        Self {
            name: name.into(),
            write_mode,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME, WriteMode::default())
    }
}

/// Get the index settings and mappings for the resume search index.
///
/// The mapping includes:
/// - **keyword** fields for exact-match lists (`Skills`, `Hobbies`, ...) and `file_name`
/// - **text** fields for free-text scalars (`Name`, `Key Accomplishments`, ...)
/// - **nested** objects for `Education` and `Experience` entries
///
/// Fields outside the mapping are still accepted and mapped dynamically.
pub fn get_index_settings() -> Value {
    json!({
        "mappings": {
            "properties": {
                "file_name": { "type": "keyword" },
                "resume_data": {
                    "properties": {
                        "Name": { "type": "text" },
                        "Email": { "type": "text" },
                        "Phone": { "type": "text" },
                        "Address": { "type": "text" },
                        "Skills": { "type": "keyword" },
                        "Hobbies": { "type": "keyword" },
                        "Languages": { "type": "keyword" },
                        "Certifications": { "type": "keyword" },
                        "Notable Companies": { "type": "keyword" },
                        "Key Accomplishments": { "type": "text" },
                        "Years of Experience": { "type": "text" },
                        "Education": {
                            "type": "nested",
                            "properties": {
                                "degree": { "type": "text" },
                                "institution": { "type": "text" },
                                "graduation_year": { "type": "keyword" }
                            }
                        },
                        "Experience": {
                            "type": "nested",
                            "properties": {
                                "dates": { "type": "text" },
                                "title": { "type": "text" },
                                "company": { "type": "text" },
                                "description": { "type": "text" }
                            }
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];
        let resume = &properties["resume_data"]["properties"];

        assert_eq!(properties["file_name"]["type"], "keyword");

        for field in ["Name", "Email", "Phone", "Address", "Key Accomplishments", "Years of Experience"] {
            assert_eq!(resume[field]["type"], "text", "{} should be text", field);
        }

        for field in ["Skills", "Hobbies", "Languages", "Certifications", "Notable Companies"] {
            assert_eq!(resume[field]["type"], "keyword", "{} should be keyword", field);
        }

        assert_eq!(resume["Education"]["type"], "nested");
        assert_eq!(
            resume["Education"]["properties"]["graduation_year"]["type"],
            "keyword"
        );
        assert_eq!(resume["Experience"]["type"], "nested");
        assert_eq!(resume["Experience"]["properties"]["title"]["type"], "text");
    }

    #[test]
    fn test_write_mode_from_str() {
        assert_eq!("upsert".parse::<WriteMode>(), Ok(WriteMode::Upsert));
        assert_eq!(" APPEND ".parse::<WriteMode>(), Ok(WriteMode::Append));
        assert!("replace".parse::<WriteMode>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.name, DEFAULT_INDEX_NAME);
        assert_eq!(config.write_mode, WriteMode::Upsert);
    }
}
