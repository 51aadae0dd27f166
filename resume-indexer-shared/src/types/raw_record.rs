//! Raw resume records as kept in the record store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A resume exactly as it was uploaded.
///
/// `file_name` is the natural key of the record store. `resume_data` is
/// whatever JSON the uploader sent; its shape is a soft contract and is only
/// cleaned up on the way into the search index.
///
/// Depending on how the row was written, `resume_data` may come back from the
/// store as a JSON string holding the serialized document rather than the
/// document itself. Use [`RawRecord::decoded_resume_data`] to get the
/// structured value in both cases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    pub file_name: String,
    pub resume_data: Value,
}

impl RawRecord {
    /// Create a new raw record.
    pub fn new(file_name: impl Into<String>, resume_data: Value) -> Self {
        Self {
            file_name: file_name.into(),
            resume_data,
        }
    }

    /// Return the structured resume document.
    ///
    /// A string payload is parsed as serialized JSON; any other value is
    /// returned as is.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `resume_data` is a string that does not
    /// hold valid JSON.
    pub fn decoded_resume_data(&self) -> Result<Value, serde_json::Error> {
        match &self.resume_data {
            Value::String(serialized) => serde_json::from_str(serialized),
            other => Ok(other.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decoded_resume_data_structured() {
        let record = RawRecord::new("ann.json", json!({"Name": "Ann"}));
        assert_eq!(record.decoded_resume_data().unwrap(), json!({"Name": "Ann"}));
    }

    #[test]
    fn test_decoded_resume_data_serialized_string() {
        let record = RawRecord::new("ann.json", json!(r#"{"Name":"Ann","Skills":["Rust"]}"#));
        assert_eq!(
            record.decoded_resume_data().unwrap(),
            json!({"Name": "Ann", "Skills": ["Rust"]})
        );
    }

    #[test]
    fn test_decoded_resume_data_invalid_string() {
        let record = RawRecord::new("broken.json", json!("{not json"));
        assert!(record.decoded_resume_data().is_err());
    }
}
