//! Query bodies and response parsing for the resume index.

use resume_indexer_shared::{IndexedDocument, SearchQuery, SearchResults};
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::SearchIndexError;

/// Fields searched by keyword queries, with their boosts.
pub const KEYWORD_FIELDS: [&str; 5] = [
    "resume_data.Skills^3",
    "resume_data.Experience.title^2",
    "resume_data.Experience.description",
    "resume_data.Key Accomplishments^2",
    "resume_data.Years of Experience",
];

/// Build the request body for a search query.
pub fn build_search_body(query: &SearchQuery) -> Value {
    let mut body = match query {
        SearchQuery::MatchAll => json!({
            "query": { "match_all": {} }
        }),
        SearchQuery::ByName { name } => json!({
            "query": { "match": { "resume_data.Name": name } }
        }),
        SearchQuery::Keywords {
            keyword,
            min_experience,
        } => {
            let mut bool_query = json!({
                "must": [{
                    "multi_match": {
                        "query": keyword,
                        "fields": KEYWORD_FIELDS,
                        "fuzziness": "AUTO"
                    }
                }]
            });
            if let Some(years) = min_experience {
                bool_query["filter"] = json!([{
                    "range": { "resume_data.Years of Experience": { "gte": years } }
                }]);
            }
            json!({ "query": { "bool": bool_query } })
        }
        SearchQuery::Context { prompt } => json!({
            "query": {
                "multi_match": {
                    "query": prompt,
                    "fields": ["resume_data.*"],
                    "fuzziness": "AUTO",
                    "operator": "or"
                }
            }
        }),
    };

    if let Some(size) = query.size() {
        body["size"] = json!(size);
    }

    body
}

/// Parse a search response into documents and the total hit count.
///
/// Accepts both the object form of `hits.total` (`{"value": n}`) and the legacy
/// numeric form. Hits whose `_source` is not a resume document are logged and
/// left out of the returned documents; `total` still counts them.
pub fn parse_search_response(body: &Value) -> Result<SearchResults, SearchIndexError> {
    let hits = body
        .get("hits")
        .ok_or_else(|| SearchIndexError::parse("Search response has no 'hits' section"))?;

    let total = match &hits["total"] {
        Value::Number(n) => n.as_u64(),
        Value::Object(obj) => obj.get("value").and_then(Value::as_u64),
        _ => None,
    }
    .ok_or_else(|| SearchIndexError::parse("Search response has no usable 'hits.total'"))?;

    let documents = hits["hits"]
        .as_array()
        .map(|items| items.as_slice())
        .unwrap_or_default()
        .iter()
        .filter_map(|hit| {
            match serde_json::from_value::<IndexedDocument>(hit["_source"].clone()) {
                Ok(document) => Some(document),
                Err(e) => {
                    warn!(id = %hit["_id"], error = %e, "Skipping hit with invalid source");
                    None
                }
            }
        })
        .collect();

    Ok(SearchResults { total, documents })
}
