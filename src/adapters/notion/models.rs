//! Notion wire format
//!
//! Encodes the domain property model into Notion API JSON and decodes the
//! handful of response shapes the backfill reads.

use crate::domain::{Condition, DatabaseId, Icon, Predicate, PropertySet, PropertyValue, QueryFilter};
use serde::Deserialize;
use serde_json::{json, Map, Value};

fn text_array(content: &str) -> Value {
    json!([{ "type": "text", "text": { "content": content } }])
}

/// Encodes a single property value
pub fn encode_value(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Title(text) => json!({ "title": text_array(text) }),
        PropertyValue::RichText(text) => json!({ "rich_text": text_array(text) }),
        PropertyValue::Number(number) => json!({ "number": number }),
        PropertyValue::Select(name) => json!({ "select": { "name": name } }),
        PropertyValue::Date { start, end } => json!({ "date": { "start": start, "end": end } }),
        PropertyValue::Checkbox(checked) => json!({ "checkbox": checked }),
    }
}

/// Encodes a property set as the `properties` object of a page
pub fn encode_properties(properties: &PropertySet) -> Value {
    let map: Map<String, Value> = properties
        .iter()
        .map(|(name, value)| (name.to_string(), encode_value(value)))
        .collect();
    Value::Object(map)
}

fn encode_predicate(predicate: &Predicate) -> Value {
    match &predicate.condition {
        Condition::DateEquals(day) => json!({
            "property": predicate.property,
            "date": { "equals": day },
        }),
        Condition::TitleEquals(text) => json!({
            "property": predicate.property,
            "title": { "equals": text },
        }),
    }
}

/// Encodes a filter; several predicates become an `and` compound
pub fn encode_filter(filter: &QueryFilter) -> Value {
    match filter.predicates() {
        [single] => encode_predicate(single),
        many => json!({ "and": many.iter().map(encode_predicate).collect::<Vec<_>>() }),
    }
}

pub fn encode_icon(icon: &Icon) -> Value {
    match icon {
        Icon::Emoji(emoji) => json!({ "type": "emoji", "emoji": emoji }),
    }
}

/// Body of `POST /v1/databases/{id}/query`
///
/// One result is enough to prove a duplicate.
pub fn query_body(filter: &QueryFilter) -> Value {
    json!({
        "filter": encode_filter(filter),
        "page_size": 1,
    })
}

/// Body of `POST /v1/pages`
pub fn create_page_body(
    database_id: &DatabaseId,
    properties: &PropertySet,
    icon: Option<&Icon>,
) -> Value {
    let mut body = json!({
        "parent": { "database_id": database_id.as_str() },
        "properties": encode_properties(properties),
    });
    if let (Some(icon), Some(object)) = (icon, body.as_object_mut()) {
        object.insert("icon".to_string(), encode_icon(icon));
    }
    body
}

/// Page object, reduced to what the backfill needs
#[derive(Debug, Clone, Deserialize)]
pub struct PageObject {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Response of a database query
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<PageObject>,
    #[serde(default)]
    pub has_more: bool,
}

/// Error body returned by the Notion API
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// `code: message`, falling back to the raw body when it is not JSON
    pub fn describe(raw: &str) -> String {
        match serde_json::from_str::<ErrorBody>(raw) {
            Ok(ErrorBody {
                code: Some(code),
                message: Some(message),
            }) => format!("{code}: {message}"),
            Ok(ErrorBody {
                message: Some(message),
                ..
            }) => message,
            _ => raw.chars().take(200).collect(),
        }
    }
}
