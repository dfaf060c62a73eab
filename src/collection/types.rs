use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Postman collection format v2.1.0 schema URI, fixed for every export.
pub const COLLECTION_SCHEMA_URI: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// The exported request-collection document.
///
/// Field order here is serialization order; keep it matching the documented
/// output shape so repeated exports stay byte-identical.
#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    pub info: Info,
    pub item: Vec<Folder>,
    pub auth: Auth,
}

#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub name: String,
    pub schema: String,
    pub description: String,
}

/// Top-level auth block: a bearer token placeholder the client fills in.
#[derive(Debug, Clone, Serialize)]
pub struct Auth {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub bearer: Vec<AuthParam>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthParam {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

impl Auth {
    pub fn bearer_placeholder() -> Self {
        Auth {
            auth_type: "bearer".to_string(),
            bearer: vec![AuthParam {
                key: "token".to_string(),
                value: "{{access_token}}".to_string(),
                param_type: "string".to_string(),
            }],
        }
    }
}

/// A named group of items, one per route tag, in first-seen tag order.
#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    pub name: String,
    pub item: Vec<Item>,
}

/// One exported request definition.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub name: String,
    pub request: RequestSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestSpec {
    pub url: String,
    pub method: String,
    pub description: String,
    pub header: Vec<Header>,
    pub body: Body,
    pub params: Vec<ParamEntry>,
    pub responses: BTreeMap<String, ResponseEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Body {
    pub mode: String,
    pub raw: Value,
}

impl Body {
    pub fn raw(raw: Value) -> Self {
        Body {
            mode: "raw".to_string(),
            raw,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamEntry {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    pub schema: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseEntry {
    pub description: String,
    pub content: ResponseContent,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseContent {
    #[serde(rename = "application/json")]
    pub json: SchemaObject,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaObject {
    pub schema: Value,
}

impl ResponseEntry {
    pub fn new(description: impl Into<String>, schema: Value) -> Self {
        ResponseEntry {
            description: description.into(),
            content: ResponseContent {
                json: SchemaObject { schema },
            },
        }
    }
}
