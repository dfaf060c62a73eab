use super::types::{
    Auth, Body, Collection, Folder, Header, Info, Item, ParamEntry, RequestSpec, ResponseEntry,
    COLLECTION_SCHEMA_URI,
};
use crate::spec::{ParameterLocation, ParameterMeta, RouteMeta, RouteTable, SecurityScheme};
use anyhow::bail;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Assembles the output document from a loaded route table.
///
/// The build is best-effort: a route that fails conversion is logged and
/// skipped, and every other route still lands in the collection.
#[derive(Debug, Clone)]
pub struct CollectionBuilder {
    name: String,
    host: String,
    description: String,
}

impl CollectionBuilder {
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        CollectionBuilder {
            name: name.into(),
            host: host.into(),
            description: String::new(),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Read the collection description from a readme file. An unreadable file
    /// degrades to an empty description, never a failure.
    pub fn readme(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.description = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to read readme, description left empty");
                String::new()
            }
        };
        self
    }

    pub fn build(&self, table: &RouteTable) -> Collection {
        let mut folders: Vec<Folder> = Vec::new();
        let mut folder_index: HashMap<String, usize> = HashMap::new();

        for route in &table.routes {
            let item = match build_item(route, &self.host, &table.schemes) {
                Ok(item) => item,
                Err(err) => {
                    warn!(
                        method = %route.method,
                        path = %route.path_pattern,
                        %err,
                        "skipping route"
                    );
                    continue;
                }
            };

            if route.tags.is_empty() {
                warn!(
                    method = %route.method,
                    path = %route.path_pattern,
                    "route has no tags, omitted from collection"
                );
                continue;
            }

            // One entry per tag; a multi-tagged route shows up in each folder.
            for tag in &route.tags {
                let idx = *folder_index.entry(tag.clone()).or_insert_with(|| {
                    folders.push(Folder {
                        name: tag.clone(),
                        item: Vec::new(),
                    });
                    folders.len() - 1
                });
                folders[idx].item.push(item.clone());
            }
        }

        Collection {
            info: Info {
                name: self.name.clone(),
                schema: COLLECTION_SCHEMA_URI.to_string(),
                description: self.description.clone(),
            },
            item: folders,
            auth: Auth::bearer_placeholder(),
        }
    }
}

/// Convert one route into an exported request definition.
///
/// A failure here fails only this route; the caller skips it and keeps going.
pub fn build_item(
    route: &RouteMeta,
    host: &str,
    schemes: &HashMap<String, SecurityScheme>,
) -> anyhow::Result<Item> {
    let request = RequestSpec {
        url: format!("{}{}{}", host, route.base_path, route.path_pattern),
        method: route.method.as_str().to_string(),
        description: route.summary.clone().unwrap_or_default(),
        header: extract_headers(route, schemes)?,
        body: Body::raw(body_example(route)),
        params: param_entries(route),
        responses: response_entries(route),
    };
    Ok(Item {
        name: route.handler_name.clone(),
        request,
    })
}

/// A scheme that puts a bearer-style credential on the Authorization header.
fn is_bearer_like(scheme: &SecurityScheme) -> bool {
    match scheme {
        SecurityScheme::ApiKey { .. } => true,
        SecurityScheme::OAuth2 { .. } => true,
        SecurityScheme::Http { scheme, .. } => scheme.eq_ignore_ascii_case("bearer"),
        _ => false,
    }
}

fn extract_headers(
    route: &RouteMeta,
    schemes: &HashMap<String, SecurityScheme>,
) -> anyhow::Result<Vec<Header>> {
    let mut headers = Vec::new();

    let mut needs_auth = false;
    for requirement in &route.security {
        for (scheme_name, _scopes) in &requirement.0 {
            let Some(scheme) = schemes.get(scheme_name) else {
                bail!("security requirement references undeclared scheme '{scheme_name}'");
            };
            if is_bearer_like(scheme) {
                needs_auth = true;
            }
        }
    }
    if needs_auth {
        headers.push(Header {
            key: "Authorization".to_string(),
            value: "Bearer {{access_token}}".to_string(),
        });
    }

    for param in &route.parameters {
        if param.location == ParameterLocation::Header {
            headers.push(Header {
                key: param.name.clone(),
                value: format!("{{{{{}}}}}", param.name),
            });
        }
    }

    Ok(headers)
}

/// The placeholder schema attached to each exported parameter: resolved type
/// name, description, default, and example, each an empty string when the
/// declaration is silent.
fn placeholder_schema(param: &ParameterMeta) -> Value {
    let empty = serde_json::Map::new();
    let obj = param
        .schema
        .as_ref()
        .and_then(|s| s.as_object())
        .unwrap_or(&empty);
    let field = |key: &str| obj.get(key).cloned().unwrap_or_else(|| json!(""));
    let description = param
        .description
        .clone()
        .map(Value::String)
        .or_else(|| obj.get("description").cloned())
        .unwrap_or_else(|| json!(""));
    json!({
        "type": field("type"),
        "description": description,
        "default": field("default"),
        "example": field("example"),
    })
}

fn param_entries(route: &RouteMeta) -> Vec<ParamEntry> {
    route
        .parameters
        .iter()
        .filter(|p| {
            matches!(
                p.location,
                ParameterLocation::Query | ParameterLocation::Path
            )
        })
        .map(|p| ParamEntry {
            name: p.name.clone(),
            location: p.location.to_string(),
            required: p.required,
            schema: placeholder_schema(p),
        })
        .collect()
}

/// Pick the example request body: an attached example wins, then the schema's
/// own `example`/`examples` field, then (for a list body) the item schema's
/// example. Everything else defaults to an empty object.
fn body_example(route: &RouteMeta) -> Value {
    if let Some(example) = &route.request_example {
        return example.clone();
    }
    let Some(schema) = route.request_schema.as_ref().and_then(|s| s.as_object()) else {
        return json!({});
    };
    if let Some(example) = schema.get("example") {
        return example.clone();
    }
    if let Some(first) = schema
        .get("examples")
        .and_then(|e| e.as_array())
        .and_then(|a| a.first())
    {
        return first.clone();
    }
    if schema.get("type").and_then(|t| t.as_str()) == Some("array") {
        if let Some(example) = schema
            .get("items")
            .and_then(|i| i.get("example"))
        {
            return example.clone();
        }
    }
    json!({})
}

fn response_entries(route: &RouteMeta) -> BTreeMap<String, ResponseEntry> {
    let mut out = BTreeMap::new();
    for (status, resp) in &route.responses {
        out.insert(
            status.to_string(),
            ResponseEntry::new(
                resp.description.clone(),
                resp.schema.clone().unwrap_or_else(|| json!({})),
            ),
        );
    }
    // No per-status responses declared but a response model exists: emit one
    // synthetic entry keyed by the route's success status.
    if out.is_empty() {
        if let Some(schema) = &route.default_response_schema {
            out.insert(
                route.success_status.to_string(),
                ResponseEntry::new("Default response", schema.clone()),
            );
        }
    }
    out
}
