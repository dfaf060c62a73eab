use super::build::{build_routes, extract_security_schemes};
use super::types::RouteMeta;
use super::SecurityScheme;
use anyhow::Context;
use oas3::OpenApiV3Spec;
use std::collections::HashMap;

/// A parsed route table: everything the collection builder reads.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub routes: Vec<RouteMeta>,
    pub schemes: HashMap<String, SecurityScheme>,
}

fn strip_unknown_verbs(val: &mut serde_json::Value) {
    const METHODS: [&str; 8] = [
        "get", "post", "put", "delete", "patch", "options", "head", "trace",
    ];

    if let Some(serde_json::Value::Object(paths_map)) = val.get_mut("paths") {
        for item in paths_map.values_mut() {
            if let serde_json::Value::Object(obj) = item {
                let keys: Vec<String> = obj.keys().cloned().collect();
                for k in keys {
                    let lk = k.to_ascii_lowercase();
                    let keep = match lk.as_str() {
                        "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                        m if METHODS.contains(&m) => true,
                        _ => k.starts_with("x-"),
                    };
                    if !keep {
                        obj.remove(&k);
                    }
                }
            }
        }
    }
}

/// Load an OpenAPI document (YAML or JSON by extension) and build its route
/// table. Any failure here is fatal to the invocation: there is no route set
/// to export without it.
pub fn load_spec(file_path: &str) -> anyhow::Result<RouteTable> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read spec file {file_path}"))?;
    let mut value: serde_json::Value =
        if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

    strip_unknown_verbs(&mut value);
    let spec: OpenApiV3Spec = serde_json::from_value(value)
        .with_context(|| format!("{file_path} is not a valid OpenAPI document"))?;

    load_spec_from_spec(spec)
}

/// Build a route table from an already parsed [`OpenApiV3Spec`].
pub fn load_spec_from_spec(spec: OpenApiV3Spec) -> anyhow::Result<RouteTable> {
    let routes = build_routes(&spec)?;
    let schemes = extract_security_schemes(&spec);
    Ok(RouteTable { routes, schemes })
}
