use super::types::{ParameterLocation, ParameterMeta, ResponseSpec, Responses, RouteMeta};
use super::SecurityScheme;
use oas3::spec::{MediaTypeExamples, ObjectOrReference, Parameter};
use oas3::OpenApiV3Spec;
use serde_json::Value;

/// Resolve a JSON Schema `$ref` like `#/components/schemas/Item` against the
/// spec's component registry.
pub fn resolve_schema_ref<'a>(
    spec: &'a OpenApiV3Spec,
    ref_path: &str,
) -> Option<&'a oas3::spec::ObjectSchema> {
    if let Some(name) = ref_path.strip_prefix("#/components/schemas/") {
        spec.components
            .as_ref()?
            .schemas
            .get(name)
            .and_then(|schema_ref| match schema_ref {
                ObjectOrReference::Object(schema) => Some(schema),
                _ => None,
            })
    } else {
        None
    }
}

/// Recursively replace `$ref` objects with their resolved component schemas.
///
/// The collection document embeds schemas inline, so references must be
/// expanded before a route's schema leaves this module.
pub fn expand_schema_refs(spec: &OpenApiV3Spec, value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(ref_path) = obj.get("$ref").and_then(|v| v.as_str()) {
                if let Some(schema) = resolve_schema_ref(spec, ref_path) {
                    if let Ok(mut new_val) = serde_json::to_value(schema) {
                        expand_schema_refs(spec, &mut new_val);
                        *value = new_val;
                        return;
                    }
                }
            }
            for v in obj.values_mut() {
                expand_schema_refs(spec, v);
            }
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                expand_schema_refs(spec, v);
            }
        }
        _ => {}
    }
}

fn resolve_parameter_ref<'a>(
    spec: &'a OpenApiV3Spec,
    ref_path: &str,
) -> Option<&'a oas3::spec::Parameter> {
    if let Some(name) = ref_path.strip_prefix("#/components/parameters/") {
        spec.components
            .as_ref()?
            .parameters
            .get(name)
            .and_then(|param_ref| match param_ref {
                ObjectOrReference::Object(param) => Some(param),
                _ => None,
            })
    } else {
        None
    }
}

/// Resolve parameter references and extract name, location, required flag,
/// schema, and description for each declared parameter.
pub fn extract_parameters(
    spec: &OpenApiV3Spec,
    params: &Vec<ObjectOrReference<Parameter>>,
) -> Vec<ParameterMeta> {
    let mut out = Vec::new();
    for p in params {
        let param = match p {
            ObjectOrReference::Object(obj) => Some(obj),
            ObjectOrReference::Ref { ref_path, .. } => resolve_parameter_ref(spec, ref_path),
        };

        if let Some(param) = param {
            let mut schema = param.schema.as_ref().and_then(|s| match s {
                ObjectOrReference::Object(obj) => serde_json::to_value(obj).ok(),
                ObjectOrReference::Ref { ref_path, .. } => resolve_schema_ref(spec, ref_path)
                    .and_then(|sch| serde_json::to_value(sch).ok()),
            });
            if let Some(ref mut val) = schema {
                expand_schema_refs(spec, val);
            }

            let location = ParameterLocation::from(param.location);
            out.push(ParameterMeta {
                name: param.name.clone(),
                location,
                // Path parameters are mandatory whatever the declaration says.
                required: location == ParameterLocation::Path
                    || param.required.unwrap_or(false),
                schema,
                description: param.description.clone(),
            });
        }
    }
    out
}

/// Extract the `application/json` request body schema (refs expanded) and an
/// attached media-type example, if the operation declares either.
pub fn extract_request_schema_and_example(
    spec: &OpenApiV3Spec,
    operation: &oas3::spec::Operation,
) -> (Option<Value>, Option<Value>) {
    let mut example = None;
    let mut schema = operation.request_body.as_ref().and_then(|r| match r {
        ObjectOrReference::Object(req_body) => {
            req_body.content.get("application/json").and_then(|media| {
                example = media_example(media);
                match media.schema.as_ref()? {
                    ObjectOrReference::Object(schema_obj) => serde_json::to_value(schema_obj).ok(),
                    ObjectOrReference::Ref { ref_path, .. } => resolve_schema_ref(spec, ref_path)
                        .and_then(|s| serde_json::to_value(s).ok()),
                }
            })
        }
        _ => None,
    });
    if let Some(ref mut val) = schema {
        expand_schema_refs(spec, val);
    }
    (schema, example)
}

fn media_example(media: &oas3::spec::MediaType) -> Option<Value> {
    match &media.examples {
        Some(MediaTypeExamples::Example { example }) => Some(example.clone()),
        Some(MediaTypeExamples::Examples { examples }) => {
            examples.iter().find_map(|(_, v)| match v {
                ObjectOrReference::Object(obj) => obj.value.clone(),
                _ => None,
            })
        }
        None => None,
    }
}

/// Extract declared responses from an operation.
///
/// Numeric status entries land in the returned map with their description and
/// resolved schema (preferring `application/json`, else the first declared
/// media type). A `default` entry contributes only the fallback schema used
/// for synthetic single-response emission.
pub fn extract_responses(
    spec: &OpenApiV3Spec,
    operation: &oas3::spec::Operation,
) -> (Responses, Option<Value>) {
    let mut all: Responses = Responses::new();
    let mut default_schema = None;

    if let Some(responses_map) = operation.responses.as_ref() {
        for (status_str, resp_ref) in responses_map {
            let resp_obj = match resp_ref {
                ObjectOrReference::Object(obj) => obj,
                _ => continue,
            };

            let media = resp_obj
                .content
                .get("application/json")
                .or_else(|| resp_obj.content.values().next());
            let mut schema = media.and_then(|m| match m.schema.as_ref() {
                Some(ObjectOrReference::Object(schema_obj)) => {
                    serde_json::to_value(schema_obj).ok()
                }
                Some(ObjectOrReference::Ref { ref_path, .. }) => {
                    resolve_schema_ref(spec, ref_path).and_then(|s| serde_json::to_value(s).ok())
                }
                None => None,
            });
            if let Some(ref mut val) = schema {
                expand_schema_refs(spec, val);
            }

            match status_str.parse::<u16>() {
                Ok(status) => {
                    all.insert(
                        status,
                        ResponseSpec {
                            description: resp_obj.description.clone().unwrap_or_default(),
                            schema,
                        },
                    );
                }
                // "default" and status ranges carry no usable key; the first
                // schema seen becomes the synthetic-response fallback.
                Err(_) => {
                    if default_schema.is_none() {
                        default_schema = schema;
                    }
                }
            }
        }
    }

    (all, default_schema)
}

/// Extract all declared security schemes from `components.securitySchemes`.
pub fn extract_security_schemes(
    spec: &OpenApiV3Spec,
) -> std::collections::HashMap<String, SecurityScheme> {
    spec.components
        .as_ref()
        .map(|c| {
            c.security_schemes
                .iter()
                .filter_map(|(name, scheme)| match scheme {
                    ObjectOrReference::Object(obj) => Some((name.clone(), obj.clone())),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// operationId when declared, otherwise a snake_case name derived from the
/// method and path (`GET /items/{item_id}` becomes `get_items_item_id`).
fn derive_handler_name(operation: &oas3::spec::Operation, method: &http::Method, path: &str) -> String {
    if let Some(id) = operation.operation_id.as_ref() {
        return id.clone();
    }
    let slug: String = path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        method.as_str().to_ascii_lowercase()
    } else {
        format!("{}_{}", method.as_str().to_ascii_lowercase(), slug)
    }
}

fn success_status(responses: &Responses) -> u16 {
    responses
        .keys()
        .copied()
        .find(|s| (200..300).contains(s))
        .unwrap_or(200)
}

fn base_path(spec: &OpenApiV3Spec) -> String {
    let Some(server) = spec.servers.first() else {
        return String::new();
    };
    let url_str = &server.url;
    url::Url::parse(url_str)
        .or_else(|_| url::Url::parse(&format!("http://dummy{url_str}")))
        .map(|u| {
            let p = u.path().trim_end_matches('/');
            if p == "/" || p.is_empty() {
                String::new()
            } else {
                p.to_string()
            }
        })
        .unwrap_or_default()
}

/// Build route metadata for every operation in the spec.
///
/// Iteration is the document's path order crossed with a fixed verb order,
/// so the same document always yields the same route sequence.
pub fn build_routes(spec: &OpenApiV3Spec) -> anyhow::Result<Vec<RouteMeta>> {
    let mut routes = Vec::new();
    let base_path = base_path(spec);

    if let Some(paths_map) = spec.paths.as_ref() {
        for (path, item) in paths_map {
            for (method_str, operation) in item.methods() {
                let method = method_str.clone();
                let handler_name = derive_handler_name(operation, &method, path);

                let (request_schema, request_example) =
                    extract_request_schema_and_example(spec, operation);
                let (responses, default_response_schema) = extract_responses(spec, operation);

                let security = if !operation.security.is_empty() {
                    operation.security.clone()
                } else {
                    spec.security.clone()
                };

                let mut parameters = Vec::new();
                parameters.extend(extract_parameters(spec, &item.parameters));
                parameters.extend(extract_parameters(spec, &operation.parameters));

                routes.push(RouteMeta {
                    method,
                    path_pattern: path.clone(),
                    handler_name,
                    summary: operation.summary.clone(),
                    tags: operation.tags.clone(),
                    parameters,
                    request_schema,
                    request_example,
                    success_status: success_status(&responses),
                    responses,
                    default_response_schema,
                    security,
                    base_path: base_path.clone(),
                });
            }
        }
    }

    Ok(routes)
}
