#![allow(clippy::unwrap_used, clippy::expect_used)]

use http::Method;
use postpack::spec::{load_spec, ParameterLocation};
use std::path::PathBuf;

const YAML_SPEC: &str = r#"openapi: 3.1.0
info:
  title: Item Service
  version: "1.0.0"
servers:
  - url: http://localhost:8080/api/v1
components:
  securitySchemes:
    bearer_auth:
      type: http
      scheme: bearer
  schemas:
    Item:
      type: object
      properties:
        id: { type: string }
        name: { type: string }
  parameters:
    IdParam:
      name: id
      in: path
      required: true
      schema: { type: string }
paths:
  /items/{id}:
    put:
      operationId: update_item
      summary: Update an item
      tags: [Items]
      security:
        - bearer_auth: []
      parameters:
        - $ref: '#/components/parameters/IdParam'
        - name: debug
          in: query
          required: false
          description: Enable debug output
          schema: { type: boolean }
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Item'
            example:
              id: '123'
              name: 'Widget'
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Item'
  /items:
    get:
      operationId: list_items
      tags: [Items]
      responses:
        "200":
          description: OK
    post:
      operationId: create_item
      tags: [Items]
      responses:
        "201":
          description: Created
  /health:
    get:
      responses:
        default:
          description: Service health
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Item'
"#;

fn write_temp_spec(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.yaml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_load_spec_builds_all_routes() {
    let (_dir, path) = write_temp_spec(YAML_SPEC);
    let table = load_spec(path.to_str().unwrap()).unwrap();
    assert_eq!(table.routes.len(), 4);
    assert!(table.schemes.contains_key("bearer_auth"));
}

#[test]
fn test_parameter_refs_are_resolved() {
    let (_dir, path) = write_temp_spec(YAML_SPEC);
    let table = load_spec(path.to_str().unwrap()).unwrap();
    let route = table
        .routes
        .iter()
        .find(|r| r.handler_name == "update_item")
        .unwrap();

    assert_eq!(route.parameters.len(), 2);
    let id = &route.parameters[0];
    assert_eq!(id.name, "id");
    assert_eq!(id.location, ParameterLocation::Path);
    assert!(id.required);
    assert_eq!(id.schema.as_ref().unwrap()["type"], "string");

    let debug = &route.parameters[1];
    assert_eq!(debug.location, ParameterLocation::Query);
    assert!(!debug.required);
    assert_eq!(debug.description.as_deref(), Some("Enable debug output"));
}

#[test]
fn test_request_schema_refs_expanded_and_example_attached() {
    let (_dir, path) = write_temp_spec(YAML_SPEC);
    let table = load_spec(path.to_str().unwrap()).unwrap();
    let route = table
        .routes
        .iter()
        .find(|r| r.handler_name == "update_item")
        .unwrap();

    let schema = route.request_schema.as_ref().unwrap();
    assert!(schema.get("$ref").is_none());
    assert_eq!(schema["properties"]["name"]["type"], "string");

    let example = route.request_example.as_ref().unwrap();
    assert_eq!(example["name"], "Widget");
}

#[test]
fn test_multi_method_path_yields_one_route_per_method() {
    let (_dir, path) = write_temp_spec(YAML_SPEC);
    let table = load_spec(path.to_str().unwrap()).unwrap();
    let methods: Vec<&Method> = table
        .routes
        .iter()
        .filter(|r| r.path_pattern == "/items")
        .map(|r| &r.method)
        .collect();
    assert_eq!(methods.len(), 2);
    assert!(methods.contains(&&Method::GET));
    assert!(methods.contains(&&Method::POST));
}

#[test]
fn test_repeated_loads_do_not_disturb_route_metadata() {
    let (_dir, path) = write_temp_spec(YAML_SPEC);
    let first = load_spec(path.to_str().unwrap()).unwrap();
    let second = load_spec(path.to_str().unwrap()).unwrap();
    assert_eq!(first.routes.len(), second.routes.len());
    for (a, b) in first.routes.iter().zip(second.routes.iter()) {
        assert_eq!(a.method, b.method);
        assert_eq!(a.path_pattern, b.path_pattern);
        assert_eq!(a.handler_name, b.handler_name);
    }
}

#[test]
fn test_default_response_feeds_fallback_schema() {
    let (_dir, path) = write_temp_spec(YAML_SPEC);
    let table = load_spec(path.to_str().unwrap()).unwrap();
    let route = table
        .routes
        .iter()
        .find(|r| r.path_pattern == "/health")
        .unwrap();
    assert!(route.responses.is_empty());
    assert!(route.default_response_schema.is_some());
    assert_eq!(route.success_status, 200);
    // No operationId declared: name derived from method and path.
    assert_eq!(route.handler_name, "get_health");
}

#[test]
fn test_success_status_from_declared_responses() {
    let (_dir, path) = write_temp_spec(YAML_SPEC);
    let table = load_spec(path.to_str().unwrap()).unwrap();
    let route = table
        .routes
        .iter()
        .find(|r| r.handler_name == "create_item")
        .unwrap();
    assert_eq!(route.success_status, 201);
}

#[test]
fn test_base_path_from_first_server() {
    let (_dir, path) = write_temp_spec(YAML_SPEC);
    let table = load_spec(path.to_str().unwrap()).unwrap();
    assert!(table.routes.iter().all(|r| r.base_path == "/api/v1"));
}

#[test]
fn test_load_spec_missing_file_fails() {
    assert!(load_spec("/no/such/openapi.yaml").is_err());
}

#[test]
fn test_load_spec_rejects_invalid_document() {
    let (_dir, path) = write_temp_spec("not: [valid, openapi");
    assert!(load_spec(path.to_str().unwrap()).is_err());
}
