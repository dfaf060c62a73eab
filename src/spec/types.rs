use super::SecurityRequirement;
use http::Method;
use serde_json::Value;

/// Where a declared parameter travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
        }
    }
}

impl From<oas3::spec::ParameterIn> for ParameterLocation {
    fn from(loc: oas3::spec::ParameterIn) -> Self {
        match loc {
            oas3::spec::ParameterIn::Path => ParameterLocation::Path,
            oas3::spec::ParameterIn::Query => ParameterLocation::Query,
            oas3::spec::ParameterIn::Header => ParameterLocation::Header,
            oas3::spec::ParameterIn::Cookie => ParameterLocation::Cookie,
        }
    }
}

/// Metadata for one registered (method, path) endpoint.
///
/// One `RouteMeta` is built per operation, so a path registered for several
/// verbs yields several independent routes. The method is an owned value,
/// never a shared set consumed as a side effect of reading it.
#[derive(Debug, Clone)]
pub struct RouteMeta {
    pub method: Method,
    pub path_pattern: String,
    /// operationId, or a name derived from method and path when absent.
    pub handler_name: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<ParameterMeta>,
    pub request_schema: Option<Value>,
    /// Example attached to the request body media type, if any.
    pub request_example: Option<Value>,
    pub responses: Responses,
    /// Schema from the `default` response entry; used when no per-status
    /// responses are declared.
    pub default_response_schema: Option<Value>,
    /// Smallest declared 2xx status, else 200.
    pub success_status: u16,
    pub security: Vec<SecurityRequirement>,
    /// Path prefix of `servers[0]`, empty when unset.
    pub base_path: String,
}

#[derive(Debug, Clone)]
pub struct ParameterMeta {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Option<Value>,
    pub description: Option<String>,
}

/// One declared response: human description plus resolved JSON schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    pub description: String,
    pub schema: Option<Value>,
}

/// Declared responses keyed by numeric status code.
pub type Responses = std::collections::BTreeMap<u16, ResponseSpec>;
