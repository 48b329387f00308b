use serde_json::Value;

use super::method::HttpMethod;

/// A request relative to the API prefix, e.g. `GET /contact`.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn get(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json(path: &'static str, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
