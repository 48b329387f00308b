use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::environment::HarnessConfig;
use crate::error::CheckError;

use super::request::RequestSpec;
use super::response::HttpResponse;

/// Sends requests under the configured `<base_url><api_prefix>` root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    api_base: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &HarnessConfig) -> Result<Self, CheckError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|err| CheckError::Transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_base: config.api_base_url(),
            timeout: config.timeout,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    pub async fn send(&self, request: &RequestSpec) -> Result<HttpResponse, CheckError> {
        let url = self.url_for(request.path);
        let headers = build_headers(&request.headers)?;

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, %url, "sending request");
        let started = Instant::now();
        let response = builder.send().await.map_err(|err| self.classify(err))?;

        let status = response.status().as_u16();
        let mut response_headers = HashMap::new();
        for (name, value) in response.headers() {
            response_headers.insert(
                name.as_str().to_string(),
                value.to_str().unwrap_or("<binary>").to_string(),
            );
        }

        let bytes = response.bytes().await.map_err(|err| self.classify(err))?;
        let duration_ms = started.elapsed().as_millis();

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            duration_ms,
        })
    }

    fn classify(&self, err: reqwest::Error) -> CheckError {
        if err.is_timeout() {
            CheckError::Timeout(self.timeout.as_millis())
        } else {
            CheckError::Transport(err.to_string())
        }
    }
}

fn build_headers(input: &[(String, String)]) -> Result<HeaderMap, CheckError> {
    let mut headers = HeaderMap::new();

    for (key, value) in input {
        if key.is_empty() {
            continue;
        }

        let header_name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|err| CheckError::Transport(format!("invalid header name `{key}`: {err}")))?;
        let header_value = HeaderValue::from_str(value).map_err(|err| {
            CheckError::Transport(format!("invalid header value for `{key}`: {err}"))
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
