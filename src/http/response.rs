use std::collections::HashMap;

use serde_json::Value;

use crate::error::CheckError;

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are stored lowercase.
    pub headers: HashMap<String, String>,
    pub body: String,
    pub duration_ms: u128,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json(&self) -> Result<Value, CheckError> {
        serde_json::from_str(&self.body).map_err(|e| CheckError::InvalidJson(e.to_string()))
    }

    pub fn expect_status(&self, expected: u16) -> Result<(), CheckError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(CheckError::UnexpectedStatus {
                expected: expected.to_string(),
                actual: self.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("access-control-allow-origin".to_string(), "*".to_string());
        let response = HttpResponse {
            status: 200,
            headers,
            ..Default::default()
        };

        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(response.header("Access-Control-Allow-Credentials"), None);
    }

    #[test]
    fn json_rejects_plain_text() {
        let response = HttpResponse {
            status: 200,
            body: "Hello World".into(),
            ..Default::default()
        };
        assert!(matches!(response.json(), Err(CheckError::InvalidJson(_))));
    }

    #[test]
    fn expect_status_reports_actual_code() {
        let response = HttpResponse {
            status: 503,
            ..Default::default()
        };
        assert_eq!(
            response.expect_status(200),
            Err(CheckError::UnexpectedStatus {
                expected: "200".into(),
                actual: 503,
            })
        );
    }
}
