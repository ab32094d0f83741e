// src/sync_client.rs
//! One-shot client for the remote `/sync/status` endpoint

use anyhow::{Context, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, trace};

const SYNC_STATUS_ENDPOINT: &str = "/sync/status";
const USER_ID_HEADER: &str = "user-id";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct SyncStatusClient {
    client: reqwest::Client,
    base_url: String,
    user_id: String,
}

/// Status code plus body. The body is JSON when it parses, raw text otherwise.
#[derive(Debug)]
pub struct SyncStatusReport {
    pub status: StatusCode,
    pub raw: String,
    pub body: SyncStatusBody,
}

#[derive(Debug, PartialEq)]
pub enum SyncStatusBody {
    Json(serde_json::Value),
    Raw(String),
}

impl SyncStatusBody {
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => SyncStatusBody::Json(value),
            Err(_) => SyncStatusBody::Raw(text.to_string()),
        }
    }

    pub fn render(&self) -> String {
        match self {
            SyncStatusBody::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            SyncStatusBody::Raw(text) => text.clone(),
        }
    }
}

impl SyncStatusReport {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl SyncStatusClient {
    pub fn new(base_url: &str, user_id: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, SYNC_STATUS_ENDPOINT)
    }

    pub fn build_request(&self) -> Result<reqwest::Request> {
        let user_id = HeaderValue::from_str(&self.user_id)
            .with_context(|| format!("Invalid user-id header value: {:?}", self.user_id))?;

        self.client
            .get(self.url())
            .header(USER_ID_HEADER, user_id)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .build()
            .with_context(|| format!("Failed to build request for {}", self.url()))
    }

    /// Send the request once. Non-2xx statuses are returned, not raised.
    pub async fn fetch(&self) -> Result<SyncStatusReport> {
        let request = self.build_request()?;
        debug!("GET {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("Failed to GET from {}", self.url()))?;

        let status = response.status();
        trace!("Response status: {}", status);

        let text = response
            .text()
            .await
            .context("Failed to read response text")?;

        Ok(SyncStatusReport {
            status,
            body: SyncStatusBody::parse(&text),
            raw: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let client = SyncStatusClient::new("http://localhost:3000/api/", "user-123", 5).unwrap();
        let request = client.build_request().unwrap();

        assert_eq!(*request.method(), reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "http://localhost:3000/api/sync/status");
        assert_eq!(request.headers()["user-id"], "user-123");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_invalid_user_id_rejected() {
        let client = SyncStatusClient::new("http://localhost:3000", "bad\nid", 5).unwrap();
        assert!(client.build_request().is_err());
    }

    #[test]
    fn test_body_parse() {
        assert_eq!(
            SyncStatusBody::parse(r#"{"synced":true}"#),
            SyncStatusBody::Json(serde_json::json!({ "synced": true }))
        );
        assert_eq!(
            SyncStatusBody::parse("Bad Gateway"),
            SyncStatusBody::Raw("Bad Gateway".to_string())
        );
    }

    #[test]
    fn test_render_raw_verbatim() {
        let body = SyncStatusBody::Raw("<html>oops</html>".to_string());
        assert_eq!(body.render(), "<html>oops</html>");
    }

    #[test]
    fn test_report_success() {
        let report = SyncStatusReport {
            status: StatusCode::NOT_FOUND,
            raw: String::new(),
            body: SyncStatusBody::Raw(String::new()),
        };
        assert!(!report.is_success());
    }
}
