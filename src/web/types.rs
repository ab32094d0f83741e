// src/web/types.rs

use rocket::http::{Method, Status};
use rocket::request::{FromRequest, Outcome};
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};
use std::collections::BTreeMap;
use std::convert::Infallible;

pub const INTERNAL_ERROR: &str = "Erro interno";

/// Transient view of the inbound request: method, headers and origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: Method,
    /// Lower-cased header names. Repeated headers are joined with ", ".
    pub headers: BTreeMap<String, String>,
    pub origin: Option<String>,
}

impl RequestInfo {
    pub fn new<I, K, V>(method: Method, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in headers {
            let name = name.as_ref().to_ascii_lowercase();
            let value = value.as_ref();
            map.entry(name)
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }

        let origin = map.get("origin").cloned();

        Self {
            method,
            headers: map,
            origin,
        }
    }

    pub fn is_preflight(&self) -> bool {
        self.method == Method::Options
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RequestInfo {
    type Error = Infallible;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let headers = req
            .headers()
            .iter()
            .map(|h| (h.name().as_str().to_string(), h.value().to_string()));

        Outcome::Success(RequestInfo::new(req.method(), headers))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct EchoBody {
    pub success: bool,
    pub message: String,
    pub method: String,
    pub origin: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthBody {
    pub success: bool,
    pub status: String,
    pub project_id: String,
    pub timestamp: String,
}

/// What a boundary handler sends back. CORS headers are added by the fairing.
#[derive(Debug)]
pub enum HandlerResponse {
    /// Preflight short-circuit: 200, no body.
    Preflight,
    Echo(EchoBody),
    Failed(ErrorBody),
}

impl HandlerResponse {
    pub fn status(&self) -> Status {
        match self {
            HandlerResponse::Preflight | HandlerResponse::Echo(_) => Status::Ok,
            HandlerResponse::Failed(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for HandlerResponse {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        match self {
            HandlerResponse::Preflight => Response::build().status(Status::Ok).ok(),
            HandlerResponse::Echo(body) => Json(body).respond_to(req),
            HandlerResponse::Failed(body) => {
                status::Custom(Status::InternalServerError, Json(body)).respond_to(req)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_keys_are_case_insensitive() {
        let info = RequestInfo::new(
            Method::Get,
            [("Origin", "http://localhost:3000"), ("User-Id", "42")],
        );
        assert_eq!(info.origin.as_deref(), Some("http://localhost:3000"));
        assert_eq!(info.header("user-id"), Some("42"));
        assert_eq!(info.header("USER-ID"), Some("42"));
        assert!(info.headers.contains_key("origin"));
    }

    #[test]
    fn test_repeated_headers_are_joined() {
        let info = RequestInfo::new(Method::Get, [("Accept", "text/html"), ("accept", "*/*")]);
        assert_eq!(info.header("accept"), Some("text/html, */*"));
    }

    #[test]
    fn test_no_origin() {
        let info = RequestInfo::new(Method::Post, Vec::<(String, String)>::new());
        assert!(info.origin.is_none());
        assert!(!info.is_preflight());
    }

    #[test]
    fn test_statuses() {
        assert_eq!(HandlerResponse::Preflight.status(), Status::Ok);
        assert_eq!(
            HandlerResponse::Failed(ErrorBody::internal("boom")).status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn test_error_body_shape() {
        let value = serde_json::to_value(ErrorBody::internal("boom")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "success": false, "error": "Erro interno", "message": "boom" })
        );
    }
}
