// src/cors.rs
//! CORS response headers and the allow-list origin policy.

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Request, Response};

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

pub const ALLOWED_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";
pub const ALLOWED_HEADERS: &str = "Content-Type,Authorization,user-id,X-Requested-With";

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Which origin gets written into `Access-Control-Allow-Origin`.
///
/// A request origin found in the list is echoed back. Anything else (or no
/// origin at all) gets the first entry, so the header is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed_origins: Vec<String> = origins
            .into_iter()
            .map(Into::into)
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        if allowed_origins.is_empty() {
            return Self::default();
        }

        Self { allowed_origins }
    }

    /// Parse a comma separated list, e.g. from `CORS_ALLOWED_ORIGINS`.
    pub fn from_csv(value: &str) -> Self {
        Self::new(value.split(','))
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn primary_origin(&self) -> &str {
        &self.allowed_origins[0]
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Value for `Access-Control-Allow-Origin` given the request's `origin`.
    pub fn resolve<'a>(&'a self, request_origin: Option<&'a str>) -> &'a str {
        match request_origin {
            Some(origin) if self.is_allowed(origin) => origin,
            _ => self.primary_origin(),
        }
    }

    /// The full header set for a response to a request carrying `request_origin`.
    pub fn headers(&self, request_origin: Option<&str>) -> Vec<Header<'static>> {
        let mut headers = vec![
            Header::new(ALLOW_ORIGIN, self.resolve(request_origin).to_string()),
            Header::new(ALLOW_CREDENTIALS, "true"),
            Header::new(ALLOW_METHODS, ALLOWED_METHODS),
            Header::new(ALLOW_HEADERS, ALLOWED_HEADERS),
        ];

        if self.allowed_origins.len() > 1 {
            headers.push(Header::new("Vary", "Origin"));
        }

        headers
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }
}

// CORS Fairing
pub struct Cors {
    policy: CorsPolicy,
}

impl Cors {
    pub fn new(policy: CorsPolicy) -> Self {
        Self { policy }
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let origin = request.headers().get_one("Origin");
        for header in self.policy.headers(origin) {
            response.set_header(header);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_value<'a>(headers: &'a [Header<'static>], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|h| h.name().as_str().eq_ignore_ascii_case(name))
            .map(|h| h.value())
    }

    #[test]
    fn test_allowed_origin_is_echoed() {
        let policy = CorsPolicy::new(["http://localhost:3000", "https://app.example.com"]);
        assert_eq!(
            policy.resolve(Some("https://app.example.com")),
            "https://app.example.com"
        );
    }

    #[test]
    fn test_unknown_origin_gets_primary() {
        let policy = CorsPolicy::new(["https://app.example.com"]);
        assert_eq!(
            policy.resolve(Some("https://evil.example.org")),
            "https://app.example.com"
        );
        assert_eq!(policy.resolve(None), "https://app.example.com");
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let policy = CorsPolicy::new(["http://localhost:3000/"]);
        assert!(policy.is_allowed("http://localhost:3000"));
        assert!(policy.is_allowed("http://localhost:3000/"));
    }

    #[test]
    fn test_empty_list_falls_back_to_default() {
        let policy = CorsPolicy::from_csv(" , ");
        assert_eq!(policy, CorsPolicy::default());
        assert_eq!(policy.primary_origin(), DEFAULT_ALLOWED_ORIGIN);
    }

    #[test]
    fn test_from_csv() {
        let policy = CorsPolicy::from_csv("http://localhost:3000, https://app.example.com");
        assert_eq!(
            policy.allowed_origins(),
            &["http://localhost:3000", "https://app.example.com"]
        );
    }

    #[test]
    fn test_headers_always_carry_the_four_cors_fields() {
        let headers = CorsPolicy::default().headers(None);
        assert_eq!(header_value(&headers, ALLOW_ORIGIN), Some(DEFAULT_ALLOWED_ORIGIN));
        assert_eq!(header_value(&headers, ALLOW_CREDENTIALS), Some("true"));
        assert_eq!(header_value(&headers, ALLOW_METHODS), Some(ALLOWED_METHODS));
        assert_eq!(header_value(&headers, ALLOW_HEADERS), Some(ALLOWED_HEADERS));
        assert_eq!(header_value(&headers, "Vary"), None);
    }

    #[test]
    fn test_vary_only_with_multiple_origins() {
        let policy = CorsPolicy::new(["http://a.test", "http://b.test"]);
        let headers = policy.headers(Some("http://b.test"));
        assert_eq!(header_value(&headers, "Vary"), Some("Origin"));
        assert_eq!(header_value(&headers, ALLOW_ORIGIN), Some("http://b.test"));
    }
}
