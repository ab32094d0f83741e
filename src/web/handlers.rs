// src/web/handlers.rs
use crate::firebase::FirebaseApp;
use crate::web::types::*;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use rocket::serde::json::Json;
use rocket::State;
use tracing::{debug, error, info};

pub const CORS_TEST_MESSAGE: &str = "CORS funcionando!";

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Echo the request metadata back with the given message.
pub fn build_echo_body(info: &RequestInfo, message: &str) -> Result<EchoBody> {
    Ok(EchoBody {
        success: true,
        message: message.to_string(),
        method: info.method.as_str().to_string(),
        origin: info.origin.clone(),
        headers: info.headers.clone(),
        timestamp: timestamp(),
    })
}

/// Shared boundary logic: preflight short-circuit, body construction,
/// and conversion of a construction failure into a 500.
pub fn respond_with<F>(info: &RequestInfo, build: F) -> HandlerResponse
where
    F: FnOnce(&RequestInfo) -> Result<EchoBody>,
{
    if info.is_preflight() {
        debug!("Preflight request from {:?}", info.origin);
        return HandlerResponse::Preflight;
    }

    match build(info) {
        Ok(body) => HandlerResponse::Echo(body),
        Err(e) => {
            error!("Failed to build response for {} request: {:#}", info.method, e);
            HandlerResponse::Failed(ErrorBody::internal(e.to_string()))
        }
    }
}

pub fn cors_test_handler(info: RequestInfo) -> HandlerResponse {
    info!(
        "CORS test: {} from {}",
        info.method,
        info.origin.as_deref().unwrap_or("<no origin>")
    );
    respond_with(&info, |info| build_echo_body(info, CORS_TEST_MESSAGE))
}

pub fn method_echo_handler(info: RequestInfo) -> HandlerResponse {
    info!("Method echo: {}", info.method);
    respond_with(&info, |info| {
        let message = format!("Método {} recebido", info.method.as_str());
        build_echo_body(info, &message)
    })
}

pub async fn health_handler(firebase: &State<FirebaseApp>) -> Json<HealthBody> {
    Json(HealthBody {
        success: true,
        status: "OK".to_string(),
        project_id: firebase.project_id().to_string(),
        timestamp: timestamp(),
    })
}
