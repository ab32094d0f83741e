// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::config::ConfigManager;
use crate::cors::{Cors, CorsPolicy};
use crate::firebase::FirebaseApp;
use anyhow::Result;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, patch, post, put, routes, Build, Request, Rocket, State};
use tracing::info;

// CORS echo routes

#[get("/cors-test")]
pub fn cors_test_get(info: RequestInfo) -> HandlerResponse {
    handlers::cors_test_handler(info)
}

#[post("/cors-test")]
pub fn cors_test_post(info: RequestInfo) -> HandlerResponse {
    handlers::cors_test_handler(info)
}

#[put("/cors-test")]
pub fn cors_test_put(info: RequestInfo) -> HandlerResponse {
    handlers::cors_test_handler(info)
}

#[patch("/cors-test")]
pub fn cors_test_patch(info: RequestInfo) -> HandlerResponse {
    handlers::cors_test_handler(info)
}

#[delete("/cors-test")]
pub fn cors_test_delete(info: RequestInfo) -> HandlerResponse {
    handlers::cors_test_handler(info)
}

#[options("/cors-test")]
pub fn cors_test_options(info: RequestInfo) -> HandlerResponse {
    handlers::cors_test_handler(info)
}

// Method echo routes

#[get("/test")]
pub fn method_echo_get(info: RequestInfo) -> HandlerResponse {
    handlers::method_echo_handler(info)
}

#[post("/test")]
pub fn method_echo_post(info: RequestInfo) -> HandlerResponse {
    handlers::method_echo_handler(info)
}

#[put("/test")]
pub fn method_echo_put(info: RequestInfo) -> HandlerResponse {
    handlers::method_echo_handler(info)
}

#[patch("/test")]
pub fn method_echo_patch(info: RequestInfo) -> HandlerResponse {
    handlers::method_echo_handler(info)
}

#[delete("/test")]
pub fn method_echo_delete(info: RequestInfo) -> HandlerResponse {
    handlers::method_echo_handler(info)
}

#[options("/test")]
pub fn method_echo_options(info: RequestInfo) -> HandlerResponse {
    handlers::method_echo_handler(info)
}

#[get("/health")]
pub async fn health(firebase: &State<FirebaseApp>) -> Json<HealthBody> {
    handlers::health_handler(firebase).await
}

/// Preflight for any other path under the mount point.
#[options("/<_..>", rank = 20)]
pub fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(404)]
pub fn not_found(req: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new(
        "Não encontrado",
        format!("No route for {} {}", req.method(), req.uri().path()),
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorBody> {
    Json(ErrorBody::internal("Internal server error"))
}

/// Assemble the Rocket instance without launching it.
///
/// The Firebase app is injected here and shared read-only with handlers.
pub fn build_rocket(
    figment: rocket::figment::Figment,
    cors: CorsPolicy,
    firebase: FirebaseApp,
) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors::new(cors))
        .manage(firebase)
        .register("/", catchers![not_found, internal_error])
        .mount(
            "/api",
            routes![
                cors_test_get,
                cors_test_post,
                cors_test_put,
                cors_test_patch,
                cors_test_delete,
                cors_test_options,
                method_echo_get,
                method_echo_post,
                method_echo_put,
                method_echo_patch,
                method_echo_delete,
                method_echo_options,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager, firebase: FirebaseApp) -> Result<()> {
    let figment = rocket::Config::figment()
        .merge(("address", config.server.address))
        .merge(("port", config.server.port));

    info!(
        "Starting sync-api on http://{}:{}",
        config.server.address, config.server.port
    );
    info!("Allowed origins: {}", config.cors.allowed_origins().join(", "));

    let _rocket = build_rocket(figment, config.cors, firebase)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed to launch: {}", e))?;

    Ok(())
}
