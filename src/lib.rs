pub mod config;
pub mod cors;
pub mod firebase;
pub mod logging;
pub mod sync_client;
pub mod web;

pub use config::ConfigManager;
pub use cors::{Cors, CorsPolicy};
pub use firebase::{FirebaseApp, ServiceAccountKey};
pub use sync_client::{SyncStatusBody, SyncStatusClient, SyncStatusReport};
pub use web::{build_rocket, start_web_server};
