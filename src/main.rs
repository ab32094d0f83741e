use anyhow::Result;
use sync_api::logging::init_tracing;
use sync_api::{start_web_server, ConfigManager, FirebaseApp};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("sync_api=info,rocket=warn");

    let config = ConfigManager::load()?;

    let firebase = match FirebaseApp::load(
        config.firebase.credentials_json.as_deref(),
        &config.firebase.credentials_path,
    ) {
        Ok(app) => app,
        Err(e) => {
            error!("{:#}", e);
            return Err(e);
        }
    };

    info!("Environment: {}", config.environment);
    info!("Firebase project: {}", firebase.project_id());

    start_web_server(config, firebase).await
}
