// src/config.rs
//! Configuration loading: optional config.yaml, overridden by environment variables

use crate::cors::{CorsPolicy, DEFAULT_ALLOWED_ORIGIN};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ADDRESS: &str = "0.0.0.0";
const DEFAULT_CREDENTIALS_PATH: &str = "serviceAccountKey.json";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub server: ServerConfig,
    pub cors: CorsPolicy,
    pub firebase: FirebaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub credentials_path: PathBuf,
    /// Raw service-account JSON, e.g. injected as a secret.
    pub credentials_json: Option<String>,
}

/// One section of config.yaml. Every field is optional so env vars can fill gaps.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileSection {
    pub address: Option<String>,
    pub port: Option<u16>,
    pub allowed_origins: Option<Vec<String>>,
    pub firebase_credentials: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl ConfigManager {
    /// Load from the process environment and, if present, config.yaml.
    pub fn load() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let environment = vars
            .get("ENVIRONMENT")
            .cloned()
            .unwrap_or_else(|| "local".to_string());
        info!("Loading configuration for environment: {}", environment);

        let config_path = vars
            .get("SYNC_API_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let section = if config_path.exists() {
            Self::load_section(&config_path, &environment)?
        } else {
            if vars.contains_key("SYNC_API_CONFIG") {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
            FileSection::default()
        };

        Self::merge(environment, section, vars)
    }

    fn load_section(path: &Path, environment: &str) -> Result<FileSection> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_section(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse_section(content: &str, environment: &str) -> Result<FileSection> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    fn merge(
        environment: String,
        section: FileSection,
        vars: &HashMap<String, String>,
    ) -> Result<Self> {
        let port = match vars.get("PORT").or_else(|| vars.get("ROCKET_PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got '{}'", raw))?,
            None => section.port.unwrap_or(DEFAULT_PORT),
        };

        let raw_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .or(section.address)
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let address = raw_address
            .parse::<IpAddr>()
            .with_context(|| format!("BIND_ADDRESS is not an IP address: {}", raw_address))?;

        let cors = match vars.get("CORS_ALLOWED_ORIGINS") {
            Some(csv) => CorsPolicy::from_csv(csv),
            None => match section.allowed_origins {
                Some(origins) => CorsPolicy::new(origins),
                None => {
                    warn!(
                        "No allowed origins configured, defaulting to {}",
                        DEFAULT_ALLOWED_ORIGIN
                    );
                    CorsPolicy::default()
                }
            },
        };

        let credentials_path = vars
            .get("FIREBASE_SERVICE_ACCOUNT")
            .map(PathBuf::from)
            .or(section.firebase_credentials)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH));

        let credentials_json = vars
            .get("FIREBASE_SERVICE_ACCOUNT_JSON")
            .filter(|payload| !payload.trim().is_empty())
            .cloned();

        Ok(Self {
            environment,
            server: ServerConfig { address, port },
            cors,
            firebase: FirebaseConfig {
                credentials_path,
                credentials_json,
            },
        })
    }
}
