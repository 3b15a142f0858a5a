//! Server configuration management

use crate::error::{ApiError, Result};
use formwork::ServiceConfig;
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// CORS allowed origins
    pub cors_origins: Vec<String>,

    /// Engine configuration shared with the repository core
    pub service: ServiceConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = ServiceConfig::default();
        let service = ServiceConfig {
            id_base: std::env::var("ID_BASE").unwrap_or(defaults.id_base),
            default_page_size: std::env::var("DEFAULT_PAGE_SIZE")
                .unwrap_or_else(|_| defaults.default_page_size.to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid DEFAULT_PAGE_SIZE value".to_string()))?,
            max_page_size: std::env::var("MAX_PAGE_SIZE")
                .unwrap_or_else(|_| defaults.max_page_size.to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid MAX_PAGE_SIZE value".to_string()))?,
            excluded_list_fields: std::env::var("LIST_EXCLUDED_FIELDS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.excluded_list_fields),
            summary_fields: defaults.summary_fields,
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid PORT value".to_string()))?,
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            service,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec!["*".to_string()],
            service: ServiceConfig::default(),
        }
    }
}
