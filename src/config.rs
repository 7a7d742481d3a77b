//! Runtime configuration shared by the binary and the router.

use axum::http::HeaderValue;
use clap::ValueEnum;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Prefix for the `type` URI of every problem response.
pub const DEFAULT_PROBLEM_BASE_URI: &str = "https://localhost/errors/";

/// Which planet store the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process-local map; contents vanish on exit.
    Memory,
    /// SQLite database file.
    Sqlite,
}

/// HTTP-facing settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base that problem types are appended to, e.g. `{base}not-found`.
    pub problem_base_uri: String,
    /// Allowed CORS origins. `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            problem_base_uri: DEFAULT_PROBLEM_BASE_URI.to_string(),
            cors_origins: None,
        }
    }
}

impl ApiConfig {
    pub fn with_problem_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.problem_base_uri = uri.into();
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let Some(origins) = &self.cors_origins else {
            return CorsLayer::permissive();
        };

        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
