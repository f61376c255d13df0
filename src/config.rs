use crate::error::{BlendError, Result};
use std::env;

pub const DEFAULT_LOCATION: &str = "us-central1";
pub const DEFAULT_MODEL_ID: &str = "imagen-4.0-fast-generate-preview-06-06";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct VertexConfig {
    pub project_id: String,
    pub location: String,
    pub model_id: String,
    pub api_base: Option<String>,
}

impl VertexConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        VertexConfig {
            project_id: project_id.into(),
            location: DEFAULT_LOCATION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            api_base: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Overrides `https://{location}-aiplatform.googleapis.com`.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn api_base(&self) -> String {
        match &self.api_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}-aiplatform.googleapis.com", self.location),
        }
    }

    pub fn predict_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:predict",
            self.api_base(),
            self.project_id,
            self.location,
            self.model_id
        )
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Process-wide configuration, built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub vertex: VertexConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new(vertex: VertexConfig) -> Self {
        AppConfig {
            vertex,
            server: ServerConfig::default(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let project_id = get("GCP_PROJECT_ID").ok_or_else(|| {
            BlendError::ConfigError(
                "The GCP_PROJECT_ID environment variable is not set.".into(),
            )
        })?;

        let mut vertex = VertexConfig::new(project_id);
        if let Some(location) = get("GCP_LOCATION") {
            vertex = vertex.with_location(location);
        }
        if let Some(model_id) = get("GCP_MODEL_ID") {
            vertex = vertex.with_model(model_id);
        }

        let mut server = ServerConfig::new();
        if let Some(host) = get("HOST") {
            server = server.with_host(host);
        }
        if let Some(port) = get("PORT") {
            let port = port.trim().parse().map_err(|_| {
                BlendError::ConfigError(format!("PORT must be a valid port number, got '{}'", port))
            })?;
            server = server.with_port(port);
        }

        Ok(AppConfig { vertex, server })
    }
}
