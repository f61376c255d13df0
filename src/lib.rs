//! HTTP relay that blends two parent photos into a generated baby portrait
//! with Vertex AI Imagen.

pub mod auth;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod server;
pub mod vertex;

pub use auth::{AccessToken, AdcCredentialProvider, CredentialProvider};
pub use config::{AppConfig, ServerConfig, VertexConfig};
pub use error::{BlendError, Result};
pub use models::*;
pub use server::AppState;
pub use vertex::ImageClient;
