pub mod handlers;
pub mod multipart;

use crate::{
    auth::CredentialProvider,
    config::{AppConfig, ServerConfig},
    error::Result,
    vertex::ImageClient,
};
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;

pub use handlers::generate_baby;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub image_client: ImageClient,
    pub credentials: Arc<dyn CredentialProvider>,
}

impl AppState {
    pub fn new(config: &AppConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        Ok(Self {
            image_client: ImageClient::new(config.vertex.clone())?,
            credentials,
        })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate-baby", web::post().to(generate_baby));
}

pub async fn run(state: AppState, server: &ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .configure(configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
