use crate::{
    error::{BlendError, Result},
    models::GeneratedImage,
    server::{multipart::read_blend_request, AppState},
};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

/// `POST /generate-baby`
pub async fn generate_baby(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
    let request_id = Uuid::new_v4();

    match blend(&state, payload, request_id).await {
        Ok(image) => {
            log::info!(
                "✅ Generated {} bytes with {} [req:{}]",
                image.data.len(),
                image.model,
                request_id
            );
            Ok(HttpResponse::Ok().content_type("image/png").body(image.data))
        }
        Err(err @ BlendError::ValidationError(_)) => {
            log::warn!("Rejected request: {} [req:{}]", err, request_id);
            Err(err)
        }
        Err(err) => {
            log::error!("Error from image generation: {} [req:{}]", err, request_id);
            Err(err)
        }
    }
}

async fn blend(state: &AppState, payload: Multipart, request_id: Uuid) -> Result<GeneratedImage> {
    let request = read_blend_request(payload).await?;
    log::debug!("Accepted {:?} [req:{}]", request, request_id);

    let token = state.credentials.acquire_token().await?;
    state.image_client.generate(&token, &request).await
}
