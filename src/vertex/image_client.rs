use crate::{
    auth::AccessToken,
    config::VertexConfig,
    error::{BlendError, Result},
    models::{
        BlendRequest, EncodedImage, GeneratedImage, PredictInstance, PredictParameters,
        PredictRequest, PredictResponse,
    },
    vertex::prompt::build_prompt,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    config: VertexConfig,
}

impl ImageClient {
    pub fn new(config: VertexConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BlendError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: VertexConfig) -> Self {
        Self { client, config }
    }

    pub fn build_payload(request: &BlendRequest) -> PredictRequest {
        PredictRequest {
            instances: vec![PredictInstance {
                prompt: build_prompt(&request.category),
                images: vec![
                    EncodedImage {
                        bytes_base64_encoded: STANDARD.encode(&request.father_image),
                    },
                    EncodedImage {
                        bytes_base64_encoded: STANDARD.encode(&request.mother_image),
                    },
                ],
            }],
            parameters: PredictParameters::default(),
        }
    }

    pub async fn generate(
        &self,
        token: &AccessToken,
        request: &BlendRequest,
    ) -> Result<GeneratedImage> {
        let endpoint_url = self.config.predict_url();
        let payload = Self::build_payload(request);
        let body = serde_json::to_vec(&payload)
            .map_err(|e| BlendError::InternalError(format!("Failed to serialize request: {}", e)))?;

        log::info!(
            "Generating {} baby image with model: {}",
            request.category,
            self.config.model_id
        );
        let _timer = crate::logger::timer("imagen predict");

        let response = self
            .client
            .post(&endpoint_url)
            .header(AUTHORIZATION, token.bearer_header())
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    log::error!("Imagen request timed out after {}s", REQUEST_TIMEOUT.as_secs());
                } else {
                    log::error!("Imagen request failed: {:?}", e);
                }
                BlendError::RequestError(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BlendError::RequestError(e.to_string()))?;

        if !status.is_success() {
            log::error!("Imagen returned {}: {}", status, text);
            return Err(BlendError::HttpError { status, body: text });
        }

        Ok(GeneratedImage {
            data: decode_prediction(&text)?,
            model: self.config.model_id.clone(),
        })
    }
}

/// Pulls the first image out of a successful predict response body.
pub fn decode_prediction(body: &str) -> Result<Vec<u8>> {
    let parsed: PredictResponse = serde_json::from_str(body).map_err(|e| {
        BlendError::ResponseError(format!(
            "API Error: Could not parse response ({}). Full response: {}",
            e, body
        ))
    })?;

    let first = match parsed.predictions.as_deref() {
        Some([first, ..]) => first,
        _ => {
            return Err(BlendError::ResponseError(format!(
                "API Error: No predictions found in response. Full response: {}",
                body
            )))
        }
    };

    let encoded = first
        .bytes_base64_encoded
        .as_deref()
        .filter(|data| !data.is_empty())
        .ok_or_else(|| {
            BlendError::ResponseError("API response did not contain image data.".into())
        })?;

    if let Some(mime_type) = first.mime_type.as_deref() {
        log::debug!("Prediction mime type: {}", mime_type);
    }

    STANDARD
        .decode(encoded)
        .map_err(|e| BlendError::ResponseError(format!("Image data is not valid base64: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const PREDICT_PATH: &str = "/v1/projects/test-project/locations/us-central1/publishers/google/models/imagen-test:predict";

    fn sample_request() -> BlendRequest {
        BlendRequest::from_parts(
            Some(b"father-bytes".to_vec()),
            Some(b"mother-bytes".to_vec()),
            Some("Boy".into()),
        )
        .unwrap()
    }

    fn client_for(server: &MockServer) -> ImageClient {
        let config = VertexConfig::new("test-project")
            .with_model("imagen-test")
            .with_api_base(server.uri());
        ImageClient::new(config).unwrap()
    }

    #[test]
    fn test_build_payload_shape() {
        let payload = serde_json::to_value(ImageClient::build_payload(&sample_request())).unwrap();

        let images = &payload["instances"][0]["images"];
        assert_eq!(images[0]["bytesBase64Encoded"], STANDARD.encode(b"father-bytes"));
        assert_eq!(images[1]["bytesBase64Encoded"], STANDARD.encode(b"mother-bytes"));
        assert_eq!(payload["parameters"], json!({ "sampleCount": 1, "mimeType": "image/png" }));

        let prompt = payload["instances"][0]["prompt"].as_str().unwrap();
        assert!(prompt.contains("Indian Boy baby"));
    }

    #[test]
    fn test_decode_prediction_variants() {
        let image = STANDARD.encode([0x89, b'P', b'N', b'G']);
        let ok = decode_prediction(&json!({ "predictions": [{ "bytesBase64Encoded": image }] }).to_string());
        assert_eq!(ok.unwrap(), vec![0x89, b'P', b'N', b'G']);

        for body in [json!({}), json!({ "predictions": [] }), json!({ "predictions": null })] {
            let err = decode_prediction(&body.to_string()).unwrap_err();
            assert!(err.to_string().contains("No predictions found"), "{}", err);
        }

        let err = decode_prediction(&json!({ "predictions": [{ "mimeType": "image/png" }] }).to_string()).unwrap_err();
        assert_eq!(err.to_string(), "API response did not contain image data.");

        let err = decode_prediction(&json!({ "predictions": [{ "bytesBase64Encoded": "" }] }).to_string()).unwrap_err();
        assert_eq!(err.to_string(), "API response did not contain image data.");

        let err = decode_prediction("not json").unwrap_err();
        assert!(matches!(err, BlendError::ResponseError(_)));
    }

    #[actix_web::test]
    async fn test_generate_sends_authorized_request() {
        let server = MockServer::start().await;
        let image = b"generated-png".to_vec();

        Mock::given(method("POST"))
            .and(path(PREDICT_PATH))
            .and(header("authorization", "Bearer test-token"))
            .and(header("content-type", "application/json; charset=utf-8"))
            .and(body_partial_json(json!({
                "parameters": { "sampleCount": 1, "mimeType": "image/png" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "predictions": [{ "bytesBase64Encoded": STANDARD.encode(&image), "mimeType": "image/png" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generated = client_for(&server)
            .generate(&AccessToken::new("test-token"), &sample_request())
            .await
            .unwrap();

        assert_eq!(generated.data, image);
        assert_eq!(generated.model, "imagen-test");
    }

    #[actix_web::test]
    async fn test_generate_surfaces_http_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(PREDICT_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_string("Quota exceeded"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(&AccessToken::new("test-token"), &sample_request())
            .await
            .unwrap_err();

        match &err {
            BlendError::HttpError { status, body } => {
                assert_eq!(status.as_u16(), 429);
                assert_eq!(body, "Quota exceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("429 Too Many Requests"));
    }

    #[actix_web::test]
    async fn test_generate_rejects_empty_predictions() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictions": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(&AccessToken::new("test-token"), &sample_request())
            .await
            .unwrap_err();

        assert!(matches!(err, BlendError::ResponseError(_)));
        assert!(err.to_string().contains("No predictions found"));
    }

    #[actix_web::test]
    async fn test_generate_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let http = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let config = VertexConfig::new("test-project")
            .with_model("imagen-test")
            .with_api_base(server.uri());

        let err = ImageClient::with_client(http, config)
            .generate(&AccessToken::new("test-token"), &sample_request())
            .await
            .unwrap_err();

        assert!(matches!(err, BlendError::RequestError(_)));
        assert!(err.to_string().starts_with("An unexpected error occurred:"));
    }
}

