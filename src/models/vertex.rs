use serde::{Deserialize, Serialize};

/// Body of an Imagen `:predict` call.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictInstance {
    pub prompt: String,
    pub images: Vec<EncodedImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedImage {
    #[serde(rename = "bytesBase64Encoded")]
    pub bytes_base64_encoded: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
    pub mime_type: String,
}

impl Default for PredictParameters {
    fn default() -> Self {
        PredictParameters {
            sample_count: 1,
            mime_type: "image/png".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Option<Vec<Prediction>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
}
