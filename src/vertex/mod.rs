pub mod image_client;
pub mod prompt;

pub use image_client::{decode_prediction, ImageClient, REQUEST_TIMEOUT};
pub use prompt::build_prompt;
