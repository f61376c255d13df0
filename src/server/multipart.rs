use crate::{
    error::{BlendError, Result},
    models::{BlendRequest, MISSING_FIELDS_MESSAGE},
};
use actix_multipart::{Field, Multipart, MultipartError};
use futures::StreamExt;

pub const FATHER_FIELD: &str = "father_image";
pub const MOTHER_FIELD: &str = "mother_image";
pub const GENDER_FIELD: &str = "gender";

/// Drains the multipart body and validates it into a [`BlendRequest`].
///
/// Images are only taken from file parts (with a `filename`) and the gender
/// only from plain form parts. The first occurrence of a repeated field wins.
pub async fn read_blend_request(mut payload: Multipart) -> Result<BlendRequest> {
    let mut father_image: Option<Vec<u8>> = None;
    let mut mother_image: Option<Vec<u8>> = None;
    let mut gender: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(map_multipart_error)?;
        let disposition = field.content_disposition();
        let name = disposition.get_name().map(String::from);
        let is_file = disposition.get_filename().is_some();
        let data = read_field(&mut field).await?;

        match (name.as_deref(), is_file) {
            (Some(FATHER_FIELD), true) if father_image.is_none() => father_image = Some(data),
            (Some(MOTHER_FIELD), true) if mother_image.is_none() => mother_image = Some(data),
            (Some(GENDER_FIELD), false) if gender.is_none() => {
                gender = Some(String::from_utf8_lossy(&data).into_owned())
            }
            (other, is_file) => {
                log::debug!("Skipping multipart field {:?} (file: {})", other, is_file)
            }
        }
    }

    BlendRequest::from_parts(father_image, mother_image, gender)
}

async fn read_field(field: &mut Field) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        data.extend_from_slice(&chunk.map_err(map_multipart_error)?);
    }
    Ok(data)
}

fn map_multipart_error(err: MultipartError) -> BlendError {
    match err {
        MultipartError::Payload(e) => BlendError::InternalError(e.to_string()),
        // Anything unparsable is treated as a submission without the fields.
        other => {
            log::debug!("Unreadable multipart body: {}", other);
            BlendError::ValidationError(MISSING_FIELDS_MESSAGE.into())
        }
    }
}
