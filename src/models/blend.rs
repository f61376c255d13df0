use crate::error::{BlendError, Result};
use std::fmt;
use std::str::FromStr;

pub const ACCEPTED_CATEGORIES: [&str; 4] = ["male", "female", "boy", "girl"];

pub const MISSING_FIELDS_MESSAGE: &str =
    "Please provide 'father_image', 'mother_image', and 'gender'";
pub const INVALID_CATEGORY_MESSAGE: &str =
    "Gender must be one of 'male', 'female', 'boy', or 'girl'";

/// Requested category label, kept exactly as the caller spelled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(String);

impl Category {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Category {
    type Err = BlendError;

    fn from_str(label: &str) -> Result<Self> {
        let normalized = label.to_lowercase();
        if ACCEPTED_CATEGORIES.contains(&normalized.as_str()) {
            Ok(Category(label.to_string()))
        } else {
            Err(BlendError::ValidationError(INVALID_CATEGORY_MESSAGE.into()))
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone)]
pub struct BlendRequest {
    pub father_image: Vec<u8>,
    pub mother_image: Vec<u8>,
    pub category: Category,
}

impl BlendRequest {
    /// Accepts the raw submission only when all three parts are present and
    /// the category is valid.
    pub fn from_parts(
        father_image: Option<Vec<u8>>,
        mother_image: Option<Vec<u8>>,
        gender: Option<String>,
    ) -> Result<Self> {
        let father_image = father_image.filter(|bytes| !bytes.is_empty());
        let mother_image = mother_image.filter(|bytes| !bytes.is_empty());
        let gender = gender.filter(|label| !label.is_empty());

        let (father_image, mother_image, gender) = match (father_image, mother_image, gender) {
            (Some(father), Some(mother), Some(gender)) => (father, mother, gender),
            _ => return Err(BlendError::ValidationError(MISSING_FIELDS_MESSAGE.into())),
        };

        Ok(BlendRequest {
            father_image,
            mother_image,
            category: gender.parse()?,
        })
    }
}

impl fmt::Debug for BlendRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlendRequest")
            .field("father_image_len", &self.father_image.len())
            .field("mother_image_len", &self.mother_image.len())
            .field("category", &self.category)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub model: String,
}
