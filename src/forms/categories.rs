//! Category create/edit forms.

use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::domain::types::{CategoryName, Description};
use crate::forms::{FormError, checkbox, optional_text, read_upload};
use crate::uploads::ImageUpload;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(MultipartForm)]
pub struct CategoryUploadForm {
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    pub is_active: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

impl CategoryUploadForm {
    pub fn into_parts(self) -> Result<(CategoryForm, Option<ImageUpload>), FormError> {
        let form = CategoryForm {
            is_active: checkbox(&self.is_active),
            name: self.name.into_inner(),
            description: optional_text(self.description).unwrap_or_default(),
        };
        Ok((form, read_upload(self.image)?))
    }
}

#[derive(Debug, Clone)]
pub struct CategoryPayload {
    pub name: CategoryName,
    pub description: Description,
    pub is_active: bool,
}

impl TryFrom<CategoryForm> for CategoryPayload {
    type Error = FormError;

    fn try_from(form: CategoryForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: CategoryName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: Description::new(form.description),
            is_active: form.is_active,
        })
    }
}

impl CategoryPayload {
    /// New categories start active.
    pub fn into_new_category(self, image_url: Option<String>) -> NewCategory {
        NewCategory::new(self.name, self.description, true).with_image_url(image_url)
    }

    pub fn into_update(self, image_url: Option<String>, updated_at: NaiveDateTime) -> UpdateCategory {
        UpdateCategory {
            name: self.name,
            description: self.description,
            image_url,
            is_active: self.is_active,
            updated_at,
        }
    }
}
