//! Brand create/edit forms.

use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::brand::{NewBrand, UpdateBrand};
use crate::domain::types::{BrandName, Description, WebsiteUrl};
use crate::forms::{FormError, checkbox, optional_text, read_upload};
use crate::uploads::ImageUpload;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BrandForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub description: String,
    #[validate(url)]
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(MultipartForm)]
pub struct BrandUploadForm {
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    pub website: Option<Text<String>>,
    pub is_active: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub logo: Option<TempFile>,
}

impl BrandUploadForm {
    pub fn into_parts(self) -> Result<(BrandForm, Option<ImageUpload>), FormError> {
        let form = BrandForm {
            is_active: checkbox(&self.is_active),
            name: self.name.into_inner(),
            description: optional_text(self.description).unwrap_or_default(),
            website: optional_text(self.website),
        };
        Ok((form, read_upload(self.logo)?))
    }
}

#[derive(Debug, Clone)]
pub struct BrandPayload {
    pub name: BrandName,
    pub description: Description,
    pub website: Option<WebsiteUrl>,
    pub is_active: bool,
}

impl TryFrom<BrandForm> for BrandPayload {
    type Error = FormError;

    fn try_from(form: BrandForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let website = form
            .website
            .filter(|w| !w.trim().is_empty())
            .map(WebsiteUrl::new)
            .transpose()
            .map_err(|_| FormError::InvalidUrl)?;

        Ok(Self {
            name: BrandName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: Description::new(form.description),
            website,
            is_active: form.is_active,
        })
    }
}

impl BrandPayload {
    /// New brands start active.
    pub fn into_new_brand(self, logo_url: Option<String>) -> NewBrand {
        NewBrand::new(self.name, self.description, self.website, true).with_logo_url(logo_url)
    }

    pub fn into_update(self, logo_url: Option<String>, updated_at: NaiveDateTime) -> UpdateBrand {
        UpdateBrand {
            name: self.name,
            description: self.description,
            logo_url,
            website: self.website,
            is_active: self.is_active,
            updated_at,
        }
    }
}
