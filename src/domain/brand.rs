//! Domain model for product brands.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{BrandId, BrandName, Description, WebsiteUrl};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Brand {
    pub id: BrandId,
    pub name: BrandName,
    pub description: Description,
    /// Public URL of the uploaded logo, if any.
    pub logo_url: Option<String>,
    pub website: Option<WebsiteUrl>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug)]
pub struct NewBrand {
    pub name: BrandName,
    pub description: Description,
    pub logo_url: Option<String>,
    pub website: Option<WebsiteUrl>,
    pub is_active: bool,
}

impl NewBrand {
    #[must_use]
    pub fn new(
        name: BrandName,
        description: Description,
        website: Option<WebsiteUrl>,
        is_active: bool,
    ) -> Self {
        Self {
            name,
            description,
            logo_url: None,
            website,
            is_active,
        }
    }

    #[must_use]
    pub fn with_logo_url(mut self, logo_url: Option<String>) -> Self {
        self.logo_url = logo_url;
        self
    }
}

/// Full replacement of the editable brand columns.
#[derive(Clone, Debug)]
pub struct UpdateBrand {
    pub name: BrandName,
    pub description: Description,
    pub logo_url: Option<String>,
    pub website: Option<WebsiteUrl>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}
