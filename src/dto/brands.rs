//! Brand DTOs.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::brand::Brand;
use crate::dto::status_label;
use crate::uploads::ImageKind;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BrandResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Uploaded logo or the brand placeholder.
    pub logo_url: String,
    pub has_logo: bool,
    pub website: Option<String>,
    pub is_active: bool,
    pub status: &'static str,
    pub product_count: usize,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl BrandResponse {
    pub fn new(brand: &Brand, product_count: usize) -> Self {
        Self {
            id: brand.id.get(),
            name: brand.name.to_string(),
            description: brand.description.to_string(),
            logo_url: brand
                .logo_url
                .clone()
                .unwrap_or_else(|| ImageKind::Brands.default_url().to_string()),
            has_logo: brand.logo_url.is_some(),
            website: brand.website.as_ref().map(ToString::to_string),
            is_active: brand.is_active,
            status: status_label(brand.is_active),
            product_count,
            created_at: brand.created_at,
            updated_at: brand.updated_at,
        }
    }
}
