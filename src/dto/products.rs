//! Product DTOs and the mappers that build them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::ProductEntry;
use crate::domain::types::Price;
use crate::dto::{NOT_AVAILABLE, status_label};
use crate::uploads::ImageKind;

/// Full product view used by detail and edit pages.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub discount_price: Option<Price>,
    pub stock: i32,
    pub sku: Option<String>,
    pub category_id: i32,
    pub category_name: String,
    pub brand_id: Option<i32>,
    pub brand_name: String,
    pub is_featured: bool,
    pub is_active: bool,
    /// Uploaded image or the product placeholder.
    pub image_url: String,
    /// Whether `image_url` points at an uploaded file.
    pub has_image: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Compact row used in listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductListResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub discount_price: Option<Price>,
    pub stock: i32,
    pub category_name: String,
    pub brand_name: String,
    pub image_url: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub status: &'static str,
    pub featured_status: &'static str,
}

fn category_name(category: Option<&Category>) -> String {
    category.map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.name.to_string())
}

fn brand_name(brand: Option<&Brand>) -> String {
    brand.map_or_else(|| NOT_AVAILABLE.to_string(), |b| b.name.to_string())
}

impl From<&ProductEntry> for ProductResponse {
    fn from(entry: &ProductEntry) -> Self {
        let product = &entry.product;
        Self {
            id: product.id.get(),
            name: product.name.to_string(),
            description: product.description.to_string(),
            price: product.price,
            discount_price: product.discount_price,
            stock: product.stock.get(),
            sku: product.sku.as_ref().map(ToString::to_string),
            category_id: product.category_id.get(),
            category_name: category_name(entry.category.as_ref()),
            brand_id: product.brand_id.map(|id| id.get()),
            brand_name: brand_name(entry.brand.as_ref()),
            is_featured: product.is_featured,
            is_active: product.is_active,
            image_url: product
                .image_url
                .clone()
                .unwrap_or_else(|| ImageKind::Products.default_url().to_string()),
            has_image: product.image_url.is_some(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<&ProductEntry> for ProductListResponse {
    fn from(entry: &ProductEntry) -> Self {
        let product = &entry.product;
        Self {
            id: product.id.get(),
            name: product.name.to_string(),
            description: product.description.to_string(),
            price: product.price,
            discount_price: product.discount_price,
            stock: product.stock.get(),
            category_name: category_name(entry.category.as_ref()),
            brand_name: brand_name(entry.brand.as_ref()),
            image_url: product
                .image_url
                .clone()
                .unwrap_or_else(|| ImageKind::Products.default_url().to_string()),
            is_featured: product.is_featured,
            is_active: product.is_active,
            status: status_label(product.is_active),
            featured_status: if product.is_featured {
                "Featured"
            } else {
                "Regular"
            },
        }
    }
}

/// Query string of product listings. Empty values deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    /// `name`, `price` or `stock`.
    pub sort_by: Option<String>,
    pub sort_descending: Option<bool>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Body of the featured toggle endpoint.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FeaturedToggleResponse {
    pub id: i32,
    pub is_featured: bool,
}

/// Body of every status toggle endpoint.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusToggleResponse {
    pub id: i32,
    pub is_active: bool,
}

/// Active product count of a category or brand.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProductCountResponse {
    pub id: i32,
    pub product_count: usize,
}

/// Choices offered by the product create and edit forms.
#[derive(Debug, Serialize)]
pub struct ProductFormData {
    pub product: Option<ProductResponse>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}
