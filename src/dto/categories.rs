//! Category DTOs.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;
use crate::dto::status_label;
use crate::uploads::ImageKind;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Uploaded image or the category placeholder.
    pub image_url: String,
    pub has_image: bool,
    pub is_active: bool,
    pub status: &'static str,
    pub product_count: usize,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl CategoryResponse {
    pub fn new(category: &Category, product_count: usize) -> Self {
        Self {
            id: category.id.get(),
            name: category.name.to_string(),
            description: category.description.to_string(),
            image_url: category
                .image_url
                .clone()
                .unwrap_or_else(|| ImageKind::Categories.default_url().to_string()),
            has_image: category.image_url.is_some(),
            is_active: category.is_active,
            status: status_label(category.is_active),
            product_count,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::category;

    #[test]
    fn missing_image_falls_back_to_placeholder() {
        let response = CategoryResponse::new(&category(1, "Books"), 7);

        assert_eq!(response.image_url, "/images/categories/default.jpg");
        assert!(!response.has_image);
        assert_eq!(response.product_count, 7);
        assert_eq!(response.status, "Active");
    }
}
