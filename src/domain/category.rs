//! Domain model for product categories.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{CategoryId, CategoryName, Description};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Description,
    /// Public URL of the uploaded image, if any.
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug)]
pub struct NewCategory {
    pub name: CategoryName,
    pub description: Description,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl NewCategory {
    #[must_use]
    pub fn new(name: CategoryName, description: Description, is_active: bool) -> Self {
        Self {
            name,
            description,
            image_url: None,
            is_active,
        }
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }
}

/// Full replacement of the editable category columns.
#[derive(Clone, Debug)]
pub struct UpdateCategory {
    pub name: CategoryName,
    pub description: Description,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}
