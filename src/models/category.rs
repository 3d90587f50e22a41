//! Diesel models for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::domain::types::{CategoryId, CategoryName, Description, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
/// Diesel model for [`crate::domain::category::Category`].
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::categories)]
/// Insertable form of [`Category`].
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Category`] record.
pub struct UpdateCategory<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(category.id)?,
            name: CategoryName::new(category.name)?,
            description: Description::from_stored(category.description),
            image_url: category.image_url,
            is_active: category.is_active,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(category: &'a DomainNewCategory) -> Self {
        Self {
            name: category.name.as_str(),
            description: category.description.as_str(),
            image_url: category.image_url.as_deref(),
            is_active: category.is_active,
        }
    }
}

impl<'a> From<&'a DomainUpdateCategory> for UpdateCategory<'a> {
    fn from(category: &'a DomainUpdateCategory) -> Self {
        Self {
            name: category.name.as_str(),
            description: category.description.as_str(),
            image_url: category.image_url.as_deref(),
            is_active: category.is_active,
            updated_at: Some(category.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn category_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Category {
            id: 3,
            name: "Books".to_string(),
            description: "Reading".to_string(),
            image_url: None,
            is_active: true,
            created_at: now,
            updated_at: None,
        };

        let domain = DomainCategory::try_from(db).expect("valid category");

        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.name.as_str(), "Books");
        assert_eq!(domain.description.as_str(), "Reading");
        assert!(domain.is_active);
    }

    #[test]
    fn invalid_row_is_rejected() {
        let db = Category {
            id: 0,
            name: "Books".to_string(),
            description: String::new(),
            image_url: None,
            is_active: true,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
        };

        assert!(DomainCategory::try_from(db).is_err());
    }

    #[test]
    fn update_clears_missing_image() {
        let domain = DomainUpdateCategory {
            name: CategoryName::new("Sports").unwrap(),
            description: Description::new("Gear"),
            image_url: None,
            is_active: false,
            updated_at: Utc::now().naive_utc(),
        };

        let update: UpdateCategory = (&domain).into();

        assert_eq!(update.name, "Sports");
        assert_eq!(update.image_url, None);
        assert!(!update.is_active);
        assert_eq!(update.updated_at, Some(domain.updated_at));
    }
}
