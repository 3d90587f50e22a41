//! Diesel models for brands.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::brand::{
    Brand as DomainBrand, NewBrand as DomainNewBrand, UpdateBrand as DomainUpdateBrand,
};
use crate::domain::types::{BrandId, BrandName, Description, TypeConstraintError, WebsiteUrl};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::brands)]
/// Diesel model for [`crate::domain::brand::Brand`].
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::brands)]
/// Insertable form of [`Brand`].
pub struct NewBrand<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub logo_url: Option<&'a str>,
    pub website: Option<&'a str>,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::brands)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Brand`] record.
pub struct UpdateBrand<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub logo_url: Option<&'a str>,
    pub website: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<Brand> for DomainBrand {
    type Error = TypeConstraintError;

    fn try_from(brand: Brand) -> Result<Self, Self::Error> {
        // Websites are optional; a stored value that no longer validates is dropped.
        let website = brand.website.and_then(|url| WebsiteUrl::new(url).ok());

        Ok(Self {
            id: BrandId::new(brand.id)?,
            name: BrandName::new(brand.name)?,
            description: Description::from_stored(brand.description),
            logo_url: brand.logo_url,
            website,
            is_active: brand.is_active,
            created_at: brand.created_at,
            updated_at: brand.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewBrand> for NewBrand<'a> {
    fn from(brand: &'a DomainNewBrand) -> Self {
        Self {
            name: brand.name.as_str(),
            description: brand.description.as_str(),
            logo_url: brand.logo_url.as_deref(),
            website: brand.website.as_ref().map(WebsiteUrl::as_str),
            is_active: brand.is_active,
        }
    }
}

impl<'a> From<&'a DomainUpdateBrand> for UpdateBrand<'a> {
    fn from(brand: &'a DomainUpdateBrand) -> Self {
        Self {
            name: brand.name.as_str(),
            description: brand.description.as_str(),
            logo_url: brand.logo_url.as_deref(),
            website: brand.website.as_ref().map(WebsiteUrl::as_str),
            is_active: brand.is_active,
            updated_at: Some(brand.updated_at),
        }
    }
}
