//! Diesel models for products.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct,
    UpdateProduct as DomainUpdateProduct,
};
use crate::domain::types::{
    BrandId, CategoryId, Description, Price, ProductId, ProductName, Sku, StockQuantity,
    TypeConstraintError,
};
use crate::models::brand::Brand;
use crate::models::category::Category;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Category, foreign_key = category_id))]
#[diesel(belongs_to(Brand, foreign_key = brand_id))]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Price in cents.
    pub price: i64,
    pub discount_price: Option<i64>,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub brand_id: Option<i32>,
    pub sku: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub stock: i32,
    pub image_url: Option<&'a str>,
    pub category_id: i32,
    pub brand_id: Option<i32>,
    pub sku: Option<&'a str>,
    pub is_featured: bool,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Product`] record.
pub struct UpdateProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub stock: i32,
    pub image_url: Option<&'a str>,
    pub category_id: i32,
    pub brand_id: Option<i32>,
    pub sku: Option<&'a str>,
    pub is_featured: bool,
    pub is_active: bool,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(product.id)?,
            name: ProductName::new(product.name)?,
            description: Description::from_stored(product.description),
            price: Price::from_cents(product.price)?,
            discount_price: product.discount_price.map(Price::from_cents).transpose()?,
            stock: StockQuantity::new(product.stock)?,
            image_url: product.image_url,
            category_id: CategoryId::new(product.category_id)?,
            brand_id: product.brand_id.map(BrandId::new).transpose()?,
            sku: product.sku.map(Sku::new).transpose()?,
            is_featured: product.is_featured,
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str(),
            description: product.description.as_str(),
            price: product.price.cents(),
            discount_price: product.discount_price.map(Price::cents),
            stock: product.stock.get(),
            image_url: product.image_url.as_deref(),
            category_id: product.category_id.get(),
            brand_id: product.brand_id.map(BrandId::get),
            sku: product.sku.as_ref().map(Sku::as_str),
            is_featured: product.is_featured,
            is_active: product.is_active,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(product: &'a DomainUpdateProduct) -> Self {
        Self {
            name: product.name.as_str(),
            description: product.description.as_str(),
            price: product.price.cents(),
            discount_price: product.discount_price.map(Price::cents),
            stock: product.stock.get(),
            image_url: product.image_url.as_deref(),
            category_id: product.category_id.get(),
            brand_id: product.brand_id.map(BrandId::get),
            sku: product.sku.as_ref().map(Sku::as_str),
            is_featured: product.is_featured,
            is_active: product.is_active,
            updated_at: Some(product.updated_at),
        }
    }
}
