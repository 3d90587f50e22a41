//! Domain model for catalog products.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::types::{
    BrandId, CategoryId, Description, Price, ProductId, ProductName, Sku, StockQuantity,
};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Description,
    pub price: Price,
    /// Reduced price; always below `price` when present.
    pub discount_price: Option<Price>,
    pub stock: StockQuantity,
    pub image_url: Option<String>,
    pub category_id: CategoryId,
    pub brand_id: Option<BrandId>,
    pub sku: Option<Sku>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// A product together with the category and brand it references.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductEntry {
    pub product: Product,
    pub category: Option<Category>,
    pub brand: Option<Brand>,
}

#[derive(Clone, Debug)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: Description,
    pub price: Price,
    pub discount_price: Option<Price>,
    pub stock: StockQuantity,
    pub image_url: Option<String>,
    pub category_id: CategoryId,
    pub brand_id: Option<BrandId>,
    pub sku: Option<Sku>,
    pub is_featured: bool,
    pub is_active: bool,
}

/// Full replacement of the editable product columns.
#[derive(Clone, Debug)]
pub struct UpdateProduct {
    pub name: ProductName,
    pub description: Description,
    pub price: Price,
    pub discount_price: Option<Price>,
    pub stock: StockQuantity,
    pub image_url: Option<String>,
    pub category_id: CategoryId,
    pub brand_id: Option<BrandId>,
    pub sku: Option<Sku>,
    pub is_featured: bool,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}
