//! Data rendered by the customer-facing pages.

use serde::Serialize;

use crate::dto::brands::BrandResponse;
use crate::dto::categories::CategoryResponse;
use crate::dto::products::ProductListResponse;

#[derive(Debug, Serialize)]
pub struct HomePageData {
    pub featured_products: Vec<ProductListResponse>,
    pub categories: Vec<CategoryResponse>,
}

/// A brand together with its active products.
#[derive(Debug, Serialize)]
pub struct BrandPageData {
    pub brand: BrandResponse,
    pub products: Vec<ProductListResponse>,
}
