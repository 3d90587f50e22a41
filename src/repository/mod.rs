//! Repository traits and the Diesel-backed implementation.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::brand::{Brand, NewBrand, UpdateBrand};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, ProductEntry, UpdateProduct};
use crate::domain::types::{
    BrandId, CategoryId, Price, ProductId, Role, UserEmail, UserId,
};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod brand;
pub mod category;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod product;
pub mod user;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Column used to order product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Name,
    Price,
    Stock,
}

impl ProductSort {
    /// Parses a sort key case-insensitively, falling back to [`ProductSort::Name`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "price" => ProductSort::Price,
            "stock" => ProductSort::Stock,
            _ => ProductSort::Name,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProductSort::Name => "name",
            ProductSort::Price => "price",
            ProductSort::Stock => "stock",
        }
    }
}

/// Filters, ordering and paging applied to a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    /// Substring matched against name or description.
    pub search: Option<String>,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub sort: ProductSort,
    pub descending: bool,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank search terms are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn brand(mut self, brand_id: BrandId) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn price_range(mut self, min: Option<Price>, max: Option<Price>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn sort_by(mut self, sort: ProductSort, descending: bool) -> Self {
        self.sort = sort;
        self.descending = descending;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait CategoryReader {
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Categories ordered by name, optionally restricted to active ones.
    fn list_categories(&self, active_only: bool) -> RepositoryResult<Vec<Category>>;
    fn count_category_products(&self, id: CategoryId, active_only: bool)
    -> RepositoryResult<usize>;
}

pub trait CategoryWriter {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(&self, id: CategoryId, updates: &UpdateCategory)
    -> RepositoryResult<Category>;
    fn set_category_active(&self, id: CategoryId, is_active: bool) -> RepositoryResult<Category>;
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<()>;
}

pub trait BrandReader {
    fn get_brand_by_id(&self, id: BrandId) -> RepositoryResult<Option<Brand>>;
    fn list_brands(&self, active_only: bool) -> RepositoryResult<Vec<Brand>>;
    fn count_brand_products(&self, id: BrandId, active_only: bool) -> RepositoryResult<usize>;
}

pub trait BrandWriter {
    fn create_brand(&self, brand: &NewBrand) -> RepositoryResult<Brand>;
    fn update_brand(&self, id: BrandId, updates: &UpdateBrand) -> RepositoryResult<Brand>;
    fn set_brand_active(&self, id: BrandId, is_active: bool) -> RepositoryResult<Brand>;
    fn delete_brand(&self, id: BrandId) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<ProductEntry>>;
    /// Returns the total number of matches together with the requested page.
    fn list_products(&self, query: ProductListQuery)
    -> RepositoryResult<(usize, Vec<ProductEntry>)>;
}

pub trait ProductWriter {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product>;
    fn set_product_featured(&self, id: ProductId, is_featured: bool)
    -> RepositoryResult<Product>;
    fn set_product_active(&self, id: ProductId, is_active: bool) -> RepositoryResult<Product>;
    fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
}

pub trait UserReader {
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, user: &NewUser, roles: &[Role]) -> RepositoryResult<User>;
    fn record_login(&self, id: UserId) -> RepositoryResult<()>;
}

/// Diesel-backed repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parsing_defaults_to_name() {
        assert_eq!(ProductSort::parse("Price"), ProductSort::Price);
        assert_eq!(ProductSort::parse(" stock "), ProductSort::Stock);
        assert_eq!(ProductSort::parse("rating"), ProductSort::Name);
    }

    #[test]
    fn blank_search_is_dropped() {
        assert_eq!(ProductListQuery::new().search("   ").search, None);
        assert_eq!(
            ProductListQuery::new().search(" phone ").search.as_deref(),
            Some("phone")
        );
    }
}
