//! Repository implementation for products.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::{NewProduct, Product, ProductEntry, UpdateProduct};
use crate::domain::types::{Price, ProductId};
use crate::models::brand::Brand as DbBrand;
use crate::models::category::Category as DbCategory;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, Pagination, ProductListQuery, ProductReader, ProductSort, ProductWriter,
};

/// Escapes `LIKE` wildcards so the term is matched literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Attaches categories and brands to the loaded products with one query per table.
fn attach_relations(
    conn: &mut DbConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<ProductEntry>> {
    use crate::schema::{brands, categories};

    let category_ids: HashSet<i32> = db_products.iter().map(|p| p.category_id).collect();
    let brand_ids: HashSet<i32> = db_products.iter().filter_map(|p| p.brand_id).collect();

    let category_map: HashMap<i32, Category> = categories::table
        .filter(categories::id.eq_any(category_ids))
        .load::<DbCategory>(conn)?
        .into_iter()
        .map(|c| -> RepositoryResult<(i32, Category)> { Ok((c.id, Category::try_from(c)?)) })
        .collect::<RepositoryResult<_>>()?;

    let brand_map: HashMap<i32, Brand> = brands::table
        .filter(brands::id.eq_any(brand_ids))
        .load::<DbBrand>(conn)?
        .into_iter()
        .map(|b| -> RepositoryResult<(i32, Brand)> { Ok((b.id, Brand::try_from(b)?)) })
        .collect::<RepositoryResult<_>>()?;

    db_products
        .into_iter()
        .map(|db_product| -> RepositoryResult<ProductEntry> {
            let category = category_map.get(&db_product.category_id).cloned();
            let brand = db_product
                .brand_id
                .and_then(|id| brand_map.get(&id).cloned());
            Ok(ProductEntry {
                product: Product::try_from(db_product)?,
                category,
                brand,
            })
        })
        .collect()
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<ProductEntry>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product = products::table
            .find(id.get())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match db_product {
            Some(db_product) => Ok(attach_relations(&mut conn, vec![db_product])?.pop()),
            None => Ok(None),
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<ProductEntry>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let pattern = query.search.as_deref().map(like_pattern);

        let query_builder = || {
            let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(pattern) = &pattern {
                items = items.filter(
                    products::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(products::description.like(pattern.clone()).escape('\\')),
                );
            }
            if let Some(category_id) = query.category_id {
                items = items.filter(products::category_id.eq(category_id.get()));
            }
            if let Some(brand_id) = query.brand_id {
                items = items.filter(products::brand_id.eq(brand_id.get()));
            }
            if let Some(min_price) = query.min_price {
                items = items.filter(products::price.ge(min_price.cents()));
            }
            if let Some(max_price) = query.max_price {
                items = items.filter(products::price.le(max_price.cents()));
            }
            if let Some(is_featured) = query.is_featured {
                items = items.filter(products::is_featured.eq(is_featured));
            }
            if let Some(is_active) = query.is_active {
                items = items.filter(products::is_active.eq(is_active));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = match (query.sort, query.descending) {
            (ProductSort::Name, false) => {
                query_builder().order((products::name.asc(), products::id.asc()))
            }
            (ProductSort::Name, true) => {
                query_builder().order((products::name.desc(), products::id.asc()))
            }
            (ProductSort::Price, false) => {
                query_builder().order((products::price.asc(), products::id.asc()))
            }
            (ProductSort::Price, true) => {
                query_builder().order((products::price.desc(), products::id.asc()))
            }
            (ProductSort::Stock, false) => {
                query_builder().order((products::stock.asc(), products::id.asc()))
            }
            (ProductSort::Stock, true) => {
                query_builder().order((products::stock.desc(), products::id.asc()))
            }
        };

        if let Some(pagination) = &query.pagination {
            let Some((offset, limit)) = page_bounds(pagination) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;
        let entries = attach_relations(&mut conn, db_products)?;

        Ok((total, entries))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        ensure_discount_below_price(product.price, product.discount_price)?;

        let mut conn = self.conn()?;
        let db_new: DbNewProduct = product.into();

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(Product::try_from(created)?)
    }

    fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        ensure_discount_below_price(updates.price, updates.discount_price)?;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateProduct = updates.into();

        let updated = diesel::update(products::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(Product::try_from(updated)?)
    }

    fn set_product_featured(&self, id: ProductId, is_featured: bool) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let updated = diesel::update(products::table.find(id.get()))
            .set((
                products::is_featured.eq(is_featured),
                products::updated_at.eq(Some(Utc::now().naive_utc())),
            ))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(Product::try_from(updated)?)
    }

    fn set_product_active(&self, id: ProductId, is_active: bool) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let updated = diesel::update(products::table.find(id.get()))
            .set((
                products::is_active.eq(is_active),
                products::updated_at.eq(Some(Utc::now().naive_utc())),
            ))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(Product::try_from(updated)?)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        match diesel::delete(products::table.find(id.get())).execute(&mut conn)? {
            0 => Err(RepositoryError::NotFound),
            _ => Ok(()),
        }
    }
}

/// SQL offset and limit of a page, or `None` when the page lies beyond any row.
fn page_bounds(pagination: &Pagination) -> Option<(i64, i64)> {
    let offset = (pagination.page.max(1) - 1).checked_mul(pagination.per_page)?;
    Some((
        i64::try_from(offset).ok()?,
        i64::try_from(pagination.per_page).ok()?,
    ))
}

fn ensure_discount_below_price(price: Price, discount: Option<Price>) -> RepositoryResult<()> {
    match discount {
        Some(discount) if discount >= price => Err(RepositoryError::ValidationError(
            "discount price must be lower than the price".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("phone"), "%phone%");
    }

    #[test]
    fn page_bounds_reject_unreachable_pages() {
        let bounds = |page, per_page| page_bounds(&Pagination { page, per_page });
        assert_eq!(bounds(1, 10), Some((0, 10)));
        assert_eq!(bounds(0, 10), Some((0, 10)));
        assert_eq!(bounds(3, 25), Some((50, 25)));
        assert_eq!(bounds(usize::MAX, 10), None);
        assert_eq!(bounds(usize::MAX / 2, 2), None);
    }

    #[test]
    fn discount_must_be_below_price() {
        let price = Price::from_cents(1000).unwrap();
        assert!(ensure_discount_below_price(price, None).is_ok());
        assert!(ensure_discount_below_price(price, Price::from_cents(999).ok()).is_ok());
        assert!(ensure_discount_below_price(price, Price::from_cents(1000).ok()).is_err());
    }
}
