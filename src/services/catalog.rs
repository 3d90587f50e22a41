//! Customer-facing catalog browsing.
//!
//! Only active entities are visible here; inactive or missing ones are
//! reported as [`ServiceError::NotFound`].

use crate::domain::auth::AuthenticatedUser;
use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::types::{BrandId, CategoryId, ProductId};
use crate::dto::brands::BrandResponse;
use crate::dto::catalog::{BrandPageData, HomePageData};
use crate::dto::categories::CategoryResponse;
use crate::dto::products::{ProductFilter, ProductListResponse, ProductResponse};
use crate::pagination::PagedResponse;
use crate::repository::{BrandReader, CategoryReader, ProductListQuery, ProductReader};
use crate::services::brands::{brand_response, list_active_brands};
use crate::services::categories::list_active_categories;
use crate::services::products::{
    build_list_query, featured_products, products_by_category, query_products,
};
use crate::services::{ServiceError, ServiceResult};

fn active_brand<R>(repo: &R, brand_id: i32) -> ServiceResult<Brand>
where
    R: BrandReader + ?Sized,
{
    repo.get_brand_by_id(BrandId::new(brand_id)?)?
        .filter(|brand| brand.is_active)
        .ok_or(ServiceError::NotFound)
}

fn active_category<R>(repo: &R, category_id: i32) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(CategoryId::new(category_id)?)?
        .filter(|category| category.is_active)
        .ok_or(ServiceError::NotFound)
}

/// Featured products and active categories.
pub fn home_page<R>(repo: &R) -> ServiceResult<HomePageData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    Ok(HomePageData {
        featured_products: featured_products(repo)?,
        categories: list_active_categories(repo)?,
    })
}

pub fn active_brands<R>(repo: &R) -> ServiceResult<Vec<BrandResponse>>
where
    R: BrandReader + ?Sized,
{
    list_active_brands(repo)
}

/// An active brand with all of its active products.
pub fn brand_details<R>(repo: &R, brand_id: i32) -> ServiceResult<BrandPageData>
where
    R: BrandReader + ProductReader + ?Sized,
{
    let brand = active_brand(repo, brand_id)?;
    let (_, entries) = repo.list_products(ProductListQuery::new().brand(brand.id).active(true))?;

    Ok(BrandPageData {
        brand: brand_response(repo, &brand)?,
        products: entries.iter().map(ProductListResponse::from).collect(),
    })
}

/// Paged active products of an active brand.
pub fn brand_products<R>(
    repo: &R,
    brand_id: i32,
    filter: &ProductFilter,
) -> ServiceResult<(BrandResponse, PagedResponse<ProductListResponse>)>
where
    R: BrandReader + ProductReader + ?Sized,
{
    let brand = active_brand(repo, brand_id)?;
    let query = build_list_query(filter)?.brand(brand.id).active(true);

    Ok((brand_response(repo, &brand)?, query_products(repo, query)?))
}

/// Paged active products of an active category.
pub fn category_products<R>(
    repo: &R,
    category_id: i32,
    filter: &ProductFilter,
) -> ServiceResult<(CategoryResponse, PagedResponse<ProductListResponse>)>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    let category = active_category(repo, category_id)?;
    let query = build_list_query(filter)?
        .category(category.id)
        .active(true);
    let paged = query_products(repo, query)?;
    let count = repo.count_category_products(category.id, true)?;

    Ok((CategoryResponse::new(&category, count), paged))
}

/// Active products of an active category.
pub fn category_product_list<R>(repo: &R, category_id: i32) -> ServiceResult<Vec<ProductListResponse>>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    let category = active_category(repo, category_id)?;
    products_by_category(repo, category.id)
}

/// Details of an active product.
pub fn product_details<R>(repo: &R, product_id: i32) -> ServiceResult<ProductResponse>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(ProductId::new(product_id)?)?
        .filter(|entry| entry.product.is_active)
        .map(|entry| ProductResponse::from(&entry))
        .ok_or(ServiceError::NotFound)
}

/// Product search for the JSON API. Only admins may see inactive products.
pub fn browse_products<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
    filter: &ProductFilter,
) -> ServiceResult<PagedResponse<ProductListResponse>>
where
    R: ProductReader + ?Sized,
{
    let mut query = build_list_query(filter)?;
    if !user.is_some_and(AuthenticatedUser::is_admin) {
        query = query.active(true);
    }
    query_products(repo, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, brand, category, customer_user, entry, product};

    #[test]
    fn inactive_brand_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_brand_by_id().returning(|id| {
            let mut b = brand(id.get(), "HP");
            b.is_active = false;
            Ok(Some(b))
        });

        assert!(matches!(
            brand_details(&repo, 5),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn inactive_product_is_hidden() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().returning(|id| {
            let mut p = product(id.get(), "Coffee Machine");
            p.is_active = false;
            Ok(Some(entry(p)))
        });

        assert!(matches!(
            product_details(&repo, 2),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn customers_only_browse_active_products() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| query.is_active == Some(true))
            .times(2)
            .returning(|_| Ok((0, vec![])));

        let filter = ProductFilter {
            is_active: Some(false),
            ..ProductFilter::default()
        };
        assert!(browse_products(&repo, None, &filter).is_ok());
        assert!(browse_products(&repo, Some(&customer_user()), &filter).is_ok());
    }

    #[test]
    fn admins_may_browse_inactive_products() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| query.is_active == Some(false))
            .returning(|_| Ok((1, vec![])));

        let filter = ProductFilter {
            is_active: Some(false),
            ..ProductFilter::default()
        };
        let paged = browse_products(&repo, Some(&admin_user()), &filter).unwrap();
        assert_eq!(paged.total_count, 1);
    }

    #[test]
    fn home_page_lists_featured_and_categories() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| query.is_featured == Some(true) && query.is_active == Some(true))
            .returning(|_| {
                let mut p = product(3, "iPhone 15 Pro");
                p.is_featured = true;
                Ok((1, vec![entry(p)]))
            });
        repo.expect_list_categories()
            .returning(|_| Ok(vec![category(1, "Electronics")]));
        repo.expect_count_category_products().returning(|_, _| Ok(2));

        let data = home_page(&repo).unwrap();

        assert_eq!(data.featured_products.len(), 1);
        assert_eq!(data.featured_products[0].featured_status, "Featured");
        assert_eq!(data.categories[0].product_count, 2);
    }
}
