//! Product administration services.

use chrono::Utc;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::product::Product;
use crate::domain::types::{BrandId, CategoryId, Price, ProductId, Role};
use crate::dto::products::{
    FeaturedToggleResponse, ProductFilter, ProductFormData, ProductListResponse,
    ProductResponse, StatusToggleResponse,
};
use crate::forms::products::{ProductForm, ProductPayload};
use crate::pagination::{PagedResponse, normalize_page, normalize_page_size};
use crate::repository::{
    BrandReader, CategoryReader, ProductListQuery, ProductReader, ProductSort, ProductWriter,
};
use crate::services::{
    ServiceError, ServiceResult, ensure_role, persist_with_image, remove_image,
};
use crate::uploads::{ImageKind, ImageStore, ImageUpload};

/// Builds the repository query for a listing filter.
pub(crate) fn build_list_query(filter: &ProductFilter) -> ServiceResult<ProductListQuery> {
    let parse_price = |value: &Option<String>, label: &str| -> ServiceResult<Option<Price>> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| {
                Price::parse(v).map_err(|_| ServiceError::Form(format!("Invalid {label} price")))
            })
            .transpose()
    };

    let mut query = ProductListQuery::new()
        .price_range(
            parse_price(&filter.min_price, "minimum")?,
            parse_price(&filter.max_price, "maximum")?,
        )
        .sort_by(
            filter
                .sort_by
                .as_deref()
                .map(ProductSort::parse)
                .unwrap_or_default(),
            filter.sort_descending.unwrap_or(false),
        )
        .paginate(normalize_page(filter.page), normalize_page_size(filter.page_size));

    if let Some(search) = &filter.search {
        query = query.search(search.as_str());
    }
    if let Some(id) = filter.category_id {
        query = query.category(CategoryId::new(id)?);
    }
    if let Some(id) = filter.brand_id {
        query = query.brand(BrandId::new(id)?);
    }
    if let Some(is_featured) = filter.is_featured {
        query = query.featured(is_featured);
    }
    if let Some(is_active) = filter.is_active {
        query = query.active(is_active);
    }

    Ok(query)
}

/// Runs a listing query and wraps the page into a [`PagedResponse`].
pub(crate) fn query_products<R>(
    repo: &R,
    query: ProductListQuery,
) -> ServiceResult<PagedResponse<ProductListResponse>>
where
    R: ProductReader + ?Sized,
{
    let (page, page_size) = query
        .pagination
        .map_or((1, usize::MAX), |p| (p.page, p.per_page));
    let (total, entries) = repo.list_products(query)?;
    let items = entries.iter().map(ProductListResponse::from).collect();

    Ok(PagedResponse::new(items, total, page, page_size))
}

fn get_existing<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(ProductId::new(product_id)?)?
        .map(|entry| entry.product)
        .ok_or(ServiceError::NotFound)
}

/// Category must exist; the brand too when one is chosen.
fn ensure_references<R>(repo: &R, payload: &ProductPayload) -> ServiceResult<()>
where
    R: CategoryReader + BrandReader + ?Sized,
{
    if repo.get_category_by_id(payload.category_id)?.is_none() {
        return Err(ServiceError::Form("Selected category does not exist".to_string()));
    }
    if let Some(brand_id) = payload.brand_id
        && repo.get_brand_by_id(brand_id)?.is_none()
    {
        return Err(ServiceError::Form("Selected brand does not exist".to_string()));
    }
    Ok(())
}

pub fn get_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<ProductResponse>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let entry = repo
        .get_product_by_id(ProductId::new(product_id)?)?
        .ok_or(ServiceError::NotFound)?;

    Ok(ProductResponse::from(&entry))
}

/// Every product, ordered by name.
pub fn list_all_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<ProductListResponse>>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let (_, entries) = repo.list_products(ProductListQuery::new())?;
    Ok(entries.iter().map(ProductListResponse::from).collect())
}

/// Filtered, sorted and paged product listing for the admin area.
pub fn list_products_paged<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: &ProductFilter,
) -> ServiceResult<PagedResponse<ProductListResponse>>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    query_products(repo, build_list_query(filter)?)
}

/// Categories and brands offered by the create and edit forms.
pub fn load_product_form<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: Option<i32>,
) -> ServiceResult<ProductFormData>
where
    R: ProductReader + CategoryReader + BrandReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let product = match product_id {
        Some(id) => Some(get_product(repo, user, id)?),
        None => None,
    };

    Ok(ProductFormData {
        product,
        categories: repo.list_categories(true)?,
        brands: repo.list_brands(true)?,
    })
}

pub fn create_product<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    form: ProductForm,
    image: Option<ImageUpload>,
) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader + BrandReader + ?Sized,
    S: ImageStore + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let payload = ProductPayload::try_from(form)?;
    ensure_references(repo, &payload)?;

    persist_with_image(store, ImageKind::Products, image.as_ref(), |image_url| {
        let new_product = payload.into_new_product(image_url);
        repo.create_product(&new_product).map_err(|err| {
            log::error!("Failed to create product: {err}");
            ServiceError::from(err)
        })
    })
}

/// Replaces the editable fields; a new image replaces the stored one.
pub fn update_product<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    product_id: i32,
    form: ProductForm,
    image: Option<ImageUpload>,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CategoryReader + BrandReader + ?Sized,
    S: ImageStore + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, product_id)?;
    let payload = ProductPayload::try_from(form)?;
    ensure_references(repo, &payload)?;

    let updated = persist_with_image(store, ImageKind::Products, image.as_ref(), |new_url| {
        let image_url = new_url.or_else(|| existing.image_url.clone());
        let updates = payload.into_update(image_url, Utc::now().naive_utc());
        repo.update_product(existing.id, &updates).map_err(|err| {
            log::error!("Failed to update product {}: {err}", existing.id);
            ServiceError::from(err)
        })
    })?;

    if let Some(old_url) = &existing.image_url
        && updated.image_url.as_ref() != Some(old_url)
    {
        remove_image(store, ImageKind::Products, old_url);
    }

    Ok(updated)
}

pub fn delete_product<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, product_id)?;
    repo.delete_product(existing.id)?;

    if let Some(url) = &existing.image_url {
        remove_image(store, ImageKind::Products, url);
    }
    Ok(())
}

pub fn toggle_product_featured<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<FeaturedToggleResponse>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, product_id)?;
    let updated = repo.set_product_featured(existing.id, !existing.is_featured)?;

    Ok(FeaturedToggleResponse {
        id: updated.id.get(),
        is_featured: updated.is_featured,
    })
}

pub fn toggle_product_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<StatusToggleResponse>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, product_id)?;
    let updated = repo.set_product_active(existing.id, !existing.is_active)?;

    Ok(StatusToggleResponse {
        id: updated.id.get(),
        is_active: updated.is_active,
    })
}

/// Featured products that are also active.
pub fn featured_products<R>(repo: &R) -> ServiceResult<Vec<ProductListResponse>>
where
    R: ProductReader + ?Sized,
{
    let (_, entries) = repo.list_products(ProductListQuery::new().featured(true).active(true))?;
    Ok(entries.iter().map(ProductListResponse::from).collect())
}

/// Active products of one category.
pub fn products_by_category<R>(
    repo: &R,
    category_id: CategoryId,
) -> ServiceResult<Vec<ProductListResponse>>
where
    R: ProductReader + ?Sized,
{
    let (_, entries) = repo.list_products(ProductListQuery::new().category(category_id).active(true))?;
    Ok(entries.iter().map(ProductListResponse::from).collect())
}
