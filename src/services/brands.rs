//! Brand administration services.

use chrono::Utc;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::brand::Brand;
use crate::domain::types::{BrandId, Role};
use crate::dto::brands::BrandResponse;
use crate::dto::products::{ProductCountResponse, StatusToggleResponse};
use crate::forms::brands::{BrandForm, BrandPayload};
use crate::repository::{BrandReader, BrandWriter};
use crate::services::{
    ServiceError, ServiceResult, ensure_role, persist_with_image, remove_image,
};
use crate::uploads::{ImageKind, ImageStore, ImageUpload};

fn get_existing<R>(repo: &R, brand_id: i32) -> ServiceResult<Brand>
where
    R: BrandReader + ?Sized,
{
    repo.get_brand_by_id(BrandId::new(brand_id)?)?
        .ok_or(ServiceError::NotFound)
}

pub(crate) fn brand_response<R>(repo: &R, brand: &Brand) -> ServiceResult<BrandResponse>
where
    R: BrandReader + ?Sized,
{
    let count = repo.count_brand_products(brand.id, true)?;
    Ok(BrandResponse::new(brand, count))
}

pub fn get_brand<R>(repo: &R, user: &AuthenticatedUser, brand_id: i32) -> ServiceResult<BrandResponse>
where
    R: BrandReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let brand = get_existing(repo, brand_id)?;
    brand_response(repo, &brand)
}

pub fn list_brands<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<BrandResponse>>
where
    R: BrandReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    repo.list_brands(false)?
        .iter()
        .map(|brand| brand_response(repo, brand))
        .collect()
}

/// Active brands with their active product counts.
pub fn list_active_brands<R>(repo: &R) -> ServiceResult<Vec<BrandResponse>>
where
    R: BrandReader + ?Sized,
{
    repo.list_brands(true)?
        .iter()
        .map(|brand| brand_response(repo, brand))
        .collect()
}

/// Number of active products of the brand.
pub fn brand_product_count<R>(repo: &R, brand_id: i32) -> ServiceResult<ProductCountResponse>
where
    R: BrandReader + ?Sized,
{
    let brand = get_existing(repo, brand_id)?;
    Ok(ProductCountResponse {
        id: brand.id.get(),
        product_count: repo.count_brand_products(brand.id, true)?,
    })
}

pub fn create_brand<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    form: BrandForm,
    logo: Option<ImageUpload>,
) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let payload = BrandPayload::try_from(form)?;

    persist_with_image(store, ImageKind::Brands, logo.as_ref(), |logo_url| {
        repo.create_brand(&payload.into_new_brand(logo_url))
            .map_err(|err| {
                log::error!("Failed to create brand: {err}");
                ServiceError::from(err)
            })
    })
}

pub fn update_brand<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    brand_id: i32,
    form: BrandForm,
    logo: Option<ImageUpload>,
) -> ServiceResult<Brand>
where
    R: BrandReader + BrandWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, brand_id)?;
    let payload = BrandPayload::try_from(form)?;

    let updated = persist_with_image(store, ImageKind::Brands, logo.as_ref(), |new_url| {
        let logo_url = new_url.or_else(|| existing.logo_url.clone());
        repo.update_brand(
            existing.id,
            &payload.into_update(logo_url, Utc::now().naive_utc()),
        )
        .map_err(|err| {
            log::error!("Failed to update brand {}: {err}", existing.id);
            ServiceError::from(err)
        })
    })?;

    if let Some(old_url) = &existing.logo_url
        && updated.logo_url.as_ref() != Some(old_url)
    {
        remove_image(store, ImageKind::Brands, old_url);
    }

    Ok(updated)
}

/// Refused with [`ServiceError::Conflict`] while any product references it.
pub fn delete_brand<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    brand_id: i32,
) -> ServiceResult<()>
where
    R: BrandReader + BrandWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, brand_id)?;
    if repo.count_brand_products(existing.id, false)? > 0 {
        return Err(ServiceError::Conflict(
            "Cannot delete a brand that has products".to_string(),
        ));
    }

    repo.delete_brand(existing.id)?;

    if let Some(url) = &existing.logo_url {
        remove_image(store, ImageKind::Brands, url);
    }
    Ok(())
}

pub fn toggle_brand_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    brand_id: i32,
) -> ServiceResult<StatusToggleResponse>
where
    R: BrandReader + BrandWriter + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, brand_id)?;
    let updated = repo.set_brand_active(existing.id, !existing.is_active)?;

    Ok(StatusToggleResponse {
        id: updated.id.get(),
        is_active: updated.is_active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, brand};
    use crate::uploads::MockImageStore;

    fn form() -> BrandForm {
        BrandForm {
            name: "Adidas".into(),
            website: Some("https://www.adidas.com".into()),
            is_active: true,
            ..BrandForm::default()
        }
    }

    #[test]
    fn duplicate_name_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_brand()
            .returning(|_| Err(RepositoryError::ConstraintViolation("brands.name".into())));
        let store = MockImageStore::new();

        let result = create_brand(&repo, &store, &admin_user(), form(), None);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn update_keeps_logo_without_upload() {
        let mut repo = MockRepository::new();
        repo.expect_get_brand_by_id().returning(|id| {
            let mut b = brand(id.get(), "Adidas");
            b.logo_url = Some("/images/brands/adidas.png".into());
            Ok(Some(b))
        });
        repo.expect_update_brand().returning(|id, updates| {
            let mut b = brand(id.get(), updates.name.as_str());
            b.logo_url = updates.logo_url.clone();
            b.website = updates.website.clone();
            Ok(b)
        });
        let mut store = MockImageStore::new();
        store.expect_delete().never();

        let updated = update_brand(&repo, &store, &admin_user(), 4, form(), None).unwrap();

        assert_eq!(updated.logo_url.as_deref(), Some("/images/brands/adidas.png"));
        assert!(updated.website.is_some());
    }

    #[test]
    fn delete_with_products_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_brand_by_id()
            .returning(|id| Ok(Some(brand(id.get(), "Apple"))));
        repo.expect_count_brand_products().returning(|_, _| Ok(1));
        repo.expect_delete_brand().never();
        let store = MockImageStore::new();

        assert!(matches!(
            delete_brand(&repo, &store, &admin_user(), 1),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn product_count_rejects_invalid_id() {
        let repo = MockRepository::new();

        assert!(matches!(
            brand_product_count(&repo, 0),
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[test]
    fn product_count_counts_active_products() {
        let mut repo = MockRepository::new();
        repo.expect_get_brand_by_id()
            .returning(|id| Ok(Some(brand(id.get(), "Apple"))));
        repo.expect_count_brand_products()
            .withf(|id, active_only| id.get() == 2 && *active_only)
            .returning(|_, _| Ok(3));

        assert_eq!(
            brand_product_count(&repo, 2).unwrap(),
            ProductCountResponse {
                id: 2,
                product_count: 3
            }
        );
    }

    #[test]
    fn product_count_of_missing_brand_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_brand_by_id().returning(|_| Ok(None));

        assert!(matches!(
            brand_product_count(&repo, 2),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn toggle_flips_active_flag() {
        let mut repo = MockRepository::new();
        repo.expect_get_brand_by_id()
            .returning(|id| Ok(Some(brand(id.get(), "Nike"))));
        repo.expect_set_brand_active()
            .withf(|id, is_active| id.get() == 6 && !*is_active)
            .returning(|id, is_active| {
                let mut b = brand(id.get(), "Nike");
                b.is_active = is_active;
                Ok(b)
            });

        assert_eq!(
            toggle_brand_status(&repo, &admin_user(), 6).unwrap(),
            StatusToggleResponse {
                id: 6,
                is_active: false
            }
        );
    }

    #[test]
    fn toggle_missing_brand_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_brand_by_id().returning(|_| Ok(None));
        repo.expect_set_brand_active().never();

        assert!(matches!(
            toggle_brand_status(&repo, &admin_user(), 6),
            Err(ServiceError::NotFound)
        ));
    }
}
