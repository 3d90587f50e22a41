//! Category administration services.

use chrono::Utc;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::types::{CategoryId, Role};
use crate::dto::categories::CategoryResponse;
use crate::dto::products::{ProductCountResponse, StatusToggleResponse};
use crate::forms::categories::{CategoryForm, CategoryPayload};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{
    ServiceError, ServiceResult, ensure_role, persist_with_image, remove_image,
};
use crate::uploads::{ImageKind, ImageStore, ImageUpload};

fn get_existing<R>(repo: &R, category_id: i32) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(CategoryId::new(category_id)?)?
        .ok_or(ServiceError::NotFound)
}

fn with_count<R>(repo: &R, categories: Vec<Category>) -> ServiceResult<Vec<CategoryResponse>>
where
    R: CategoryReader + ?Sized,
{
    categories
        .iter()
        .map(|category| -> ServiceResult<CategoryResponse> {
            let count = repo.count_category_products(category.id, true)?;
            Ok(CategoryResponse::new(category, count))
        })
        .collect()
}

pub fn get_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
) -> ServiceResult<CategoryResponse>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let category = get_existing(repo, category_id)?;
    let count = repo.count_category_products(category.id, true)?;
    Ok(CategoryResponse::new(&category, count))
}

pub fn list_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<CategoryResponse>>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    with_count(repo, repo.list_categories(false)?)
}

/// Active categories with their active product counts.
pub fn list_active_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryResponse>>
where
    R: CategoryReader + ?Sized,
{
    with_count(repo, repo.list_categories(true)?)
}

/// Number of active products in the category.
pub fn category_product_count<R>(repo: &R, category_id: i32) -> ServiceResult<ProductCountResponse>
where
    R: CategoryReader + ?Sized,
{
    let category = get_existing(repo, category_id)?;
    Ok(ProductCountResponse {
        id: category.id.get(),
        product_count: repo.count_category_products(category.id, true)?,
    })
}

pub fn create_category<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    form: CategoryForm,
    image: Option<ImageUpload>,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let payload = CategoryPayload::try_from(form)?;

    persist_with_image(store, ImageKind::Categories, image.as_ref(), |image_url| {
        repo.create_category(&payload.into_new_category(image_url))
            .map_err(|err| {
                log::error!("Failed to create category: {err}");
                ServiceError::from(err)
            })
    })
}

pub fn update_category<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    category_id: i32,
    form: CategoryForm,
    image: Option<ImageUpload>,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, category_id)?;
    let payload = CategoryPayload::try_from(form)?;

    let updated = persist_with_image(store, ImageKind::Categories, image.as_ref(), |new_url| {
        let image_url = new_url.or_else(|| existing.image_url.clone());
        repo.update_category(
            existing.id,
            &payload.into_update(image_url, Utc::now().naive_utc()),
        )
        .map_err(|err| {
            log::error!("Failed to update category {}: {err}", existing.id);
            ServiceError::from(err)
        })
    })?;

    if let Some(old_url) = &existing.image_url
        && updated.image_url.as_ref() != Some(old_url)
    {
        remove_image(store, ImageKind::Categories, old_url);
    }

    Ok(updated)
}

/// Refused with [`ServiceError::Conflict`] while any product references it.
pub fn delete_category<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    category_id: i32,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, category_id)?;
    if repo.count_category_products(existing.id, false)? > 0 {
        return Err(ServiceError::Conflict(
            "Cannot delete a category that has products".to_string(),
        ));
    }

    repo.delete_category(existing.id)?;

    if let Some(url) = &existing.image_url {
        remove_image(store, ImageKind::Categories, url);
    }
    Ok(())
}

pub fn toggle_category_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
) -> ServiceResult<StatusToggleResponse>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let existing = get_existing(repo, category_id)?;
    let updated = repo.set_category_active(existing.id, !existing.is_active)?;

    Ok(StatusToggleResponse {
        id: updated.id.get(),
        is_active: updated.is_active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, category, customer_user};
    use crate::uploads::MockImageStore;

    #[test]
    fn delete_with_products_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id()
            .returning(|id| Ok(Some(category(id.get(), "Electronics"))));
        repo.expect_count_category_products()
            .withf(|_, active_only| !*active_only)
            .returning(|_, _| Ok(2));
        repo.expect_delete_category().never();
        let store = MockImageStore::new();

        let result = delete_category(&repo, &store, &admin_user(), 1);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn delete_empty_category_removes_image() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id().returning(|id| {
            let mut c = category(id.get(), "Sports");
            c.image_url = Some("/images/categories/sports.jpg".into());
            Ok(Some(c))
        });
        repo.expect_count_category_products().returning(|_, _| Ok(0));
        repo.expect_delete_category().times(1).returning(|_| Ok(()));
        let mut store = MockImageStore::new();
        store
            .expect_delete()
            .withf(|kind, url| {
                *kind == ImageKind::Categories && url == "/images/categories/sports.jpg"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        assert!(delete_category(&repo, &store, &admin_user(), 5).is_ok());
    }

    #[test]
    fn toggle_requires_admin() {
        let repo = MockRepository::new();

        let result = toggle_category_status(&repo, &customer_user(), 1);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn toggle_flips_active_flag() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id()
            .returning(|id| Ok(Some(category(id.get(), "Books"))));
        repo.expect_set_category_active()
            .withf(|_, is_active| !*is_active)
            .returning(|id, is_active| {
                let mut c = category(id.get(), "Books");
                c.is_active = is_active;
                Ok(c)
            });

        let response = toggle_category_status(&repo, &admin_user(), 3).unwrap();

        assert_eq!(
            response,
            StatusToggleResponse {
                id: 3,
                is_active: false
            }
        );
    }

    #[test]
    fn toggle_missing_category_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id().returning(|_| Ok(None));
        repo.expect_set_category_active().never();

        assert!(matches!(
            toggle_category_status(&repo, &admin_user(), 42),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn product_count_counts_active_products() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id()
            .returning(|id| Ok(Some(category(id.get(), "Books"))));
        repo.expect_count_category_products()
            .withf(|id, active_only| id.get() == 4 && *active_only)
            .returning(|_, _| Ok(7));

        assert_eq!(
            category_product_count(&repo, 4).unwrap(),
            ProductCountResponse {
                id: 4,
                product_count: 7
            }
        );
    }

    #[test]
    fn product_count_of_missing_category_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id().returning(|_| Ok(None));
        repo.expect_count_category_products().never();

        assert!(matches!(
            category_product_count(&repo, 4),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn get_missing_category_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id().returning(|_| Ok(None));

        assert!(matches!(
            get_category(&repo, &admin_user(), 99),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn active_listing_counts_active_products() {
        let mut repo = MockRepository::new();
        repo.expect_list_categories()
            .withf(|active_only| *active_only)
            .returning(|_| Ok(vec![category(1, "Books"), category(2, "Clothing")]));
        repo.expect_count_category_products()
            .withf(|_, active_only| *active_only)
            .returning(|id, _| Ok(id.get() as usize * 10));

        let categories = list_active_categories(&repo).unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].product_count, 20);
    }

    #[test]
    fn create_with_blank_name_is_a_form_error() {
        let repo = MockRepository::new();
        let store = MockImageStore::new();
        let form = CategoryForm {
            name: String::new(),
            ..CategoryForm::default()
        };

        let result = create_category(&repo, &store, &admin_user(), form, None);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
