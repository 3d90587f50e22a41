//! Business logic shared by the HTTP handlers.

use thiserror::Error;

use crate::domain::auth::{AuthenticatedUser, check_role};
use crate::domain::types::Role;
use crate::uploads::{ImageKind, ImageStore, ImageUpload};

pub mod account;
pub mod brands;
pub mod catalog;
pub mod categories;
pub mod products;
pub mod seed;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    /// Submitted data was rejected; the message is shown to the user.
    #[error("{0}")]
    Form(String),
    /// The change would break a uniqueness or reference rule.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("invalid value: {0}")]
    TypeConstraint(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Fails with [`ServiceError::Unauthorized`] unless the user holds `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: Role) -> ServiceResult<()> {
    if check_role(role.as_str(), &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Saves the optional upload, then runs `persist` with its URL.
///
/// The stored file is removed again when `persist` fails.
pub(crate) fn persist_with_image<S, T, F>(
    store: &S,
    kind: ImageKind,
    upload: Option<&ImageUpload>,
    persist: F,
) -> ServiceResult<T>
where
    S: ImageStore + ?Sized,
    F: FnOnce(Option<String>) -> ServiceResult<T>,
{
    let new_url = upload
        .map(|upload| store.save(kind, upload))
        .transpose()
        .map_err(|err| {
            log::error!("Failed to save {} image: {err}", kind.folder());
            ServiceError::from(err)
        })?;

    match persist(new_url.clone()) {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Some(url) = new_url {
                remove_image(store, kind, &url);
            }
            Err(err)
        }
    }
}

/// Deletes a stored image, logging instead of failing.
pub(crate) fn remove_image<S>(store: &S, kind: ImageKind, url: &str)
where
    S: ImageStore + ?Sized,
{
    if let Err(err) = store.delete(kind, url) {
        log::error!("Failed to delete image {url}: {err}");
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{admin_user, customer_user};
    use super::*;
    use crate::uploads::{MockImageStore, UploadError};

    #[test]
    fn ensure_role_checks_membership() {
        assert!(ensure_role(&admin_user(), Role::Admin).is_ok());
        assert!(matches!(
            ensure_role(&customer_user(), Role::Admin),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn failed_persist_removes_new_image() {
        let mut store = MockImageStore::new();
        store
            .expect_save()
            .returning(|_, _| Ok("/images/products/new.jpg".to_string()));
        store
            .expect_delete()
            .withf(|kind, url| *kind == ImageKind::Products && url == "/images/products/new.jpg")
            .times(1)
            .returning(|_, _| Ok(()));

        let upload = ImageUpload::new("new.jpg", vec![1, 2, 3]).unwrap();
        let result: ServiceResult<()> =
            persist_with_image(&store, ImageKind::Products, Some(&upload), |url| {
                assert_eq!(url.as_deref(), Some("/images/products/new.jpg"));
                Err(ServiceError::Conflict("duplicate".into()))
            });

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn failed_save_skips_persist() {
        let mut store = MockImageStore::new();
        store
            .expect_save()
            .returning(|_, _| Err(UploadError::InvalidFileName));
        store.expect_delete().never();

        let upload = ImageUpload::new("x.jpg", vec![1]).unwrap();
        let result: ServiceResult<()> =
            persist_with_image(&store, ImageKind::Brands, Some(&upload), |_| {
                panic!("persist must not run")
            });

        assert!(matches!(result, Err(ServiceError::Upload(_))));
    }
}
