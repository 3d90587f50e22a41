//! Registration, sign-in and password handling.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::Role;
use crate::domain::user::{NewUser, User};
use crate::forms::account::{RegisterForm, RegisterPayload, SignInForm, SignInPayload};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

/// Keeps `return_url` only when it is a path on this site.
pub fn safe_return_url(return_url: Option<&str>) -> String {
    match return_url.map(str::trim) {
        Some(url) if url.starts_with('/') && !url.starts_with("//") && !url.contains('\\') => {
            url.to_string()
        }
        _ => "/".to_string(),
    }
}

/// Creates a customer account. The caller signs the new user in.
pub fn register<R>(repo: &R, form: RegisterForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let payload = RegisterPayload::try_from(form)?;

    if repo.get_user_by_email(&payload.email)?.is_some() {
        return Err(ServiceError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let new_user = NewUser {
        email: payload.email,
        password_hash: hash_password(&payload.password)?,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        is_active: true,
    };

    let user = repo
        .create_user(&new_user, &[Role::Customer])
        .map_err(|err| {
            log::error!("Failed to register {}: {err}", new_user.email);
            ServiceError::from(err)
        })?;

    log::info!("Registered user {}", user.email);
    Ok(user)
}

/// Checks the credentials and records the login time.
///
/// Unknown emails, wrong passwords and inactive accounts all fail with the
/// same form error.
pub fn sign_in<R>(repo: &R, form: SignInForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let payload = SignInPayload::try_from(form)
        .map_err(|_| ServiceError::Form(INVALID_CREDENTIALS.to_string()))?;

    let user = repo
        .get_user_by_email(&payload.email)?
        .filter(|user| user.is_active)
        .filter(|user| verify_password(&payload.password, &user.password_hash))
        .ok_or_else(|| ServiceError::Form(INVALID_CREDENTIALS.to_string()))?;

    repo.record_login(user.id)?;
    Ok(user)
}

/// Claims stored in the identity cookie for `user`.
pub fn session_claims(user: &User, ttl_hours: i64) -> AuthenticatedUser {
    let exp = chrono::Utc::now().timestamp() + ttl_hours * 3600;
    AuthenticatedUser::from_user(user, exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{PersonName, UserEmail, UserId};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::timestamp;

    fn stored_user(password: &str, is_active: bool) -> User {
        User {
            id: UserId::new(7).unwrap(),
            email: UserEmail::new("jane@example.com").unwrap(),
            password_hash: hash_password(password).unwrap(),
            first_name: PersonName::new("Jane").unwrap(),
            last_name: PersonName::new("Doe").unwrap(),
            phone: None,
            is_active,
            created_at: timestamp(),
            updated_at: None,
            last_login: None,
            roles: vec![Role::Customer],
        }
    }

    fn sign_in_form(password: &str) -> SignInForm {
        SignInForm {
            email: "jane@example.com".into(),
            password: password.into(),
            return_url: None,
        }
    }

    #[test]
    fn hashes_verify() {
        let hash = hash_password("Secret1").unwrap();
        assert!(verify_password("Secret1", &hash));
        assert!(!verify_password("secret1", &hash));
        assert!(!verify_password("Secret1", "not-a-hash"));
    }

    #[test]
    fn return_url_must_be_local() {
        assert_eq!(safe_return_url(Some("/admin/products")), "/admin/products");
        assert_eq!(safe_return_url(Some("https://evil.example")), "/");
        assert_eq!(safe_return_url(Some("//evil.example")), "/");
        assert_eq!(safe_return_url(None), "/");
    }

    #[test]
    fn sign_in_records_login() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user("Secret1", true))));
        repo.expect_record_login()
            .withf(|id| id.get() == 7)
            .times(1)
            .returning(|_| Ok(()));

        let user = sign_in(&repo, sign_in_form("Secret1")).unwrap();
        assert_eq!(user.full_name(), "Jane Doe");
    }

    #[test]
    fn wrong_password_or_inactive_user_is_refused() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user("Secret1", true))));
        repo.expect_record_login().never();
        assert!(matches!(
            sign_in(&repo, sign_in_form("Wrong1")),
            Err(ServiceError::Form(_))
        ));

        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user("Secret1", false))));
        repo.expect_record_login().never();
        assert!(matches!(
            sign_in(&repo, sign_in_form("Secret1")),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn register_rejects_taken_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user("Secret1", true))));
        repo.expect_create_user().never();

        let form = RegisterForm {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            phone: None,
            password: "Secret1".into(),
            confirm_password: "Secret1".into(),
            return_url: None,
        };

        assert!(matches!(
            register(&repo, form),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn register_creates_customer() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_create_user()
            .withf(|user, roles| {
                roles.len() == 1
                    && roles.first() == Some(&Role::Customer)
                    && verify_password("Secret1", &user.password_hash)
            })
            .returning(|_, _| Ok(stored_user("Secret1", true)));

        let form = RegisterForm {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "Jane@Example.com".into(),
            phone: None,
            password: "Secret1".into(),
            confirm_password: "Secret1".into(),
            return_url: Some("/products/1".into()),
        };

        let user = register(&repo, form).unwrap();
        assert!(user.has_role(Role::Customer));
    }
}
