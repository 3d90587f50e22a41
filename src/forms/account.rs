//! Registration and sign-in forms.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::types::{PersonName, PhoneNumber, UserEmail};
use crate::forms::FormError;

/// At least one digit, one lower-case and one upper-case letter.
fn validate_password_policy(password: &str) -> Result<(), ValidationError> {
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_lower = password.chars().any(char::is_lowercase);
    let has_upper = password.chars().any(char::is_uppercase);
    if has_digit && has_lower && has_upper {
        Ok(())
    } else {
        Err(ValidationError::new("weak_password")
            .with_message("password needs a digit, a lower-case and an upper-case letter".into()))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(min = 6, max = 100), custom(function = "validate_password_policy"))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
    #[serde(default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RegisterPayload {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: UserEmail,
    pub phone: Option<PhoneNumber>,
    pub password: String,
}

impl TryFrom<RegisterForm> for RegisterPayload {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let phone = form
            .phone
            .filter(|p| !p.trim().is_empty())
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(Self {
            first_name: PersonName::new(form.first_name).map_err(|_| FormError::InvalidName)?,
            last_name: PersonName::new(form.last_name).map_err(|_| FormError::InvalidName)?,
            email: UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone,
            password: form.password,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignInForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SignInPayload {
    pub email: UserEmail,
    pub password: String,
}

impl TryFrom<SignInForm> for SignInPayload {
    type Error = FormError;

    fn try_from(form: SignInForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            password: form.password,
        })
    }
}
