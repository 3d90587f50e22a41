//! Identity claims carried by the session cookie.

use serde::{Deserialize, Serialize};

use crate::domain::types::Role;
use crate::domain::user::User;

/// Claims of the signed-in user, serialized into the identity token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User id as a string.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    /// Expiry as a unix timestamp in seconds.
    pub exp: i64,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn from_user(user: &User, exp: i64) -> Self {
        Self {
            sub: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.full_name(),
            roles: user.roles.iter().map(|r| r.as_str().to_string()).collect(),
            exp,
        }
    }

    pub fn is_admin(&self) -> bool {
        check_role(Role::Admin.as_str(), &self.roles)
    }
}

/// Returns `true` when `role` is present in `roles`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}
