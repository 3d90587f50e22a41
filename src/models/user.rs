//! Diesel models for user accounts and their roles.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{
    PersonName, PhoneNumber, Role, TypeConstraintError, UserEmail, UserId,
};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub last_login: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: Option<&'a str>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Queryable, Insertable, Associations)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = crate::schema::user_roles)]
/// Association table linking users to roles.
pub struct UserRole {
    pub user_id: i32,
    pub role: String,
}

impl User {
    /// Converts the row into a domain user carrying the given role names.
    pub fn into_domain(self, roles: Vec<String>) -> Result<DomainUser, TypeConstraintError> {
        let roles = roles
            .iter()
            .map(|role| role.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DomainUser {
            id: UserId::new(self.id)?,
            email: UserEmail::new(self.email)?,
            password_hash: self.password_hash,
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
            phone: self.phone.map(PhoneNumber::new).transpose()?,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_login: self.last_login,
            roles,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            phone: user.phone.as_ref().map(PhoneNumber::as_str),
            is_active: user.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row() -> User {
        User {
            id: 1,
            email: "admin@kashop.com".into(),
            password_hash: "$argon2id$stub".into(),
            first_name: "Admin".into(),
            last_name: "User".into(),
            phone: Some("+14155552671".into()),
            is_active: true,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
            last_login: None,
        }
    }

    #[test]
    fn user_into_domain_with_roles() {
        let domain = row()
            .into_domain(vec!["Admin".into(), "Customer".into()])
            .expect("valid user");

        assert_eq!(domain.email.as_str(), "admin@kashop.com");
        assert_eq!(domain.roles, vec![Role::Admin, Role::Customer]);
        assert_eq!(
            domain.phone.as_ref().map(PhoneNumber::as_str),
            Some("+14155552671")
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result = row().into_domain(vec!["Root".into()]);

        assert_eq!(
            result,
            Err(TypeConstraintError::UnknownRole("Root".to_string()))
        );
    }
}
