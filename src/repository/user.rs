//! Repository implementation for user accounts.

use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::types::{Role, UserEmail, UserId};
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser, UserRole as DbUserRole};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter};

fn load_roles(conn: &mut DbConnection, db_user: DbUser) -> RepositoryResult<User> {
    use crate::schema::user_roles;

    let roles = user_roles::table
        .filter(user_roles::user_id.eq(db_user.id))
        .order(user_roles::role.asc())
        .select(user_roles::role)
        .load::<String>(conn)?;

    Ok(db_user.into_domain(roles)?)
}

impl UserReader for DieselRepository {
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user.map(|u| load_roles(&mut conn, u)).transpose()
    }

    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user.map(|u| load_roles(&mut conn, u)).transpose()
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &NewUser, roles: &[Role]) -> RepositoryResult<User> {
        use crate::schema::{user_roles, users};

        let mut conn = self.conn()?;
        let db_new: DbNewUser = user.into();

        let db_user = conn
            .transaction::<DbUser, diesel::result::Error, _>(|conn| {
                let created = diesel::insert_into(users::table)
                    .values(&db_new)
                    .get_result::<DbUser>(conn)?;

                let role_rows = roles
                    .iter()
                    .map(|role| DbUserRole {
                        user_id: created.id,
                        role: role.as_str().to_string(),
                    })
                    .collect::<Vec<_>>();

                diesel::insert_into(user_roles::table)
                    .values(&role_rows)
                    .execute(conn)?;

                Ok(created)
            })
            .map_err(RepositoryError::from)?;

        load_roles(&mut conn, db_user)
    }

    fn record_login(&self, id: UserId) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let updated = diesel::update(users::table.find(id.get()))
            .set(users::last_login.eq(Some(Utc::now().naive_utc())))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
