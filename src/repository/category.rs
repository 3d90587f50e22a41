//! Repository implementation for product categories.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category = categories::table
            .find(id.get())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        db_category
            .map(Category::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_categories(&self, active_only: bool) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let mut query = categories::table.into_boxed::<diesel::sqlite::Sqlite>();
        if active_only {
            query = query.filter(categories::is_active.eq(true));
        }

        query
            .order((categories::name.asc(), categories::id.asc()))
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(|c| Category::try_from(c).map_err(RepositoryError::from))
            .collect()
    }

    fn count_category_products(
        &self,
        id: CategoryId,
        active_only: bool,
    ) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let mut query = products::table
            .filter(products::category_id.eq(id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();
        if active_only {
            query = query.filter(products::is_active.eq(true));
        }

        let total = query.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_new: DbNewCategory = category.into();

        let created = diesel::insert_into(categories::table)
            .values(&db_new)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(Category::try_from(created)?)
    }

    fn update_category(
        &self,
        id: CategoryId,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateCategory = updates.into();

        let updated = diesel::update(categories::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(Category::try_from(updated)?)
    }

    fn set_category_active(&self, id: CategoryId, is_active: bool) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let updated = diesel::update(categories::table.find(id.get()))
            .set((
                categories::is_active.eq(is_active),
                categories::updated_at.eq(Some(Utc::now().naive_utc())),
            ))
            .get_result::<DbCategory>(&mut conn)?;

        Ok(Category::try_from(updated)?)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<()> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(categories::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
