//! Repository implementation for brands.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::brand::{Brand, NewBrand, UpdateBrand};
use crate::domain::types::BrandId;
use crate::models::brand::{
    Brand as DbBrand, NewBrand as DbNewBrand, UpdateBrand as DbUpdateBrand,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BrandReader, BrandWriter, DieselRepository};

impl BrandReader for DieselRepository {
    fn get_brand_by_id(&self, id: BrandId) -> RepositoryResult<Option<Brand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;
        let db_brand = brands::table
            .find(id.get())
            .first::<DbBrand>(&mut conn)
            .optional()?;

        match db_brand {
            Some(db_brand) => Ok(Some(Brand::try_from(db_brand)?)),
            None => Ok(None),
        }
    }

    fn list_brands(&self, active_only: bool) -> RepositoryResult<Vec<Brand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;
        let mut query = brands::table.into_boxed::<diesel::sqlite::Sqlite>();
        if active_only {
            query = query.filter(brands::is_active.eq(true));
        }

        let db_brands = query
            .order((brands::name.asc(), brands::id.asc()))
            .load::<DbBrand>(&mut conn)?;

        db_brands
            .into_iter()
            .map(|b| Brand::try_from(b).map_err(RepositoryError::from))
            .collect()
    }

    fn count_brand_products(&self, id: BrandId, active_only: bool) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let mut query = products::table
            .filter(products::brand_id.eq(id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();
        if active_only {
            query = query.filter(products::is_active.eq(true));
        }

        Ok(query.count().get_result::<i64>(&mut conn)? as usize)
    }
}

impl BrandWriter for DieselRepository {
    fn create_brand(&self, brand: &NewBrand) -> RepositoryResult<Brand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;
        let db_new: DbNewBrand = brand.into();

        let created = diesel::insert_into(brands::table)
            .values(&db_new)
            .get_result::<DbBrand>(&mut conn)?;

        Ok(Brand::try_from(created)?)
    }

    fn update_brand(&self, id: BrandId, updates: &UpdateBrand) -> RepositoryResult<Brand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateBrand = updates.into();

        let updated = diesel::update(brands::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbBrand>(&mut conn)?;

        Ok(Brand::try_from(updated)?)
    }

    fn set_brand_active(&self, id: BrandId, is_active: bool) -> RepositoryResult<Brand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;
        let updated = diesel::update(brands::table.find(id.get()))
            .set((
                brands::is_active.eq(is_active),
                brands::updated_at.eq(Some(Utc::now().naive_utc())),
            ))
            .get_result::<DbBrand>(&mut conn)?;

        Ok(Brand::try_from(updated)?)
    }

    fn delete_brand(&self, id: BrandId) -> RepositoryResult<()> {
        use crate::schema::brands;

        let mut conn = self.conn()?;
        match diesel::delete(brands::table.find(id.get())).execute(&mut conn)? {
            0 => Err(RepositoryError::NotFound),
            _ => Ok(()),
        }
    }
}
