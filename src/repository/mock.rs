//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::brand::{Brand, NewBrand, UpdateBrand};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, ProductEntry, UpdateProduct};
use crate::domain::types::{BrandId, CategoryId, ProductId, Role, UserEmail, UserId};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, ProductListQuery, ProductReader,
    ProductWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl CategoryReader for Repository {
        fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, active_only: bool) -> RepositoryResult<Vec<Category>>;
        fn count_category_products(
            &self,
            id: CategoryId,
            active_only: bool,
        ) -> RepositoryResult<usize>;
    }

    impl CategoryWriter for Repository {
        fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(
            &self,
            id: CategoryId,
            updates: &UpdateCategory,
        ) -> RepositoryResult<Category>;
        fn set_category_active(&self, id: CategoryId, is_active: bool) -> RepositoryResult<Category>;
        fn delete_category(&self, id: CategoryId) -> RepositoryResult<()>;
    }

    impl BrandReader for Repository {
        fn get_brand_by_id(&self, id: BrandId) -> RepositoryResult<Option<Brand>>;
        fn list_brands(&self, active_only: bool) -> RepositoryResult<Vec<Brand>>;
        fn count_brand_products(&self, id: BrandId, active_only: bool) -> RepositoryResult<usize>;
    }

    impl BrandWriter for Repository {
        fn create_brand(&self, brand: &NewBrand) -> RepositoryResult<Brand>;
        fn update_brand(&self, id: BrandId, updates: &UpdateBrand) -> RepositoryResult<Brand>;
        fn set_brand_active(&self, id: BrandId, is_active: bool) -> RepositoryResult<Brand>;
        fn delete_brand(&self, id: BrandId) -> RepositoryResult<()>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<ProductEntry>>;
        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<ProductEntry>)>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn set_product_featured(&self, id: ProductId, is_featured: bool) -> RepositoryResult<Product>;
        fn set_product_active(&self, id: ProductId, is_active: bool) -> RepositoryResult<Product>;
        fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
    }

    impl UserReader for Repository {
        fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, user: &NewUser, roles: &[Role]) -> RepositoryResult<User>;
        fn record_login(&self, id: UserId) -> RepositoryResult<()>;
    }
}
