use chrono::Utc;
use kashop_catalog::domain::brand::NewBrand;
use kashop_catalog::domain::category::{Category, NewCategory, UpdateCategory};
use kashop_catalog::domain::product::NewProduct;
use kashop_catalog::domain::types::{
    BrandName, CategoryName, Description, PersonName, Price, ProductName, Role, Sku,
    StockQuantity, UserEmail, WebsiteUrl,
};
use kashop_catalog::domain::user::NewUser;
use kashop_catalog::repository::errors::RepositoryError;
use kashop_catalog::repository::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, DieselRepository, ProductListQuery,
    ProductReader, ProductSort, ProductWriter, UserReader, UserWriter,
};

mod common;

fn category(repo: &DieselRepository, name: &str) -> Category {
    repo.create_category(&NewCategory::new(
        CategoryName::new(name).unwrap(),
        Description::new(format!("{name} description")),
        true,
    ))
    .unwrap()
}

fn product(name: &str, cents: i64, stock: i32, category: &Category) -> NewProduct {
    NewProduct {
        name: ProductName::new(name).unwrap(),
        description: Description::new(format!("About {name}")),
        price: Price::from_cents(cents).unwrap(),
        discount_price: None,
        stock: StockQuantity::new(stock).unwrap(),
        image_url: None,
        category_id: category.id,
        brand_id: None,
        sku: None,
        is_featured: false,
        is_active: true,
    }
}

#[test]
fn test_category_repository_crud() {
    let test_db = common::TestDb::new("test_category_repository_crud.db");
    let repo = test_db.repo();

    let books = category(&repo, "Books");
    let toys = category(&repo, "Toys");

    let all = repo.list_categories(false).unwrap();
    assert_eq!(
        all.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        ["Books", "Toys"]
    );

    let updated = repo
        .update_category(
            books.id,
            &UpdateCategory {
                name: CategoryName::new("Novels").unwrap(),
                description: Description::new("Fiction"),
                image_url: Some("/images/categories/novels.jpg".into()),
                is_active: true,
                updated_at: Utc::now().naive_utc(),
            },
        )
        .unwrap();
    assert_eq!(updated.name.as_str(), "Novels");
    assert!(updated.updated_at.is_some());

    let hidden = repo.set_category_active(toys.id, false).unwrap();
    assert!(!hidden.is_active);
    assert_eq!(repo.list_categories(true).unwrap().len(), 1);

    repo.delete_category(toys.id).unwrap();
    assert!(repo.get_category_by_id(toys.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_category(toys.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_duplicate_category_name_is_a_constraint_violation() {
    let test_db = common::TestDb::new("test_duplicate_category_name.db");
    let repo = test_db.repo();
    category(&repo, "Books");

    let result = repo.create_category(&NewCategory::new(
        CategoryName::new("Books").unwrap(),
        Description::default(),
        true,
    ));
    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[test]
fn test_brand_repository_counts_products() {
    let test_db = common::TestDb::new("test_brand_repository_counts_products.db");
    let repo = test_db.repo();
    let phones = category(&repo, "Phones");

    let apple = repo
        .create_brand(&NewBrand::new(
            BrandName::new("Apple").unwrap(),
            Description::new("Think different"),
            Some(WebsiteUrl::new("https://www.apple.com").unwrap()),
            true,
        ))
        .unwrap();
    assert_eq!(
        apple.website.as_ref().map(WebsiteUrl::as_str),
        Some("https://www.apple.com")
    );

    let mut iphone = product("iPhone", 99_900, 5, &phones);
    iphone.brand_id = Some(apple.id);
    let mut old_iphone = product("iPhone 8", 19_900, 0, &phones);
    old_iphone.brand_id = Some(apple.id);
    old_iphone.is_active = false;
    repo.create_product(&iphone).unwrap();
    repo.create_product(&old_iphone).unwrap();

    assert_eq!(repo.count_brand_products(apple.id, false).unwrap(), 2);
    assert_eq!(repo.count_brand_products(apple.id, true).unwrap(), 1);
    assert_eq!(repo.count_category_products(phones.id, true).unwrap(), 1);
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = test_db.repo();
    let books = category(&repo, "Books");

    let mut new_product = product("Rust in Action", 4_500, 10, &books);
    new_product.sku = Some(Sku::new("rust-001").unwrap());
    new_product.discount_price = Some(Price::from_cents(3_900).unwrap());
    let created = repo.create_product(&new_product).unwrap();
    assert_eq!(created.sku.as_ref().map(Sku::as_str), Some("RUST-001"));

    let entry = repo.get_product_by_id(created.id).unwrap().unwrap();
    assert_eq!(entry.product.name.as_str(), "Rust in Action");
    assert_eq!(
        entry.category.as_ref().map(|c| c.name.as_str()),
        Some("Books")
    );
    assert!(entry.brand.is_none());

    let featured = repo.set_product_featured(created.id, true).unwrap();
    assert!(featured.is_featured);
    let inactive = repo.set_product_active(created.id, false).unwrap();
    assert!(!inactive.is_active);

    repo.delete_product(created.id).unwrap();
    assert!(repo.get_product_by_id(created.id).unwrap().is_none());
}

#[test]
fn test_discount_must_be_below_price() {
    let test_db = common::TestDb::new("test_discount_must_be_below_price.db");
    let repo = test_db.repo();
    let books = category(&repo, "Books");

    let mut new_product = product("Rust in Action", 4_500, 10, &books);
    new_product.discount_price = Some(Price::from_cents(4_500).unwrap());

    assert!(matches!(
        repo.create_product(&new_product),
        Err(RepositoryError::ValidationError(_))
    ));
}

#[test]
fn test_product_listing_filters_sorts_and_pages() {
    let test_db = common::TestDb::new("test_product_listing.db");
    let repo = test_db.repo();
    let phones = category(&repo, "Phones");
    let books = category(&repo, "Books");

    repo.create_product(&product("Galaxy S24", 79_900, 4, &phones))
        .unwrap();
    repo.create_product(&product("iPhone 15", 99_900, 2, &phones))
        .unwrap();
    repo.create_product(&product("Pixel 8", 69_900, 9, &phones))
        .unwrap();
    repo.create_product(&product("100% Rust", 2_000, 1, &books))
        .unwrap();
    let mut hidden = product("Nokia 3310", 4_900, 1, &phones);
    hidden.is_active = false;
    repo.create_product(&hidden).unwrap();

    let (total, items) = repo
        .list_products(
            ProductListQuery::new()
                .category(phones.id)
                .active(true)
                .sort_by(ProductSort::Price, true)
                .paginate(1, 2),
        )
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(
        items
            .iter()
            .map(|e| e.product.name.as_str())
            .collect::<Vec<_>>(),
        ["iPhone 15", "Galaxy S24"]
    );

    let (_, second_page) = repo
        .list_products(
            ProductListQuery::new()
                .category(phones.id)
                .active(true)
                .sort_by(ProductSort::Price, true)
                .paginate(2, 2),
        )
        .unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].product.name.as_str(), "Pixel 8");

    let (total, beyond) = repo
        .list_products(ProductListQuery::new().active(true).paginate(usize::MAX, 10))
        .unwrap();
    assert_eq!(total, 4);
    assert!(beyond.is_empty());

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("IPHONE"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].product.name.as_str(), "iPhone 15");

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("100%"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].product.name.as_str(), "100% Rust");

    let (total, _) = repo
        .list_products(ProductListQuery::new().price_range(
            Some(Price::from_cents(5_000).unwrap()),
            Some(Price::from_cents(80_000).unwrap()),
        ))
        .unwrap();
    assert_eq!(total, 2);

    let (total, items) = repo
        .list_products(ProductListQuery::new().sort_by(ProductSort::Stock, false))
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(items[0].product.stock.get(), 1);
    assert_eq!(items[4].product.name.as_str(), "Pixel 8");
}

#[test]
fn test_user_repository_roles_and_login() {
    let test_db = common::TestDb::new("test_user_repository.db");
    let repo = test_db.repo();
    let email = UserEmail::new("Admin@KaShop.com").unwrap();

    let user = repo
        .create_user(
            &NewUser {
                email: email.clone(),
                password_hash: "hash".into(),
                first_name: PersonName::new("Admin").unwrap(),
                last_name: PersonName::new("User").unwrap(),
                phone: None,
                is_active: true,
            },
            &[Role::Admin],
        )
        .unwrap();
    assert!(user.has_role(Role::Admin));
    assert!(user.last_login.is_none());

    repo.record_login(user.id).unwrap();
    let stored = repo.get_user_by_email(&email).unwrap().unwrap();
    assert_eq!(stored.id, user.id);
    assert!(stored.last_login.is_some());
    assert_eq!(stored.roles, vec![Role::Admin]);

    let missing = UserEmail::new("nobody@kashop.com").unwrap();
    assert!(repo.get_user_by_email(&missing).unwrap().is_none());
}
