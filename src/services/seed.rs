//! Startup seeding of the admin account and a starter catalog.

use crate::domain::brand::NewBrand;
use crate::domain::category::NewCategory;
use crate::domain::product::NewProduct;
use crate::domain::types::{
    BrandName, CategoryName, Description, PersonName, Price, ProductName, Role, Sku,
    StockQuantity, UserEmail, WebsiteUrl,
};
use crate::domain::user::NewUser;
use crate::repository::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, ProductListQuery, ProductReader,
    ProductWriter, UserReader, UserWriter,
};
use crate::services::ServiceResult;
use crate::services::account::hash_password;

const CATEGORIES: [(&str, &str); 5] = [
    ("Electronics", "Electronic devices and gadgets"),
    ("Clothing", "Clothes and fashion accessories"),
    ("Books", "Books and educational materials"),
    ("Home & Garden", "Home appliances and tools"),
    ("Sports", "Sports equipment and accessories"),
];

/// Name, description, logo, website.
const BRANDS: [(&str, &str, &str, &str); 5] = [
    ("Apple", "Technology company", "/images/brands/apple.png", "https://www.apple.com"),
    ("Nike", "Sports apparel and equipment", "/images/brands/nike.png", "https://www.nike.com"),
    ("Samsung", "Electronics and home appliances", "/images/brands/samsung.png", "https://www.samsung.com"),
    ("Adidas", "Sports shoes and clothing", "/images/brands/adidas.png", "https://www.adidas.com"),
    ("HP", "Computers and printers", "/images/brands/hp.png", "https://www.hp.com"),
];

struct SampleProduct {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    stock: i32,
    brand: &'static str,
    sku: &'static str,
    is_featured: bool,
    image_url: &'static str,
}

const PRODUCTS: [SampleProduct; 3] = [
    SampleProduct {
        name: "HP ZBook",
        description: "High-performance workstation laptop",
        price: "4500.00",
        stock: 8,
        brand: "HP",
        sku: "HP-ZBOOK-001",
        is_featured: false,
        image_url: "/images/products/hp-zbook.jpg",
    },
    SampleProduct {
        name: "Coffee Machine",
        description: "Has storage need one Casula each day Weight: 2kg, Color: Black",
        price: "998.00",
        stock: 8,
        brand: "Samsung",
        sku: "COFFEE-MACH-001",
        is_featured: false,
        image_url: "/images/products/coffee-machine.jpg",
    },
    SampleProduct {
        name: "iPhone 15 Pro",
        description: "Latest Apple smartphone with advanced features",
        price: "1200.00",
        stock: 15,
        brand: "Apple",
        sku: "IPHONE-15-PRO",
        is_featured: true,
        image_url: "/images/products/iphone15.jpg",
    },
];

/// Creates the admin account when no user has its email yet.
pub fn seed_admin<R>(repo: &R, email: &str, password: &str) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let email = UserEmail::new(email)?;
    if repo.get_user_by_email(&email)?.is_some() {
        return Ok(());
    }

    let admin = NewUser {
        email,
        password_hash: hash_password(password)?,
        first_name: PersonName::new("Admin")?,
        last_name: PersonName::new("User")?,
        phone: None,
        is_active: true,
    };
    repo.create_user(&admin, &[Role::Admin])?;

    log::info!("Created admin user {}", admin.email);
    Ok(())
}

/// Fills empty catalog tables with the starter categories, brands and products.
pub fn seed_catalog<R>(repo: &R) -> ServiceResult<()>
where
    R: CategoryReader
        + CategoryWriter
        + BrandReader
        + BrandWriter
        + ProductReader
        + ProductWriter
        + ?Sized,
{
    if repo.list_categories(false)?.is_empty() {
        for (name, description) in CATEGORIES {
            repo.create_category(&NewCategory::new(
                CategoryName::new(name)?,
                Description::new(description),
                true,
            ))?;
        }
        log::info!("Seeded {} categories", CATEGORIES.len());
    }

    if repo.list_brands(false)?.is_empty() {
        for (name, description, logo_url, website) in BRANDS {
            let brand = NewBrand::new(
                BrandName::new(name)?,
                Description::new(description),
                Some(WebsiteUrl::new(website)?),
                true,
            )
            .with_logo_url(Some(logo_url.to_string()));
            repo.create_brand(&brand)?;
        }
        log::info!("Seeded {} brands", BRANDS.len());
    }

    let (product_count, _) = repo.list_products(ProductListQuery::new().paginate(1, 1))?;
    if product_count > 0 {
        return Ok(());
    }

    let categories = repo.list_categories(false)?;
    let Some(electronics) = categories
        .iter()
        .find(|c| c.name.as_str() == "Electronics")
    else {
        return Ok(());
    };
    let brands = repo.list_brands(false)?;

    for sample in &PRODUCTS {
        let brand_id = brands
            .iter()
            .find(|b| b.name.as_str() == sample.brand)
            .map(|b| b.id);

        repo.create_product(&NewProduct {
            name: ProductName::new(sample.name)?,
            description: Description::new(sample.description),
            price: Price::parse(sample.price)?,
            discount_price: None,
            stock: StockQuantity::new(sample.stock)?,
            image_url: Some(sample.image_url.to_string()),
            category_id: electronics.id,
            brand_id,
            sku: Some(Sku::new(sample.sku)?),
            is_featured: sample.is_featured,
            is_active: true,
        })?;
    }
    log::info!("Seeded {} sample products", PRODUCTS.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::domain::types::UserId;
    use crate::domain::user::User;
    use crate::services::test_support::{brand, category, entry, product, timestamp};

    fn admin_account() -> User {
        User {
            id: UserId::new(1).unwrap(),
            email: UserEmail::new("admin@kashop.com").unwrap(),
            password_hash: String::new(),
            first_name: PersonName::new("Admin").unwrap(),
            last_name: PersonName::new("User").unwrap(),
            phone: None,
            is_active: true,
            created_at: timestamp(),
            updated_at: None,
            last_login: None,
            roles: vec![Role::Admin],
        }
    }

    #[test]
    fn existing_admin_is_left_alone() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(admin_account())));
        repo.expect_create_user().never();

        assert!(seed_admin(&repo, "admin@kashop.com", "Admin123!").is_ok());
    }

    #[test]
    fn missing_admin_is_created_with_admin_role() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_create_user()
            .withf(|user, roles| {
                user.email.as_str() == "admin@kashop.com"
                    && roles.first() == Some(&Role::Admin)
            })
            .times(1)
            .returning(|_, _| Ok(admin_account()));

        assert!(seed_admin(&repo, "Admin@KaShop.com", "Admin123!").is_ok());
    }

    #[test]
    fn populated_catalog_is_not_reseeded() {
        let mut repo = MockRepository::new();
        repo.expect_list_categories()
            .returning(|_| Ok(vec![category(1, "Electronics")]));
        repo.expect_list_brands()
            .returning(|_| Ok(vec![brand(1, "Apple")]));
        repo.expect_list_products()
            .returning(|_| Ok((1, vec![entry(product(1, "HP ZBook"))])));
        repo.expect_create_category().never();
        repo.expect_create_brand().never();
        repo.expect_create_product().never();

        assert!(seed_catalog(&repo).is_ok());
    }

    #[test]
    fn sample_products_link_to_electronics_and_brands() {
        let mut repo = MockRepository::new();
        repo.expect_list_categories()
            .returning(|_| Ok(vec![category(4, "Electronics")]));
        repo.expect_list_brands().returning(|_| {
            Ok(vec![brand(1, "Apple"), brand(3, "Samsung"), brand(5, "HP")])
        });
        repo.expect_list_products().returning(|_| Ok((0, vec![])));
        repo.expect_create_product()
            .withf(|p| p.category_id.get() == 4 && p.brand_id.is_some())
            .times(3)
            .returning(|_| Ok(product(1, "Sample")));

        assert!(seed_catalog(&repo).is_ok());
    }
}
