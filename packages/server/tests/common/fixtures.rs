//! Test fixtures for creating users and products.

use anyhow::Result;
use artisan_core::common::{ProductId, Role, UserId};
use artisan_core::domains::directory::{
    MemoryDirectory, Price, ProductSummary, UserSummary,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

pub fn user_summary(name: &str, role: Role) -> UserSummary {
    let id = UserId::new();
    UserSummary {
        id,
        name: name.to_string(),
        email: format!("{}-{}@example.com", name.to_lowercase(), id),
        phone: None,
        location: Some("Oaxaca".to_string()),
        skills: if role == Role::Artisan {
            vec!["pottery".to_string()]
        } else {
            vec![]
        },
        role,
    }
}

pub fn product_summary(artisan: UserId, name: &str) -> ProductSummary {
    ProductSummary {
        id: ProductId::new(),
        artisan,
        name: name.to_string(),
        category: "ceramics".to_string(),
        description: "Glazed stoneware".to_string(),
        price: Price {
            amount: Decimal::new(4500, 2),
            currency: "USD".to_string(),
            negotiable: true,
        },
        images: vec![],
    }
}

/// Seed a user into an in-memory directory
pub async fn seed_user(directory: &MemoryDirectory, name: &str, role: Role) -> UserId {
    let user = user_summary(name, role);
    let id = user.id;
    directory.insert_user(user).await;
    id
}

/// Seed a product into an in-memory directory
pub async fn seed_product(directory: &MemoryDirectory, artisan: UserId, name: &str) -> ProductId {
    let product = product_summary(artisan, name);
    let id = product.id;
    directory.insert_product(product).await;
    id
}

/// Create a user row
pub async fn create_test_user(pool: &PgPool, name: &str, role: Role) -> Result<UserId> {
    let user = user_summary(name, role);
    sqlx::query(
        r#"INSERT INTO users (id, name, email, phone, location, skills, role)
           VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(&user.location)
    .bind(&user.skills)
    .bind(user.role.to_string())
    .execute(pool)
    .await?;
    Ok(user.id)
}

/// Create a product row owned by `artisan`
pub async fn create_test_product(pool: &PgPool, artisan: UserId, name: &str) -> Result<ProductId> {
    let product = product_summary(artisan, name);
    sqlx::query(
        r#"INSERT INTO products (id, artisan_id, name, category, description,
                                 price_amount, price_currency, price_negotiable)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
    )
    .bind(product.id)
    .bind(product.artisan)
    .bind(&product.name)
    .bind(&product.category)
    .bind(&product.description)
    .bind(product.price.amount)
    .bind(&product.price.currency)
    .bind(product.price.negotiable)
    .execute(pool)
    .await?;
    Ok(product.id)
}
