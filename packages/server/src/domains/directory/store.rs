//! Lookup of users and products.
//!
//! The catalogue and user accounts are owned by other services; the request
//! workflow only reads them, to validate references on create and to resolve
//! references in responses.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::models::{ProductRow, ProductSummary, UserRow, UserSummary};
use crate::common::{ProductId, UserId};

#[async_trait]
pub trait Directory: Send + Sync {
    async fn find_user(&self, id: UserId) -> Result<Option<UserSummary>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserSummary>>;

    async fn find_product(&self, id: ProductId) -> Result<Option<ProductSummary>>;
}

// =============================================================================
// Postgres
// =============================================================================

pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, phone, location, skills, role";

#[async_trait]
impl Directory for PostgresDirectory {
    async fn find_user(&self, id: UserId) -> Result<Option<UserSummary>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(UserSummary::try_from).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserSummary>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(UserSummary::try_from).transpose()
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<ProductSummary>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, artisan_id, name, category, description,
                   price_amount, price_currency, price_negotiable, images
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ProductSummary::from))
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// In-memory directory for tests and local development.
#[derive(Default)]
pub struct MemoryDirectory {
    users: RwLock<HashMap<UserId, UserSummary>>,
    products: RwLock<HashMap<ProductId, ProductSummary>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: UserSummary) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn insert_product(&self, product: ProductSummary) {
        self.products.write().await.insert(product.id, product);
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn find_user(&self, id: UserId) -> Result<Option<UserSummary>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserSummary>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<ProductSummary>> {
        Ok(self.products.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Role;

    fn user(email: &str) -> UserSummary {
        UserSummary {
            id: UserId::new(),
            name: "Ana".to_string(),
            email: email.to_string(),
            phone: None,
            location: None,
            skills: vec![],
            role: Role::Artisan,
        }
    }

    #[tokio::test]
    async fn test_find_user_by_email_ignores_case() {
        let directory = MemoryDirectory::new();
        let ana = user("ana@example.com");
        directory.insert_user(ana.clone()).await;

        let found = directory.find_user_by_email("ANA@example.com").await.unwrap();
        assert_eq!(found, Some(ana));
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let directory = MemoryDirectory::new();
        assert!(directory.find_user(UserId::new()).await.unwrap().is_none());
    }
}
