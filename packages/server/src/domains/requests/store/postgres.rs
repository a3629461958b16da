use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{ParticipantScope, RequestStore};
use crate::common::{RequestId, UserId};
use crate::domains::requests::models::{
    NewRequest, Request, RequestChanges, RequestRow, RequestStatus,
};

pub struct PostgresRequestStore {
    pool: PgPool,
}

impl PostgresRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_requests(rows: Vec<RequestRow>) -> Result<Vec<Request>> {
    rows.into_iter().map(Request::try_from).collect()
}

#[async_trait]
impl RequestStore for PostgresRequestStore {
    async fn create(&self, new: NewRequest) -> Result<Request> {
        let row = sqlx::query_as::<_, RequestRow>(
            r#"
            INSERT INTO requests (
                id, buyer_id, artisan_id, product_id, kind, title, description,
                budget_min, budget_max, budget_currency, deadline, status,
                attachments, messages
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, '[]'::jsonb)
            RETURNING *
            "#,
        )
        .bind(RequestId::new())
        .bind(new.buyer)
        .bind(new.artisan)
        .bind(new.product)
        .bind(new.kind.to_string())
        .bind(new.title)
        .bind(new.description)
        .bind(new.budget.min)
        .bind(new.budget.max)
        .bind(new.budget.currency)
        .bind(new.deadline)
        .bind(RequestStatus::Pending.to_string())
        .bind(Json(new.attachments))
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert request")?;
        row.try_into()
    }

    async fn find_by_id(&self, id: RequestId) -> Result<Option<Request>> {
        let row = sqlx::query_as::<_, RequestRow>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Request::try_from).transpose()
    }

    async fn find_by_participant(&self, scope: ParticipantScope) -> Result<Vec<Request>> {
        let rows = match scope {
            ParticipantScope::Buyer(user) => {
                self.fetch_where("buyer_id = $1", Some(user)).await?
            }
            ParticipantScope::Artisan(user) => {
                self.fetch_where("artisan_id = $1", Some(user)).await?
            }
            ParticipantScope::Everyone => self.fetch_where("TRUE", None).await?,
        };
        into_requests(rows)
    }

    async fn update(&self, id: RequestId, changes: RequestChanges) -> Result<Option<Request>> {
        // One statement per update: the row lock taken by UPDATE makes the
        // message append safe against a concurrent writer on the same request,
        // and the status guard is evaluated against the locked row.
        let appended = changes.append_message.map(|m| Json(vec![m]));
        let row = sqlx::query_as::<_, RequestRow>(
            r#"
            UPDATE requests
            SET status = COALESCE($2, status),
                quotation = COALESCE($3, quotation),
                messages = CASE WHEN $4::jsonb IS NULL THEN messages ELSE messages || $4::jsonb END,
                updated_at = NOW()
            WHERE id = $1 AND ($5::text IS NULL OR status = $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.status.map(|s| s.to_string()))
        .bind(changes.quotation.map(Json))
        .bind(appended)
        .bind(changes.expected_status.map(|s| s.to_string()))
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update request")?;
        row.map(Request::try_from).transpose()
    }

    async fn delete(&self, id: RequestId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

impl PostgresRequestStore {
    async fn fetch_where(&self, predicate: &str, user: Option<UserId>) -> Result<Vec<RequestRow>> {
        let sql = format!(
            "SELECT * FROM requests WHERE {} ORDER BY created_at DESC, id DESC",
            predicate
        );
        let mut query = sqlx::query_as::<_, RequestRow>(&sql);
        if let Some(user) = user {
            query = query.bind(user);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}
