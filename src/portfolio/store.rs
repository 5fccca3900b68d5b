use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::{NewEntry, PortfolioEntry};

/// Durable collection of portfolio entries keyed by owner.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn list(&self, owner_id: &str) -> anyhow::Result<Vec<PortfolioEntry>>;
    async fn count(&self, owner_id: &str) -> anyhow::Result<i64>;
    async fn insert(&self, entry: NewEntry) -> anyhow::Result<PortfolioEntry>;
    /// Removes `id` only if it belongs to `owner_id`.
    async fn delete_where(&self, id: Uuid, owner_id: &str)
        -> anyhow::Result<Option<PortfolioEntry>>;
    /// Rewrites the owner of every matching row in one atomic update.
    async fn update_owner_where(&self, old_owner: &str, new_owner: &str) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgPortfolioStore {
    db: PgPool,
}

impl PgPortfolioStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PortfolioStore for PgPortfolioStore {
    async fn list(&self, owner_id: &str) -> anyhow::Result<Vec<PortfolioEntry>> {
        let rows = sqlx::query_as::<_, PortfolioEntry>(
            r#"
            SELECT id, owner_id, symbol, quantity, price, created_at
              FROM portfolio_entries
             WHERE owner_id = $1
             ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await
        .context("list portfolio entries")?;
        Ok(rows)
    }

    async fn count(&self, owner_id: &str) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM portfolio_entries WHERE owner_id = $1"#,
        )
        .bind(owner_id)
        .fetch_one(&self.db)
        .await
        .context("count portfolio entries")?;
        Ok(n)
    }

    async fn insert(&self, entry: NewEntry) -> anyhow::Result<PortfolioEntry> {
        let row = sqlx::query_as::<_, PortfolioEntry>(
            r#"
            INSERT INTO portfolio_entries (owner_id, symbol, quantity, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, symbol, quantity, price, created_at
            "#,
        )
        .bind(&entry.owner_id)
        .bind(&entry.symbol)
        .bind(entry.quantity)
        .bind(entry.price)
        .fetch_one(&self.db)
        .await
        .context("insert portfolio entry")?;
        Ok(row)
    }

    async fn delete_where(
        &self,
        id: Uuid,
        owner_id: &str,
    ) -> anyhow::Result<Option<PortfolioEntry>> {
        let row = sqlx::query_as::<_, PortfolioEntry>(
            r#"
            DELETE FROM portfolio_entries
             WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, symbol, quantity, price, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await
        .context("delete portfolio entry")?;
        Ok(row)
    }

    async fn update_owner_where(&self, old_owner: &str, new_owner: &str) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"UPDATE portfolio_entries SET owner_id = $2 WHERE owner_id = $1"#,
        )
        .bind(old_owner)
        .bind(new_owner)
        .execute(&self.db)
        .await
        .context("reassign portfolio owner")?;
        Ok(result.rows_affected())
    }
}
