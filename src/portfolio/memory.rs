use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    model::{NewEntry, PortfolioEntry},
    store::PortfolioStore,
};

/// Process-local store used by tests and `AppState::fake`.
#[derive(Default)]
pub struct MemoryPortfolioStore {
    rows: RwLock<Vec<PortfolioEntry>>,
}

impl MemoryPortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<PortfolioEntry> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl PortfolioStore for MemoryPortfolioStore {
    async fn list(&self, owner_id: &str) -> anyhow::Result<Vec<PortfolioEntry>> {
        let rows = self.rows.read().await;
        let mut out: Vec<PortfolioEntry> = rows
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn count(&self, owner_id: &str) -> anyhow::Result<i64> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|e| e.owner_id == owner_id).count() as i64)
    }

    async fn insert(&self, entry: NewEntry) -> anyhow::Result<PortfolioEntry> {
        let row = PortfolioEntry {
            id: Uuid::new_v4(),
            owner_id: entry.owner_id,
            symbol: entry.symbol,
            quantity: entry.quantity,
            price: entry.price,
            created_at: OffsetDateTime::now_utc(),
        };
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn delete_where(
        &self,
        id: Uuid,
        owner_id: &str,
    ) -> anyhow::Result<Option<PortfolioEntry>> {
        let mut rows = self.rows.write().await;
        let pos = rows
            .iter()
            .position(|e| e.id == id && e.owner_id == owner_id);
        Ok(pos.map(|i| rows.remove(i)))
    }

    async fn update_owner_where(&self, old_owner: &str, new_owner: &str) -> anyhow::Result<u64> {
        let mut rows = self.rows.write().await;
        let mut modified = 0;
        for row in rows.iter_mut().filter(|e| e.owner_id == old_owner) {
            row.owner_id = new_owner.to_string();
            modified += 1;
        }
        Ok(modified)
    }
}
