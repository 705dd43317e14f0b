//! Storage trait shared by every backend

use crate::core::Data;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// CRUD over one record type
///
/// Handlers and reports only see this trait, never a concrete backend.
/// `list` returns records ordered by `(created_at, id)` so paginated
/// responses are stable across backends.
#[async_trait]
pub trait DataService<T: Data>: Send + Sync {
    async fn create(&self, entity: T) -> Result<T>;

    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    async fn list(&self) -> Result<Vec<T>>;

    /// Replace a stored record; fails when the id is unknown
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Remove a record (unknown ids are a no-op)
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Records whose field renders exactly as `value`
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>>;

    /// Delete every record matching `search(field, value)` and return how
    /// many went away
    async fn delete_where(&self, field: &str, value: &str) -> Result<usize> {
        let matches = self.search(field, value).await?;
        for record in &matches {
            self.delete(&record.id()).await?;
        }
        Ok(matches.len())
    }
}
