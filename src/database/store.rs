//! Record store boundary

use super::errors::StoreResult;
use crate::models::Student;
use crate::types::StudentRequest;
use async_trait::async_trait;

/// Persistent storage for student rows
///
/// The store is the source of truth; callers never keep rows beyond a
/// single request. Mutations report affected row counts so the service
/// layer decides what "not found" means.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a row; the store assigns the id and both timestamps
    async fn insert(&self, request: &StudentRequest) -> StoreResult<Student>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Student>>;

    /// Exact-name match, oldest update first (ties by id)
    async fn find_by_name(&self, name: &str) -> StoreResult<Vec<Student>>;

    /// Overwrite every mutable field and refresh `updated_at`
    async fn update_by_id(&self, id: i64, request: &StudentRequest) -> StoreResult<u64>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<u64>;

    /// Case-insensitive substring filter on name, newest update first
    ///
    /// An empty filter matches every row.
    async fn find_page(&self, limit: i64, offset: i64, name_filter: &str)
        -> StoreResult<Vec<Student>>;

    async fn health_check(&self) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}
