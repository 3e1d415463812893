use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::record::Record;
use crate::services::list_query::{Criteria, SortOrder, Window};
use crate::services::tenant_scope::TenantScope;

/// Set operations applied to many live rows in one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    SetActive(bool),
    SoftDelete,
}

/// Tenant-scoped persistence for one record type.
///
/// Every method takes the caller's [`TenantScope`]. Reads honour its
/// visibility; `replace` and `apply` only ever touch live rows of the scoped
/// tenant and refresh `updated_at`.
#[async_trait]
pub trait RecordStore<E: Record>: Send + Sync {
    /// Persists a new row, stamping the scope's tenant on it.
    async fn insert(&self, scope: &TenantScope, record: E) -> Result<E>;

    async fn find(&self, scope: &TenantScope, id: Uuid) -> Result<Option<E>>;

    /// Overwrites the writable columns of a live row. `None` when no live row
    /// matches the id inside the scope.
    async fn replace(&self, scope: &TenantScope, record: &E) -> Result<Option<E>>;

    /// Returns the number of rows changed.
    async fn apply(&self, scope: &TenantScope, ids: &[Uuid], mutation: Mutation) -> Result<u64>;

    async fn count(&self, scope: &TenantScope, criteria: &Criteria) -> Result<u64>;

    async fn select(
        &self,
        scope: &TenantScope,
        criteria: &Criteria,
        order: &SortOrder,
        window: Option<Window>,
    ) -> Result<Vec<E>>;
}
