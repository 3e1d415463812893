use std::sync::Arc;

use uuid::Uuid;

use crate::database::store::{Mutation, RecordStore};
use crate::error::{Error, Result};
use crate::models::record::{BulkAction, Record};
use crate::services::list_query::{Criteria, ListQuery, Page, PageSlot, SortOrder, Window};
use crate::services::tenant_scope::TenantScope;

/// Tenant-scoped listing, lookup and set operations shared by every entity.
pub struct ListService<E: Record> {
    store: Arc<dyn RecordStore<E>>,
}

impl<E: Record> Clone for ListService<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<E: Record> ListService<E> {
    pub fn new(store: Arc<dyn RecordStore<E>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore<E>> {
        &self.store
    }

    fn not_found(id: Uuid) -> Error {
        Error::NotFound(format!("{} {} not found", E::schema().kind, id))
    }

    /// Live row by id; `NotFound` otherwise.
    pub async fn get(&self, scope: &TenantScope, id: Uuid) -> Result<E> {
        self.store
            .find(&scope.live_only(), id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn list(&self, scope: &TenantScope, query: &ListQuery) -> Result<Page<E>> {
        let scope = Self::visibility_for(scope, query);
        let total = self.store.count(&scope, &query.criteria).await?;
        let slot = PageSlot::resolve(query.page.as_deref(), total, query.per_page);
        let items = self
            .store
            .select(&scope, &query.criteria, &query.order, Some(slot.window()))
            .await?;
        Ok(slot.into_page(items, total))
    }

    /// Whole filtered, ordered result; used by exports.
    pub async fn list_all(&self, scope: &TenantScope, query: &ListQuery) -> Result<Vec<E>> {
        let scope = Self::visibility_for(scope, query);
        self.store
            .select(&scope, &query.criteria, &query.order, None)
            .await
    }

    fn visibility_for(scope: &TenantScope, query: &ListQuery) -> TenantScope {
        if query.include_deleted {
            scope.including_deleted()
        } else {
            scope.live_only()
        }
    }

    pub async fn find_by(
        &self,
        scope: &TenantScope,
        criteria: &Criteria,
        order: &SortOrder,
        limit: Option<u64>,
    ) -> Result<Vec<E>> {
        let window = limit.map(|limit| Window { offset: 0, limit });
        self.store
            .select(&scope.live_only(), criteria, order, window)
            .await
    }

    pub async fn count(&self, scope: &TenantScope) -> Result<u64> {
        self.store.count(&scope.live_only(), &Criteria::new()).await
    }

    /// Marks a row deleted. Deleting an already-deleted row succeeds without
    /// touching it; only an id unknown to the tenant is `NotFound`.
    pub async fn soft_delete(&self, scope: &TenantScope, id: Uuid) -> Result<()> {
        let existing = self
            .store
            .find(&scope.including_deleted(), id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        if existing.meta().is_deleted {
            tracing::debug!(kind = E::schema().kind, %id, "already deleted");
            return Ok(());
        }
        self.store
            .apply(&scope.live_only(), &[id], Mutation::SoftDelete)
            .await?;
        tracing::info!(kind = E::schema().kind, %id, "soft deleted");
        Ok(())
    }

    /// Applies a named bulk action to live rows. Unknown or disallowed
    /// actions change nothing and report 0.
    pub async fn bulk_action(&self, scope: &TenantScope, ids: &[Uuid], action: &str) -> Result<u64> {
        let schema = E::schema();
        let Some(action) = BulkAction::parse(action).filter(|a| schema.allows(*a)) else {
            tracing::debug!(kind = schema.kind, action, "ignoring unsupported bulk action");
            return Ok(0);
        };
        if ids.is_empty() {
            return Ok(0);
        }
        let mutation = match action {
            BulkAction::Activate => Mutation::SetActive(true),
            BulkAction::Deactivate => Mutation::SetActive(false),
            BulkAction::Delete => Mutation::SoftDelete,
        };
        let affected = self.store.apply(&scope.live_only(), ids, mutation).await?;
        tracing::info!(kind = schema.kind, ?action, affected, "bulk action applied");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::dto::list_dto::ListParams;
    use crate::models::context::RequestContext;
    use crate::models::job_position::{JobPosition, JobStatus, JOB_POSITION_SCHEMA};
    use crate::models::record::RecordMeta;

    fn position(title: &str) -> JobPosition {
        JobPosition {
            meta: RecordMeta::new(Uuid::nil()),
            title: title.to_string(),
            department: String::new(),
            description: String::new(),
            status: JobStatus::Open,
            vacancies: 1,
            is_active: true,
        }
    }

    fn setup() -> (ListService<JobPosition>, TenantScope) {
        let store: Arc<dyn RecordStore<JobPosition>> = Arc::new(MemoryStore::new());
        let scope =
            TenantScope::for_context(&RequestContext::new("u", Some(Uuid::new_v4()))).unwrap();
        (ListService::new(store), scope)
    }

    #[tokio::test]
    async fn soft_delete_is_idempotent() {
        let (service, scope) = setup();
        let row = service.store().insert(&scope, position("Ops")).await.unwrap();

        service.soft_delete(&scope, row.id()).await.unwrap();
        let first = service
            .store()
            .find(&scope.including_deleted(), row.id())
            .await
            .unwrap()
            .unwrap();
        service.soft_delete(&scope, row.id()).await.unwrap();
        let second = service
            .store()
            .find(&scope.including_deleted(), row.id())
            .await
            .unwrap()
            .unwrap();

        assert!(first.meta.is_deleted);
        assert_eq!(first.meta.deleted_at, second.meta.deleted_at);
        assert!(matches!(
            service.soft_delete(&scope, Uuid::new_v4()).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn unknown_bulk_action_changes_nothing() {
        let (service, scope) = setup();
        let row = service.store().insert(&scope, position("Ops")).await.unwrap();

        let affected = service.bulk_action(&scope, &[row.id()], "archive").await.unwrap();
        assert_eq!(affected, 0);
        assert!(service.get(&scope, row.id()).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn deleted_rows_need_include_deleted() {
        let (service, scope) = setup();
        let kept = service.store().insert(&scope, position("Kept")).await.unwrap();
        let gone = service.store().insert(&scope, position("Gone")).await.unwrap();
        service.bulk_action(&scope, &[gone.id()], "delete").await.unwrap();

        let live = ListQuery::from_params(&JOB_POSITION_SCHEMA, &ListParams::default());
        let page = service.list(&scope, &live).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id(), kept.id());

        let all = ListQuery::from_params(
            &JOB_POSITION_SCHEMA,
            &ListParams {
                include_deleted: Some("true".into()),
                ..Default::default()
            },
        );
        assert_eq!(service.list(&scope, &all).await.unwrap().total, 2);
    }
}
