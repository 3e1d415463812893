use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{Mutation, RecordStore};
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::models::job_position::JobPosition;
use crate::models::record::Record;
use crate::services::list_query::{Criteria, Filter, SortDir, SortOrder, Window};
use crate::services::tenant_scope::TenantScope;
use crate::utils::time::now;

/// Process-local store used by tests and by `STORAGE_BACKEND=memory`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    positions: Table<JobPosition>,
    candidates: Table<Candidate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn position_titles(&self) -> HashMap<Uuid, String> {
        self.positions
            .rows
            .read()
            .await
            .values()
            .map(|p| (p.meta.id, p.title.clone()))
            .collect()
    }

    async fn hydrate(&self, mut rows: Vec<Candidate>) -> Vec<Candidate> {
        let titles = self.position_titles().await;
        for row in &mut rows {
            row.position_title = titles.get(&row.position_id).cloned();
        }
        rows
    }

    async fn hydrate_one(&self, mut row: Candidate) -> Candidate {
        row.position_title = self
            .positions
            .rows
            .read()
            .await
            .get(&row.position_id)
            .map(|p| p.title.clone());
        row
    }
}

#[derive(Debug)]
struct Table<E> {
    rows: RwLock<HashMap<Uuid, E>>,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<E: Record> Table<E> {
    async fn insert(&self, scope: &TenantScope, mut record: E) -> E {
        scope.stamp(record.meta_mut());
        self.rows.write().await.insert(record.id(), record.clone());
        record
    }

    async fn find(&self, scope: &TenantScope, id: Uuid) -> Option<E> {
        self.rows
            .read()
            .await
            .get(&id)
            .filter(|row| scope.admits(row.meta()))
            .cloned()
    }

    async fn replace(&self, scope: &TenantScope, record: &E) -> Option<E> {
        let mut rows = self.rows.write().await;
        let current = rows.get_mut(&record.id())?;
        if !scope.admits_write(current.meta()) {
            return None;
        }
        let mut next = record.clone();
        *next.meta_mut() = current.meta().clone();
        next.meta_mut().touch(now());
        *current = next.clone();
        Some(next)
    }

    async fn apply(&self, scope: &TenantScope, ids: &[Uuid], mutation: Mutation) -> u64 {
        let at = now();
        let mut rows = self.rows.write().await;
        let mut changed = 0;
        for id in ids {
            let Some(row) = rows.get_mut(id) else {
                continue;
            };
            if !scope.admits_write(row.meta()) {
                continue;
            }
            match mutation {
                Mutation::SoftDelete => row.meta_mut().mark_deleted(at),
                Mutation::SetActive(active) => {
                    if !row.set_active(active) {
                        continue;
                    }
                    row.meta_mut().touch(at);
                }
            }
            changed += 1;
        }
        changed
    }

    async fn visible(&self, scope: &TenantScope) -> Vec<E> {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| scope.admits(row.meta()))
            .cloned()
            .collect()
    }
}

fn matches<E: Record>(row: &E, criteria: &Criteria) -> bool {
    let filters_hold = criteria.filters.iter().all(|filter| match filter {
        Filter::Equals { field, value } => row.value(field.name) == *value,
        Filter::Contains { field, needle } => row
            .value(field.name)
            .contains_lowercase(&needle.to_lowercase()),
        Filter::IdIn(ids) => ids.contains(&row.id()),
    });
    if !filters_hold {
        return false;
    }
    match &criteria.search {
        Some(search) => {
            let needle = search.needle.to_lowercase();
            search
                .fields
                .iter()
                .any(|field| row.value(field.name).contains_lowercase(&needle))
        }
        None => true,
    }
}

fn run_query<E: Record>(
    rows: Vec<E>,
    criteria: &Criteria,
    order: &SortOrder,
    window: Option<Window>,
) -> Vec<E> {
    let mut rows: Vec<E> = rows.into_iter().filter(|r| matches(r, criteria)).collect();
    rows.sort_by(|a, b| {
        let primary = a.value(order.field.name).sort_cmp(&b.value(order.field.name));
        let primary = match order.dir {
            SortDir::Asc => primary,
            SortDir::Desc => primary.reverse(),
        };
        primary
            .then_with(|| a.meta().created_at.cmp(&b.meta().created_at))
            .then_with(|| a.id().cmp(&b.id()))
    });
    match window {
        Some(w) => rows
            .into_iter()
            .skip(w.offset as usize)
            .take(w.limit as usize)
            .collect(),
        None => rows,
    }
}

#[async_trait]
impl RecordStore<JobPosition> for MemoryStore {
    async fn insert(&self, scope: &TenantScope, record: JobPosition) -> Result<JobPosition> {
        Ok(self.positions.insert(scope, record).await)
    }

    async fn find(&self, scope: &TenantScope, id: Uuid) -> Result<Option<JobPosition>> {
        Ok(self.positions.find(scope, id).await)
    }

    async fn replace(
        &self,
        scope: &TenantScope,
        record: &JobPosition,
    ) -> Result<Option<JobPosition>> {
        Ok(self.positions.replace(scope, record).await)
    }

    async fn apply(&self, scope: &TenantScope, ids: &[Uuid], mutation: Mutation) -> Result<u64> {
        Ok(self.positions.apply(scope, ids, mutation).await)
    }

    async fn count(&self, scope: &TenantScope, criteria: &Criteria) -> Result<u64> {
        let rows = self.positions.visible(scope).await;
        Ok(rows.iter().filter(|r| matches(*r, criteria)).count() as u64)
    }

    async fn select(
        &self,
        scope: &TenantScope,
        criteria: &Criteria,
        order: &SortOrder,
        window: Option<Window>,
    ) -> Result<Vec<JobPosition>> {
        let rows = self.positions.visible(scope).await;
        Ok(run_query(rows, criteria, order, window))
    }
}

#[async_trait]
impl RecordStore<Candidate> for MemoryStore {
    async fn insert(&self, scope: &TenantScope, record: Candidate) -> Result<Candidate> {
        let row = self.candidates.insert(scope, record).await;
        Ok(self.hydrate_one(row).await)
    }

    async fn find(&self, scope: &TenantScope, id: Uuid) -> Result<Option<Candidate>> {
        match self.candidates.find(scope, id).await {
            Some(row) => Ok(Some(self.hydrate_one(row).await)),
            None => Ok(None),
        }
    }

    async fn replace(&self, scope: &TenantScope, record: &Candidate) -> Result<Option<Candidate>> {
        match self.candidates.replace(scope, record).await {
            Some(row) => Ok(Some(self.hydrate_one(row).await)),
            None => Ok(None),
        }
    }

    async fn apply(&self, scope: &TenantScope, ids: &[Uuid], mutation: Mutation) -> Result<u64> {
        Ok(self.candidates.apply(scope, ids, mutation).await)
    }

    async fn count(&self, scope: &TenantScope, criteria: &Criteria) -> Result<u64> {
        let rows = self.candidates.visible(scope).await;
        Ok(rows.iter().filter(|r| matches(*r, criteria)).count() as u64)
    }

    async fn select(
        &self,
        scope: &TenantScope,
        criteria: &Criteria,
        order: &SortOrder,
        window: Option<Window>,
    ) -> Result<Vec<Candidate>> {
        let rows = self.candidates.visible(scope).await;
        let rows = self.hydrate(rows).await;
        Ok(run_query(rows, criteria, order, window))
    }
}
