use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::store::{Mutation, RecordStore};
use crate::error::Result;
use crate::models::record::{FieldValue, Record};
use crate::services::list_query::{Criteria, Filter, SortOrder, Window};
use crate::services::tenant_scope::{TenantScope, Visibility};
use crate::utils::time::now;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_value(qb: &mut QueryBuilder<'static, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Null => {
            qb.push("NULL");
        }
        FieldValue::Text(v) => {
            qb.push_bind(v.clone());
        }
        FieldValue::Int(v) => {
            qb.push_bind(*v);
        }
        FieldValue::Bool(v) => {
            qb.push_bind(*v);
        }
        FieldValue::Uuid(v) => {
            qb.push_bind(*v);
        }
        FieldValue::Timestamp(v) => {
            qb.push_bind(*v);
        }
    }
}

/// ILIKE pattern for a literal substring.
pub fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_scope(qb: &mut QueryBuilder<'static, Postgres>, scope: &TenantScope) {
    qb.push(" WHERE t.tenant_id = ");
    qb.push_bind(scope.tenant_id());
    if scope.visibility() == Visibility::Live {
        qb.push(" AND t.is_deleted = FALSE");
    }
}

fn push_criteria(qb: &mut QueryBuilder<'static, Postgres>, criteria: &Criteria) {
    for filter in &criteria.filters {
        match filter {
            Filter::Equals { field, value } => {
                qb.push(" AND ").push(field.column).push(" = ");
                push_value(qb, value);
            }
            Filter::Contains { field, needle } => {
                qb.push(" AND ").push(field.column).push(" ILIKE ");
                qb.push_bind(like_pattern(needle));
            }
            Filter::IdIn(ids) => {
                qb.push(" AND t.id = ANY(");
                qb.push_bind(ids.clone());
                qb.push(")");
            }
        }
    }

    if let Some(search) = &criteria.search {
        let pattern = like_pattern(&search.needle);
        qb.push(" AND (");
        for (i, field) in search.fields.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(field.column).push(" ILIKE ");
            qb.push_bind(pattern.clone());
        }
        qb.push(")");
    }
}

pub fn select_query<E: Record>(
    scope: &TenantScope,
    criteria: &Criteria,
    order: &SortOrder,
    window: Option<Window>,
) -> QueryBuilder<'static, Postgres> {
    let schema = E::schema();
    let mut qb = QueryBuilder::new(format!(
        "SELECT {} FROM {}",
        schema.projection, schema.from_clause
    ));
    push_scope(&mut qb, scope);
    push_criteria(&mut qb, criteria);
    qb.push(format!(
        " ORDER BY {} {}, t.created_at ASC, t.id ASC",
        order.field.column,
        order.dir.as_sql()
    ));
    if let Some(w) = window {
        qb.push(" LIMIT ");
        qb.push_bind(w.limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(w.offset as i64);
    }
    qb
}

pub fn count_query<E: Record>(
    scope: &TenantScope,
    criteria: &Criteria,
) -> QueryBuilder<'static, Postgres> {
    let schema = E::schema();
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", schema.from_clause));
    push_scope(&mut qb, scope);
    push_criteria(&mut qb, criteria);
    qb
}

fn push_live_row(qb: &mut QueryBuilder<'static, Postgres>, scope: &TenantScope) {
    qb.push(" WHERE tenant_id = ");
    qb.push_bind(scope.tenant_id());
    qb.push(" AND is_deleted = FALSE");
}

pub fn insert_query<E: Record>(scope: &TenantScope, record: &E) -> QueryBuilder<'static, Postgres> {
    let schema = E::schema();
    let meta = record.meta();
    let columns = record.column_values();

    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let mut qb = QueryBuilder::new(format!(
        "INSERT INTO {} (id, tenant_id, is_deleted, deleted_at, created_at, updated_at, {}) VALUES (",
        schema.table,
        names.join(", ")
    ));
    qb.push_bind(meta.id);
    qb.push(", ");
    qb.push_bind(scope.tenant_id());
    qb.push(", ");
    qb.push_bind(meta.is_deleted);
    qb.push(", ");
    qb.push_bind(meta.deleted_at);
    qb.push(", ");
    qb.push_bind(meta.created_at);
    qb.push(", ");
    qb.push_bind(meta.updated_at);
    for (_, value) in &columns {
        qb.push(", ");
        push_value(&mut qb, value);
    }
    qb.push(")");
    qb
}

pub fn update_query<E: Record>(scope: &TenantScope, record: &E) -> QueryBuilder<'static, Postgres> {
    let schema = E::schema();
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", schema.table));
    for (name, value) in record.column_values() {
        qb.push(name).push(" = ");
        push_value(&mut qb, &value);
        qb.push(", ");
    }
    qb.push("updated_at = ");
    qb.push_bind(now());
    push_live_row(&mut qb, scope);
    qb.push(" AND id = ");
    qb.push_bind(record.id());
    qb
}

pub fn mutation_query<E: Record>(
    scope: &TenantScope,
    ids: &[Uuid],
    mutation: Mutation,
) -> QueryBuilder<'static, Postgres> {
    let schema = E::schema();
    let at = now();
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", schema.table));
    match mutation {
        Mutation::SetActive(active) => {
            qb.push("is_active = ");
            qb.push_bind(active);
        }
        Mutation::SoftDelete => {
            qb.push("is_deleted = TRUE, deleted_at = ");
            qb.push_bind(at);
        }
    }
    qb.push(", updated_at = ");
    qb.push_bind(at);
    push_live_row(&mut qb, scope);
    qb.push(" AND id = ANY(");
    qb.push_bind(ids.to_vec());
    qb.push(")");
    qb
}

impl PgStore {
    async fn fetch_one_by_id<E>(&self, scope: &TenantScope, id: Uuid) -> Result<Option<E>>
    where
        E: Record + for<'r> FromRow<'r, PgRow> + Unpin,
    {
        let criteria = Criteria::new().ids(vec![id]);
        let order = SortOrder::default_for(E::schema());
        let mut qb = select_query::<E>(scope, &criteria, &order, None);
        let row = qb.build_query_as::<E>().fetch_optional(&self.pool).await?;
        Ok(row)
    }
}

#[async_trait]
impl<E> RecordStore<E> for PgStore
where
    E: Record + for<'r> FromRow<'r, PgRow> + Unpin,
{
    async fn insert(&self, scope: &TenantScope, record: E) -> Result<E> {
        insert_query::<E>(scope, &record)
            .build()
            .execute(&self.pool)
            .await?;
        let stored = self.fetch_one_by_id::<E>(scope, record.id()).await?;
        stored.ok_or(sqlx::Error::RowNotFound).map_err(Into::into)
    }

    async fn find(&self, scope: &TenantScope, id: Uuid) -> Result<Option<E>> {
        self.fetch_one_by_id::<E>(scope, id).await
    }

    async fn replace(&self, scope: &TenantScope, record: &E) -> Result<Option<E>> {
        let res = update_query::<E>(scope, record)
            .build()
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_one_by_id::<E>(scope, record.id()).await
    }

    async fn apply(&self, scope: &TenantScope, ids: &[Uuid], mutation: Mutation) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let res = mutation_query::<E>(scope, ids, mutation)
            .build()
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn count(&self, scope: &TenantScope, criteria: &Criteria) -> Result<u64> {
        let total: i64 = count_query::<E>(scope, criteria)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }

    async fn select(
        &self,
        scope: &TenantScope,
        criteria: &Criteria,
        order: &SortOrder,
        window: Option<Window>,
    ) -> Result<Vec<E>> {
        let rows = select_query::<E>(scope, criteria, order, window)
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::Candidate;
    use crate::models::context::RequestContext;
    use crate::models::job_position::{JobPosition, JOB_POSITION_SCHEMA};
    use crate::services::list_query::SortDir;

    fn scope() -> TenantScope {
        TenantScope::for_context(&RequestContext::new("tester", Some(Uuid::new_v4()))).unwrap()
    }

    #[test]
    fn select_is_tenant_and_liveness_scoped() {
        let criteria = Criteria::new().with_search(&JOB_POSITION_SCHEMA, Some("eng"));
        let order = SortOrder {
            field: JOB_POSITION_SCHEMA.sort_field("vacancies"),
            dir: SortDir::Desc,
        };
        let qb = select_query::<JobPosition>(
            &scope(),
            &criteria,
            &order,
            Some(Window { offset: 10, limit: 10 }),
        );
        assert_eq!(
            qb.sql(),
            "SELECT t.* FROM recruitment_jobposition t WHERE t.tenant_id = $1 \
             AND t.is_deleted = FALSE AND (t.title ILIKE $2 OR t.status ILIKE $3 \
             OR t.department ILIKE $4 OR t.description ILIKE $5) \
             ORDER BY t.vacancies DESC, t.created_at ASC, t.id ASC LIMIT $6 OFFSET $7"
        );
    }

    #[test]
    fn include_deleted_drops_liveness_filter_only() {
        let qb = count_query::<Candidate>(&scope().including_deleted(), &Criteria::new());
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM recruitment_candidate t LEFT JOIN recruitment_jobposition p \
             ON p.id = t.position_id WHERE t.tenant_id = $1"
        );
    }

    #[test]
    fn bulk_soft_delete_targets_live_rows() {
        let qb = mutation_query::<JobPosition>(&scope(), &[Uuid::new_v4()], Mutation::SoftDelete);
        assert_eq!(
            qb.sql(),
            "UPDATE recruitment_jobposition SET is_deleted = TRUE, deleted_at = $1, \
             updated_at = $2 WHERE tenant_id = $3 AND is_deleted = FALSE AND id = ANY($4)"
        );
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
