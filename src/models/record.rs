use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::time::now;

/// Bookkeeping columns shared by every tenant-owned recruitment row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecordMeta {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    pub fn new(tenant_id: Uuid) -> Self {
        let ts = now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            is_deleted: false,
            deleted_at: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    pub fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
        self.updated_at = at;
    }
}

/// A single column value, used for filtering, ordering, SQL binding and export.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Int(i64),
    Bool(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Case-insensitive substring test; `needle` must already be lowercased.
    /// Only text values take part in search, mirroring ILIKE on text columns.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(value) => value.to_lowercase().contains(needle),
            _ => false,
        }
    }

    /// Ascending order with NULLs last, as Postgres sorts them. Text compares
    /// case-insensitively first so casing does not split the list.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Greater,
            (_, FieldValue::Null) => Ordering::Less,
            (FieldValue::Text(a), FieldValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Int(_) => 1,
            FieldValue::Text(_) => 2,
            FieldValue::Uuid(_) => 3,
            FieldValue::Timestamp(_) => 4,
            FieldValue::Null => 5,
        }
    }

    pub fn to_export_string(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Text(value) => value.clone(),
            FieldValue::Int(value) => value.to_string(),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Uuid(value) => value.to_string(),
            FieldValue::Timestamp(value) => value.to_rfc3339(),
        }
    }
}

/// Error raised when a stored or submitted enum value is not recognised.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Set operations that may be applied to many rows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Activate,
    Deactivate,
    Delete,
}

impl BulkAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "activate" => Some(BulkAction::Activate),
            "deactivate" => Some(BulkAction::Deactivate),
            "delete" => Some(BulkAction::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// SQL expression, qualified with the `t` alias of the entity table.
    pub column: &'static str,
    pub searchable: bool,
    pub sortable: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            searchable: false,
            sortable: false,
        }
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportColumn {
    pub field: &'static str,
    pub header: &'static str,
}

/// Declarative description of an entity consumed by the list engine,
/// the stores and the exporter.
#[derive(Debug)]
pub struct EntitySchema {
    pub kind: &'static str,
    pub label: &'static str,
    pub table: &'static str,
    /// FROM clause; the entity table is always aliased `t`.
    pub from_clause: &'static str,
    pub projection: &'static str,
    pub fields: &'static [FieldSpec],
    pub default_sort: &'static str,
    pub bulk_actions: &'static [BulkAction],
    pub export_columns: &'static [ExportColumn],
    pub export_basename: &'static str,
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolves a requested sort key, falling back to the entity default.
    pub fn sort_field(&self, requested: &str) -> &'static FieldSpec {
        self.fields
            .iter()
            .find(|f| f.sortable && f.name == requested)
            .or_else(|| self.fields.iter().find(|f| f.name == self.default_sort))
            .unwrap_or(&self.fields[0])
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.searchable)
    }

    pub fn allows(&self, action: BulkAction) -> bool {
        self.bulk_actions.contains(&action)
    }
}

/// A tenant-owned, soft-deletable row described by an [`EntitySchema`].
pub trait Record: Clone + Send + Sync + 'static {
    fn schema() -> &'static EntitySchema;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Value of a schema field (or a bookkeeping column) by name.
    fn value(&self, field: &str) -> FieldValue;

    /// Writable columns in storage order, excluding bookkeeping columns.
    fn column_values(&self) -> Vec<(&'static str, FieldValue)>;

    /// Flips the active flag where the entity has one; `false` otherwise.
    fn set_active(&mut self, _active: bool) -> bool {
        false
    }

    fn id(&self) -> Uuid {
        self.meta().id
    }

    fn meta_value(&self, field: &str) -> Option<FieldValue> {
        let meta = self.meta();
        let value = match field {
            "id" => FieldValue::Uuid(meta.id),
            "tenant_id" => FieldValue::Uuid(meta.tenant_id),
            "is_deleted" => FieldValue::Bool(meta.is_deleted),
            "deleted_at" => meta
                .deleted_at
                .map(FieldValue::Timestamp)
                .unwrap_or(FieldValue::Null),
            "created_at" => FieldValue::Timestamp(meta.created_at),
            "updated_at" => FieldValue::Timestamp(meta.updated_at),
            _ => return None,
        };
        Some(value)
    }
}
