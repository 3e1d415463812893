use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::record::{
    BulkAction, EntitySchema, ExportColumn, FieldSpec, FieldValue, Record, RecordMeta,
    UnknownVariant,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    #[default]
    Open,
    Closed,
    OnHold,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Draft,
        JobStatus::Open,
        JobStatus::Closed,
        JobStatus::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
            JobStatus::OnHold => "on_hold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Draft => "Draft",
            JobStatus::Open => "Open",
            JobStatus::Closed => "Closed",
            JobStatus::OnHold => "On Hold",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|s| s.as_str() == raw)
            .ok_or_else(|| UnknownVariant {
                kind: "job status",
                value: raw.to_string(),
            })
    }
}

impl TryFrom<String> for JobStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosition {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub department: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: JobStatus,
    pub vacancies: i64,
    pub is_active: bool,
}

static JOB_POSITION_FIELDS: [FieldSpec; 8] = [
    FieldSpec::new("title", "t.title").searchable().sortable(),
    FieldSpec::new("status", "t.status").searchable().sortable(),
    FieldSpec::new("is_active", "t.is_active").sortable(),
    FieldSpec::new("vacancies", "t.vacancies").sortable(),
    FieldSpec::new("department", "t.department").searchable().sortable(),
    FieldSpec::new("description", "t.description").searchable().sortable(),
    FieldSpec::new("created_at", "t.created_at").sortable(),
    FieldSpec::new("id", "t.id"),
];

pub static JOB_POSITION_SCHEMA: EntitySchema = EntitySchema {
    kind: "job_position",
    label: "Job Positions",
    table: "recruitment_jobposition",
    from_clause: "recruitment_jobposition t",
    projection: "t.*",
    fields: &JOB_POSITION_FIELDS,
    default_sort: "title",
    bulk_actions: &[BulkAction::Activate, BulkAction::Deactivate, BulkAction::Delete],
    export_columns: &[
        ExportColumn { field: "title", header: "Title" },
        ExportColumn { field: "status", header: "Status" },
        ExportColumn { field: "is_active", header: "Is Active" },
        ExportColumn { field: "vacancies", header: "Vacancies" },
        ExportColumn { field: "department", header: "Department" },
        ExportColumn { field: "description", header: "Description" },
    ],
    export_basename: "job_positions",
};

impl Record for JobPosition {
    fn schema() -> &'static EntitySchema {
        &JOB_POSITION_SCHEMA
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "title" => FieldValue::text(&self.title),
            "department" => FieldValue::text(&self.department),
            "description" => FieldValue::text(&self.description),
            "status" => FieldValue::text(self.status.as_str()),
            "vacancies" => FieldValue::Int(self.vacancies),
            "is_active" => FieldValue::Bool(self.is_active),
            other => self.meta_value(other).unwrap_or(FieldValue::Null),
        }
    }

    fn set_active(&mut self, active: bool) -> bool {
        self.is_active = active;
        true
    }

    fn column_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("title", FieldValue::text(&self.title)),
            ("department", FieldValue::text(&self.department)),
            ("description", FieldValue::text(&self.description)),
            ("status", FieldValue::text(self.status.as_str())),
            ("vacancies", FieldValue::Int(self.vacancies)),
            ("is_active", FieldValue::Bool(self.is_active)),
        ]
    }
}
