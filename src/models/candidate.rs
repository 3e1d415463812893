use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::record::{
    BulkAction, EntitySchema, ExportColumn, FieldSpec, FieldValue, Record, RecordMeta,
    UnknownVariant,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStage {
    #[default]
    Applied,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl CandidateStage {
    pub const ALL: [CandidateStage; 6] = [
        CandidateStage::Applied,
        CandidateStage::Screening,
        CandidateStage::Interview,
        CandidateStage::Offer,
        CandidateStage::Hired,
        CandidateStage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStage::Applied => "applied",
            CandidateStage::Screening => "screening",
            CandidateStage::Interview => "interview",
            CandidateStage::Offer => "offer",
            CandidateStage::Hired => "hired",
            CandidateStage::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CandidateStage::Applied => "Applied",
            CandidateStage::Screening => "Screening",
            CandidateStage::Interview => "Interview",
            CandidateStage::Offer => "Offer",
            CandidateStage::Hired => "Hired",
            CandidateStage::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for CandidateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateStage {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        CandidateStage::ALL
            .into_iter()
            .find(|s| s.as_str() == raw)
            .ok_or_else(|| UnknownVariant {
                kind: "candidate stage",
                value: raw.to_string(),
            })
    }
}

impl TryFrom<String> for CandidateStage {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub position_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[sqlx(try_from = "String")]
    pub stage: CandidateStage,
    pub resume_notes: String,
    pub rating: i64,
    /// Title of the referenced position, joined in on read.
    #[sqlx(default)]
    pub position_title: Option<String>,
}

static CANDIDATE_FIELDS: [FieldSpec; 9] = [
    FieldSpec::new("name", "t.name").searchable().sortable(),
    FieldSpec::new("position", "p.title").sortable(),
    FieldSpec::new("stage", "t.stage").searchable().sortable(),
    FieldSpec::new("rating", "t.rating").sortable(),
    FieldSpec::new("email", "t.email").searchable().sortable(),
    FieldSpec::new("phone", "t.phone").searchable().sortable(),
    FieldSpec::new("created_at", "t.created_at").sortable(),
    FieldSpec::new("position_id", "t.position_id"),
    FieldSpec::new("id", "t.id"),
];

pub static CANDIDATE_SCHEMA: EntitySchema = EntitySchema {
    kind: "candidate",
    label: "Candidates",
    table: "recruitment_candidate",
    from_clause: "recruitment_candidate t LEFT JOIN recruitment_jobposition p ON p.id = t.position_id",
    projection: "t.*, p.title AS position_title",
    fields: &CANDIDATE_FIELDS,
    default_sort: "name",
    bulk_actions: &[BulkAction::Delete],
    export_columns: &[
        ExportColumn { field: "name", header: "Name" },
        ExportColumn { field: "position", header: "JobPosition" },
        ExportColumn { field: "stage", header: "Stage" },
        ExportColumn { field: "rating", header: "Rating" },
        ExportColumn { field: "email", header: "Email" },
        ExportColumn { field: "phone", header: "Phone" },
    ],
    export_basename: "candidates",
};

impl Record for Candidate {
    fn schema() -> &'static EntitySchema {
        &CANDIDATE_SCHEMA
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "name" => FieldValue::text(&self.name),
            "position" => self
                .position_title
                .as_deref()
                .map(FieldValue::text)
                .unwrap_or(FieldValue::Null),
            "position_id" => FieldValue::Uuid(self.position_id),
            "email" => FieldValue::text(&self.email),
            "phone" => FieldValue::text(&self.phone),
            "stage" => FieldValue::text(self.stage.as_str()),
            "resume_notes" => FieldValue::text(&self.resume_notes),
            "rating" => FieldValue::Int(self.rating),
            other => self.meta_value(other).unwrap_or(FieldValue::Null),
        }
    }

    fn column_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("position_id", FieldValue::Uuid(self.position_id)),
            ("name", FieldValue::text(&self.name)),
            ("email", FieldValue::text(&self.email)),
            ("phone", FieldValue::text(&self.phone)),
            ("stage", FieldValue::text(self.stage.as_str())),
            ("resume_notes", FieldValue::text(&self.resume_notes)),
            ("rating", FieldValue::Int(self.rating)),
        ]
    }
}
