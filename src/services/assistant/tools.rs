use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::dto::candidate_dto::CandidatePayload;
use crate::dto::job_position_dto::JobPositionPayload;
use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateStage, CANDIDATE_SCHEMA};
use crate::models::context::permissions;
use crate::models::job_position::{JobPosition, JobStatus, JOB_POSITION_SCHEMA};
use crate::models::record::{FieldValue, Record};
use crate::services::candidate_service::CandidateService;
use crate::services::job_position_service::JobPositionService;
use crate::services::list_query::{Criteria, SortOrder};
use crate::services::tenant_scope::TenantScope;
use crate::utils::validation::{invalid_field, lenient_count, parse_uuid};

use super::{ToolDescriptor, ToolKind};

pub const MODULE_ID: &str = "recruitment";
pub const MAX_POSITIONS: u64 = 100;
pub const DEFAULT_CANDIDATE_LIMIT: i64 = 20;
pub const MAX_CANDIDATE_LIMIT: i64 = 100;

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "list_job_positions",
            description: "List job positions/openings.",
            module_id: MODULE_ID,
            required_permission: permissions::VIEW_JOB_POSITION,
            requires_confirmation: false,
            parameters: json!({
                "type": "object",
                "properties": {
                    "status": {"type": "string", "description": "draft, open, closed, on_hold"},
                    "department": {"type": "string"}
                },
                "required": [],
                "additionalProperties": false
            }),
            kind: ToolKind::ListJobPositions,
        },
        ToolDescriptor {
            name: "create_job_position",
            description: "Create a job position/opening.",
            module_id: MODULE_ID,
            required_permission: permissions::ADD_JOB_POSITION,
            requires_confirmation: true,
            parameters: json!({
                "type": "object",
                "properties": {
                    "title": {"type": "string"},
                    "department": {"type": "string"},
                    "description": {"type": "string"},
                    "vacancies": {"type": "integer"}
                },
                "required": ["title"],
                "additionalProperties": false
            }),
            kind: ToolKind::CreateJobPosition,
        },
        ToolDescriptor {
            name: "list_candidates",
            description: "List job candidates.",
            module_id: MODULE_ID,
            required_permission: permissions::VIEW_CANDIDATE,
            requires_confirmation: false,
            parameters: json!({
                "type": "object",
                "properties": {
                    "position_id": {"type": "string"},
                    "stage": {
                        "type": "string",
                        "description": "applied, screening, interview, offer, hired, rejected"
                    },
                    "limit": {"type": "integer"}
                },
                "required": [],
                "additionalProperties": false
            }),
            kind: ToolKind::ListCandidates,
        },
        ToolDescriptor {
            name: "create_candidate",
            description: "Add a candidate to a job position.",
            module_id: MODULE_ID,
            required_permission: permissions::ADD_CANDIDATE,
            requires_confirmation: true,
            parameters: json!({
                "type": "object",
                "properties": {
                    "position_id": {"type": "string"},
                    "name": {"type": "string"},
                    "email": {"type": "string"},
                    "phone": {"type": "string"},
                    "resume_notes": {"type": "string"}
                },
                "required": ["position_id", "name"],
                "additionalProperties": false
            }),
            kind: ToolKind::CreateCandidate,
        },
    ]
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListJobPositionsArgs {
    pub status: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateJobPositionArgs {
    pub title: String,
    pub department: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub vacancies: Option<i64>,
}

impl From<CreateJobPositionArgs> for JobPositionPayload {
    fn from(args: CreateJobPositionArgs) -> Self {
        JobPositionPayload {
            title: Some(args.title),
            department: args.department,
            description: args.description,
            vacancies: args.vacancies,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListCandidatesArgs {
    pub position_id: Option<String>,
    pub stage: Option<String>,
    pub limit: Option<i64>,
}

impl ListCandidatesArgs {
    pub fn effective_limit(&self) -> u64 {
        match self.limit {
            Some(n) if n > 0 => n.min(MAX_CANDIDATE_LIMIT) as u64,
            _ => DEFAULT_CANDIDATE_LIMIT as u64,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCandidateArgs {
    pub position_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_notes: Option<String>,
}

impl From<CreateCandidateArgs> for CandidatePayload {
    fn from(args: CreateCandidateArgs) -> Self {
        CandidatePayload {
            position: Some(args.position_id),
            name: Some(args.name),
            email: args.email,
            phone: args.phone,
            resume_notes: args.resume_notes,
            ..Default::default()
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn position_summary(p: &JobPosition) -> JsonValue {
    json!({
        "id": p.meta.id,
        "title": p.title,
        "department": p.department,
        "status": p.status,
        "vacancies": p.vacancies,
        "is_active": p.is_active,
    })
}

fn candidate_summary(c: &Candidate) -> JsonValue {
    json!({
        "id": c.meta.id,
        "name": c.name,
        "email": c.email,
        "position": c.position_title,
        "stage": c.stage,
        "rating": c.rating,
    })
}

pub async fn list_job_positions(
    service: &JobPositionService,
    scope: &TenantScope,
    args: ListJobPositionsArgs,
) -> Result<JsonValue> {
    let mut criteria = Criteria::new();
    if let Some(raw) = non_blank(args.status.as_deref()) {
        let status: JobStatus = raw.parse().map_err(|_| {
            invalid_field("status", "invalid_choice", format!("'{}' is not a valid status", raw))
        })?;
        if let Some(field) = JOB_POSITION_SCHEMA.field("status") {
            criteria = criteria.equals(field, FieldValue::text(status.as_str()));
        }
    }
    if let Some(department) = non_blank(args.department.as_deref()) {
        if let Some(field) = JOB_POSITION_SCHEMA.field("department") {
            criteria = criteria.contains(field, department);
        }
    }

    let positions = service
        .records()
        .find_by(
            scope,
            &criteria,
            &SortOrder::default_for(&JOB_POSITION_SCHEMA),
            Some(MAX_POSITIONS),
        )
        .await?;
    let summaries: Vec<JsonValue> = positions.iter().map(position_summary).collect();
    Ok(json!({ "positions": summaries }))
}

pub async fn list_candidates(
    service: &CandidateService,
    scope: &TenantScope,
    args: ListCandidatesArgs,
) -> Result<JsonValue> {
    let mut criteria = Criteria::new();
    if let Some(raw) = non_blank(args.position_id.as_deref()) {
        let position_id = parse_uuid("position_id", raw)?;
        if let Some(field) = CANDIDATE_SCHEMA.field("position_id") {
            criteria = criteria.equals(field, FieldValue::Uuid(position_id));
        }
    }
    if let Some(raw) = non_blank(args.stage.as_deref()) {
        let stage: CandidateStage = raw.parse().map_err(|_| {
            invalid_field("stage", "invalid_choice", format!("'{}' is not a valid stage", raw))
        })?;
        if let Some(field) = CANDIDATE_SCHEMA.field("stage") {
            criteria = criteria.equals(field, FieldValue::text(stage.as_str()));
        }
    }

    let candidates = service
        .records()
        .find_by(
            scope,
            &criteria,
            &SortOrder::default_for(&CANDIDATE_SCHEMA),
            Some(args.effective_limit()),
        )
        .await?;
    let summaries: Vec<JsonValue> = candidates.iter().map(candidate_summary).collect();
    Ok(json!({ "candidates": summaries }))
}

pub fn job_position_created(p: &JobPosition) -> JsonValue {
    json!({ "id": p.id(), "title": p.title, "created": true })
}

pub fn candidate_created(c: &Candidate) -> JsonValue {
    json!({ "id": c.id(), "name": c.name, "created": true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_limit_is_clamped() {
        let limit = |n| ListCandidatesArgs {
            limit: n,
            ..Default::default()
        };
        assert_eq!(limit(None).effective_limit(), 20);
        assert_eq!(limit(Some(0)).effective_limit(), 20);
        assert_eq!(limit(Some(-3)).effective_limit(), 20);
        assert_eq!(limit(Some(5)).effective_limit(), 5);
        assert_eq!(limit(Some(500)).effective_limit(), 100);
    }

    #[test]
    fn unknown_properties_are_rejected() {
        let parsed: std::result::Result<ListJobPositionsArgs, _> =
            serde_json::from_value(json!({ "status": "open", "salary": 10 }));
        assert!(parsed.is_err());
    }

    #[test]
    fn every_descriptor_forbids_extra_properties() {
        for tool in descriptors() {
            assert_eq!(tool.parameters["additionalProperties"], json!(false), "{}", tool.name);
            assert_eq!(tool.module_id, MODULE_ID);
        }
    }
}
