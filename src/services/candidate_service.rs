use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::store::RecordStore;
use crate::dto::candidate_dto::CandidatePayload;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStage};
use crate::models::job_position::JobPosition;
use crate::models::record::RecordMeta;
use crate::services::list_service::ListService;
use crate::services::tenant_scope::TenantScope;
use crate::utils::validation::{clean_email, clean_text, invalid_field, parse_uuid};

#[derive(Clone)]
pub struct CandidateService {
    records: ListService<Candidate>,
    positions: ListService<JobPosition>,
}

fn parse_stage(raw: Option<&str>) -> Result<Option<CandidateStage>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            invalid_field("stage", "invalid_choice", format!("'{}' is not a valid stage", value))
        }),
    }
}

impl CandidateService {
    pub fn new(
        store: Arc<dyn RecordStore<Candidate>>,
        positions: Arc<dyn RecordStore<JobPosition>>,
    ) -> Self {
        Self {
            records: ListService::new(store),
            positions: ListService::new(positions),
        }
    }

    pub fn records(&self) -> &ListService<Candidate> {
        &self.records
    }

    /// The referenced position must be live and belong to the caller's tenant.
    async fn resolve_position(&self, scope: &TenantScope, raw: &str) -> Result<JobPosition> {
        let id = parse_uuid("position", raw)?;
        match self.positions.get(scope, id).await {
            Ok(position) => Ok(position),
            Err(Error::NotFound(_)) => {
                tracing::debug!(%id, "candidate references unavailable position");
                Err(invalid_field(
                    "position",
                    "invalid_choice",
                    "Select a valid choice. That choice is not one of the available choices.",
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Validates a create form into an unsaved candidate, resolving its position.
    pub async fn build_new(&self, scope: &TenantScope, payload: CandidatePayload) -> Result<Candidate> {
        payload.validate()?;
        let name = clean_text(payload.name).unwrap_or_default();
        if name.is_empty() {
            return Err(invalid_field("name", "required", "This field is required."));
        }
        let raw_position = clean_text(payload.position).unwrap_or_default();
        if raw_position.is_empty() {
            return Err(invalid_field("position", "required", "This field is required."));
        }
        let position = self.resolve_position(scope, &raw_position).await?;
        let email = clean_email(payload.email)?.unwrap_or_default();
        let stage = parse_stage(payload.stage.as_deref())?.unwrap_or_default();

        Ok(Candidate {
            meta: RecordMeta::new(scope.tenant_id()),
            position_id: position.meta.id,
            name,
            email,
            phone: clean_text(payload.phone).unwrap_or_default(),
            stage,
            resume_notes: payload.resume_notes.unwrap_or_default(),
            rating: payload.rating.unwrap_or(0),
            position_title: Some(position.title),
        })
    }

    pub async fn create(&self, scope: &TenantScope, payload: CandidatePayload) -> Result<Candidate> {
        let candidate = self.build_new(scope, payload).await?;
        let created = self.records.store().insert(scope, candidate).await?;
        tracing::info!(id = %created.meta.id, position = %created.position_id, "candidate created");
        Ok(created)
    }

    pub async fn update(
        &self,
        scope: &TenantScope,
        id: Uuid,
        payload: CandidatePayload,
    ) -> Result<Candidate> {
        payload.validate()?;
        let mut candidate = self.records.get(scope, id).await?;

        if let Some(name) = clean_text(payload.name) {
            if name.is_empty() {
                return Err(invalid_field("name", "required", "This field is required."));
            }
            candidate.name = name;
        }
        if let Some(raw_position) = clean_text(payload.position) {
            if raw_position.is_empty() {
                return Err(invalid_field("position", "required", "This field is required."));
            }
            let position = self.resolve_position(scope, &raw_position).await?;
            candidate.position_id = position.meta.id;
            candidate.position_title = Some(position.title);
        }
        if let Some(email) = clean_email(payload.email)? {
            candidate.email = email;
        }
        if let Some(phone) = clean_text(payload.phone) {
            candidate.phone = phone;
        }
        if let Some(stage) = parse_stage(payload.stage.as_deref())? {
            candidate.stage = stage;
        }
        if let Some(notes) = payload.resume_notes {
            candidate.resume_notes = notes;
        }
        if let Some(rating) = payload.rating {
            candidate.rating = rating;
        }

        self.records
            .store()
            .replace(scope, &candidate)
            .await?
            .ok_or_else(|| Error::NotFound(format!("candidate {} not found", id)))
    }
}
