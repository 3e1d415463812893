use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::store::RecordStore;
use crate::dto::job_position_dto::JobPositionPayload;
use crate::error::{Error, Result};
use crate::models::job_position::{JobPosition, JobStatus};
use crate::models::record::RecordMeta;
use crate::services::list_service::ListService;
use crate::services::tenant_scope::TenantScope;
use crate::utils::validation::{clean_text, invalid_field};

const DEFAULT_VACANCIES: i64 = 1;

#[derive(Clone)]
pub struct JobPositionService {
    records: ListService<JobPosition>,
}

fn parse_status(raw: Option<&str>) -> Result<Option<JobStatus>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            invalid_field("status", "invalid_choice", format!("'{}' is not a valid status", value))
        }),
    }
}

impl JobPositionService {
    pub fn new(store: Arc<dyn RecordStore<JobPosition>>) -> Self {
        Self {
            records: ListService::new(store),
        }
    }

    pub fn records(&self) -> &ListService<JobPosition> {
        &self.records
    }

    /// Validates a create form into an unsaved position.
    pub fn build_new(&self, scope: &TenantScope, payload: JobPositionPayload) -> Result<JobPosition> {
        payload.validate()?;
        let title = clean_text(payload.title).unwrap_or_default();
        if title.is_empty() {
            return Err(invalid_field("title", "required", "This field is required."));
        }
        let status = parse_status(payload.status.as_deref())?.unwrap_or_default();

        Ok(JobPosition {
            meta: RecordMeta::new(scope.tenant_id()),
            title,
            department: clean_text(payload.department).unwrap_or_default(),
            description: payload.description.unwrap_or_default(),
            status,
            vacancies: payload.vacancies.unwrap_or(DEFAULT_VACANCIES),
            is_active: payload.is_active.unwrap_or(true),
        })
    }

    pub async fn create(&self, scope: &TenantScope, payload: JobPositionPayload) -> Result<JobPosition> {
        let position = self.build_new(scope, payload)?;
        let created = self.records.store().insert(scope, position).await?;
        tracing::info!(id = %created.meta.id, tenant = %scope.tenant_id(), "job position created");
        Ok(created)
    }

    pub async fn update(
        &self,
        scope: &TenantScope,
        id: Uuid,
        payload: JobPositionPayload,
    ) -> Result<JobPosition> {
        payload.validate()?;
        let mut position = self.records.get(scope, id).await?;

        if let Some(title) = clean_text(payload.title) {
            if title.is_empty() {
                return Err(invalid_field("title", "required", "This field is required."));
            }
            position.title = title;
        }
        if let Some(department) = clean_text(payload.department) {
            position.department = department;
        }
        if let Some(description) = payload.description {
            position.description = description;
        }
        if let Some(status) = parse_status(payload.status.as_deref())? {
            position.status = status;
        }
        if let Some(vacancies) = payload.vacancies {
            position.vacancies = vacancies;
        }
        if let Some(is_active) = payload.is_active {
            position.is_active = is_active;
        }

        self.records
            .store()
            .replace(scope, &position)
            .await?
            .ok_or_else(|| Error::NotFound(format!("job_position {} not found", id)))
    }

    pub async fn toggle_active(&self, scope: &TenantScope, id: Uuid) -> Result<JobPosition> {
        let mut position = self.records.get(scope, id).await?;
        position.is_active = !position.is_active;
        let updated = self
            .records
            .store()
            .replace(scope, &position)
            .await?
            .ok_or_else(|| Error::NotFound(format!("job_position {} not found", id)))?;
        tracing::info!(%id, is_active = updated.is_active, "job position toggled");
        Ok(updated)
    }
}
