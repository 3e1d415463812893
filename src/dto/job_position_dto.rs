use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job_position::{JobPosition, JobStatus};
use crate::utils::validation::{lenient_count, lenient_flag};

/// Create and edit form for a job position. On update only the supplied
/// fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct JobPositionPayload {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 100))]
    pub department: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub vacancies: Option<i64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPositionResponse {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub description: String,
    pub status: JobStatus,
    pub status_label: String,
    pub vacancies: i64,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobPosition> for JobPositionResponse {
    fn from(p: JobPosition) -> Self {
        Self {
            id: p.meta.id,
            status_label: p.status.label().to_string(),
            title: p.title,
            department: p.department,
            description: p.description,
            status: p.status,
            vacancies: p.vacancies,
            is_active: p.is_active,
            is_deleted: p.meta.is_deleted,
            created_at: p.meta.created_at,
            updated_at: p.meta.updated_at,
        }
    }
}
