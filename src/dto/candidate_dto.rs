use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::candidate::{Candidate, CandidateStage};
use crate::utils::validation::lenient_count;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CandidatePayload {
    /// Id of the job position applied for.
    pub position: Option<String>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub stage: Option<String>,
    pub resume_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub rating: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResponse {
    pub id: Uuid,
    pub position_id: Uuid,
    pub position: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub stage: CandidateStage,
    pub stage_label: String,
    pub resume_notes: String,
    pub rating: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Candidate> for CandidateResponse {
    fn from(c: Candidate) -> Self {
        Self {
            id: c.meta.id,
            position_id: c.position_id,
            position: c.position_title,
            name: c.name,
            email: c.email,
            phone: c.phone,
            stage: c.stage,
            stage_label: c.stage.label().to_string(),
            resume_notes: c.resume_notes,
            rating: c.rating,
            is_deleted: c.meta.is_deleted,
            created_at: c.meta.created_at,
            updated_at: c.meta.updated_at,
        }
    }
}
