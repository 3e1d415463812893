pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::store::RecordStore;
use crate::models::{candidate::Candidate, job_position::JobPosition};
use crate::services::{
    assistant::AssistantService, candidate_service::CandidateService,
    job_position_service::JobPositionService,
};

#[derive(Clone)]
pub struct AppState {
    pub job_position_service: JobPositionService,
    pub candidate_service: CandidateService,
    pub assistant_service: AssistantService,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    /// Wires every service onto one backing store.
    pub fn new<S>(store: Arc<S>, jwt_secret: &str) -> Self
    where
        S: RecordStore<JobPosition> + RecordStore<Candidate> + 'static,
    {
        let positions: Arc<dyn RecordStore<JobPosition>> = store.clone();
        let candidates: Arc<dyn RecordStore<Candidate>> = store;

        let job_position_service = JobPositionService::new(positions.clone());
        let candidate_service = CandidateService::new(candidates, positions);
        let assistant_service =
            AssistantService::new(job_position_service.clone(), candidate_service.clone());

        Self {
            job_position_service,
            candidate_service,
            assistant_service,
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}
