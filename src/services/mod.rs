pub mod assistant;
pub mod candidate_service;
pub mod export_service;
pub mod job_position_service;
pub mod list_query;
pub mod list_service;
pub mod tenant_scope;
