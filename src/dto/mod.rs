pub mod assistant_dto;
pub mod candidate_dto;
pub mod job_position_dto;
pub mod list_dto;
