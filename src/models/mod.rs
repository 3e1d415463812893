pub mod candidate;
pub mod context;
pub mod job_position;
pub mod record;
