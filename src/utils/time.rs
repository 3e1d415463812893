use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC time truncated to microseconds, the precision Postgres stores.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
