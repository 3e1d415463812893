use std::collections::BTreeSet;

use uuid::Uuid;

pub mod permissions {
    pub const VIEW_JOB_POSITION: &str = "recruitment.view_jobposition";
    pub const ADD_JOB_POSITION: &str = "recruitment.add_jobposition";
    pub const CHANGE_JOB_POSITION: &str = "recruitment.change_jobposition";
    pub const DELETE_JOB_POSITION: &str = "recruitment.delete_jobposition";
    pub const VIEW_CANDIDATE: &str = "recruitment.view_candidate";
    pub const ADD_CANDIDATE: &str = "recruitment.add_candidate";
    pub const CHANGE_CANDIDATE: &str = "recruitment.change_candidate";
    pub const MANAGE_SETTINGS: &str = "recruitment.manage_settings";

    pub const ALL: [&str; 8] = [
        VIEW_JOB_POSITION,
        ADD_JOB_POSITION,
        CHANGE_JOB_POSITION,
        DELETE_JOB_POSITION,
        VIEW_CANDIDATE,
        ADD_CANDIDATE,
        CHANGE_CANDIDATE,
        MANAGE_SETTINGS,
    ];
}

/// Caller identity threaded explicitly through every service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: String,
    pub tenant_id: Option<Uuid>,
    pub permissions: BTreeSet<String>,
}

impl RequestContext {
    pub fn new(user_id: impl Into<String>, tenant_id: Option<Uuid>) -> Self {
        Self {
            user_id: user_id.into(),
            tenant_id,
            permissions: BTreeSet::new(),
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}
