use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::context::RequestContext;
use crate::models::record::RecordMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Live,
    IncludeDeleted,
}

/// Tenant confinement handed to every store call.
///
/// A scope can only be obtained from a [`RequestContext`], so no caller can
/// name a tenant of its choosing. Reads honour the visibility; writes always
/// target live rows of the scoped tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope {
    tenant_id: Uuid,
    visibility: Visibility,
}

impl TenantScope {
    pub fn for_context(ctx: &RequestContext) -> Result<Self> {
        let tenant_id = ctx.tenant_id.ok_or_else(|| {
            tracing::warn!(user = %ctx.user_id, "request without tenant context");
            Error::Unauthorized("missing tenant context".to_string())
        })?;
        Ok(Self {
            tenant_id,
            visibility: Visibility::Live,
        })
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn including_deleted(self) -> Self {
        Self {
            visibility: Visibility::IncludeDeleted,
            ..self
        }
    }

    pub fn live_only(self) -> Self {
        Self {
            visibility: Visibility::Live,
            ..self
        }
    }

    /// Whether a row is visible through this scope.
    pub fn admits(&self, meta: &RecordMeta) -> bool {
        meta.tenant_id == self.tenant_id
            && (self.visibility == Visibility::IncludeDeleted || !meta.is_deleted)
    }

    /// Whether a row may be written through this scope.
    pub fn admits_write(&self, meta: &RecordMeta) -> bool {
        meta.tenant_id == self.tenant_id && !meta.is_deleted
    }

    pub fn stamp(&self, meta: &mut RecordMeta) {
        meta.tenant_id = self.tenant_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tenant_is_rejected() {
        let ctx = RequestContext::new("user-1", None);
        let err = TenantScope::for_context(&ctx).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn deleted_rows_need_explicit_visibility() {
        let tenant = Uuid::new_v4();
        let scope = TenantScope::for_context(&RequestContext::new("u", Some(tenant))).unwrap();
        let mut meta = RecordMeta::new(tenant);
        assert!(scope.admits(&meta));

        meta.mark_deleted(crate::utils::time::now());
        assert!(!scope.admits(&meta));
        assert!(scope.including_deleted().admits(&meta));
        assert!(!scope.including_deleted().admits_write(&meta));
    }

    #[test]
    fn other_tenants_are_never_admitted() {
        let scope =
            TenantScope::for_context(&RequestContext::new("u", Some(Uuid::new_v4()))).unwrap();
        let foreign = RecordMeta::new(Uuid::new_v4());
        assert!(!scope.admits(&foreign));
        assert!(!scope.including_deleted().admits(&foreign));
    }
}
