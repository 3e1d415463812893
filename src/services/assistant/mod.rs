pub mod tools;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;

use crate::dto::candidate_dto::CandidatePayload;
use crate::dto::job_position_dto::JobPositionPayload;
use crate::error::{Error, Result};
use crate::models::context::RequestContext;
use crate::services::candidate_service::CandidateService;
use crate::services::job_position_service::JobPositionService;
use crate::services::tenant_scope::TenantScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ListJobPositions,
    CreateJobPosition,
    ListCandidates,
    CreateCandidate,
}

/// Metadata an external agent uses to discover and call an action.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub module_id: &'static str,
    pub required_permission: &'static str,
    pub requires_confirmation: bool,
    pub parameters: JsonValue,
    #[serde(skip)]
    pub kind: ToolKind,
}

pub struct ToolRegistry {
    tools: BTreeMap<&'static str, ToolDescriptor>,
}

impl ToolRegistry {
    pub fn recruitment() -> Self {
        let tools = tools::descriptors()
            .into_iter()
            .map(|tool| (tool.name, tool))
            .collect();
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    /// Validated but not executed; the caller must repeat with `confirmed: true`.
    PendingConfirmation {
        tool: String,
        arguments: JsonValue,
        summary: String,
    },
    Completed {
        result: JsonValue,
    },
}

#[derive(Clone)]
pub struct AssistantService {
    registry: Arc<ToolRegistry>,
    positions: JobPositionService,
    candidates: CandidateService,
}

fn parse_args<T: DeserializeOwned>(arguments: &JsonValue) -> Result<T> {
    let value = match arguments {
        JsonValue::Null => JsonValue::Object(Default::default()),
        other => other.clone(),
    };
    Ok(serde_json::from_value(value)?)
}

impl AssistantService {
    pub fn new(positions: JobPositionService, candidates: CandidateService) -> Self {
        Self {
            registry: Arc::new(ToolRegistry::recruitment()),
            positions,
            candidates,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Descriptors the caller holds the permission for.
    pub fn available_tools(&self, ctx: &RequestContext) -> Vec<ToolDescriptor> {
        self.registry
            .descriptors()
            .filter(|tool| ctx.has_permission(tool.required_permission))
            .cloned()
            .collect()
    }

    pub async fn invoke(
        &self,
        ctx: &RequestContext,
        name: &str,
        arguments: JsonValue,
        confirmed: bool,
    ) -> Result<ToolOutcome> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownAction(name.to_string()))?;
        if !ctx.has_permission(tool.required_permission) {
            tracing::warn!(user = %ctx.user_id, tool = name, "assistant tool denied");
            return Err(Error::Forbidden(format!(
                "missing permission {}",
                tool.required_permission
            )));
        }
        let scope = TenantScope::for_context(ctx)?;
        tracing::info!(user = %ctx.user_id, tool = name, confirmed, "assistant tool invoked");

        match tool.kind {
            ToolKind::ListJobPositions => {
                let args = parse_args(&arguments)?;
                let result = tools::list_job_positions(&self.positions, &scope, args).await?;
                Ok(ToolOutcome::Completed { result })
            }
            ToolKind::ListCandidates => {
                let args = parse_args(&arguments)?;
                let result = tools::list_candidates(&self.candidates, &scope, args).await?;
                Ok(ToolOutcome::Completed { result })
            }
            ToolKind::CreateJobPosition => {
                let args: tools::CreateJobPositionArgs = parse_args(&arguments)?;
                let payload: JobPositionPayload = args.into();
                if !confirmed {
                    let draft = self.positions.build_new(&scope, payload.clone())?;
                    return Ok(Self::pending(
                        tool,
                        arguments,
                        format!("Create job position '{}'", draft.title),
                    ));
                }
                let created = self.positions.create(&scope, payload).await?;
                Ok(ToolOutcome::Completed {
                    result: tools::job_position_created(&created),
                })
            }
            ToolKind::CreateCandidate => {
                let args: tools::CreateCandidateArgs = parse_args(&arguments)?;
                let payload: CandidatePayload = args.into();
                if !confirmed {
                    let draft = self.candidates.build_new(&scope, payload.clone()).await?;
                    return Ok(Self::pending(
                        tool,
                        arguments,
                        format!(
                            "Add candidate '{}' to '{}'",
                            draft.name,
                            draft.position_title.unwrap_or_default()
                        ),
                    ));
                }
                let created = self.candidates.create(&scope, payload).await?;
                Ok(ToolOutcome::Completed {
                    result: tools::candidate_created(&created),
                })
            }
        }
    }

    fn pending(tool: &ToolDescriptor, arguments: JsonValue, summary: String) -> ToolOutcome {
        ToolOutcome::PendingConfirmation {
            tool: tool.name.to_string(),
            arguments,
            summary,
        }
    }
}
