use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::services::assistant::ToolDescriptor;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvokeToolRequest {
    #[serde(default)]
    pub arguments: JsonValue,
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDescriptor>,
}
