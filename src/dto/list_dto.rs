use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::services::list_query::{Page, SortDir};
use crate::utils::validation::parse_uuid;

/// Query string accepted by the list endpoints. Everything is kept as raw
/// text so malformed values degrade to defaults instead of rejections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ListParams {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub export: Option<String>,
    pub view: Option<String>,
    pub include_deleted: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    #[serde(flatten)]
    pub page: Page<T>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_dir: SortDir,
    pub current_view: String,
}

/// Ids as submitted by the table UI: either `"a,b,c"` or a JSON array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdList {
    Joined(String),
    Many(Vec<String>),
}

impl IdList {
    pub fn parse(&self) -> Result<Vec<Uuid>> {
        let raw: Vec<&str> = match self {
            IdList::Joined(joined) => joined.split(',').collect(),
            IdList::Many(items) => items.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| parse_uuid("ids", s))
            .collect()
    }
}

impl Default for IdList {
    fn default() -> Self {
        IdList::Many(Vec::new())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkActionPayload {
    #[serde(default)]
    pub ids: IdList,
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkActionResponse {
    pub action: String,
    pub affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joined_ids_skip_blanks() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let payload: BulkActionPayload =
            serde_json::from_value(json!({ "ids": format!("{}, ,{}", a, b), "action": "delete" }))
                .unwrap();
        assert_eq!(payload.ids.parse().unwrap(), vec![a, b]);
    }

    #[test]
    fn array_ids_reject_garbage() {
        let payload: BulkActionPayload =
            serde_json::from_value(json!({ "ids": ["nope"], "action": "delete" })).unwrap();
        assert!(payload.ids.parse().is_err());
    }
}
