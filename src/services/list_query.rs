use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::list_dto::ListParams;
use crate::models::record::{EntitySchema, FieldSpec, FieldValue};

pub const PER_PAGE_CHOICES: [u32; 4] = [10, 25, 50, 100];
pub const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Only an exact `desc` sorts descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Equals {
        field: &'static FieldSpec,
        value: FieldValue,
    },
    Contains {
        field: &'static FieldSpec,
        needle: String,
    },
    IdIn(Vec<Uuid>),
}

/// Case-insensitive substring match, OR-ed across `fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    pub fields: Vec<&'static FieldSpec>,
    pub needle: String,
}

/// Row selection on top of the tenant scope. Filters are AND-ed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub filters: Vec<Filter>,
    pub search: Option<Search>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a search over the schema's searchable fields; blank terms are ignored.
    pub fn with_search(mut self, schema: &'static EntitySchema, term: Option<&str>) -> Self {
        if let Some(needle) = term.map(str::trim).filter(|t| !t.is_empty()) {
            self.search = Some(Search {
                fields: schema.searchable_fields().collect(),
                needle: needle.to_string(),
            });
        }
        self
    }

    pub fn equals(mut self, field: &'static FieldSpec, value: FieldValue) -> Self {
        self.filters.push(Filter::Equals { field, value });
        self
    }

    pub fn contains(mut self, field: &'static FieldSpec, needle: impl Into<String>) -> Self {
        self.filters.push(Filter::Contains {
            field,
            needle: needle.into(),
        });
        self
    }

    pub fn ids(mut self, ids: Vec<Uuid>) -> Self {
        self.filters.push(Filter::IdIn(ids));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: &'static FieldSpec,
    pub dir: SortDir,
}

impl SortOrder {
    pub fn default_for(schema: &'static EntitySchema) -> Self {
        Self {
            field: schema.sort_field(schema.default_sort),
            dir: SortDir::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

/// A bounded slice of an ordered result plus navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Resolved paging position for a known total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlot {
    pub page: u64,
    pub total_pages: u64,
    pub per_page: u32,
}

impl PageSlot {
    /// Non-numeric pages go to page 1; pages below 1 or past the end go to
    /// the last page. An empty result still has one page.
    pub fn resolve(requested: Option<&str>, total: u64, per_page: u32) -> Self {
        let per = u64::from(per_page.max(1));
        let total_pages = total.div_ceil(per).max(1);
        let page = match requested.map(str::trim).unwrap_or("1").parse::<i64>() {
            Err(_) => 1,
            Ok(n) if n < 1 => total_pages,
            Ok(n) => (n as u64).min(total_pages),
        };
        Self {
            page,
            total_pages,
            per_page,
        }
    }

    pub fn window(&self) -> Window {
        let per = u64::from(self.per_page);
        Window {
            offset: (self.page - 1) * per,
            limit: per,
        }
    }

    pub fn into_page<T>(self, items: Vec<T>, total: u64) -> Page<T> {
        Page {
            items,
            page: self.page,
            per_page: self.per_page,
            total,
            total_pages: self.total_pages,
            has_next: self.page < self.total_pages,
            has_previous: self.page > 1,
        }
    }
}

pub fn normalize_per_page(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| PER_PAGE_CHOICES.contains(v))
        .unwrap_or(DEFAULT_PER_PAGE)
}

/// List request after normalisation against an entity schema.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub criteria: Criteria,
    pub order: SortOrder,
    pub page: Option<String>,
    pub per_page: u32,
    pub include_deleted: bool,
    pub search_query: String,
    pub sort_field: String,
}

impl ListQuery {
    pub fn from_params(schema: &'static EntitySchema, params: &ListParams) -> Self {
        let search_query = params.q.as_deref().unwrap_or("").trim().to_string();
        let sort_field = params
            .sort
            .clone()
            .unwrap_or_else(|| schema.default_sort.to_string());
        let include_deleted = matches!(
            params.include_deleted.as_deref().map(str::trim),
            Some("true") | Some("1")
        );

        Self {
            criteria: Criteria::new().with_search(schema, Some(&search_query)),
            order: SortOrder {
                field: schema.sort_field(&sort_field),
                dir: SortDir::parse(params.dir.as_deref()),
            },
            page: params.page.clone(),
            per_page: normalize_per_page(params.per_page.as_deref()),
            include_deleted,
            search_query,
            sort_field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job_position::JOB_POSITION_SCHEMA;

    #[test]
    fn per_page_outside_allow_list_falls_back() {
        assert_eq!(normalize_per_page(Some("25")), 25);
        assert_eq!(normalize_per_page(Some("999")), DEFAULT_PER_PAGE);
        assert_eq!(normalize_per_page(Some("abc")), DEFAULT_PER_PAGE);
        assert_eq!(normalize_per_page(None), DEFAULT_PER_PAGE);
    }

    #[test]
    fn page_resolution_matches_paginator_rules() {
        assert_eq!(PageSlot::resolve(Some("2"), 35, 10).page, 2);
        assert_eq!(PageSlot::resolve(Some("x"), 35, 10).page, 1);
        assert_eq!(PageSlot::resolve(Some("0"), 35, 10).page, 4);
        assert_eq!(PageSlot::resolve(Some("12"), 35, 10).page, 4);

        let empty = PageSlot::resolve(None, 0, 10);
        assert_eq!((empty.page, empty.total_pages), (1, 1));
    }

    #[test]
    fn page_flags_and_window() {
        let slot = PageSlot::resolve(Some("2"), 25, 10);
        assert_eq!(slot.window(), Window { offset: 10, limit: 10 });
        let page = slot.into_page(vec![(); 10], 25);
        assert!(page.has_next);
        assert!(page.has_previous);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn unknown_sort_field_uses_default() {
        let params = ListParams {
            sort: Some("salary".into()),
            dir: Some("desc".into()),
            ..Default::default()
        };
        let query = ListQuery::from_params(&JOB_POSITION_SCHEMA, &params);
        assert_eq!(query.order.field.name, "title");
        assert_eq!(query.order.dir, SortDir::Desc);
        assert_eq!(query.sort_field, "salary");
    }

    #[test]
    fn blank_search_adds_no_predicate() {
        let params = ListParams {
            q: Some("   ".into()),
            ..Default::default()
        };
        let query = ListQuery::from_params(&JOB_POSITION_SCHEMA, &params);
        assert!(query.criteria.search.is_none());
    }

    #[test]
    fn search_spans_searchable_fields_only() {
        let criteria = Criteria::new().with_search(&JOB_POSITION_SCHEMA, Some("eng"));
        let names: Vec<_> = criteria
            .search
            .unwrap()
            .fields
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["title", "status", "department", "description"]);
    }
}
