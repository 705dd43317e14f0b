//! Query parameters, list filtering and pagination utilities

use crate::core::Data;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Query-string keys reserved for pagination, search and sorting
pub const RESERVED_KEYS: &[&str] = &["page", "limit", "search", "sort", "filter"];

/// Query parameters for pagination, search and sorting
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_customers(
///     Query(params): Query<QueryParams>,
///     Query(raw): Query<HashMap<String, String>>,
/// ) -> OrderDeskResult<Json<PaginatedResponse<Customer>>> {
///     // params.page defaults to 1
///     // params.limit defaults to 20
/// }
///
/// // Usage:
/// GET /customers?page=2&limit=10
/// GET /customers?search=papa&sort=last_name:asc
/// GET /orders?date__gte=2024-01-01&date__lte=2024-01-31
/// GET /orders?filter={"customer": "1f0c..."}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Free-text search over the entity's indexed fields
    pub search: Option<String>,

    /// Filters as a JSON object, merged with the plain query-string filters
    ///
    /// # Format
    /// ```text
    /// filter={"customer": "1f0c...", "date__gte": "2024-01-01"}
    /// ```
    pub filter: Option<String>,

    /// Sort field and direction
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub sort: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            search: None,
            filter: None,
            sort: None,
        }
    }
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, ensuring it doesn't exceed the maximum
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, 100)
    }

    /// Parse filter JSON string into Value
    pub fn filter_value(&self) -> Option<Value> {
        self.filter
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
    }

    /// Collect the field filters from the raw query string and the `filter`
    /// JSON object. Reserved keys are dropped.
    pub fn field_filters(&self, raw: &HashMap<String, String>) -> FieldFilters {
        let mut filters: BTreeMap<String, String> = raw
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if let Some(Value::Object(obj)) = self.filter_value() {
            for (key, value) in obj {
                let raw_value = match value {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                filters.entry(key).or_insert(raw_value);
            }
        }

        FieldFilters(filters)
    }
}

/// Field filters extracted from a list request.
///
/// Keys are field names with an optional comparison suffix:
/// `field`, `field__gte`, `field__lte`, `field__gt`, `field__lt`.
#[derive(Debug, Clone, Default)]
pub struct FieldFilters(BTreeMap<String, String>);

impl FieldFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove a filter that the caller handles itself (e.g. derived fields)
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only the records matching every filter on a field listed in
    /// `allowed`. Filters on other keys are ignored.
    pub fn apply<T: Data>(&self, data: Vec<T>, allowed: &[&str]) -> Vec<T> {
        let active: Vec<(&str, Comparison, &str)> = self
            .0
            .iter()
            .filter_map(|(key, value)| {
                let (field, comparison) = Comparison::split(key);
                allowed
                    .contains(&field)
                    .then_some((field, comparison, value.as_str()))
            })
            .collect();

        if active.is_empty() {
            return data;
        }

        data.into_iter()
            .filter(|entity| {
                active.iter().all(|(field, comparison, raw)| {
                    entity
                        .field_value(field)
                        .and_then(|value| value.compare_raw(raw))
                        .is_some_and(|ordering| comparison.accepts(ordering))
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Comparison {
    Exact,
    Gte,
    Lte,
    Gt,
    Lt,
}

impl Comparison {
    fn split(key: &str) -> (&str, Comparison) {
        for (suffix, comparison) in [
            ("__gte", Comparison::Gte),
            ("__lte", Comparison::Lte),
            ("__gt", Comparison::Gt),
            ("__lt", Comparison::Lt),
        ] {
            if let Some(field) = key.strip_suffix(suffix) {
                return (field, comparison);
            }
        }
        (key, Comparison::Exact)
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Exact => ordering == Ordering::Equal,
            Comparison::Gte => ordering != Ordering::Less,
            Comparison::Lte => ordering != Ordering::Greater,
            Comparison::Gt => ordering == Ordering::Greater,
            Comparison::Lt => ordering == Ordering::Less,
        }
    }
}

/// Keep the records whose indexed fields contain `term`
pub fn apply_search<T: Data>(data: Vec<T>, term: Option<&str>) -> Vec<T> {
    match term {
        Some(term) if !term.trim().is_empty() => data
            .into_iter()
            .filter(|entity| entity.matches_search(term))
            .collect(),
        _ => data,
    }
}

/// Sort records by a field (`field`, `field:asc` or `field:desc`).
///
/// Unknown fields leave the order unchanged. The sort is stable, so records
/// with equal values keep their storage order.
pub fn apply_sort<T: Data>(mut data: Vec<T>, sort: Option<&str>) -> Vec<T> {
    let Some(sort) = sort else {
        return data;
    };
    let (field, descending) = match sort.split_once(':') {
        Some((field, direction)) => (field, direction.eq_ignore_ascii_case("desc")),
        None => (sort, false),
    };

    data.sort_by(|a, b| {
        let ordering = match (a.field_value(field), b.field_value(field)) {
            (Some(left), Some(right)) => left.compare_raw(&right.to_string()).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        };
        if descending { ordering.reverse() } else { ordering }
    });
    data
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Slice a full result set down to the requested page
    pub fn paginate(all: Vec<T>, params: &QueryParams) -> Self {
        let page = params.page();
        let limit = params.limit();
        let total = all.len();
        let data = all
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Self {
            data,
            pagination: PaginationMeta::new(page, limit, total),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1) * limit;

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start + limit < total,
            has_prev: page > 1,
        }
    }
}
