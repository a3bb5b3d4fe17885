use std::collections::HashMap;

use serde::Serialize;

use crate::models::Table;

const DEFAULT_PAGE_SIZE: i64 = 10;

/// A scalar filter value coerced from its query-string form.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Best-effort coercion: `"true"`/`"false"` become booleans, anything
    /// that parses as a number becomes a number, the rest stays text.
    /// Never fails.
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => Scalar::Bool(true),
            "false" => Scalar::Bool(false),
            _ => raw
                .parse::<f64>()
                .map(Scalar::Number)
                .unwrap_or_else(|_| Scalar::Text(raw.to_string())),
        }
    }
}

/// Parsed list-endpoint options: page/pageSize, optional substring search
/// over named fields, equality filters, and a sort field (leading `-` for
/// descending).
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub page: i64,
    pub page_size: i64,
    pub search: Option<String>,
    pub filter_by: Vec<(String, Scalar)>,
    pub order_by: Option<String>,
    pub search_fields: Vec<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            filter_by: Vec::new(),
            order_by: None,
            search_fields: Vec::new(),
        }
    }
}

impl PageQuery {
    /// Parses the flattened query-string form. Filters arrive in bracket
    /// notation (`filterBy[available]=true`); values are coerced with
    /// [`Scalar::coerce`]. Out-of-range page numbers fall back to the
    /// defaults rather than erroring.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let page = params
            .get("page")
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        let page_size = params
            .get("pageSize")
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let search = params
            .get("search")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let order_by = params
            .get("orderBy")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let search_fields = params
            .get("searchFields")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut filter_by: Vec<(String, Scalar)> = params
            .iter()
            .filter_map(|(key, value)| {
                let field = key.strip_prefix("filterBy[")?.strip_suffix(']')?;
                if field.is_empty() {
                    return None;
                }
                Some((field.to_string(), Scalar::coerce(value)))
            })
            .collect();
        // HashMap iteration order is arbitrary; keep the generated SQL stable.
        filter_by.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            page,
            page_size,
            search,
            filter_by,
            order_by,
            search_fields,
        }
    }

    /// Applies the resource's default search fields when a search term is
    /// present but the caller named none.
    pub fn with_default_search_fields(mut self, fields: &[&str]) -> Self {
        if self.search.is_some() && self.search_fields.is_empty() {
            self.search_fields = fields.iter().map(|f| f.to_string()).collect();
        }
        self
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// One page of results plus the total count of the filtered set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, query: &PageQuery) -> Self {
        Self {
            data,
            total,
            page: query.page,
            page_size: query.page_size,
            total_pages: total_pages(total, query.page_size),
        }
    }
}

pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// Count and select statements for one [`PageQuery`], sharing a bind list.
#[derive(Debug)]
pub struct PagedStatements {
    pub count_sql: String,
    pub select_sql: String,
    pub binds: Vec<Scalar>,
}

/// Builds the two statements for a paginated fetch against `T`'s table.
///
/// Filter, search and sort fields are checked against the table's column
/// allowlist; unknown names are skipped rather than rejected. Text filters
/// compare against the column cast to text so they also match enum and
/// uuid columns.
pub fn build_paged_statements<T: Table>(query: &PageQuery) -> PagedStatements {
    let mut clauses: Vec<String> = Vec::new();
    let mut binds: Vec<Scalar> = Vec::new();

    for (field, value) in &query.filter_by {
        if !T::COLUMNS.contains(&field.as_str()) {
            tracing::warn!(table = T::TABLE, field = %field, "ignoring unknown filter field");
            continue;
        }
        let idx = binds.len() + 1;
        match value {
            Scalar::Text(_) => clauses.push(format!("{}::text = ${}", field, idx)),
            _ => clauses.push(format!("{} = ${}", field, idx)),
        }
        binds.push(value.clone());
    }

    if let Some(search) = &query.search {
        let fields: Vec<&str> = query
            .search_fields
            .iter()
            .map(String::as_str)
            .filter(|f| T::COLUMNS.contains(f))
            .collect();

        if !fields.is_empty() {
            let idx = binds.len() + 1;
            let matches: Vec<String> = fields
                .iter()
                .map(|f| format!("{} ILIKE ${}", f, idx))
                .collect();
            clauses.push(format!("({})", matches.join(" OR ")));
            binds.push(Scalar::Text(format!("%{}%", search)));
        }
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM {}{}", T::TABLE, where_sql);
    let select_sql = format!(
        "SELECT * FROM {}{} ORDER BY {} LIMIT {} OFFSET {}",
        T::TABLE,
        where_sql,
        order_clause::<T>(query.order_by.as_deref()),
        query.page_size,
        query.offset(),
    );

    PagedStatements {
        count_sql,
        select_sql,
        binds,
    }
}

/// Most-recent-first unless a known sort field is supplied; a leading `-`
/// flips the direction.
fn order_clause<T: Table>(order_by: Option<&str>) -> String {
    let Some(raw) = order_by else {
        return "created_at DESC".to_string();
    };

    let (field, direction) = match raw.strip_prefix('-') {
        Some(stripped) => (stripped, "DESC"),
        None => (raw, "ASC"),
    };

    if !T::COLUMNS.contains(&field) {
        tracing::warn!(table = T::TABLE, field, "ignoring unknown sort field");
        return "created_at DESC".to_string();
    }

    format!("{} {}", field, direction)
}
