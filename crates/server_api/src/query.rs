use listing::{FilterSpec, ListRequest, SortDirection, SortSpec, TableDecl};

pub const MAX_PAGE_SIZE: usize = 100;

/// Decoded query-string pairs in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self {
            pairs: url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// First value for `key`, trimmed; blank values read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Adds `key=value` unless the query already carries a non-blank `key`.
    pub fn with_default(mut self, key: &str, value: impl Into<String>) -> Self {
        if self.get(key).is_none() {
            self.pairs.retain(|(name, _)| name != key);
            self.pairs.push((key.to_string(), value.into()));
        }
        self
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn wants_csv(&self) -> bool {
        self.get("export")
            .is_some_and(|value| value.eq_ignore_ascii_case("csv"))
    }

    pub fn wants_json(&self) -> bool {
        self.get("format")
            .is_some_and(|value| value.eq_ignore_ascii_case("json"))
    }

    /// Builds the pipeline request for `table`. Parameters that do not name a
    /// filterable column are ignored.
    pub fn list_request(&self, table: &TableDecl) -> ListRequest {
        let filters = table
            .filter_columns()
            .filter_map(|column| {
                let op = column.filter?;
                self.get(column.field)
                    .map(|value| FilterSpec::new(column.field, op, value))
            })
            .collect();

        ListRequest {
            filters,
            search: self.get("search").map(str::to_string),
            sort: self.sort_spec(),
            page: self.get("page").map_or(1, parse_page),
            page_size: self
                .get("page_size")
                .and_then(|size| size.parse::<usize>().ok())
                .map(|size| size.clamp(1, MAX_PAGE_SIZE)),
        }
    }

    /// `sort=field` with `order=asc|desc`; a leading `-` on the field also
    /// means descending.
    fn sort_spec(&self) -> Option<SortSpec> {
        let raw = self.get("sort")?;
        let (field, prefixed_desc) = match raw.strip_prefix('-') {
            Some(field) => (field, true),
            None => (raw, false),
        };
        let direction = self
            .get("order")
            .and_then(SortDirection::parse)
            .unwrap_or(if prefixed_desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            });
        Some(SortSpec::new(field, direction))
    }

    /// Same parameters with `page` replaced, for pagination links.
    pub fn with_page(&self, page: usize) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            if key != "page" {
                serializer.append_pair(key, value);
            }
        }
        serializer.append_pair("page", &page.to_string());
        serializer.finish()
    }
}

/// Page numbers too large for `i64` saturate so they clamp to the last page;
/// anything that is not an integer means page 1.
fn parse_page(raw: &str) -> i64 {
    if let Ok(page) = raw.parse::<i64>() {
        return page;
    }
    let (digits, overflow) = match raw.strip_prefix('-') {
        Some(digits) => (digits, i64::MIN),
        None => (raw.strip_prefix('+').unwrap_or(raw), i64::MAX),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        overflow
    } else {
        1
    }
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
