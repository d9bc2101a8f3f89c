use serde::Serialize;
use shared::domain::EntityRecord;

use crate::{
    filter::{contains_ignore_case, FilterSpec},
    sort::{effective_sort, sort_records, SortSpec},
    table::{Column, TableDecl},
};

/// Everything a list screen reads from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub filters: Vec<FilterSpec>,
    pub search: Option<String>,
    pub sort: Option<SortSpec>,
    /// Raw requested page; clamped to `[1, total_pages]`.
    pub page: i64,
    /// Overrides the table's page size when set.
    pub page_size: Option<usize>,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            search: None,
            sort: None,
            page: 1,
            page_size: None,
        }
    }
}

impl ListRequest {
    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub offset: usize,
}

impl PaginationInfo {
    pub fn new(total_items: usize, requested_page: i64, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        let current_page = requested_page.clamp(1, total_pages as i64) as usize;
        Self {
            current_page,
            total_pages,
            total_items,
            page_size,
            offset: (current_page - 1) * page_size,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// One-based index of the first item on the page, 0 when there is none.
    pub fn first_item(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            self.offset + 1
        }
    }

    pub fn last_item(&self) -> usize {
        (self.offset + self.page_size).min(self.total_items)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<EntityRecord>,
    pub page_number: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage {
    pub page: Page,
    pub pagination: PaginationInfo,
}

impl ListPage {
    pub fn items(&self) -> &[EntityRecord] {
        &self.page.items
    }
}

pub fn build_page(
    table: &TableDecl,
    records: Vec<EntityRecord>,
    request: &ListRequest,
) -> ListPage {
    let matching = filter_and_sort(table, records, request);
    let page_size = request.page_size.unwrap_or(table.page_size);
    paginate(matching, request.page, page_size)
}

/// Same pipeline with a single page holding every matching record.
pub fn build_export(
    table: &TableDecl,
    records: Vec<EntityRecord>,
    request: &ListRequest,
) -> ListPage {
    let matching = filter_and_sort(table, records, request);
    let page_size = matching.len();
    paginate(matching, 1, page_size)
}

fn paginate(records: Vec<EntityRecord>, requested_page: i64, page_size: usize) -> ListPage {
    let pagination = PaginationInfo::new(records.len(), requested_page, page_size);
    let items: Vec<EntityRecord> = records
        .into_iter()
        .skip(pagination.offset)
        .take(pagination.page_size)
        .collect();
    ListPage {
        page: Page {
            items,
            page_number: pagination.current_page,
            page_size: pagination.page_size,
        },
        pagination,
    }
}

fn filter_and_sort(
    table: &TableDecl,
    records: Vec<EntityRecord>,
    request: &ListRequest,
) -> Vec<EntityRecord> {
    let active: Vec<(&FilterSpec, &Column)> = request
        .filters
        .iter()
        .filter(|spec| spec.is_active())
        .filter_map(|spec| table.filterable(&spec.field).map(|(column, _)| (spec, column)))
        .collect();

    let search = request
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty());
    let searchable: Vec<&Column> = table.searchable_columns().collect();

    let matching: Vec<EntityRecord> = records
        .into_iter()
        .filter(|record| {
            active
                .iter()
                .all(|(spec, column)| spec.matches(record, column.field_type))
        })
        .filter(|record| match search {
            Some(term) => searchable.iter().any(|column| {
                contains_ignore_case(&record.value(column.field).to_string(), term)
            }),
            None => true,
        })
        .collect();

    match effective_sort(table, request.sort.as_ref()) {
        Some((column, direction)) => sort_records(matching, column, direction),
        None => matching,
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
