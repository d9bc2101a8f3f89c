use serde::Serialize;
use shared::domain::EntityRecord;

use crate::{filter::FilterOp, sort::SortDirection};

/// How a column's values compare when filtered with `Equals` or sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Data,
    /// Row buttons (edit, delete). Rendered, never exported.
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub field: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub role: ColumnRole,
    pub filter: Option<FilterOp>,
    pub sortable: bool,
    pub searchable: bool,
    pub exportable: bool,
}

impl Column {
    const fn data(field: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            field,
            label,
            field_type,
            role: ColumnRole::Data,
            filter: None,
            sortable: false,
            searchable: false,
            exportable: true,
        }
    }

    pub const fn text(field: &'static str, label: &'static str) -> Self {
        Self::data(field, label, FieldType::Text)
    }

    pub const fn number(field: &'static str, label: &'static str) -> Self {
        Self::data(field, label, FieldType::Number)
    }

    pub const fn date(field: &'static str, label: &'static str) -> Self {
        Self::data(field, label, FieldType::Date)
    }

    pub const fn actions() -> Self {
        Self {
            field: "actions",
            label: "Actions",
            field_type: FieldType::Text,
            role: ColumnRole::Actions,
            filter: None,
            sortable: false,
            searchable: false,
            exportable: false,
        }
    }

    pub const fn filter(mut self, op: FilterOp) -> Self {
        self.filter = Some(op);
        self
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub const fn no_export(mut self) -> Self {
        self.exportable = false;
        self
    }

    pub fn is_data(&self) -> bool {
        self.role == ColumnRole::Data
    }

    pub fn is_exported(&self) -> bool {
        self.is_data() && self.exportable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefaultSort {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl DefaultSort {
    pub const fn asc(field: &'static str) -> Option<Self> {
        Some(Self {
            field,
            direction: SortDirection::Asc,
        })
    }

    pub const fn desc(field: &'static str) -> Option<Self> {
        Some(Self {
            field,
            direction: SortDirection::Desc,
        })
    }
}

/// Static description of one list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableDecl {
    /// Stable identifier, also the stem of the CSV filename.
    pub name: &'static str,
    pub title: &'static str,
    pub columns: &'static [Column],
    pub default_sort: Option<DefaultSort>,
    pub page_size: usize,
}

impl TableDecl {
    pub fn column(&self, field: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.is_data() && column.field == field)
    }

    pub fn filterable(&self, field: &str) -> Option<(&Column, FilterOp)> {
        self.column(field)
            .and_then(|column| column.filter.map(|op| (column, op)))
    }

    pub fn sortable(&self, field: &str) -> Option<&Column> {
        self.column(field).filter(|column| column.sortable)
    }

    pub fn filter_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|column| column.is_data() && column.filter.is_some())
    }

    pub fn searchable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|column| column.is_data() && column.searchable)
    }

    pub fn exported_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.is_exported())
    }

    /// The record cut down to this table's data columns, in declared order.
    /// Fields the table does not declare are dropped; missing ones read as null.
    pub fn project(&self, record: &EntityRecord) -> EntityRecord {
        self.columns
            .iter()
            .filter(|column| column.is_data())
            .map(|column| (column.field, record.value(column.field).clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
