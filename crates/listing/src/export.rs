use std::io::{self, Write};

use shared::domain::EntityRecord;

use crate::{
    page::{build_export, ListRequest},
    table::TableDecl,
};

const DELIMITER: char = ',';
const QUOTE: char = '"';
const RECORD_END: &str = "\r\n";

/// Quotes a field when it holds the delimiter, a quote, CR or LF; embedded
/// quotes are doubled.
pub fn csv_escape(field: &str) -> String {
    if !field.contains([DELIMITER, QUOTE, '\r', '\n']) {
        return field.to_string();
    }
    let mut quoted = String::with_capacity(field.len() + 2);
    quoted.push(QUOTE);
    for c in field.chars() {
        if c == QUOTE {
            quoted.push(QUOTE);
        }
        quoted.push(c);
    }
    quoted.push(QUOTE);
    quoted
}

fn header_line(table: &TableDecl) -> String {
    join_line(table.exported_columns().map(|column| column.label.to_string()))
}

fn record_line(table: &TableDecl, record: &EntityRecord) -> String {
    join_line(
        table
            .exported_columns()
            .map(|column| record.value(column.field).to_string()),
    )
}

fn join_line(fields: impl Iterator<Item = String>) -> String {
    let mut line = String::new();
    for (index, field) in fields.enumerate() {
        if index > 0 {
            line.push(DELIMITER);
        }
        line.push_str(&csv_escape(&field));
    }
    line.push_str(RECORD_END);
    line
}

/// Writes a header row of column labels followed by one row per record,
/// using only the table's exportable data columns.
pub fn write_csv<W: Write>(table: &TableDecl, records: &[EntityRecord], mut out: W) -> io::Result<()> {
    out.write_all(header_line(table).as_bytes())?;
    for record in records {
        out.write_all(record_line(table, record).as_bytes())?;
    }
    out.flush()
}

/// Filters and sorts like the list view, without pagination, and serializes
/// the result.
pub fn export_csv(table: &TableDecl, records: Vec<EntityRecord>, request: &ListRequest) -> String {
    let export = build_export(table, records, request);
    let mut body = header_line(table);
    for record in export.items() {
        body.push_str(&record_line(table, record));
    }
    body
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
