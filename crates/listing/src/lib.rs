//! Filter, sort, paginate and export pipeline shared by every list screen.
//!
//! A screen describes its columns once with a static [`TableDecl`]; the
//! pipeline then works the same way for any entity:
//!
//! ```text
//! records -> filters (AND) + search -> stable sort -> page slice / CSV
//! ```
//!
//! Unknown filter or sort fields are ignored and out-of-range pages are
//! clamped, so a malformed query string degrades to the default view instead
//! of failing the request.

mod export;
mod filter;
mod page;
mod sort;
mod table;

#[cfg(test)]
mod test_support;

pub use export::{csv_escape, export_csv, write_csv};
pub use filter::{FilterOp, FilterSpec};
pub use page::{build_export, build_page, ListPage, ListRequest, Page, PaginationInfo};
pub use sort::{collation_key, SortDirection, SortSpec};
pub use table::{Column, ColumnRole, DefaultSort, FieldType, TableDecl};
