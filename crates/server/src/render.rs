//! Minimal HTML views. Every interpolated value goes through `escape_html`.

use std::fmt::Write as _;

use listing::{ColumnRole, ListPage};
use server_api::{query::QueryParams, tables::Screen};
use shared::{
    domain::EntityRecord,
    protocol::{ContactAck, ContactInfo, DashboardSummary, FormDescriptor},
};

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape_html(title),
    )
}

pub(crate) fn list_page(screen: &Screen, page: &ListPage, query: &QueryParams) -> String {
    let table = &screen.table;
    let mut body = String::new();

    let pagination = &page.pagination;
    let _ = writeln!(
        body,
        "<p>Resultats {}-{} sur {} - page {} / {}</p>",
        pagination.first_item(),
        pagination.last_item(),
        pagination.total_items,
        pagination.current_page,
        pagination.total_pages
    );
    body.push_str("<table>\n<thead><tr>");
    for column in table.columns {
        let _ = write!(body, "<th>{}</th>", escape_html(column.label));
    }
    body.push_str("</tr></thead>\n<tbody>\n");
    for record in page.items() {
        body.push_str("<tr>");
        for column in table.columns {
            match column.role {
                ColumnRole::Data => {
                    let value = record.value(column.field).to_string();
                    let _ = write!(body, "<td>{}</td>", escape_html(&value));
                }
                ColumnRole::Actions => body.push_str("<td class=\"actions\"></td>"),
            }
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n<nav>");

    if pagination.has_previous() {
        let _ = write!(
            body,
            "<a rel=\"prev\" href=\"?{}\">Precedent</a> ",
            escape_html(&query.with_page(pagination.current_page - 1))
        );
    }
    if pagination.has_next() {
        let _ = write!(
            body,
            "<a rel=\"next\" href=\"?{}\">Suivant</a> ",
            escape_html(&query.with_page(pagination.current_page + 1))
        );
    }
    let _ = write!(
        body,
        "<a href=\"?{}&amp;export=csv\">Exporter CSV</a></nav>\n",
        escape_html(&query.with_page(pagination.current_page))
    );

    document(table.title, &body)
}

pub(crate) fn record_page(title: &str, record: &EntityRecord) -> String {
    let mut body = String::from("<dl>\n");
    for (name, value) in record.fields() {
        let _ = writeln!(
            body,
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(name),
            escape_html(&value.to_string())
        );
    }
    body.push_str("</dl>\n");
    document(title, &body)
}

pub(crate) fn dashboard_page(title: &str, summary: &DashboardSummary) -> String {
    let mut body = String::from("<ul>\n");
    for entry in &summary.counts {
        let _ = writeln!(body, "<li>{}: {}</li>", entry.kind, entry.count);
    }
    body.push_str("</ul>\n");
    document(title, &body)
}

pub(crate) fn contact_page(info: &ContactInfo, action: &str) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<address>{}<br>{}<br>{}</address>",
        escape_html(&info.laboratory),
        escape_html(&info.address),
        escape_html(&info.email)
    );
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"{}\">",
        escape_html(action)
    );
    for (name, input) in [("nom", "text"), ("email", "email"), ("sujet", "text")] {
        let _ = writeln!(
            body,
            "<label>{name} <input type=\"{input}\" name=\"{name}\" required></label>"
        );
    }
    body.push_str("<label>message <textarea name=\"message\" required></textarea></label>\n");
    body.push_str("<button type=\"submit\">Envoyer</button>\n</form>\n");
    document("Contact", &body)
}

pub(crate) fn contact_ack_page(ack: &ContactAck) -> String {
    document(
        "Contact",
        &format!("<p>Message recu (reference {}).</p>\n", ack.contact_id),
    )
}

pub(crate) fn form_page(form: &FormDescriptor) -> String {
    let mut body = String::from("<form method=\"post\">\n");
    for field in &form.fields {
        let required = if field.required { " required" } else { "" };
        let _ = writeln!(
            body,
            "<label>{} <input type=\"{}\" name=\"{}\"{required}></label>",
            escape_html(&field.label),
            escape_html(&field.input),
            escape_html(&field.name)
        );
    }
    body.push_str("</form>\n");
    document(&format!("Nouveau {}", form.kind), &body)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
