use super::*;
use crate::{
    test_support::{ids, numbered, EQUIPMENT},
    FilterSpec,
};

#[test]
fn third_page_of_twenty_five_holds_the_last_five() {
    let request = ListRequest::default().page(3).page_size(10);
    let page = build_page(&EQUIPMENT, numbered(25), &request);

    assert_eq!(ids(page.items()), vec![21, 22, 23, 24, 25]);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.current_page, 3);
    assert_eq!(page.pagination.offset, 20);
    assert_eq!(page.page.page_number, 3);
    assert!(page.pagination.has_previous());
    assert!(!page.pagination.has_next());
    assert_eq!(page.pagination.first_item(), 21);
    assert_eq!(page.pagination.last_item(), 25);
}

#[test]
fn empty_input_yields_one_empty_page() {
    for requested in [-4, 0, 1, 2, 99] {
        let page = build_page(&EQUIPMENT, Vec::new(), &ListRequest::default().page(requested));
        assert!(page.items().is_empty());
        assert_eq!(page.pagination.total_items, 0);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.offset, 0);
        assert_eq!(page.pagination.first_item(), 0);
    }
}

#[test]
fn out_of_range_pages_are_clamped() {
    let high = build_page(&EQUIPMENT, numbered(25), &ListRequest::default().page(40));
    assert_eq!(high.pagination.current_page, 3);
    assert_eq!(ids(high.items()), vec![21, 22, 23, 24, 25]);

    let low = build_page(&EQUIPMENT, numbered(25), &ListRequest::default().page(-2));
    assert_eq!(low.pagination.current_page, 1);
    assert_eq!(ids(low.items()).first(), Some(&1));
}

#[test]
fn table_page_size_applies_unless_overridden() {
    let page = build_page(&EQUIPMENT, numbered(12), &ListRequest::default());
    assert_eq!(page.pagination.page_size, EQUIPMENT.page_size);
    assert_eq!(page.items().len(), 10);

    let zero = build_page(&EQUIPMENT, numbered(3), &ListRequest::default().page_size(0));
    assert_eq!(zero.pagination.page_size, 1);
    assert_eq!(zero.pagination.total_pages, 3);
}

#[test]
fn total_pages_formula_holds_across_sizes() {
    for total_items in 0..40_usize {
        for page_size in 1..12_usize {
            let expected = std::cmp::max(1, total_items.div_ceil(page_size));
            for requested in [-1_i64, 0, 1, 2, 5, 100] {
                let info = PaginationInfo::new(total_items, requested, page_size);
                assert_eq!(info.total_pages, expected);
                assert!(info.current_page >= 1 && info.current_page <= info.total_pages);
                assert_eq!(info.offset, (info.current_page - 1) * page_size);
            }
        }
    }
}

#[test]
fn pagination_counts_filtered_items() {
    let mut records = numbered(15);
    for record in records.iter_mut().skip(10) {
        record.set("type", "Serveur");
    }
    let request = ListRequest::default()
        .filter(FilterSpec::equals("type", "Serveur"))
        .page_size(2)
        .page(3);
    let page = build_page(&EQUIPMENT, records, &request);
    assert_eq!(page.pagination.total_items, 5);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(ids(page.items()), vec![15]);
}

#[test]
fn export_build_puts_everything_on_one_page() {
    let request = ListRequest::default().page(3).page_size(2);
    let export = build_export(&EQUIPMENT, numbered(7), &request);
    assert_eq!(export.items().len(), 7);
    assert_eq!(export.pagination.total_pages, 1);
    assert_eq!(export.pagination.current_page, 1);

    let empty = build_export(&EQUIPMENT, Vec::new(), &request);
    assert!(empty.items().is_empty());
    assert_eq!(empty.pagination.total_pages, 1);
}

#[test]
fn list_page_serializes_items_and_pagination() {
    let page = build_page(&EQUIPMENT, numbered(3), &ListRequest::default());
    let json = serde_json::to_value(&page).expect("json");
    assert_eq!(json["pagination"]["total_items"], 3);
    assert_eq!(json["pagination"]["current_page"], 1);
    assert_eq!(json["page"]["items"][0]["nom"], "Poste 01");
    assert_eq!(json["page"]["items"].as_array().map(Vec::len), Some(3));
}
