use super::*;
use crate::{
    build_page,
    test_support::{equipment, five_pieces, ids, EQUIPMENT},
    ListRequest,
};
use chrono::NaiveDate;

#[test]
fn equals_keeps_only_exact_matches_in_original_order() {
    let request = ListRequest::default().filter(FilterSpec::equals("type", "Serveur"));
    let page = build_page(&EQUIPMENT, five_pieces(), &request);
    assert_eq!(ids(page.items()), vec![1, 3]);
    assert_eq!(page.pagination.total_items, 2);
}

#[test]
fn equals_on_text_is_case_sensitive_and_not_a_substring_match() {
    let record = equipment(1, "Dell", "Serveur");
    assert!(!FilterSpec::equals("type", "serveur").matches(&record, FieldType::Text));
    assert!(!FilterSpec::equals("type", "Serv").matches(&record, FieldType::Text));
    assert!(FilterSpec::equals("type", " Serveur ").matches(&record, FieldType::Text));
}

#[test]
fn contains_is_case_insensitive_substring() {
    let record = equipment(1, "Microscope Électronique", "Mesure");
    assert!(FilterSpec::contains("nom", "scope").matches(&record, FieldType::Text));
    assert!(FilterSpec::contains("nom", "ÉLECTRO").matches(&record, FieldType::Text));
    assert!(!FilterSpec::contains("nom", "laser").matches(&record, FieldType::Text));
}

#[test]
fn equals_compares_numbers_numerically() {
    let record = equipment(1, "Baie", "Serveur").with("prix", 1500_i64);
    assert!(FilterSpec::equals("prix", "1500").matches(&record, FieldType::Number));
    assert!(FilterSpec::equals("prix", "1500.0").matches(&record, FieldType::Number));
    assert!(!FilterSpec::equals("prix", "150").matches(&record, FieldType::Number));

    let decimal = equipment(2, "Cable", "Divers").with("prix", 12.5_f64);
    assert!(FilterSpec::equals("prix", "12,5").matches(&decimal, FieldType::Number));
}

#[test]
fn equals_compares_dates_by_calendar_day() {
    let bought = NaiveDate::from_ymd_opt(2023, 9, 14).expect("date");
    let record = equipment(1, "Baie", "Serveur").with("date_achat", bought);
    assert!(FilterSpec::equals("date_achat", "2023-09-14").matches(&record, FieldType::Date));
    assert!(!FilterSpec::equals("date_achat", "2023-09-15").matches(&record, FieldType::Date));

    let timestamped = equipment(2, "Baie", "Serveur").with(
        "date_achat",
        bought.and_hms_opt(16, 45, 0).expect("time"),
    );
    assert!(FilterSpec::equals("date_achat", "2023-09-14").matches(&timestamped, FieldType::Date));
}

#[test]
fn null_or_missing_fields_never_match() {
    let record = equipment(1, "Baie", "Serveur");
    assert!(!FilterSpec::equals("prix", "0").matches(&record, FieldType::Number));
    assert!(!FilterSpec::contains("inconnu", "x").matches(&record, FieldType::Text));
}

#[test]
fn unknown_and_empty_filters_are_ignored() {
    let request = ListRequest::default()
        .filter(FilterSpec::equals("couleur", "rouge"))
        .filter(FilterSpec::equals("type", "   "))
        .filter(FilterSpec::contains("localisation", "zzz"));
    let page = build_page(&EQUIPMENT, five_pieces(), &request);
    // localisation is declared but not filterable, so it is dropped too.
    assert_eq!(page.pagination.total_items, 5);
}

#[test]
fn filters_combine_as_a_conjunction_regardless_of_order() {
    let mut records = five_pieces();
    records.push(equipment(6, "Serveur GPU", "Serveur"));
    records.push(equipment(7, "Serveur GPU", "Calcul"));

    let a = FilterSpec::equals("type", "Serveur");
    let b = FilterSpec::contains("nom", "serveur");
    let c = FilterSpec::contains("nom", "gpu");

    let orders = [
        vec![a.clone(), b.clone(), c.clone()],
        vec![c.clone(), b.clone(), a.clone()],
        vec![b.clone(), a.clone(), c.clone()],
    ];
    let mut results = Vec::new();
    for filters in orders {
        let request = ListRequest {
            filters,
            ..ListRequest::default()
        };
        results.push(ids(build_page(&EQUIPMENT, records.clone(), &request).items()));
    }
    assert_eq!(results[0], vec![6]);
    assert!(results.iter().all(|result| *result == results[0]));

    for (first, second) in [(&a, &b), (&a, &c), (&b, &c)] {
        let forward = ListRequest::default()
            .filter(first.clone())
            .filter(second.clone());
        let backward = ListRequest::default()
            .filter(second.clone())
            .filter(first.clone());
        assert_eq!(
            build_page(&EQUIPMENT, records.clone(), &forward),
            build_page(&EQUIPMENT, records.clone(), &backward)
        );
    }
}

#[test]
fn search_matches_any_searchable_column() {
    let mut records = five_pieces();
    records.push(equipment(6, "Centrifugeuse", "Mesure").with("localisation", "Local serveurs"));

    let request = ListRequest::default().search("serve");
    let page = build_page(&EQUIPMENT, records, &request);
    // "type" is not searchable, so only names and locations count.
    assert_eq!(ids(page.items()), vec![5, 6]);
}

#[test]
fn search_and_filters_are_combined() {
    let request = ListRequest::default()
        .search("dell")
        .filter(FilterSpec::equals("type", "Serveur"));
    let page = build_page(&EQUIPMENT, five_pieces(), &request);
    assert_eq!(ids(page.items()), vec![1]);

    let blank = ListRequest::default().search("  ");
    assert_eq!(build_page(&EQUIPMENT, five_pieces(), &blank).items().len(), 5);
}
