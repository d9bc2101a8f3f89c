use shared::domain::EntityRecord;

use crate::{Column, DefaultSort, FilterOp, TableDecl};

pub(crate) const EQUIPMENT: TableDecl = TableDecl {
    name: "equipements",
    title: "Equipements",
    columns: &[
        Column::number("id", "ID").sortable(),
        Column::text("nom", "Nom")
            .filter(FilterOp::Contains)
            .sortable()
            .searchable(),
        Column::text("type", "Type").filter(FilterOp::Equals).sortable(),
        Column::text("etat", "Etat").filter(FilterOp::Equals),
        Column::text("localisation", "Localisation").searchable(),
        Column::number("prix", "Prix").filter(FilterOp::Equals).sortable(),
        Column::date("date_achat", "Date d'achat")
            .filter(FilterOp::Equals)
            .sortable(),
        Column::text("note_interne", "Note interne").no_export(),
        Column::actions(),
    ],
    default_sort: None,
    page_size: 10,
};

pub(crate) const EQUIPMENT_BY_NAME: TableDecl = TableDecl {
    default_sort: DefaultSort::asc("nom"),
    ..EQUIPMENT
};

pub(crate) fn equipment(id: i64, nom: &str, kind: &str) -> EntityRecord {
    EntityRecord::new()
        .with("id", id)
        .with("nom", nom)
        .with("type", kind)
        .with("etat", "disponible")
        .with("localisation", "Salle B12")
}

/// Scenario fixture: two servers among five pieces of equipment.
pub(crate) fn five_pieces() -> Vec<EntityRecord> {
    vec![
        equipment(1, "Dell R740", "Serveur"),
        equipment(2, "Oscilloscope", "Mesure"),
        equipment(3, "HP ProLiant", "Serveur"),
        equipment(4, "Imprimante 3D", "Fabrication"),
        equipment(5, "Serveur de fichiers portable", "Stockage"),
    ]
}

pub(crate) fn numbered(count: i64) -> Vec<EntityRecord> {
    (1..=count)
        .map(|id| equipment(id, &format!("Poste {id:02}"), "Poste"))
        .collect()
}

pub(crate) fn ids(records: &[EntityRecord]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|record| record.id().map(|id| id.0))
        .collect()
}
