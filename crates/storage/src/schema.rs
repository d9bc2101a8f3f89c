use shared::domain::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnType {
    Integer,
    Real,
    Text,
    Date,
    Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnDef {
    pub(crate) name: &'static str,
    pub(crate) column_type: ColumnType,
    /// False for `id` and for values joined in from another table.
    pub(crate) writable: bool,
}

const fn col(name: &'static str, column_type: ColumnType) -> ColumnDef {
    ColumnDef {
        name,
        column_type,
        writable: true,
    }
}

const fn read_only(name: &'static str, column_type: ColumnType) -> ColumnDef {
    ColumnDef {
        name,
        column_type,
        writable: false,
    }
}

/// Row layout of one entity: the base table and the SELECT that produces
/// the columns in `columns` order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EntitySchema {
    pub(crate) table: &'static str,
    pub(crate) select: &'static str,
    pub(crate) id_column: &'static str,
    pub(crate) columns: &'static [ColumnDef],
}

impl EntitySchema {
    pub(crate) fn writable(&self, field: &str) -> Option<&ColumnDef> {
        self.columns
            .iter()
            .find(|column| column.writable && column.name == field)
    }
}

use ColumnType::{Date, Integer, Real, Text, Timestamp};

const TEAMS: EntitySchema = EntitySchema {
    table: "teams",
    select: "SELECT id, nom, description, responsable, domaine, created_at FROM teams",
    id_column: "id",
    columns: &[
        read_only("id", Integer),
        col("nom", Text),
        col("description", Text),
        col("responsable", Text),
        col("domaine", Text),
        col("created_at", Timestamp),
    ],
};

const USERS: EntitySchema = EntitySchema {
    table: "users",
    select: "SELECT u.id, u.nom, u.prenom, u.email, u.role, u.grade, u.team_id, t.nom AS equipe, u.date_inscription
             FROM users u
             LEFT JOIN teams t ON t.id = u.team_id",
    id_column: "u.id",
    columns: &[
        read_only("id", Integer),
        col("nom", Text),
        col("prenom", Text),
        col("email", Text),
        col("role", Text),
        col("grade", Text),
        col("team_id", Integer),
        read_only("equipe", Text),
        col("date_inscription", Date),
    ],
};

const PROJECTS: EntitySchema = EntitySchema {
    table: "projects",
    select: "SELECT id, titre, responsable, thematique, type_financement, statut, date_debut, date_fin, budget FROM projects",
    id_column: "id",
    columns: &[
        read_only("id", Integer),
        col("titre", Text),
        col("responsable", Text),
        col("thematique", Text),
        col("type_financement", Text),
        col("statut", Text),
        col("date_debut", Date),
        col("date_fin", Date),
        col("budget", Real),
    ],
};

const PUBLICATIONS: EntitySchema = EntitySchema {
    table: "publications",
    select: "SELECT id, titre, auteurs, type, annee, revue, doi FROM publications",
    id_column: "id",
    columns: &[
        read_only("id", Integer),
        col("titre", Text),
        col("auteurs", Text),
        col("type", Text),
        col("annee", Integer),
        col("revue", Text),
        col("doi", Text),
    ],
};

const EQUIPMENT: EntitySchema = EntitySchema {
    table: "equipment",
    select: "SELECT id, nom, type, etat, localisation, prix, date_achat FROM equipment",
    id_column: "id",
    columns: &[
        read_only("id", Integer),
        col("nom", Text),
        col("type", Text),
        col("etat", Text),
        col("localisation", Text),
        col("prix", Real),
        col("date_achat", Date),
    ],
};

const EVENTS: EntitySchema = EntitySchema {
    table: "events",
    select: "SELECT id, titre, type, lieu, date_event, description FROM events",
    id_column: "id",
    columns: &[
        read_only("id", Integer),
        col("titre", Text),
        col("type", Text),
        col("lieu", Text),
        col("date_event", Timestamp),
        col("description", Text),
    ],
};

const NEWS: EntitySchema = EntitySchema {
    table: "news",
    select: "SELECT id, titre, resume, auteur, date_publication FROM news",
    id_column: "id",
    columns: &[
        read_only("id", Integer),
        col("titre", Text),
        col("resume", Text),
        col("auteur", Text),
        col("date_publication", Date),
    ],
};

const NOTIFICATIONS: EntitySchema = EntitySchema {
    table: "notifications",
    select: "SELECT id, titre, message, destinataire, lu, created_at FROM notifications",
    id_column: "id",
    columns: &[
        read_only("id", Integer),
        col("titre", Text),
        col("message", Text),
        col("destinataire", Text),
        col("lu", Integer),
        col("created_at", Timestamp),
    ],
};

pub(crate) fn schema_for(kind: EntityKind) -> &'static EntitySchema {
    match kind {
        EntityKind::Users => &USERS,
        EntityKind::Teams => &TEAMS,
        EntityKind::Projects => &PROJECTS,
        EntityKind::Publications => &PUBLICATIONS,
        EntityKind::Equipment => &EQUIPMENT,
        EntityKind::Events => &EVENTS,
        EntityKind::News => &NEWS,
        EntityKind::Notifications => &NOTIFICATIONS,
    }
}
