//! Static list-screen declarations for the public site and the back-office.

use listing::{Column, DefaultSort, FilterOp, TableDecl};
use serde::Serialize;
use shared::domain::EntityKind;

/// A list screen: which entity it reads and how its table behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub kind: EntityKind,
    pub table: TableDecl,
}

const PUBLIC_PAGE_SIZE: usize = 9;
const ADMIN_PAGE_SIZE: usize = 15;

pub const PUBLIC_PROJECTS: Screen = Screen {
    kind: EntityKind::Projects,
    table: TableDecl {
        name: "projets",
        title: "Projets de recherche",
        columns: &[
            Column::text("titre", "Titre").sortable().searchable(),
            Column::text("responsable", "Responsable")
                .filter(FilterOp::Contains)
                .searchable(),
            Column::text("thematique", "Thematique")
                .filter(FilterOp::Equals)
                .sortable(),
            Column::text("type_financement", "Financement").filter(FilterOp::Equals),
            Column::text("statut", "Statut").filter(FilterOp::Equals),
            Column::date("date_debut", "Debut").sortable(),
            Column::date("date_fin", "Fin").sortable(),
        ],
        default_sort: DefaultSort::desc("date_debut"),
        page_size: PUBLIC_PAGE_SIZE,
    },
};

pub const PUBLIC_PUBLICATIONS: Screen = Screen {
    kind: EntityKind::Publications,
    table: TableDecl {
        name: "publications",
        title: "Publications",
        columns: &[
            Column::text("titre", "Titre").sortable().searchable(),
            Column::text("auteurs", "Auteurs")
                .filter(FilterOp::Contains)
                .searchable(),
            Column::text("type", "Type").filter(FilterOp::Equals).sortable(),
            Column::number("annee", "Annee")
                .filter(FilterOp::Equals)
                .sortable(),
            Column::text("revue", "Revue").searchable(),
            Column::text("doi", "DOI"),
        ],
        default_sort: DefaultSort::desc("annee"),
        page_size: PUBLIC_PAGE_SIZE,
    },
};

pub const PUBLIC_TEAMS: Screen = Screen {
    kind: EntityKind::Teams,
    table: TableDecl {
        name: "equipes",
        title: "Equipes",
        columns: &[
            Column::text("nom", "Nom").sortable().searchable(),
            Column::text("responsable", "Responsable").searchable(),
            Column::text("domaine", "Domaine")
                .filter(FilterOp::Equals)
                .sortable(),
            Column::text("description", "Description").searchable(),
        ],
        default_sort: DefaultSort::asc("nom"),
        page_size: PUBLIC_PAGE_SIZE,
    },
};

pub const PUBLIC_MEMBERS: Screen = Screen {
    kind: EntityKind::Users,
    table: TableDecl {
        name: "membres",
        title: "Membres",
        columns: &[
            Column::text("nom", "Nom").sortable().searchable(),
            Column::text("prenom", "Prenom").sortable().searchable(),
            Column::text("grade", "Grade")
                .filter(FilterOp::Equals)
                .sortable(),
            Column::text("equipe", "Equipe")
                .filter(FilterOp::Equals)
                .sortable(),
        ],
        default_sort: DefaultSort::asc("nom"),
        page_size: 12,
    },
};

pub const PUBLIC_EVENTS: Screen = Screen {
    kind: EntityKind::Events,
    table: TableDecl {
        name: "evenements",
        title: "Evenements",
        columns: &[
            Column::text("titre", "Titre").sortable().searchable(),
            Column::text("type", "Type").filter(FilterOp::Equals).sortable(),
            Column::text("lieu", "Lieu").filter(FilterOp::Contains),
            Column::date("date_event", "Date")
                .filter(FilterOp::Equals)
                .sortable(),
        ],
        default_sort: DefaultSort::desc("date_event"),
        page_size: PUBLIC_PAGE_SIZE,
    },
};

pub const PUBLIC_NEWS: Screen = Screen {
    kind: EntityKind::News,
    table: TableDecl {
        name: "actualites",
        title: "Actualites",
        columns: &[
            Column::text("titre", "Titre").sortable().searchable(),
            Column::text("resume", "Resume").searchable(),
            Column::text("auteur", "Auteur").filter(FilterOp::Equals),
            Column::date("date_publication", "Publiee le").sortable(),
        ],
        default_sort: DefaultSort::desc("date_publication"),
        page_size: 6,
    },
};

pub const ADMIN_USERS: Screen = Screen {
    kind: EntityKind::Users,
    table: TableDecl {
        name: "utilisateurs",
        title: "Gestion des utilisateurs",
        columns: &[
            Column::number("id", "ID").sortable(),
            Column::text("nom", "Nom").sortable().searchable(),
            Column::text("prenom", "Prenom").sortable().searchable(),
            Column::text("email", "Email").searchable(),
            Column::text("role", "Role").filter(FilterOp::Equals).sortable(),
            Column::text("grade", "Grade").filter(FilterOp::Equals),
            Column::text("equipe", "Equipe").filter(FilterOp::Equals).sortable(),
            Column::date("date_inscription", "Inscription").sortable(),
            Column::actions(),
        ],
        default_sort: DefaultSort::asc("nom"),
        page_size: ADMIN_PAGE_SIZE,
    },
};

pub const ADMIN_TEAMS: Screen = Screen {
    kind: EntityKind::Teams,
    table: TableDecl {
        name: "equipes_admin",
        title: "Gestion des equipes",
        columns: &[
            Column::number("id", "ID").sortable(),
            Column::text("nom", "Nom").sortable().searchable(),
            Column::text("responsable", "Responsable")
                .filter(FilterOp::Contains)
                .searchable(),
            Column::text("domaine", "Domaine").filter(FilterOp::Equals).sortable(),
            Column::date("created_at", "Creee le").sortable(),
            Column::actions(),
        ],
        default_sort: DefaultSort::asc("nom"),
        page_size: ADMIN_PAGE_SIZE,
    },
};

pub const ADMIN_PROJECTS: Screen = Screen {
    kind: EntityKind::Projects,
    table: TableDecl {
        name: "projets_admin",
        title: "Gestion des projets",
        columns: &[
            Column::number("id", "ID").sortable(),
            Column::text("titre", "Titre").sortable().searchable(),
            Column::text("responsable", "Responsable")
                .filter(FilterOp::Contains)
                .sortable()
                .searchable(),
            Column::text("thematique", "Thematique").filter(FilterOp::Equals),
            Column::text("type_financement", "Financement").filter(FilterOp::Equals),
            Column::text("statut", "Statut").filter(FilterOp::Equals).sortable(),
            Column::date("date_debut", "Debut").sortable(),
            Column::date("date_fin", "Fin").sortable(),
            Column::number("budget", "Budget").sortable(),
            Column::actions(),
        ],
        default_sort: DefaultSort::desc("date_debut"),
        page_size: ADMIN_PAGE_SIZE,
    },
};

pub const ADMIN_EQUIPMENT: Screen = Screen {
    kind: EntityKind::Equipment,
    table: TableDecl {
        name: "equipements",
        title: "Gestion des equipements",
        columns: &[
            Column::number("id", "ID").sortable(),
            Column::text("nom", "Nom").sortable().searchable(),
            Column::text("type", "Type").filter(FilterOp::Equals).sortable(),
            Column::text("etat", "Etat").filter(FilterOp::Equals).sortable(),
            Column::text("localisation", "Localisation")
                .filter(FilterOp::Contains)
                .searchable(),
            Column::number("prix", "Prix").sortable(),
            Column::date("date_achat", "Date d'achat").sortable(),
            Column::actions(),
        ],
        default_sort: DefaultSort::asc("nom"),
        page_size: ADMIN_PAGE_SIZE,
    },
};

pub const ADMIN_PUBLICATIONS: Screen = Screen {
    kind: EntityKind::Publications,
    table: TableDecl {
        name: "publications_admin",
        title: "Gestion des publications",
        columns: &[
            Column::number("id", "ID").sortable(),
            Column::text("titre", "Titre").sortable().searchable(),
            Column::text("auteurs", "Auteurs")
                .filter(FilterOp::Contains)
                .searchable(),
            Column::text("type", "Type").filter(FilterOp::Equals).sortable(),
            Column::number("annee", "Annee").filter(FilterOp::Equals).sortable(),
            Column::text("revue", "Revue").searchable(),
            Column::text("doi", "DOI"),
            Column::actions(),
        ],
        default_sort: DefaultSort::desc("annee"),
        page_size: ADMIN_PAGE_SIZE,
    },
};

pub const ADMIN_EVENTS: Screen = Screen {
    kind: EntityKind::Events,
    table: TableDecl {
        name: "evenements_admin",
        title: "Gestion des evenements",
        columns: &[
            Column::number("id", "ID").sortable(),
            Column::text("titre", "Titre").sortable().searchable(),
            Column::text("type", "Type").filter(FilterOp::Equals).sortable(),
            Column::text("lieu", "Lieu").filter(FilterOp::Contains).searchable(),
            Column::date("date_event", "Date").filter(FilterOp::Equals).sortable(),
            Column::text("description", "Description").no_export(),
            Column::actions(),
        ],
        default_sort: DefaultSort::desc("date_event"),
        page_size: ADMIN_PAGE_SIZE,
    },
};

pub const ADMIN_NOTIFICATIONS: Screen = Screen {
    kind: EntityKind::Notifications,
    table: TableDecl {
        name: "notifications",
        title: "Notifications",
        columns: &[
            Column::number("id", "ID").sortable(),
            Column::text("titre", "Titre").sortable().searchable(),
            Column::text("message", "Message").searchable(),
            Column::text("destinataire", "Destinataire")
                .filter(FilterOp::Equals)
                .sortable(),
            Column::number("lu", "Lu").filter(FilterOp::Equals),
            Column::date("created_at", "Envoyee le").sortable(),
            Column::actions(),
        ],
        default_sort: DefaultSort::desc("created_at"),
        page_size: ADMIN_PAGE_SIZE,
    },
};

pub const ALL_SCREENS: [&Screen; 13] = [
    &PUBLIC_PROJECTS,
    &PUBLIC_PUBLICATIONS,
    &PUBLIC_TEAMS,
    &PUBLIC_MEMBERS,
    &PUBLIC_EVENTS,
    &PUBLIC_NEWS,
    &ADMIN_USERS,
    &ADMIN_TEAMS,
    &ADMIN_PROJECTS,
    &ADMIN_EQUIPMENT,
    &ADMIN_PUBLICATIONS,
    &ADMIN_EVENTS,
    &ADMIN_NOTIFICATIONS,
];

pub fn screen_by_name(name: &str) -> Option<&'static Screen> {
    ALL_SCREENS
        .into_iter()
        .find(|screen| screen.table.name.eq_ignore_ascii_case(name.trim()))
}
