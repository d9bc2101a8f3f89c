use routing::{PatternError, RouteTable};
use shared::domain::EntityKind;

use crate::tables::{
    Screen, ADMIN_EQUIPMENT, ADMIN_EVENTS, ADMIN_NOTIFICATIONS, ADMIN_PROJECTS,
    ADMIN_PUBLICATIONS, ADMIN_TEAMS, ADMIN_USERS, PUBLIC_EVENTS, PUBLIC_MEMBERS, PUBLIC_NEWS,
    PUBLIC_PROJECTS, PUBLIC_PUBLICATIONS, PUBLIC_TEAMS,
};

/// Every action the portal can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    ProjectList,
    ProjectDetail,
    PublicationList,
    TeamList,
    TeamDetail,
    MemberList,
    MemberDetail,
    EventList,
    NewsList,
    ContactInfo,
    ContactSubmit,
    AdminDashboard,
    AdminUsers,
    AdminTeams,
    AdminProjects,
    AdminProjectForm,
    AdminProjectDetail,
    AdminEquipment,
    AdminPublications,
    AdminEvents,
    AdminNotifications,
}

impl Page {
    /// The list screen this page renders, if it is a list.
    pub fn screen(self) -> Option<&'static Screen> {
        let screen = match self {
            Page::ProjectList => &PUBLIC_PROJECTS,
            Page::PublicationList => &PUBLIC_PUBLICATIONS,
            Page::TeamList => &PUBLIC_TEAMS,
            Page::MemberList => &PUBLIC_MEMBERS,
            Page::EventList => &PUBLIC_EVENTS,
            Page::NewsList => &PUBLIC_NEWS,
            Page::AdminUsers => &ADMIN_USERS,
            Page::AdminTeams => &ADMIN_TEAMS,
            Page::AdminProjects => &ADMIN_PROJECTS,
            Page::AdminEquipment => &ADMIN_EQUIPMENT,
            Page::AdminPublications => &ADMIN_PUBLICATIONS,
            Page::AdminEvents => &ADMIN_EVENTS,
            Page::AdminNotifications => &ADMIN_NOTIFICATIONS,
            _ => return None,
        };
        Some(screen)
    }

    /// Entity shown by a `{id}` detail page.
    pub fn detail_kind(self) -> Option<EntityKind> {
        match self {
            Page::ProjectDetail | Page::AdminProjectDetail => Some(EntityKind::Projects),
            Page::TeamDetail => Some(EntityKind::Teams),
            Page::MemberDetail => Some(EntityKind::Users),
            _ => None,
        }
    }
}

/// Declaration order matters: a literal route must come before a capture
/// route that overlaps it (`/admin/projets/form` before `/admin/projets/{id}`).
pub fn route_table() -> Result<RouteTable<Page>, PatternError> {
    RouteTable::new()
        .get("/", Page::Home)?
        .get("/projets", Page::ProjectList)?
        .get("/projets/{id}", Page::ProjectDetail)?
        .get("/publications", Page::PublicationList)?
        .get("/equipes", Page::TeamList)?
        .get("/equipes/{id}", Page::TeamDetail)?
        .get("/membres", Page::MemberList)?
        .get("/membres/{id}", Page::MemberDetail)?
        .get("/evenements", Page::EventList)?
        .get("/actualites", Page::NewsList)?
        .get("/contact", Page::ContactInfo)?
        .post("/contact/envoyer", Page::ContactSubmit)?
        .get("/admin", Page::AdminDashboard)?
        .get("/admin/utilisateurs", Page::AdminUsers)?
        .get("/admin/equipes", Page::AdminTeams)?
        .get("/admin/projets", Page::AdminProjects)?
        .get("/admin/projets/form", Page::AdminProjectForm)?
        .get("/admin/projets/{id}", Page::AdminProjectDetail)?
        .get("/admin/equipements", Page::AdminEquipment)?
        .get("/admin/publications", Page::AdminPublications)?
        .get("/admin/evenements", Page::AdminEvents)?
        .get("/admin/notifications", Page::AdminNotifications)
}

#[cfg(test)]
#[path = "tests/routes_tests.rs"]
mod tests;
