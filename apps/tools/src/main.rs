use std::io;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use listing::{build_export, write_csv, FilterSpec, ListRequest, SortSpec};
use routing::Route;
use server_api::{
    routes::{route_table, Page},
    tables,
};
use shared::domain::{EntityKind, EntityRecord, RecordId};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://./data/labportal.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inserts a small demo laboratory.
    Seed,
    Count {
        kind: EntityKind,
    },
    /// Writes a list screen as CSV to stdout.
    Export {
        screen: String,
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        desc: bool,
        #[arg(long)]
        search: Option<String>,
    },
    /// Prints the route table in match order.
    Routes,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected field=value, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Routes = cli.command {
        let table = route_table()?;
        for route in table.routes() {
            println!("{}", route_line(route));
        }
        return Ok(());
    }

    let storage = Storage::new(&cli.database_url).await?;
    match cli.command {
        Command::Seed => {
            let inserted = seed(&storage).await?;
            println!("seeded {inserted} records");
        }
        Command::Count { kind } => {
            println!("{kind}: {}", storage.count(kind).await?);
        }
        Command::Export {
            screen,
            filters,
            sort,
            desc,
            search,
        } => {
            let Some(screen) = tables::screen_by_name(&screen) else {
                let known: Vec<&str> = tables::ALL_SCREENS
                    .iter()
                    .map(|screen| screen.table.name)
                    .collect();
                bail!("unknown screen '{screen}', expected one of: {}", known.join(", "));
            };

            let mut request = ListRequest::default();
            for (field, value) in filters {
                let Some(op) = screen.table.column(&field).and_then(|column| column.filter) else {
                    bail!("'{field}' is not a filterable column of {}", screen.table.name);
                };
                request = request.filter(FilterSpec::new(field, op, value));
            }
            if let Some(field) = sort {
                request = request.sort(if desc {
                    SortSpec::desc(field)
                } else {
                    SortSpec::asc(field)
                });
            }
            if let Some(search) = search {
                request = request.search(search);
            }

            let records = storage.fetch_all(screen.kind).await?;
            let export = build_export(&screen.table, records, &request);
            write_csv(&screen.table, export.items(), io::stdout().lock())
                .context("failed to write csv")?;
        }
        Command::Routes => {}
    }

    Ok(())
}

/// Method, pattern, whether it captures, and the page it resolves to.
fn route_line(route: &Route<Page>) -> String {
    let shape = if route.pattern.is_literal() {
        "static"
    } else {
        "capture"
    };
    format!(
        "{:<5} {:<28} {:<8} {:?}",
        route.method.as_str(),
        route.pattern.as_str(),
        shape,
        route.handler
    )
}

struct Seeder<'a> {
    storage: &'a Storage,
    inserted: usize,
}

impl Seeder<'_> {
    async fn insert(&mut self, kind: EntityKind, record: EntityRecord) -> Result<RecordId> {
        let id = self.storage.insert_record(kind, &record).await?;
        self.inserted += 1;
        Ok(id)
    }
}

async fn seed(storage: &Storage) -> Result<usize> {
    let mut seeder = Seeder {
        storage,
        inserted: 0,
    };

    let vision = seeder.insert(
        EntityKind::Teams,
        EntityRecord::new()
            .with("nom", "Vision par ordinateur")
            .with("responsable", "Claire Martin")
            .with("domaine", "Intelligence artificielle"),
    )
    .await?;
    let reseaux = seeder.insert(
        EntityKind::Teams,
        EntityRecord::new()
            .with("nom", "Reseaux et systemes")
            .with("responsable", "Karim Benali")
            .with("domaine", "Systemes distribues"),
    )
    .await?;

    for (nom, prenom, email, grade, team) in [
        ("Martin", "Claire", "claire.martin@labo.example", "Professeur", vision),
        ("Benali", "Karim", "karim.benali@labo.example", "Maitre de conferences", reseaux),
        ("Ecoffier", "Lea", "lea.ecoffier@labo.example", "Doctorant", vision),
    ] {
        seeder.insert(
            EntityKind::Users,
            EntityRecord::new()
                .with("nom", nom)
                .with("prenom", prenom)
                .with("email", email)
                .with("grade", grade)
                .with("team_id", team.0)
                .with("date_inscription", date(2023, 9, 1)?),
        )
        .await?;
    }

    for (titre, responsable, statut, debut, budget) in [
        ("Robotique souple", "Claire Martin", "en cours", date(2023, 1, 15)?, 120_000.0),
        ("Reseaux maillés resilients", "Karim Benali", "termine", date(2021, 3, 1)?, 85_500.0),
        ("Imagerie medicale", "Lea Ecoffier", "soumis", date(2024, 6, 10)?, 40_000.0),
    ] {
        seeder.insert(
            EntityKind::Projects,
            EntityRecord::new()
                .with("titre", titre)
                .with("responsable", responsable)
                .with("thematique", "IA")
                .with("type_financement", "ANR")
                .with("statut", statut)
                .with("date_debut", debut)
                .with("budget", budget),
        )
        .await?;
    }

    for (titre, auteurs, annee) in [
        ("Segmentation semi-supervisee", "C. Martin, L. Ecoffier", 2023_i64),
        ("Routage tolerant aux pannes", "K. Benali", 2022),
    ] {
        seeder.insert(
            EntityKind::Publications,
            EntityRecord::new()
                .with("titre", titre)
                .with("auteurs", auteurs)
                .with("type", "article")
                .with("annee", annee)
                .with("revue", "Revue francaise d'informatique"),
        )
        .await?;
    }

    for (nom, kind, localisation, prix) in [
        ("Dell R740", "Serveur", "Salle serveurs", 8_200.0),
        ("Oscilloscope Rigol", "Mesure", "Salle B12", 1_249.5),
        ("Baie, rack 42U", "Serveur", "Salle serveurs", 2_300.0),
        ("Poste graphique", "Poste", "Bureau 204", 3_100.0),
    ] {
        seeder.insert(
            EntityKind::Equipment,
            EntityRecord::new()
                .with("nom", nom)
                .with("type", kind)
                .with("localisation", localisation)
                .with("prix", prix)
                .with("date_achat", date(2022, 11, 3)?),
        )
        .await?;
    }

    seeder.insert(
        EntityKind::Events,
        EntityRecord::new()
            .with("titre", "Seminaire doctoral")
            .with("type", "seminaire")
            .with("lieu", "Amphi A")
            .with("date_event", date(2024, 11, 20)?.and_hms_opt(14, 0, 0)),
    )
    .await?;
    seeder.insert(
        EntityKind::News,
        EntityRecord::new()
            .with("titre", "Nouveau financement ANR")
            .with("resume", "Le projet Robotique souple est finance.")
            .with("auteur", "Claire Martin")
            .with("date_publication", date(2024, 2, 5)?),
    )
    .await?;
    seeder.insert(
        EntityKind::Notifications,
        EntityRecord::new()
            .with("titre", "Bienvenue")
            .with("message", "Votre compte est actif.")
            .with("destinataire", "lea.ecoffier@labo.example")
            .with("lu", 0_i64),
    )
    .await?;

    Ok(seeder.inserted)
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
