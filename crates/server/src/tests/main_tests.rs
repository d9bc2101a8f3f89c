use super::*;
use axum::{body, body::Body, http::Request};
use shared::{domain::EntityKind, protocol::ContactInfo};
use tower::ServiceExt;

async fn test_app_at(base_path: &str) -> (Router, Storage) {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    for (nom, kind) in [
        ("Dell R740", "Serveur"),
        ("Oscilloscope", "Mesure"),
        ("Baie \"A\", rack 42U", "Serveur"),
        ("Poste graphique", "Poste"),
    ] {
        storage
            .insert_record(
                EntityKind::Equipment,
                &EntityRecord::new().with("nom", nom).with("type", kind),
            )
            .await
            .expect("equipment");
    }

    let api = ApiContext {
        storage,
        contact: ContactInfo {
            laboratory: "Laboratoire".into(),
            email: "contact@labo.fr".into(),
            address: "1 rue des Sciences".into(),
        },
    };
    let app = build_router(
        Arc::new(AppState {
            api: api.clone(),
            routes: Arc::new(route_table().expect("routes")),
            base_path: base_path.to_string(),
            default_page_size: None,
        }),
        16 * 1024,
    );
    (app, api.storage)
}

async fn test_app() -> (Router, Storage) {
    test_app_at("").await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, headers, body)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

fn contact_request(method: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/contact/envoyer")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("accept", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn healthz_reports_ok_when_storage_is_ready() {
    let (app, _storage) = test_app().await;
    let (status, _, body) = send(&app, get_request("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn unknown_route_is_a_json_not_found() {
    let (app, _storage) = test_app().await;
    let (status, _, body) = send(&app, get_request("/inconnu")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let err: ApiError = serde_json::from_slice(&body).expect("json");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn contact_submission_is_post_only() {
    let (app, _storage) = test_app().await;

    let (status, _, _) = send(&app, get_request("/contact/envoyer")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(
        &app,
        contact_request(
            "POST",
            "nom=Jeanne&email=jeanne%40example.org&sujet=Visite&message=Bonjour",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ack: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(ack["status"], "ok");
}

#[tokio::test]
async fn invalid_contact_submission_is_rejected() {
    let (app, _storage) = test_app().await;
    let (status, _, body) = send(
        &app,
        contact_request("POST", "nom=Jeanne&email=pas-un-email&sujet=Visite&message=Bonjour"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: ApiError = serde_json::from_slice(&body).expect("json");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn csv_export_is_an_attachment_with_every_matching_row() {
    let (app, _storage) = test_app().await;
    let (status, headers, body) = send(
        &app,
        get_request("/admin/equipements?type=Serveur&page_size=1&export=csv"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    let disposition = headers[header::CONTENT_DISPOSITION]
        .to_str()
        .expect("disposition");
    assert!(disposition.starts_with("attachment; filename=\"equipements_"));
    assert!(disposition.ends_with(".csv\""));

    let text = String::from_utf8(body.to_vec()).expect("utf8");
    let lines: Vec<&str> = text.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ID,Nom,Type,Etat,Localisation,Prix,Date d'achat");
    assert!(lines[1].contains("\"Baie \"\"A\"\", rack 42U\""));
    assert!(lines[2].contains("Dell R740"));
    assert!(!text.contains("Actions"));
}

#[tokio::test]
async fn json_list_reports_pagination() {
    let (app, _storage) = test_app().await;
    let (status, _, body) = send(
        &app,
        get_request("/admin/equipements?format=json&page_size=3&page=9"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let list: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(list["screen"], "equipements");
    assert_eq!(list["total_items"], 4);
    assert_eq!(list["total_pages"], 2);
    assert_eq!(list["current_page"], 2);
    assert_eq!(list["items"].as_array().expect("items").len(), 1);
    assert_eq!(list["items"][0]["nom"], "Poste graphique");
}

#[tokio::test]
async fn empty_list_is_one_empty_page() {
    let (app, _storage) = test_app().await;
    let request = Request::get("/actualites/")
        .header("accept", "application/json")
        .body(Body::empty())
        .expect("request");
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let list: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(list["items"], serde_json::json!([]));
    assert_eq!(list["total_pages"], 1);
    assert_eq!(list["current_page"], 1);
}

#[tokio::test]
async fn html_list_escapes_values() {
    let (app, _storage) = test_app().await;
    let (status, headers, body) = send(&app, get_request("/admin/equipements?type=Serveur")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .expect("content type")
        .starts_with("text/html"));
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains("Baie &quot;A&quot;, rack 42U"));
    assert!(!html.contains("Oscilloscope"));
}

#[tokio::test]
async fn project_form_is_not_shadowed_by_detail_route() {
    let (app, storage) = test_app().await;
    let (status, _, body) = send(&app, get_request("/admin/projets/form?format=json")).await;
    assert_eq!(status, StatusCode::OK);
    let form: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(form["kind"], "projects");

    let id = storage
        .insert_record(
            EntityKind::Projects,
            &EntityRecord::new().with("titre", "Robotique souple"),
        )
        .await
        .expect("project");
    let (status, _, body) = send(
        &app,
        get_request(&format!("/admin/projets/{}?format=json", id.0)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let record: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(record["titre"], "Robotique souple");

    let (status, _, _) = send(&app, get_request("/admin/projets/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_counts_records() {
    let (app, _storage) = test_app().await;
    let (status, _, body) = send(&app, get_request("/admin?format=json")).await;
    assert_eq!(status, StatusCode::OK);
    let summary: serde_json::Value = serde_json::from_slice(&body).expect("json");
    let equipment = summary["counts"]
        .as_array()
        .expect("counts")
        .iter()
        .find(|entry| entry["kind"] == "equipment")
        .expect("equipment entry")
        .clone();
    assert_eq!(equipment["count"], 4);
}

#[tokio::test]
async fn base_path_prefixes_every_route() {
    let (app, _storage) = test_app_at("/labo").await;

    let (status, _, _) = send(&app, get_request("/labo/contact")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = send(&app, get_request("/labo")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = send(&app, get_request("/contact")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, get_request("/laboratoire/contact")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_member_list_exposes_only_declared_columns() {
    let (app, storage) = test_app().await;
    storage
        .insert_record(
            EntityKind::Users,
            &EntityRecord::new()
                .with("nom", "Martin")
                .with("prenom", "Claire")
                .with("email", "claire.private@labo.example")
                .with("role", "admin")
                .with("grade", "Professeur"),
        )
        .await
        .expect("user");

    let (status, _, body) = send(&app, get_request("/membres?format=json")).await;
    assert_eq!(status, StatusCode::OK);
    let list: serde_json::Value = serde_json::from_slice(&body).expect("json");
    let member = list["items"][0].as_object().expect("member");
    let keys: Vec<&str> = member.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    for key in ["nom", "prenom", "grade", "equipe"] {
        assert!(member.contains_key(key), "missing {key}");
    }
    assert!(!member.contains_key("email"));
    assert!(!member.contains_key("role"));
    assert!(!String::from_utf8_lossy(&body).contains("claire.private"));
}

#[tokio::test]
async fn oversized_page_number_lands_on_the_last_page() {
    let (app, _storage) = test_app().await;
    let (status, _, body) = send(
        &app,
        get_request("/admin/equipements?format=json&page_size=3&page=99999999999999999999"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(list["current_page"], 2);
    assert_eq!(list["items"][0]["nom"], "Poste graphique");
}
