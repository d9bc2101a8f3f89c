use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use listing::{ListPage, PaginationInfo};
use routing::{MatchResult, RouteParams};
use serde::Serialize;
use server_api::{
    dashboard, export_screen, list_screen, project_form, query::QueryParams, record_detail,
    routes::{route_table, Page},
    submit_contact,
    tables::Screen,
    ApiContext,
};
use shared::{
    domain::{EntityRecord, RecordId},
    error::{ApiError, ErrorCode},
    protocol::ContactForm,
};
use storage::Storage;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod render;

use app_state::AppState;
use config::{load_settings, prepare_database_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Html,
    Json,
}

impl Format {
    fn negotiate(query: &QueryParams, headers: &HeaderMap) -> Self {
        let accepts_json = headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        if query.wants_json() || accepts_json {
            Format::Json
        } else {
            Format::Html
        }
    }
}

#[derive(Debug, Serialize)]
struct ListBody<'a> {
    screen: &'static str,
    title: &'static str,
    items: Vec<EntityRecord>,
    #[serde(flatten)]
    pagination: &'a PaginationInfo,
}

type HandlerResult = Result<Response, ApiError>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url)
        .await
        .map_err(|error| {
            error!(
                %database_url,
                %error,
                "failed to open SQLite database; verify parent directory exists and permissions are correct"
            );
            error
        })?
        .with_row_limit(settings.max_records);

    let routes = route_table().context("invalid route table")?;
    info!(routes = routes.len(), base_path = %settings.base_path, "route table ready");

    let state = AppState {
        api: ApiContext {
            storage,
            contact: settings.contact_info(),
        },
        routes: Arc::new(routes),
        base_path: settings.base_path.clone(),
        default_page_size: settings.default_page_size,
    };
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .fallback(dispatch)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Response {
    match state.api.storage.health_check().await {
        Ok(()) => "ok".into_response(),
        Err(err) => {
            error!(%err, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable").into_response()
        }
    }
}

/// Every portal request goes through the typed route table; axum only hosts it.
async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(path) = state.local_path(uri.path()) else {
        debug!(path = uri.path(), "request outside base path");
        return error_response(ApiError::not_found(format!("no route for {}", uri.path())));
    };

    let (page, params) = match state.routes.dispatch(method.as_str(), path) {
        MatchResult::Matched { handler, params } => (*handler, params),
        MatchResult::NotFound => {
            debug!(%method, path, "no matching route");
            return error_response(ApiError::not_found(format!("no route for {method} {path}")));
        }
    };

    let mut query = QueryParams::parse(uri.query().unwrap_or_default());
    if let Some(page_size) = state.default_page_size {
        query = query.with_default("page_size", page_size.to_string());
    }
    let format = Format::negotiate(&query, &headers);

    let result = match page.screen() {
        Some(screen) => list_action(&state, screen, &query, format).await,
        None => page_action(&state, page, &params, format, &headers, &body).await,
    };
    result.unwrap_or_else(error_response)
}

async fn list_action(
    state: &AppState,
    screen: &'static Screen,
    query: &QueryParams,
    format: Format,
) -> HandlerResult {
    if query.wants_csv() {
        let export = export_screen(&state.api.storage, screen, query).await?;
        let disposition = format!("attachment; filename=\"{}\"", export.filename);
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            export.body,
        )
            .into_response());
    }

    let page: ListPage = list_screen(&state.api.storage, screen, query).await?;
    Ok(match format {
        Format::Json => Json(ListBody {
            screen: screen.table.name,
            title: screen.table.title,
            items: page
                .items()
                .iter()
                .map(|record| screen.table.project(record))
                .collect(),
            pagination: &page.pagination,
        })
        .into_response(),
        Format::Html => Html(render::list_page(screen, &page, query)).into_response(),
    })
}

async fn page_action(
    state: &AppState,
    page: Page,
    params: &RouteParams,
    format: Format,
    headers: &HeaderMap,
    body: &Bytes,
) -> HandlerResult {
    if let Some(kind) = page.detail_kind() {
        let id = params
            .parse::<i64>("id")
            .ok_or_else(|| ApiError::not_found(format!("invalid {kind} id")))?;
        let record = record_detail(&state.api.storage, kind, RecordId(id)).await?;
        return Ok(match format {
            Format::Json => Json(record).into_response(),
            Format::Html => {
                Html(render::record_page(&format!("{kind} {id}"), &record)).into_response()
            }
        });
    }

    match page {
        Page::Home | Page::AdminDashboard => {
            let summary = dashboard(&state.api.storage).await?;
            Ok(match format {
                Format::Json => Json(summary).into_response(),
                Format::Html => {
                    let title = if page == Page::Home {
                        state.api.contact.laboratory.as_str()
                    } else {
                        "Tableau de bord"
                    };
                    Html(render::dashboard_page(title, &summary)).into_response()
                }
            })
        }
        Page::ContactInfo => Ok(match format {
            Format::Json => Json(&state.api.contact).into_response(),
            Format::Html => Html(render::contact_page(
                &state.api.contact,
                &state.href("/contact/envoyer"),
            ))
            .into_response(),
        }),
        Page::ContactSubmit => {
            let form = parse_contact_form(headers, body)?;
            let ack = submit_contact(&state.api, &form).await?;
            Ok(match format {
                Format::Json => Json(ack).into_response(),
                Format::Html => Html(render::contact_ack_page(&ack)).into_response(),
            })
        }
        Page::AdminProjectForm => {
            let form = project_form();
            Ok(match format {
                Format::Json => Json(form).into_response(),
                Format::Html => Html(render::form_page(&form)).into_response(),
            })
        }
        other => {
            warn!(?other, "page has no action");
            Err(ApiError::not_found(format!("{other:?} is not available")))
        }
    }
}

/// JSON bodies when the client says so, form-urlencoded otherwise.
fn parse_contact_form(headers: &HeaderMap, body: &Bytes) -> Result<ContactForm, ApiError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return serde_json::from_slice(body).map_err(|err| {
            ApiError::new(ErrorCode::Validation, format!("invalid contact payload: {err}"))
        });
    }

    let mut form = ContactForm::default();
    for (key, value) in url::form_urlencoded::parse(body) {
        match key.as_ref() {
            "nom" => form.nom = value.into_owned(),
            "email" => form.email = value.into_owned(),
            "sujet" => form.sujet = value.into_owned(),
            "message" => form.message = value.into_owned(),
            _ => {}
        }
    }
    Ok(form)
}

fn error_response(err: ApiError) -> Response {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => {
            error!(message = %err.message, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(err)).into_response()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
