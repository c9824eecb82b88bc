use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::clock::{Clock, X_TEST_NOW_MS};
use crate::config::Config;
use crate::controllers::paste;
use crate::error::ApiError;
use crate::pages;
use crate::store::{AnyStore, Store};
use crate::types::api::{CreatePaste, CreatedPaste, Health};
use crate::App;

pub async fn run(app: App) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", app.config.host, app.config.port)
        .parse()
        .context("invalid host/port")?;

    info!("listening on http://{addr}");

    axum::Server::bind(&addr)
        .serve(router(app).into_make_service())
        .await?;

    Ok(())
}

/// Build the service router. Split out of [`run`] so tests can drive it
/// without binding a socket.
pub fn router(app: App) -> Router {
    let max_content_length = app.config.limits.max_content_length;

    Router::new()
        .route("/", get(index))
        .route("/api/pastes", post(create_paste))
        .route("/api/pastes/:id", get(fetch_paste))
        .route("/p/:id", get(view_paste))
        .route("/api/healthz", get(healthz))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_content_length))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app)
}

async fn index() -> Html<&'static str> {
    Html(pages::INDEX)
}

async fn create_paste(
    State(config): State<Config>,
    State(clock): State<Clock>,
    State(mut store): State<AnyStore>,
    headers: HeaderMap,
    Json(request): Json<CreatePaste>,
) -> crate::ApiResult<impl IntoResponse> {
    let now = request_time(&clock, &headers);
    let paste = paste::create(&mut store, request, now).await?;

    let url = format!(
        "{base_url}/p/{id}",
        base_url = config.base_url.trim_end_matches('/'),
        id = paste.id
    );

    Ok((StatusCode::CREATED, Json(CreatedPaste { id: paste.id, url })))
}

async fn fetch_paste(
    State(clock): State<Clock>,
    State(mut store): State<AnyStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> crate::ApiResult<impl IntoResponse> {
    let now = request_time(&clock, &headers);
    let view = paste::fetch(&mut store, &id, now).await?;

    Ok(Json(view))
}

async fn view_paste(
    State(clock): State<Clock>,
    State(mut store): State<AnyStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let now = request_time(&clock, &headers);

    match paste::fetch(&mut store, &id, now).await {
        Ok(view) => Html(pages::render_paste(&id, &view.content)).into_response(),
        Err(ApiError::NotFound) => (StatusCode::NOT_FOUND, Html(pages::NOT_FOUND)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn healthz(State(mut store): State<AnyStore>) -> Json<Health> {
    let ok = matches!(store.ping().await, Ok(true));
    if !ok {
        warn!("health check failed: store did not answer ping");
    }

    Json(Health { ok })
}

fn request_time(clock: &Clock, headers: &HeaderMap) -> DateTime<Utc> {
    let override_value = headers.get(X_TEST_NOW_MS).and_then(|raw| raw.to_str().ok());
    clock.now(override_value)
}
