//! HTTP gate (axum)
//!
//! Runs the router as middleware in front of every request, including
//! unmatched ones, then serves the locale pages as JSON. Redirects are
//! `307`; collaborator failures are `500` with a catalog message and never
//! fall back to a default decision.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, Request as HttpRequest, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect as HttpRedirect, Response},
    routing::get,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::auth::providers::{Provider, Providers};
use crate::auth::session::{CookieSession, SessionError};
use crate::catalog::{message_for, ErrorCode};
use crate::config::Config;
use crate::data::ThreadList;
use crate::i18n::{Dictionaries, DictionaryError, Locale};
use crate::layout::{EffectLog, PaneLayout, Side};
use crate::router::{Decision, Request, Router};

#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    /// A page saw a locale segment the router should have caught
    #[error("unknown locale segment '{0}'")]
    UnknownLocale(String),
}

impl GateError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) | Self::Dictionary(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnknownLocale(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Session(_) => Some(ErrorCode::Auth001),
            Self::Dictionary(_) => Some(ErrorCode::Network002),
            Self::UnknownLocale(_) => None,
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = match self.code() {
            Some(code) => json!({ "code": code, "error": code.message() }),
            None => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Shared, immutable request-time state
#[derive(Clone)]
pub struct GateState {
    pub router: Router,
    pub dictionaries: Arc<Dictionaries>,
    pub providers: Arc<Providers>,
}

/// Build the gate: pages, health check and the routing middleware.
pub fn app(state: GateState) -> axum::Router {
    axum::Router::new()
        .route("/api/health", get(health))
        // The router lets `/<locale>/` through, so pages answer with or
        // without a trailing slash.
        .route("/{lang}", get(home))
        .route("/{lang}/", get(home))
        .route("/{lang}/chat", get(chat))
        .route("/{lang}/chat/", get(chat))
        .route("/{lang}/signin", get(signin))
        .route("/{lang}/signin/", get(signin))
        .fallback(not_found)
        // Layers wrap the fallback too, so unmatched paths are gated.
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), gate)),
        )
        .with_state(state)
}

/// Translate the HTTP request into the router's view of it.
pub fn request_info(uri: &axum::http::Uri, headers: &HeaderMap) -> Request {
    let cookies: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    Request {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        accept_language: headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        cookie: (!cookies.is_empty()).then(|| cookies.join("; ")),
    }
}

async fn gate(
    State(state): State<GateState>,
    request: HttpRequest,
    next: Next,
) -> Result<Response, GateError> {
    let info = request_info(request.uri(), request.headers());
    match state.router.decide(&info)? {
        Decision::PassThrough => Ok(next.run(request).await),
        Decision::Redirect(redirect) => Ok(HttpRedirect::temporary(&redirect.location()).into_response()),
    }
}

fn page_locale(lang: &str) -> Result<Locale, GateError> {
    Locale::parse(lang).ok_or_else(|| GateError::UnknownLocale(lang.to_string()))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

#[derive(Serialize)]
struct Switch {
    locale: Locale,
    label: &'static str,
    href: String,
}

fn switcher(path: &str) -> Vec<Switch> {
    Locale::ALL
        .into_iter()
        .map(|locale| Switch {
            locale,
            label: locale.label(),
            href: crate::router::switch_locale(path, locale),
        })
        .collect()
}

async fn home(
    State(state): State<GateState>,
    Path(lang): Path<String>,
) -> Result<impl IntoResponse, GateError> {
    let locale = page_locale(&lang)?;
    let dict = state.dictionaries.get(locale)?;
    Ok(Json(json!({
        "locale": locale,
        "title": dict.text("home.title"),
        "description": dict.text("home.description"),
        "languages": switcher(&format!("/{locale}")),
    })))
}

#[derive(Debug, Deserialize)]
struct ChatQuery {
    /// Viewport width in CSS pixels, measured once by the client at mount
    viewport: Option<u32>,
}

async fn chat(
    State(state): State<GateState>,
    Path(lang): Path<String>,
    Query(query): Query<ChatQuery>,
) -> Result<impl IntoResponse, GateError> {
    let locale = page_locale(&lang)?;
    let dict = state.dictionaries.get(locale)?;
    let viewport = query.viewport.unwrap_or(1920);
    let panes = PaneLayout::mount(viewport, EffectLog::default());
    let threads = ThreadList::sample();

    Ok(Json(json!({
        "locale": locale,
        "title": dict.text("chat.title"),
        "defaults": panes.defaults(),
        "panes": {
            "left": panes.pane(Side::Left),
            "right": panes.pane(Side::Right),
            "affordances": {
                "left": panes.affordance(Side::Left),
                "right": panes.affordance(Side::Right),
            },
            "widths": panes.effective_widths(),
        },
        "selected": threads.selected_id(),
        "threads": threads.threads(),
        "languages": switcher(&format!("/{locale}/chat")),
    })))
}

#[derive(Debug, Deserialize)]
struct SigninQuery {
    #[serde(rename = "callbackUrl")]
    callback_url: Option<String>,
    /// Error code the identity collaborator sends back after a failed attempt
    error: Option<String>,
}

#[derive(Serialize)]
struct ProviderAction {
    id: &'static str,
    label: &'static str,
    href: String,
}

async fn signin(
    State(state): State<GateState>,
    Path(lang): Path<String>,
    Query(query): Query<SigninQuery>,
) -> Result<impl IntoResponse, GateError> {
    let locale = page_locale(&lang)?;
    let dict = state.dictionaries.get(locale)?;
    let actions: Vec<ProviderAction> = state
        .providers
        .iter()
        .filter_map(|provider: Provider| {
            let href = state
                .providers
                .sign_in_url(provider, query.callback_url.as_deref())?;
            Some(ProviderAction {
                id: provider.id(),
                label: provider.label(),
                href,
            })
        })
        .collect();

    let error = query.error.as_deref().map(|id| {
        json!({
            "code": ErrorCode::parse(id),
            "message": message_for(id),
        })
    });

    Ok(Json(json!({
        "locale": locale,
        "title": dict.text("signin.title"),
        "providers": actions,
        "error": error,
    })))
}

/// Validate configuration, load dictionaries and serve until shutdown.
pub async fn run(config: Config) -> Result<()> {
    let providers = config
        .providers
        .validate()
        .context("identity provider configuration")?;
    let dictionaries = Dictionaries::load_dir(&config.dictionaries)
        .with_context(|| format!("loading dictionaries from {}", config.dictionaries.display()))?;

    let router = Router::new(
        config.matcher(),
        Arc::new(CookieSession::new(config.session_cookie.clone())),
    );
    let state = GateState {
        router,
        dictionaries: Arc::new(dictionaries),
        providers: Arc::new(providers),
    };

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!(
        addr = %config.bind,
        providers = state.providers.len(),
        "chatfront gate listening"
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
