//! Routage des requêtes HTTP du faux IGD

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::dispatch::dispatch_control;
use crate::config::MockIgdConfig;
use crate::context::RequestContext;
use crate::errors::{IgdMockError, Result};
use crate::hooks::{HookRegistry, HookResponse};
use crate::journal::{JournalEntry, RequestJournal, Route};

/// Taille maximale d'un corps de requête
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// État partagé par le handler HTTP
pub(crate) struct RouterState {
    config: MockIgdConfig,
    registry: Arc<HookRegistry>,
    journal: Arc<RequestJournal>,
    /// Une seule requête traitée à la fois
    serial: Mutex<()>,
}

impl RouterState {
    pub(crate) fn new(
        config: MockIgdConfig,
        registry: Arc<HookRegistry>,
        journal: Arc<RequestJournal>,
    ) -> Self {
        Self {
            config,
            registry,
            journal,
            serial: Mutex::new(()),
        }
    }
}

/// Construit le routeur : un unique handler de repli qui classe la requête
pub(crate) fn build_router(state: Arc<RouterState>) -> Router {
    Router::new().fallback(route_request).with_state(state)
}

async fn read_body(body: Body) -> Result<Bytes> {
    axum::body::to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|e| IgdMockError::Body(e.to_string()))
}

fn request_context(config: &MockIgdConfig, parts: Parts, path: String, body: Bytes) -> RequestContext {
    let host = parts
        .headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| config.bind().to_string());

    RequestContext {
        method: parts.method,
        url: format!("http://{}{}", host, path),
        path,
        headers: parts.headers,
        body,
        soap: None,
    }
}

async fn route_request(State(state): State<Arc<RouterState>>, request: Request) -> Response {
    let _serial = state.serial.lock().await;

    let (parts, body) = request.into_parts();
    let method = parts.method.to_string();
    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());

    debug!("📥 {} {}", method, path);

    let (route, outcome) = if path == state.config.description_path() {
        let outcome = match read_body(body).await {
            Ok(bytes) => {
                let ctx = request_context(&state.config, parts, path.clone(), bytes);
                info!("📋 Description requested");
                let hook = state.registry.description();
                Ok(hook(ctx).await)
            }
            Err(e) => Err(e),
        };
        (Route::Description, outcome)
    } else if path == state.config.control_path() {
        match read_body(body).await {
            Ok(bytes) => {
                let ctx = request_context(&state.config, parts, path.clone(), bytes);
                let (action, outcome) = dispatch_control(&state.registry, ctx).await;
                (Route::Control { action }, outcome)
            }
            Err(e) => (Route::Control { action: None }, Err(e)),
        }
    } else {
        debug!("❓ No route for {}, answering 500", path);
        (Route::Unmatched, Ok(HookResponse::status(500)))
    };

    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            error!("❌ Protocol defect on {} {}: {}", method, path, e);
            state.journal.record_defect(e.to_string());
            HookResponse::status(500)
        }
    };

    debug!("📤 {} {} → {}", method, path, response.status_code());
    state.journal.record(JournalEntry {
        method,
        path,
        route,
        status: response.status_code(),
    });

    response.into_response()
}
