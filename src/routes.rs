use axum::{
    Json, Router, debug_handler,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ErrorKind, SourceError};
use crate::pokemon::{Pokemon, PokemonPage};
use crate::selector::SourceSelector;
use crate::session::{BrowseSession, PageTicket, SessionSnapshot};
use crate::sources::{ApiSource, PokemonSource};

pub struct AppState {
    pub selector: SourceSelector,
    pub session: Mutex<BrowseSession>,
    pub page_size: usize,
}

impl AppState {
    pub fn new(selector: SourceSelector, page_size: usize) -> Self {
        let session = BrowseSession::new(selector.get_active(), page_size);
        Self {
            selector,
            session: Mutex::new(session),
            page_size: page_size.max(1),
        }
    }

    // The session holds plain data, so a poisoned lock is still usable.
    fn session(&self) -> MutexGuard<'_, BrowseSession> {
        self.session.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Recovering poisoned browse session lock");
            poisoned.into_inner()
        })
    }

    /// Runs the ticket's request without holding the session lock, then
    /// applies it if it is still the latest one. Dropping the future before
    /// it finishes abandons the ticket.
    pub async fn load(&self, ticket: PageTicket) -> SessionSnapshot {
        let mut in_flight = InFlight {
            state: self,
            ticket,
            finished: false,
        };
        let adapter = self.selector.resolve(ticket.source);
        let result = adapter.list_page(ticket.offset, ticket.limit).await;
        in_flight.finished = true;
        drop(in_flight);

        let mut session = self.session();
        if !session.complete(ticket, result) {
            tracing::debug!("Page for seq {} superseded before completion", ticket.seq);
        }
        session.snapshot()
    }
}

struct InFlight<'a> {
    state: &'a AppState,
    ticket: PageTicket,
    finished: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.state.session().abandon(self.ticket);
        }
    }
}

impl IntoResponse for SourceError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Transport | ErrorKind::MalformedPayload => StatusCode::BAD_GATEWAY,
            ErrorKind::Configuration => StatusCode::BAD_REQUEST,
        };
        (status, Json(self.to_api_error())).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pokemon", get(list_pokemon_handler))
        .route("/pokemon/{name}", get(get_pokemon_handler))
        .route("/source", get(get_source_handler).put(set_source_handler))
        .route("/browse", get(browse_handler))
        .route("/browse/next", post(browse_next_handler))
        .route("/browse/previous", post(browse_previous_handler))
        .route("/browse/reload", post(browse_reload_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceBody {
    pub source: String,
}

#[debug_handler]
async fn list_pokemon_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PokemonPage>, SourceError> {
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(app_state.page_size);
    if limit == 0 {
        return Err(SourceError::Configuration(
            "limit must be a positive integer".to_string(),
        ));
    }
    let page = app_state.selector.list_page(offset, limit).await?;
    Ok(Json(page))
}

#[debug_handler]
async fn get_pokemon_handler(
    State(app_state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Pokemon>, SourceError> {
    let pokemon = app_state.selector.fetch_by_name(&name).await?;
    tracing::debug!("Successfully fetched Pokémon: {}", pokemon.name);
    Ok(Json(pokemon))
}

#[debug_handler]
async fn get_source_handler(State(app_state): State<Arc<AppState>>) -> Json<SourceBody> {
    Json(SourceBody {
        source: app_state.selector.get_active().to_string(),
    })
}

#[debug_handler]
async fn set_source_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<SourceBody>,
) -> Result<Json<SessionSnapshot>, SourceError> {
    let source: ApiSource = body.source.parse()?;
    app_state.selector.set_active(source)?;
    let ticket = app_state.session().switch_source(source);
    Ok(Json(app_state.load(ticket).await))
}

#[debug_handler]
async fn browse_handler(State(app_state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(app_state.session().snapshot())
}

#[debug_handler]
async fn browse_next_handler(State(app_state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    let ticket = app_state.session().begin_next();
    Json(app_state.load(ticket).await)
}

#[debug_handler]
async fn browse_previous_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<SessionSnapshot> {
    let ticket = app_state.session().begin_previous();
    Json(app_state.load(ticket).await)
}

#[debug_handler]
async fn browse_reload_handler(State(app_state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    let ticket = app_state.session().begin_reload();
    Json(app_state.load(ticket).await)
}
