//! Web API module.
//!
//! A thin JSON layer over the same catalog and services the TUI uses, plus
//! the embedded single-page front end.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/capabilities` - Whether voice input is offered to this client
//! - `GET /api/maps` - List maps
//! - `GET /api/maps/{map}` - Full map definition (stations, tools, checklist)
//! - `GET /api/maps/{map}/keywords` - Spoken keywords grouped by station
//! - `POST /api/maps/{map}/normalize` - Turn a transcript into stations
//! - `POST /api/maps/{map}/selection` - Toggle a station and get the bomb order view
//! - `GET /api/maps/{map}/valves?start=&end=` - Valve readings
//!
//! Any other path is served from the embedded front end.

pub mod static_files;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::{ChecklistItem, EasterEggMap, KeywordGroup, Station, ToolKind};
use crate::services::{
    annotate_transcript, normalize_transcript, resolve, HeardWord, OrderedSelection,
    SelectionEntry, ValveReading,
};
use crate::speech::is_excluded_user_agent;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Map catalog (immutable after load)
    catalog: Arc<Catalog>,
    /// Map opened by the front end on first load
    default_map: String,
}

impl AppState {
    /// Creates the state from a configuration, loading its catalog.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let catalog = Catalog::load_configured(config)?;
        Ok(Self::with_catalog(catalog, config.ui.default_map.clone()))
    }

    /// Creates the state from an already loaded catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog, default_map: String) -> Self {
        Self {
            catalog: Arc::new(catalog),
            default_map,
        }
    }

    fn map(&self, id: &str) -> Result<&EasterEggMap, (StatusCode, Json<ApiError>)> {
        self.catalog.get(id).ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(format!("Map not found: {id}"))),
            )
        })
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Voice capability of the requesting client.
#[derive(Debug, Serialize)]
pub struct CapabilitiesResponse {
    /// Whether the voice button should be offered.
    pub voice_input: bool,
    /// Notice shown instead of the voice button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_only_reason: Option<String>,
}

/// Map list response.
#[derive(Debug, Serialize)]
pub struct MapListResponse {
    /// Map opened on first load.
    pub default_map: String,
    /// Maps in catalog order.
    pub maps: Vec<MapSummary>,
}

/// Summary of a map.
#[derive(Debug, Serialize)]
pub struct MapSummary {
    /// Map identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Tools in display order.
    pub tools: Vec<ToolKind>,
}

impl From<&EasterEggMap> for MapSummary {
    fn from(map: &EasterEggMap) -> Self {
        Self {
            id: map.id.clone(),
            name: map.name.clone(),
            tools: map.tools.clone(),
        }
    }
}

/// Full map definition.
#[derive(Debug, Serialize)]
pub struct MapDetail {
    /// Map identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Tools in display order.
    pub tools: Vec<ToolKind>,
    /// Stations in canonical order.
    pub stations: Vec<Station>,
    /// Checklist forest.
    pub checklist: Vec<ChecklistItem>,
}

/// Keyword list response.
#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    /// Keywords grouped by station, in first-mention order.
    pub groups: Vec<KeywordGroup>,
}

/// Normalize request body.
#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    /// Finished transcript.
    pub transcript: String,
}

/// Normalize response.
#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    /// Stations in first-mention order.
    pub stations: Vec<Station>,
    /// Transcript words with keyword highlights.
    pub heard: Vec<HeardWord>,
}

/// Bomb order selection request.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    /// Stations chosen so far, in order.
    #[serde(default)]
    pub order: Vec<String>,
    /// Station to toggle before building the view.
    #[serde(default)]
    pub toggle: Option<String>,
}

/// Bomb order selection view.
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    /// Chosen stations in selection order.
    pub order: Vec<Station>,
    /// Entries to display, in display order.
    pub entries: Vec<SelectionEntry>,
    /// Whether every station has been chosen.
    pub complete: bool,
    /// Whether the reset control should be shown.
    pub can_reset: bool,
}

/// Query parameters for the valve lookup.
#[derive(Debug, Deserialize)]
pub struct ValveQuery {
    /// Green light station.
    pub start: Option<String>,
    /// Pink cylinder station.
    pub end: Option<String>,
}

/// Valve lookup response.
#[derive(Debug, Serialize)]
pub struct ValvesResponse {
    /// Green light station, if chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Station>,
    /// Pink cylinder station, if chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Station>,
    /// Readings sorted by value, unassigned stations last.
    pub readings: Vec<ValveReading>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Helpers
// ============================================================================

/// Resolves an optional station query parameter.
///
/// A missing or blank parameter means "not chosen yet".
fn station_param(map: &EasterEggMap, value: Option<&str>) -> Result<Option<Station>, ApiError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    map.find_station(value).cloned().map(Some).ok_or_else(|| {
        ApiError::with_details(
            format!("Unknown station: {value}"),
            map.stations
                .iter()
                .map(Station::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/capabilities - Voice availability for the requesting browser.
async fn capabilities(headers: HeaderMap) -> Json<CapabilitiesResponse> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let excluded = is_excluded_user_agent(user_agent);
    debug!("Capabilities for '{user_agent}': voice {}", !excluded);

    Json(CapabilitiesResponse {
        voice_input: !excluded,
        manual_only_reason: excluded
            .then(|| "Voice input is not supported on this device".to_string()),
    })
}

/// GET /api/maps - List maps.
async fn list_maps(State(state): State<AppState>) -> Json<MapListResponse> {
    Json(MapListResponse {
        default_map: state.default_map.clone(),
        maps: state.catalog.maps().iter().map(MapSummary::from).collect(),
    })
}

/// GET /api/maps/{map} - Full map definition.
async fn get_map(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<MapDetail> {
    let map = state.map(&id)?;
    Ok(Json(MapDetail {
        id: map.id.clone(),
        name: map.name.clone(),
        tools: map.tools.clone(),
        stations: map.stations.clone(),
        checklist: map.checklist.clone(),
    }))
}

/// GET /api/maps/{map}/keywords - Keywords grouped by station.
async fn get_keywords(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<KeywordsResponse> {
    let map = state.map(&id)?;
    Ok(Json(KeywordsResponse {
        groups: map.keywords.grouped(),
    }))
}

/// POST /api/maps/{map}/normalize - Transcript to ordered stations.
async fn normalize(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NormalizeRequest>,
) -> ApiResult<NormalizeResponse> {
    let map = state.map(&id)?;
    Ok(Json(NormalizeResponse {
        stations: normalize_transcript(&request.transcript, &map.keywords),
        heard: annotate_transcript(&request.transcript, &map.keywords),
    }))
}

/// POST /api/maps/{map}/selection - Apply a toggle and describe the order view.
async fn selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectionRequest>,
) -> ApiResult<SelectionResponse> {
    let map = state.map(&id)?;

    if !map.has_tool(ToolKind::Bomb) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(format!("{} has no bomb order tool", map.name))),
        ));
    }

    let bad_request = |e: ApiError| (StatusCode::BAD_REQUEST, Json(e));
    let mut order = Vec::with_capacity(request.order.len());
    for name in &request.order {
        if let Some(station) = station_param(map, Some(name.as_str())).map_err(bad_request)? {
            order.push(station);
        }
    }

    let mut selected = OrderedSelection::new();
    selected.replace(order);
    if let Some(station) = station_param(map, request.toggle.as_deref()).map_err(bad_request)? {
        selected.toggle(&station);
    }

    Ok(Json(SelectionResponse {
        order: selected.stations().to_vec(),
        entries: selected.display_entries(&map.stations),
        complete: selected.is_complete(&map.stations),
        can_reset: selected.can_reset(),
    }))
}

/// GET /api/maps/{map}/valves - Valve readings for a station pair.
async fn get_valves(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ValveQuery>,
) -> ApiResult<ValvesResponse> {
    let map = state.map(&id)?;

    if !map.has_tool(ToolKind::Valve) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(format!("{} has no valve tool", map.name))),
        ));
    }

    let bad_request = |e: ApiError| (StatusCode::BAD_REQUEST, Json(e));
    let start = station_param(map, query.start.as_deref()).map_err(bad_request)?;
    let end = station_param(map, query.end.as_deref()).map_err(bad_request)?;

    if start.is_some() && start == end {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                "Green light and pink cylinder must be different stations",
            )),
        ));
    }

    let assignment = resolve(
        &map.valves,
        &map.stations,
        start.as_ref().map_or("", Station::as_str),
        end.as_ref().map_or("", Station::as_str),
    );

    Ok(Json(ValvesResponse {
        start,
        end,
        readings: assignment.sorted(),
    }))
}

// ============================================================================
// Router
// ============================================================================

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    // The server is meant to run on the player's own machine next to the game.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/capabilities", get(capabilities))
        // Map endpoints
        .route("/api/maps", get(list_maps))
        .route("/api/maps/{map}", get(get_map))
        .route("/api/maps/{map}/keywords", get(get_keywords))
        .route("/api/maps/{map}/normalize", post(normalize))
        .route("/api/maps/{map}/selection", post(selection))
        .route("/api/maps/{map}/valves", get(get_valves))
        // Embedded front end
        .fallback(static_files::serve_static)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the server fails to
/// start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(&config)?;
    let app = create_router(state);

    if !static_files::has_embedded_assets() {
        info!("No embedded front end found, serving the API only");
    }
    info!("Starting egghelper web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
