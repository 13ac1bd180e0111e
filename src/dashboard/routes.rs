//! Dashboard route handlers.
//!
//! `/arbs` runs one fresh scan per request; nothing is cached between
//! requests. The feed is injected through `DashboardState`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dashboard::render;
use crate::engine::scanner::run_scan;
use crate::feed::MarketFeed;
use crate::types::NoOpportunities;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Collaborators shared by all route handlers.
pub struct DashboardState {
    pub feed: Arc<dyn MarketFeed>,
    pub refresh_secs: u64,
}

impl DashboardState {
    pub fn new(feed: Arc<dyn MarketFeed>, refresh_secs: u64) -> Self {
        Self { feed, refresh_secs }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArbsQuery {
    pub format: Option<String>,
}

/// Response encoding for `/arbs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
}

impl OutputFormat {
    /// `json` (any case) selects JSON; anything else, or nothing, is HTML.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(p) if p.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Html,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub message: String,
    #[serde(rename = "try")]
    pub try_path: String,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn root() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "Polymarket Arbitrage Detector API ✅".to_string(),
        try_path: "/arbs".to_string(),
    })
}

/// GET /arbs?format=json|html
pub async fn get_arbs(
    State(state): State<AppState>,
    Query(query): Query<ArbsQuery>,
) -> Response {
    let report = run_scan(state.feed.as_ref(), Utc::now()).await;
    let checked_at = report.checked_at_string();

    match OutputFormat::from_param(query.format.as_deref()) {
        OutputFormat::Json if report.opportunities.is_empty() => {
            Json(NoOpportunities::new(checked_at)).into_response()
        }
        OutputFormat::Json => Json(report.opportunities).into_response(),
        OutputFormat::Html => Html(render::render_html(
            &report.opportunities,
            &checked_at,
            state.refresh_secs,
        ))
        .into_response(),
    }
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
