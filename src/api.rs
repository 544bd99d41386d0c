//! JSON HTTP API over the match feed.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::data::feed::MatchFeed;
use crate::models::Match;

/// Shared state accessible by all route handlers.
#[derive(Clone)]
pub struct ApiState {
    feed: Arc<MatchFeed>,
}

impl ApiState {
    pub fn new(feed: MatchFeed) -> Self {
        Self {
            feed: Arc::new(feed),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchesEnvelope {
    success: bool,
    data: Vec<Match>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: String,
}

/// Fixed figures shown alongside the match list.
#[derive(Debug, Serialize)]
struct BotStats {
    win_rate: u32,
    total_predictions: u32,
    vip_members: u32,
    win_streak: u32,
}

const BOT_STATS: BotStats = BotStats {
    win_rate: 87,
    total_predictions: 1247,
    vip_members: 152,
    win_streak: 9,
};

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/matches", get(matches_handler))
        .route("/api/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on an already bound listener until the server stops.
pub async fn serve(listener: TcpListener, state: ApiState) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "API server listening");
    }
    axum::serve(listener, router(state))
        .await
        .context("API server error")
}

// -- Route Handlers --

async fn matches_handler(State(state): State<ApiState>) -> Response {
    match state.feed.acquire().await {
        Ok(matches) => Json(MatchesEnvelope {
            success: true,
            count: matches.len(),
            data: matches,
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "Match acquisition failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn stats_handler() -> impl IntoResponse {
    Json(BOT_STATS)
}
