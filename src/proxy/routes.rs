use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::classifier::ClassifiedTokens;
use crate::error::{log_error, ScreenerError};
use crate::monitoring::{PollStats, PollStatsReport};
use crate::poller::SnapshotStore;
use crate::simulate::{swap_series, ExplorerState, SimulatedBlock, SimulatedTransaction, SwapPoint};
use crate::source::TokenSource;
use crate::swap::{default_catalog, estimate_liquidity_apy, find_swap_token, quote, SwapToken};
use crate::token::TokenListResponse;

/// Body returned when the upstream list cannot be fetched
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch Bonk tokens";
pub const TOKEN_NOT_FOUND_MESSAGE: &str = "Token not found";

/// Shared handles the routes read from
pub struct AppState {
    pub source: Arc<dyn TokenSource>,
    pub store: SnapshotStore,
    pub stats: Arc<PollStats>,
    pub explorer: Arc<ExplorerState>,
    pub swap_catalog: Vec<SwapToken>,
}

impl AppState {
    pub fn new(source: Arc<dyn TokenSource>, store: SnapshotStore, stats: Arc<PollStats>) -> Self {
        Self {
            source,
            store,
            stats,
            explorer: Arc::new(ExplorerState::new()),
            swap_catalog: default_catalog(),
        }
    }

    /// Serves transactions and blocks from a shared explorer
    pub fn with_explorer(mut self, explorer: Arc<ExplorerState>) -> Self {
        self.explorer = explorer;
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokensResponse {
    #[serde(flatten)]
    list: TokenListResponse,
    tick: u64,
    classified: ClassifiedTokens,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    tick: u64,
    poll: PollStatsReport,
}

#[derive(Debug, Deserialize)]
struct QuoteParams {
    sell: String,
    buy: String,
    amount: f64,
    #[serde(default = "default_slippage")]
    slippage: f64,
}

fn default_slippage() -> f64 {
    0.5
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    sell: SwapToken,
    buy: SwapToken,
    amount_in: f64,
    amount_out: f64,
    rate: f64,
    minimum_received: f64,
    slippage: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApyParams {
    base_apr: f64,
    min: f64,
    max: f64,
    current: f64,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bonkscreener", get(upstream_handler))
        .route("/tokens", get(tokens_handler))
        .route("/tokens/:mint", get(token_handler))
        .route("/swaps", get(swaps_handler))
        .route("/swap/quote", get(quote_handler))
        .route("/liquidity/apy", get(apy_handler))
        .route("/transactions", get(transactions_handler))
        .route("/blocks", get(blocks_handler))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn bad_input(err: ScreenerError) -> Response {
    debug!(error = %err, "Rejected request");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

/// Forwards the upstream list body as-is
async fn upstream_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.source.fetch_raw().await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            log_error(&e, "Proxying upstream list");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE)
        }
    }
}

async fn tokens_handler(State(state): State<Arc<AppState>>) -> Json<TokensResponse> {
    let snapshot = state.store.current().await;
    debug!(tick = snapshot.tick, tokens = snapshot.total_tokens, "Serving snapshot");
    Json(TokensResponse {
        list: snapshot.to_list_response(),
        tick: snapshot.tick,
        classified: snapshot.classified.clone(),
    })
}

/// One token of the current snapshot, by mint
async fn token_handler(
    State(state): State<Arc<AppState>>,
    Path(mint): Path<String>,
) -> Response {
    let snapshot = state.store.current().await;
    match snapshot.find(&mint) {
        Some(token) => Json(token.clone()).into_response(),
        None => error_response(StatusCode::NOT_FOUND, TOKEN_NOT_FOUND_MESSAGE),
    }
}

async fn swaps_handler() -> Json<Vec<SwapPoint>> {
    let series = swap_series(Utc::now(), &mut rand::thread_rng());
    Json(series)
}

async fn quote_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuoteParams>,
) -> Response {
    let snapshot = state.store.current().await;
    let lookup = |key: &str| find_swap_token(&state.swap_catalog, &snapshot.tokens, key);
    let (sell, buy) = match (lookup(&params.sell), lookup(&params.buy)) {
        (Some(sell), Some(buy)) => (sell, buy),
        _ => return error_response(StatusCode::NOT_FOUND, TOKEN_NOT_FOUND_MESSAGE),
    };

    match quote(&sell, &buy, params.amount, params.slippage) {
        Ok(q) => Json(QuoteResponse {
            sell,
            buy,
            amount_in: params.amount,
            amount_out: q.amount_out,
            rate: q.rate,
            minimum_received: q.minimum_received,
            slippage: params.slippage,
        })
        .into_response(),
        Err(e) => bad_input(e),
    }
}

async fn apy_handler(Query(params): Query<ApyParams>) -> Response {
    match estimate_liquidity_apy(params.base_apr, params.min, params.max, params.current) {
        Ok(apy) => Json(json!({ "apy": apy })).into_response(),
        Err(e) => bad_input(e),
    }
}

async fn transactions_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<SimulatedTransaction>> {
    Json(state.explorer.transactions().await)
}

async fn blocks_handler(State(state): State<Arc<AppState>>) -> Json<Vec<SimulatedBlock>> {
    Json(state.explorer.blocks().await)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let tick = state.store.current().await.tick;
    Json(HealthResponse {
        status: "ok",
        tick,
        poll: state.stats.report(),
    })
}
