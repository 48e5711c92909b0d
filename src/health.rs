//! Liveness and info endpoints for the hosting platform.
//!
//! Runs independently of the bot so it stays up even when the bot cannot
//! start (e.g. no token configured).

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::session::SessionStore;
use crate::util::Clock;

const SERVICE_NAME: &str = "Skeleton Trending Boost Bot";

#[derive(Clone)]
pub struct HealthState {
  pub config: Arc<Config>,
  pub store: Arc<dyn SessionStore>,
  pub clock: Arc<dyn Clock>,
}

#[derive(Debug, Serialize)]
struct HealthReport {
  status: &'static str,
  service: &'static str,
  timestamp: String,
  orders_processed: usize,
  active_sessions: usize,
  bot_token_set: bool,
  environment: String,
}

#[derive(Debug, Serialize)]
struct ExternalLinks {
  community_group: String,
  nft_group: String,
  promotion_group: String,
  support: String,
}

#[derive(Debug, Serialize)]
struct InfoReport {
  bot: &'static str,
  version: &'static str,
  deployment: &'static str,
  port: u16,
  external_links: ExternalLinks,
}

pub fn router(state: HealthState) -> Router {
  Router::new()
    .route("/", get(root_handler))
    .route("/health", get(health_handler))
    .route("/info", get(info_handler))
    .with_state(state)
}

pub async fn serve(state: HealthState) -> anyhow::Result<()> {
  let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));

  let listener = TcpListener::bind(&addr).await?;
  log::info!("Health check listening on http://{}", addr);
  log::info!("  /health - liveness with session counts");
  log::info!("  /info   - static bot metadata");

  axum::serve(listener, router(state)).await?;
  Ok(())
}

async fn root_handler() -> impl IntoResponse {
  (StatusCode::OK, format!("🤖 {} is running!", SERVICE_NAME))
}

async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
  let report = HealthReport {
    status: "healthy",
    service: SERVICE_NAME,
    timestamp: state.clock.now().to_rfc3339(),
    orders_processed: state.store.completed_order_count(),
    active_sessions: state.store.session_count(),
    bot_token_set: state.config.bot_token.is_some(),
    environment: state.config.environment.clone(),
  };

  (StatusCode::OK, Json(report))
}

async fn info_handler(State(state): State<HealthState>) -> impl IntoResponse {
  let config = &state.config;
  let report = InfoReport {
    bot: SERVICE_NAME,
    version: env!("CARGO_PKG_VERSION"),
    deployment: "Render",
    port: config.port,
    external_links: ExternalLinks {
      community_group: config.links.community.clone(),
      nft_group: config.links.nft_minting.clone(),
      promotion_group: config.links.promotion.clone(),
      support: config.support_contact.clone(),
    },
  };

  (StatusCode::OK, Json(report))
}
