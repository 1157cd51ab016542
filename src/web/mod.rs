//! The single-page form and its JSON twin.

mod handlers;
pub mod models;
pub mod page;
pub mod render;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::core::PlanGenerator;

pub use handlers::{api_plan, health, index, not_found, submit_plan};
pub use models::{PlanApiResponse, PlanStatus};
pub use render::render_markdown;

#[derive(Clone, Debug)]
pub struct AppState {
    pub generator: Arc<PlanGenerator>,
}

impl AppState {
    pub fn new(generator: PlanGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/plan", post(submit_plan))
        .route("/api/plan", post(api_plan))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` on `addr` until Ctrl-C
pub async fn serve(app: Router, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("TripMate listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            warn!("could not install Ctrl-C handler: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
