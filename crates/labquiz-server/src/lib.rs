//! labquiz-server — HTTP surface for self-graded lab quizzes.
//!
//! Builds the axum router over an [`AppContext`] and serves it. All state
//! lives on disk: course documents are re-read per request and completion
//! markers are plain files.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod routes;

use std::future::Future;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

pub use config::{load_config, load_config_from, QuizConfig};
pub use context::AppContext;
pub use error::ApiError;
pub use routes::router;

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: QuizConfig) -> Result<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let ctx = AppContext::from_config(&config);
    tracing::info!(
        questions_dir = %ctx.questions_dir().display(),
        marker_dir = %ctx.markers().dir().display(),
        "quiz server configured"
    );

    serve_with_shutdown(listener, ctx, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(listener: TcpListener, ctx: AppContext, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr().context("listener has no local address")?;
    tracing::info!("listening on http://{local}");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
