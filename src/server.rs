//! HTTP interface
//!
//! The router exposes three read-only endpoints over a loaded [`Catalog`]:
//!
//! - `GET /recipe/:id?ingredient=<name>&quantity=<number>`
//! - `GET /recipes?ingredient=<name>`
//! - `GET /ingredients`
//!
//! Everything else falls through to the static file directory, if one is
//! configured.

use std::{io, path::Path, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{catalog::Catalog, storage::Directory};

mod error;
mod routes;

pub use error::AppError;

/// Shared, read-only state handed to every request handler.
pub type AppState = Arc<Catalog<Directory>>;

/// Build the application router.
///
/// When `static_path` is given, requests that match no API route are served
/// from that directory.
#[must_use]
pub fn router(state: AppState, static_path: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/recipe/:id", get(routes::get_recipe))
        .route("/recipes", get(routes::list_recipes))
        .route("/ingredients", get(routes::list_ingredients))
        .with_state(state);

    let app = match static_path {
        Some(dir) => {
            tracing::info!("Serving static files from {}", dir.display());
            api.fallback_service(ServeDir::new(dir))
        }
        None => api,
    };

    app.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Bind `address` and serve `app` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(address: &str, app: Router) -> io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    tracing::info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
