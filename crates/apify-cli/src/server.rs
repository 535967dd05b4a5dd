use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use apify::{ApifyError, ResourceNamespace, SpecCatalog};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;

use crate::pages;

type SharedCatalog<N> = Arc<SpecCatalog<N>>;

/// Routes for the spec index, the viewer and the raw content.
pub fn router<N>(catalog: SharedCatalog<N>) -> Router
where
    N: ResourceNamespace + 'static,
{
    Router::new()
        .route("/", get(index::<N>))
        .route("/api-spec/view/{id}", get(view_spec::<N>))
        .route("/api-spec/content/{id}", get(spec_content::<N>))
        .with_state(catalog)
}

/// Binds `addr` and serves until Ctrl+C or SIGTERM.
pub async fn serve<N>(catalog: SharedCatalog<N>, addr: SocketAddr) -> io::Result<SocketAddr>
where
    N: ResourceNamespace + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!("serving API specs on http://{local}");

    axum::serve(listener, router(catalog))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|err| tracing::error!(error = %err, "server stopped with error"))?;

    Ok(local)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

/// Failure of a page request, rendered as a plain-text response.
#[derive(Debug)]
enum PageError {
    NotFound(String),
    Internal(String),
}

impl From<ApifyError> for PageError {
    fn from(err: ApifyError) -> Self {
        match err {
            ApifyError::NotFound(id) => PageError::NotFound(id),
            other => PageError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound(id) => {
                tracing::info!(id = %id, "spec not found");
                (StatusCode::NOT_FOUND, format!("Spec not found: {id}")).into_response()
            }
            PageError::Internal(message) => {
                tracing::error!(%message, "spec request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

/// Runs a catalog call on the blocking pool; scans touch the filesystem.
async fn with_catalog<N, T, F>(catalog: SharedCatalog<N>, call: F) -> Result<T, PageError>
where
    N: ResourceNamespace + 'static,
    T: Send + 'static,
    F: FnOnce(&SpecCatalog<N>) -> Result<T, ApifyError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&catalog))
        .await
        .map_err(|err| PageError::Internal(err.to_string()))?
        .map_err(PageError::from)
}

async fn index<N>(State(catalog): State<SharedCatalog<N>>) -> Result<Html<String>, PageError>
where
    N: ResourceNamespace + 'static,
{
    let specs = with_catalog(catalog, |c| c.list()).await?;
    Ok(Html(pages::index_page(&specs)))
}

async fn view_spec<N>(
    State(catalog): State<SharedCatalog<N>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError>
where
    N: ResourceNamespace + 'static,
{
    let lookup = id.clone();
    let document = with_catalog(catalog, move |c| c.require(&lookup)).await?;
    Ok(Html(pages::viewer_page(&document.filename, &id)))
}

async fn spec_content<N>(
    State(catalog): State<SharedCatalog<N>>,
    Path(id): Path<String>,
) -> Result<Response, PageError>
where
    N: ResourceNamespace + 'static,
{
    let lookup = id.clone();
    let content = with_catalog(catalog, move |c| c.content(&lookup))
        .await?
        .ok_or(PageError::NotFound(id))?;
    Ok((
        [(header::CONTENT_TYPE, content.media_type())],
        content.bytes,
    )
        .into_response())
}
