use crate::{signal, state::AppState};
use http::HeaderName;
use omamori_config::server;
use tokio::net::TcpListener;

pub mod handler;
pub mod router;

static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

pub async fn run(state: AppState, server_config: server::Configuration) -> eyre::Result<()> {
    let router = self::router::create(state, &server_config);

    let listener = TcpListener::bind(("0.0.0.0", server_config.port)).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(signal::shutdown())
        .await?;

    Ok(())
}
