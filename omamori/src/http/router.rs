use super::{X_REQUEST_ID, handler};
use crate::state::AppState;
use axum::{Router, routing};
use omamori_config::server;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use zabuton::SessionLayer;

pub fn create(state: AppState, server_config: &server::Configuration) -> Router {
    Router::new()
        .nest(
            "/csrf",
            Router::new().route(
                "/token",
                routing::post(handler::tokens::post).get(handler::tokens::get),
            ),
        )
        .layer(CatchPanicLayer::new())
        .layer(SessionLayer::new(state.sessions.clone()))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server_config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
        .layer(SetRequestIdLayer::new(
            X_REQUEST_ID.clone(),
            MakeRequestUuid,
        ))
        .with_state(state)
}
