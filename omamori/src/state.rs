use axum::extract::FromRef;
use omamori_registry::{TokenRegistry, TokenState};
use zabuton::InMemoryStore;

/// Application state
///
/// `registry` is `None` when token issuing is not configured; the HTTP surface
/// then behaves as if the endpoint did not exist.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub registry: Option<TokenRegistry>,
    pub sessions: InMemoryStore<TokenState>,
}
