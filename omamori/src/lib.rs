#![forbid(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, forbidden_lint_groups)]

#[macro_use]
extern crate tracing;

pub mod http;
pub mod signal;
pub mod state;

use self::state::AppState;
use omamori_config::Configuration;
use omamori_registry::TokenRegistry;
use zabuton::InMemoryStore;

#[must_use]
pub fn initialise_state(config: &Configuration) -> AppState {
    let registry = config
        .csrf
        .clone()
        .map(|csrf_config| TokenRegistry::builder().config(csrf_config).build());

    if registry.is_none() {
        info!("no [csrf] section configured, the token endpoint will stay hidden");
    }

    AppState {
        registry,
        sessions: InMemoryStore::new(),
    }
}
