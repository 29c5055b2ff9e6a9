#![doc = include_str!("../README.md")]

pub use self::{
    future::ResponseFuture,
    handle::SessionHandle,
    layer::SessionLayer,
    newtypes::*,
    service::SessionService,
    store::{InMemoryStore, Session},
};

mod future;
mod handle;
mod layer;
mod service;
mod store;

/// Name of the cookie that carries the session ID.
pub const SESSION_COOKIE_NAME: &str = "ZABUTON-SESSION_ID";

const SESSION_ID_LEN: usize = 32;

mod newtypes {
    #[aliri_braid::braid]
    pub struct SessionId;
}
