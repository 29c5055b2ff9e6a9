use crate::{SessionService, store::InMemoryStore};
use tower::Layer;

/// Layer that equips every request with a [`SessionHandle`](crate::SessionHandle)
pub struct SessionLayer<T> {
    store: InMemoryStore<T>,
}

impl<T> SessionLayer<T> {
    pub fn new(store: InMemoryStore<T>) -> Self {
        Self { store }
    }
}

impl<T> Clone for SessionLayer<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S, T> Layer<S> for SessionLayer<T> {
    type Service = SessionService<S, T>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService::new(inner, self.store.clone())
    }
}
