use crate::store::{InMemoryStore, Session};
use std::sync::{Arc, Mutex};

pub struct Shared<T> {
    pub(crate) session: Option<Session<T>>,
    pub(crate) issued: bool,
}

/// Per-request view of the session store
///
/// Inserted into the request extensions by [`SessionService`](crate::SessionService).
pub struct SessionHandle<T> {
    pub(crate) inner: Arc<Mutex<Shared<T>>>,
    pub(crate) store: InMemoryStore<T>,
}

impl<T> Clone for SessionHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            store: self.store.clone(),
        }
    }
}

impl<T> SessionHandle<T>
where
    T: Default,
{
    /// The session the request arrived with, if any
    #[must_use]
    pub fn get(&self) -> Option<Session<T>> {
        self.inner.lock().unwrap().session.clone()
    }

    /// The session the request arrived with, creating one if there is none
    ///
    /// Creation is observable on the response: the middleware appends a
    /// `Set-Cookie` header for the new session ID.
    pub fn get_or_create(&self) -> Session<T> {
        let guard = &mut *self.inner.lock().unwrap();
        if let Some(ref session) = guard.session {
            return session.clone();
        }

        let session = self.store.create();
        guard.session = Some(session.clone());
        guard.issued = true;

        session
    }
}

#[cfg(feature = "axum")]
mod axum_impl {
    use super::SessionHandle;
    use axum_core::extract::FromRequestParts;
    use http::request::Parts;
    use std::convert::Infallible;

    impl<S, T> FromRequestParts<S> for SessionHandle<T>
    where
        S: Sync,
        T: Send + Sync + 'static,
    {
        type Rejection = Infallible;

        async fn from_request_parts(
            parts: &mut Parts,
            _state: &S,
        ) -> Result<Self, Self::Rejection> {
            let handle = parts
                .extensions
                .get::<Self>()
                .expect("Service not wrapped by session middleware")
                .clone();

            Ok(handle)
        }
    }
}
