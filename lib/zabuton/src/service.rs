use crate::{
    ResponseFuture, SESSION_COOKIE_NAME, SessionHandle, SessionIdRef, handle::Shared,
    store::InMemoryStore,
};
use cookie::Cookie;
use http::{Request, Response, header};
use std::{
    sync::{Arc, Mutex},
    task::{self, Poll},
};
use tower::Service;

pub struct SessionService<S, T> {
    inner: S,
    store: InMemoryStore<T>,
}

impl<S, T> SessionService<S, T> {
    pub fn new(inner: S, store: InMemoryStore<T>) -> Self {
        Self { inner, store }
    }
}

impl<S, T> Clone for SessionService<S, T>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            store: self.store.clone(),
        }
    }
}

impl<S, T, ReqBody, ResBody> Service<Request<ReqBody>> for SessionService<S, T>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    T: Default + Send + Sync + 'static,
{
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, T>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let session = {
            let mut session = None;
            'outer: for header in req.headers().get_all(header::COOKIE) {
                let Ok(value_str) = header.to_str() else {
                    continue;
                };

                for cookie in Cookie::split_parse_encoded(value_str) {
                    let Ok(cookie) = cookie else {
                        continue;
                    };

                    if cookie.name() == SESSION_COOKIE_NAME {
                        session = self.store.get(SessionIdRef::from_str(cookie.value_trimmed()));
                        break 'outer;
                    }
                }
            }

            session
        };

        let handle = SessionHandle {
            inner: Arc::new(Mutex::new(Shared {
                session,
                issued: false,
            })),
            store: self.store.clone(),
        };

        req.extensions_mut().insert(handle.clone());

        ResponseFuture {
            inner: self.inner.call(req),
            handle,
        }
    }
}
