use crate::{SESSION_COOKIE_NAME, SessionHandle};
use cookie::{Cookie, Expiration, SameSite};
use http::{HeaderValue, Response, header};
use pin_project_lite::pin_project;
use std::{
    future::Future,
    pin::Pin,
    task::{self, Poll, ready},
};

pin_project! {
    pub struct ResponseFuture<F, T> {
        #[pin]
        pub(crate) inner: F,
        pub(crate) handle: SessionHandle<T>,
    }
}

impl<F, E, ResBody, T> Future for ResponseFuture<F, T>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        let mut response = ready!(this.inner.poll(cx))?;

        let guard = this.handle.inner.lock().unwrap();
        if guard.issued {
            let session = guard.session.as_ref().expect("issued without a session");
            let cookie = Cookie::build((SESSION_COOKIE_NAME, session.id().as_str().to_owned()))
                .expires(Expiration::Session)
                .http_only(true)
                .path("/")
                .same_site(SameSite::Lax)
                .build();

            let encoded_cookie = cookie.encoded().to_string();
            let header_value = HeaderValue::from_str(&encoded_cookie).unwrap();

            response
                .headers_mut()
                .append(header::SET_COOKIE, header_value);
        }

        Poll::Ready(Ok(response))
    }
}
