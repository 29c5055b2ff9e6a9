use http::header::{COOKIE, SET_COOKIE};
use std::convert::Infallible;
use tower::{Layer, ServiceExt};
use zabuton::{InMemoryStore, SessionHandle, SessionLayer};

#[derive(Clone, Default)]
struct Counter {
    hits: u32,
}

#[futures_test::test]
async fn roundtrip() {
    let store = InMemoryStore::<Counter>::new();
    let layer = SessionLayer::new(store.clone());

    let service = layer.layer(tower::service_fn(|req: http::Request<()>| async move {
        let handle = req.extensions().get::<SessionHandle<Counter>>().unwrap();
        let session = handle.get_or_create();
        session.rcu(|counter| Counter {
            hits: counter.hits + 1,
        });

        Ok::<_, Infallible>(http::Response::new(()))
    }));
    let response = service.oneshot(http::Request::new(())).await.unwrap();

    assert!(response.headers().contains_key(SET_COOKIE));
    assert_eq!(store.len(), 1);

    // replay the cookie and make sure we land in the same session

    let mut request = http::Request::builder();
    for value in response.headers().get_all(SET_COOKIE) {
        request = request.header(COOKIE, value);
    }
    let request = request.body(()).unwrap();

    let service = layer.layer(tower::service_fn(|req: http::Request<()>| async move {
        let handle = req.extensions().get::<SessionHandle<Counter>>().unwrap();
        let session = handle.get_or_create();
        assert_eq!(session.load().hits, 1);

        Ok::<_, Infallible>(http::Response::new(()))
    }));
    let response = service.oneshot(request).await.unwrap();

    // the session already existed, so no new cookie is issued
    assert!(!response.headers().contains_key(SET_COOKIE));
    assert_eq!(store.len(), 1);
}

#[futures_test::test]
async fn lazy_creation() {
    let store = InMemoryStore::<Counter>::new();
    let layer = SessionLayer::new(store.clone());

    let service = layer.layer(tower::service_fn(|req: http::Request<()>| async move {
        let handle = req.extensions().get::<SessionHandle<Counter>>().unwrap();
        assert!(handle.get().is_none());

        Ok::<_, Infallible>(http::Response::new(()))
    }));
    let response = service.oneshot(http::Request::new(())).await.unwrap();

    assert!(!response.headers().contains_key(SET_COOKIE));
    assert!(store.is_empty());
}

#[futures_test::test]
async fn unknown_cookie_is_no_session() {
    let store = InMemoryStore::<Counter>::new();
    let layer = SessionLayer::new(store.clone());

    let request = http::Request::builder()
        .header(COOKIE, "ZABUTON-SESSION_ID=never-issued")
        .body(())
        .unwrap();

    let service = layer.layer(tower::service_fn(|req: http::Request<()>| async move {
        let handle = req.extensions().get::<SessionHandle<Counter>>().unwrap();
        assert!(handle.get().is_none());

        Ok::<_, Infallible>(http::Response::new(()))
    }));
    service.oneshot(request).await.unwrap();
}

#[test]
fn snapshot_isolation() {
    let store = InMemoryStore::<Counter>::new();
    let session = store.create();

    let before = session.load();
    session.store(Counter { hits: 5 });

    assert_eq!(before.hits, 0);
    assert_eq!(session.load().hits, 5);
}

#[test]
fn remove_forgets_the_session() {
    let store = InMemoryStore::<Counter>::new();
    let session = store.create();

    assert!(store.remove(session.id()));
    assert!(!store.remove(session.id()));
    assert!(store.get(session.id()).is_none());
}
