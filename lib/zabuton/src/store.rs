use crate::{SESSION_ID_LEN, SessionId, SessionIdRef};
use arc_swap::ArcSwap;
use rand::{Rng, distributions::Alphanumeric};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Handle to one client's session
///
/// The payload sits behind an RCU cell: [`Session::load`] takes a point-in-time
/// snapshot, [`Session::store`]/[`Session::rcu`] replace the value wholesale.
/// A reader holding a snapshot is never affected by a concurrent writer.
pub struct Session<T> {
    id: SessionId,
    data: Arc<ArcSwap<T>>,
}

impl<T> Clone for Session<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> Session<T> {
    #[must_use]
    pub fn id(&self) -> &SessionIdRef {
        &self.id
    }

    /// Take an atomic snapshot of the session payload
    #[must_use]
    pub fn load(&self) -> Arc<T> {
        self.data.load_full()
    }

    /// Replace the session payload
    pub fn store(&self, data: T) {
        self.data.store(Arc::new(data));
    }

    /// Read-copy-update the session payload
    ///
    /// The closure may run more than once when writers contend, so it has to be
    /// idempotent.
    pub fn rcu<F>(&self, mut f: F)
    where
        F: FnMut(&T) -> T,
    {
        self.data.rcu(|prev| f(prev));
    }
}

/// Process-local session store
///
/// Cheap to clone; all clones share the same underlying map.
pub struct InMemoryStore<T> {
    inner: Arc<Mutex<HashMap<SessionId, Arc<ArcSwap<T>>>>>,
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for InMemoryStore<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryStore<T>
where
    T: Default,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    #[must_use]
    pub fn get(&self, id: &SessionIdRef) -> Option<Session<T>> {
        let guard = self.inner.lock().unwrap();
        guard.get(id).map(|data| Session {
            id: id.to_owned(),
            data: Arc::clone(data),
        })
    }

    /// Allocate a fresh session with a random ID and a default payload
    pub fn create(&self) -> Session<T> {
        let mut guard = self.inner.lock().unwrap();

        loop {
            let id: SessionId = rand::thread_rng()
                .sample_iter(Alphanumeric)
                .map(char::from)
                .take(SESSION_ID_LEN)
                .collect::<String>()
                .into();

            if guard.contains_key(&id) {
                continue;
            }

            let data = Arc::new(ArcSwap::from_pointee(T::default()));
            guard.insert(id.clone(), Arc::clone(&data));

            return Session { id, data };
        }
    }

    /// Drop a session; returns whether it existed
    pub fn remove(&self, id: &SessionIdRef) -> bool {
        self.inner.lock().unwrap().remove(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}
