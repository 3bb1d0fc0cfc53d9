//! Session hook that mirrors the backend session into component state

use crate::client::session_client;
use crate::config::SessionConfig;
use futures::future::{FutureExt, LocalBoxFuture};
use gloo::timers::callback::Interval;
use std::rc::Rc;
use vigil_core::{SessionData, SessionEvent, SessionSnapshot};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Produces one session fetch; errors are reported as display strings
pub type SessionFetcher =
    Rc<dyn Fn() -> LocalBoxFuture<'static, Result<Option<SessionData>, String>>>;

/// Reducer state behind [`use_session`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStore {
    pub snapshot: SessionSnapshot,
}

impl Reducible for SessionStore {
    type Action = SessionEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self {
            snapshot: self.snapshot.clone().apply(action),
        })
    }
}

/// Session hook handle
#[derive(Clone)]
pub struct UseSessionHandle {
    store: UseReducerHandle<SessionStore>,
    fetcher: SessionFetcher,
}

impl UseSessionHandle {
    /// Last session result, `None` while signed out or after a failed check
    pub fn data(&self) -> Option<&SessionData> {
        self.store.snapshot.data.as_ref()
    }

    /// Whether a check is in flight
    pub fn is_pending(&self) -> bool {
        self.store.snapshot.is_pending
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.snapshot.is_authenticated()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot.clone()
    }

    /// Check the session now without waiting for the next tick
    pub fn refresh(&self) {
        run_check(self.store.clone(), self.fetcher.clone());
    }
}

impl PartialEq for UseSessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store && Rc::ptr_eq(&self.fetcher, &other.fetcher)
    }
}

async fn fetch_from_backend() -> Result<Option<SessionData>, String> {
    let client = session_client().map_err(|e| format!("Failed to get client: {e}"))?;
    client.get_session().await.map_err(|e| e.to_string())
}

/// Fetcher that asks the auth backend on the page's origin
pub fn http_fetcher() -> SessionFetcher {
    Rc::new(|| fetch_from_backend().boxed_local())
}

fn run_check(store: UseReducerHandle<SessionStore>, fetcher: SessionFetcher) {
    spawn_local(async move {
        store.dispatch(SessionEvent::CheckStarted);

        match fetcher().await {
            Ok(data) => store.dispatch(SessionEvent::CheckSucceeded(data)),
            Err(error) => {
                gloo::console::error!(format!("Session check error: {error}"));
                store.dispatch(SessionEvent::CheckFailed(error));
            }
        }
    });
}

/// Mirror the session from `fetcher`, checking on mount and every `interval_ms`.
///
/// The fetcher is fixed at mount: later renders passing a different one keep
/// using the first, for both the timer and [`UseSessionHandle::refresh`].
/// An `interval_ms` of zero means [`SessionConfig::POLL_INTERVAL_MS`].
#[hook]
pub fn use_session_with(fetcher: SessionFetcher, interval_ms: u32) -> UseSessionHandle {
    let store = use_reducer(SessionStore::default);
    let fetcher = (*use_memo((), move |_| fetcher)).clone();
    let interval_ms = SessionConfig::interval_or_default(interval_ms);

    {
        let store = store.clone();
        let fetcher = fetcher.clone();
        use_effect_with(interval_ms, move |interval_ms| {
            run_check(store.clone(), fetcher.clone());

            let interval = Interval::new(*interval_ms, move || {
                run_check(store.clone(), fetcher.clone());
            });

            // Clear the interval on unmount
            move || drop(interval)
        });
    }

    UseSessionHandle { store, fetcher }
}

/// Mirror the backend session, checking on mount and once a minute
#[hook]
pub fn use_session() -> UseSessionHandle {
    use_session_with(http_fetcher(), SessionConfig::POLL_INTERVAL_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::SessionUser;

    #[test]
    fn test_store_starts_pending() {
        let store = SessionStore::default();
        assert!(store.snapshot.is_pending);
        assert!(store.snapshot.data.is_none());
    }

    #[test]
    fn test_store_follows_check_events() {
        let session = SessionData::for_user(SessionUser::with_token("tok"));

        let store = Rc::new(SessionStore::default())
            .reduce(SessionEvent::CheckStarted)
            .reduce(SessionEvent::CheckSucceeded(Some(session.clone())));
        assert!(!store.snapshot.is_pending);
        assert_eq!(store.snapshot.data, Some(session));

        let store = store
            .reduce(SessionEvent::CheckStarted)
            .reduce(SessionEvent::CheckFailed("network".to_string()));
        assert!(!store.snapshot.is_pending);
        assert!(store.snapshot.data.is_none());
    }
}
