//! Periodic session checks published through a watch channel

use crate::{Result, SessionError, SessionEvent, SessionSnapshot, SessionSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

/// Default time between session checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Builder for configuring a [`SessionWatcher`]
pub struct SessionWatcherBuilder {
    source: Arc<dyn SessionSource>,
    interval: Duration,
}

impl SessionWatcherBuilder {
    /// Create a new builder for the given source
    pub fn new(source: Arc<dyn SessionSource>) -> Self {
        Self {
            source,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the time between checks
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Build the watcher and start polling.
    ///
    /// The first check runs immediately, then once per interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero
    pub async fn start(self) -> Result<SessionWatcher> {
        if self.interval.is_zero() {
            return Err(SessionError::config("poll interval must be greater than zero"));
        }

        info!(interval_secs = self.interval.as_secs_f64(), "Starting session watcher");

        let (state_tx, state_rx) = watch::channel(SessionSnapshot::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let inner = Arc::new(WatcherInner {
            source: self.source,
            state_tx,
            check_lock: Mutex::new(()),
        });

        tokio::spawn(poll_loop(inner.clone(), self.interval, shutdown_rx));

        Ok(SessionWatcher {
            inner,
            state_rx,
            shutdown_tx,
            interval: self.interval,
        })
    }
}

/// Keeps a mirror of the backend session fresh.
///
/// Dropping the watcher stops polling.
pub struct SessionWatcher {
    inner: Arc<WatcherInner>,
    state_rx: watch::Receiver<SessionSnapshot>,
    shutdown_tx: watch::Sender<bool>,
    interval: Duration,
}

struct WatcherInner {
    source: Arc<dyn SessionSource>,
    state_tx: watch::Sender<SessionSnapshot>,
    // Serializes scheduled checks with manual refreshes
    check_lock: Mutex<()>,
}

impl SessionWatcher {
    /// Create a new builder for the given source
    pub fn builder(source: Arc<dyn SessionSource>) -> SessionWatcherBuilder {
        SessionWatcherBuilder::new(source)
    }

    /// Current session state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_rx.clone()
    }

    /// Time between scheduled checks
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a check now, outside the schedule, and return the resulting state
    pub async fn refresh(&self) -> SessionSnapshot {
        self.inner.check().await
    }

    /// Wait until no check is in flight and return that state
    pub async fn wait_until_ready(&self) -> SessionSnapshot {
        let mut state_rx = self.state_rx.clone();
        if let Ok(snapshot) = state_rx.wait_for(|snapshot| !snapshot.is_pending).await {
            return snapshot.clone();
        }
        self.snapshot()
    }

    /// Stop polling. Safe to call more than once.
    ///
    /// A scheduled check that is still waiting on the backend is abandoned;
    /// the snapshot keeps the last published result and is no longer pending.
    pub fn shutdown(&self) {
        if !self.shutdown_tx.send_replace(true) {
            info!("Shutting down session watcher");
        }
    }
}

impl WatcherInner {
    async fn check(&self) -> SessionSnapshot {
        let _guard = self.check_lock.lock().await;

        self.publish(SessionEvent::CheckStarted);

        let event = match self.source.get_session().await {
            Ok(data) => {
                debug!(
                    signed_in = data.as_ref().is_some_and(|d| d.user.is_some()),
                    "Session check completed"
                );
                SessionEvent::CheckSucceeded(data)
            }
            Err(e) => {
                error!("Session check error: {}", e);
                SessionEvent::CheckFailed(e.to_string())
            }
        };

        self.publish(event)
    }

    fn publish(&self, event: SessionEvent) -> SessionSnapshot {
        self.state_tx.send_modify(|snapshot| {
            let current = std::mem::take(snapshot);
            *snapshot = current.apply(event);
        });
        self.state_tx.borrow().clone()
    }
}

async fn poll_loop(
    inner: Arc<WatcherInner>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                // A dropped sender means the watcher itself is gone
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!("Session poll loop stopped");
                    break;
                }
            }
            _ = interval.tick() => {
                tokio::select! {
                    _ = inner.check() => {}
                    _ = shutdown_rx.changed() => {
                        debug!("Session check abandoned on shutdown");
                        inner.state_tx.send_modify(|snapshot| snapshot.is_pending = false);
                        break;
                    }
                }
            }
        }
    }
}
