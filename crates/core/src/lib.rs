//! Vigil core types and the session watcher

pub mod errors;
pub mod session;
pub mod source;
pub mod state;
#[cfg(feature = "watcher")]
pub mod watcher;

pub use errors::{Result, SessionError};
pub use session::{SessionData, SessionUser};
pub use source::SessionSource;
pub use state::{SessionEvent, SessionSnapshot};
#[cfg(feature = "watcher")]
pub use watcher::{DEFAULT_POLL_INTERVAL, SessionWatcher, SessionWatcherBuilder};
