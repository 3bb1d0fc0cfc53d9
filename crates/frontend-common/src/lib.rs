pub mod client;
pub mod config;
pub mod hooks;
pub mod session;

pub use client::session_client;
pub use config::SessionConfig;
pub use hooks::{use_session, use_session_with, SessionFetcher, UseSessionHandle};
pub use session::{use_current_session, SessionProvider};
