//! Custom hooks for the application

pub mod use_session;

pub use use_session::{use_session, use_session_with, SessionFetcher, SessionStore, UseSessionHandle};
