//! Session context for the component tree

pub mod context;

pub use context::{use_current_session, SessionProvider, SessionProviderProps};
