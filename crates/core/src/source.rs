//! Where session results come from

use crate::{Result, SessionData};
use async_trait::async_trait;
use std::sync::Arc;

/// A backend that can report the current session
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Fetch the current session; `Ok(None)` means nobody is signed in
    async fn get_session(&self) -> Result<Option<SessionData>>;
}

#[async_trait]
impl<T: SessionSource + ?Sized> SessionSource for Arc<T> {
    async fn get_session(&self) -> Result<Option<SessionData>> {
        (**self).get_session().await
    }
}

#[async_trait]
impl<T: SessionSource + ?Sized> SessionSource for Box<T> {
    async fn get_session(&self) -> Result<Option<SessionData>> {
        (**self).get_session().await
    }
}
