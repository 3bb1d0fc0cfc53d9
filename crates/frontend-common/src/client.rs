//! Shared auth backend client for the browser

use gloo::utils::window;
use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};
pub use vigil_http::ClientError;
use vigil_http::AuthClient;

static SESSION_CLIENT: Lazy<Mutex<Option<AuthClient>>> = Lazy::new(|| Mutex::new(None));

/// Get the base URL for API calls
fn get_base_url() -> String {
    // The auth backend is served from the same origin as the app
    window().location().origin().unwrap_or_default()
}

/// Get the client used for session checks, creating it on first use
pub fn session_client() -> Result<AuthClient, ClientError> {
    let mut client_lock = SESSION_CLIENT
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(client) = client_lock.as_ref() {
        return Ok(client.clone());
    }

    let client = AuthClient::builder().base_url(get_base_url()).build()?;
    *client_lock = Some(client.clone());
    Ok(client)
}
