//! Session endpoint client methods

use super::{AuthClient, ClientError};
use reqwest::Method;
use vigil_core::SessionData;

impl AuthClient {
    /// Fetch the current session; `Ok(None)` means nobody is signed in
    pub async fn get_session(&self) -> Result<Option<SessionData>, ClientError> {
        let request = self.request(Method::GET, &self.session_path);
        let body = self.execute_text(request).await?;
        let session = SessionData::from_response_body(&body)?;

        tracing::trace!(signed_in = session.is_some(), "Fetched session");
        Ok(session)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod source {
    use super::AuthClient;
    use async_trait::async_trait;
    use vigil_core::{SessionData, SessionSource};

    #[async_trait]
    impl SessionSource for AuthClient {
        async fn get_session(&self) -> vigil_core::Result<Option<SessionData>> {
            Ok(Self::get_session(self).await?)
        }
    }
}
