/*
[INPUT]:  Session token and HTTP client
[OUTPUT]: The acting user (id + role)
[POS]:    Auth layer - identity provider seam
[UPDATE]: When identity endpoint or fallback rules change
*/

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use crate::http::{Result, TaskflowClient, TaskflowError};
use crate::types::Actor;

/// Source of the current user's identity and role
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_actor(&self) -> Result<Actor>;
}

/// Fixed identity, for tests and offline tooling
#[derive(Debug, Clone)]
pub struct StaticIdentity(pub Actor);

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_actor(&self) -> Result<Actor> {
        Ok(self.0.clone())
    }
}

impl TaskflowClient {
    /// Fetch the current user
    ///
    /// GET /api/auth/me
    pub async fn current_user(&self) -> Result<Actor> {
        let builder = self.request_with_auth(Method::GET, &["api", "auth", "me"])?;
        self.send_json(builder).await
    }
}

#[async_trait]
impl IdentityProvider for TaskflowClient {
    /// Resolve the actor from the identity endpoint.
    ///
    /// When the endpoint does not exist (404), fall back to the `sub`/`role`
    /// claims of the session token.
    async fn current_actor(&self) -> Result<Actor> {
        match self.current_user().await {
            Ok(actor) => Ok(actor),
            Err(TaskflowError::NotFound { message }) => {
                debug!(%message, "identity endpoint missing, using token claims");
                self.session()
                    .token_data()
                    .and_then(|data| data.actor())
                    .ok_or(TaskflowError::NotFound { message })
            }
            Err(err) => Err(err),
        }
    }
}
