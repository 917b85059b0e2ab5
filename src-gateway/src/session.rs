use std::sync::Arc;

use crate::client::RemoteGateway;
use crate::error::GatewayError;
use crate::token::{TokenStore, TokenStoreError};
use crate::types::{Credentials, LoginResponse, User};

/// Authentication state of one client: a gateway plus the token store it
/// reads its bearer token from
#[derive(Debug)]
pub struct AuthSession<G> {
    gateway: G,
    tokens: Arc<dyn TokenStore>,
    user: Option<User>,
}

impl<G: RemoteGateway> AuthSession<G> {
    /// `tokens` must be the store `gateway` reads from
    pub fn new(gateway: G, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            gateway,
            tokens,
            user: None,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// User returned by the last login of this session
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Authenticate and persist the token
    pub async fn login(&mut self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        let response = self.gateway.login(credentials).await?;
        self.tokens.save(&response.token)?;
        self.user = response.user.clone();
        log::info!("logged in as {}", credentials.email);
        Ok(response)
    }

    /// Forget the token and the user
    pub fn logout(&mut self) -> Result<(), TokenStoreError> {
        self.tokens.clear()?;
        self.user = None;
        log::info!("logged out");
        Ok(())
    }

    /// Whether a persisted token is available from an earlier login
    pub fn restore(&self) -> Result<bool, TokenStoreError> {
        Ok(self.tokens.load()?.is_some())
    }
}
