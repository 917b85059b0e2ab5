use std::future::Future;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::token::TokenStore;
use crate::types::{
    CreatedSimulation, Credentials, LoginResponse, ProfileUpdate, Registration,
    RegistrationResponse, SimulationRecord, SimulationRequest, User,
};

/// Contract of the research backend as seen by the wizard and the dashboard
pub trait RemoteGateway: Send + Sync {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, GatewayError>> + Send;

    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<RegistrationResponse, GatewayError>> + Send;

    fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<User, GatewayError>> + Send;

    fn list_simulations(
        &self,
    ) -> impl Future<Output = Result<Vec<SimulationRecord>, GatewayError>> + Send;

    fn get_simulation(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<SimulationRecord, GatewayError>> + Send;

    /// Start a simulation; only ever called with a validated request
    fn submit(
        &self,
        request: &SimulationRequest,
    ) -> impl Future<Output = Result<CreatedSimulation, GatewayError>> + Send;

    fn delete_simulation(&self, id: &str) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

/// Error body of the backend, `{"message": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// reqwest implementation of [`RemoteGateway`]
///
/// No request timeout is configured: a call resolves or fails only on the
/// transport's own terms. Callers that need to abandon a request drop its
/// future.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Gateway at `DEBOARD_API_URL` with the token file under the state dir
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url = deboard_env::get_api_base_url()?;
        let tokens = crate::token::FileTokenStore::from_env()?;
        Ok(Self::new(base_url, Arc::new(tokens)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request builder with the bearer token attached when one is stored
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, GatewayError> {
        let builder = self.client.request(method, self.url(path));
        Ok(match self.tokens.load()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send and map transport failures and non-success statuses
    async fn send(&self, builder: RequestBuilder, label: &str) -> Result<Response, GatewayError> {
        let response = builder.send().await.map_err(|e| {
            log::warn!("{label}: no response: {e}");
            GatewayError::Network(e.to_string())
        })?;

        let status = response.status();
        log::debug!("{label} -> {status}");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        Err(GatewayError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

impl RemoteGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        let builder = self.request(Method::POST, "/login")?.json(credentials);
        Self::decode(self.send(builder, "POST /login").await?).await
    }

    async fn register(
        &self,
        registration: &Registration,
    ) -> Result<RegistrationResponse, GatewayError> {
        let builder = self.request(Method::POST, "/register")?.json(registration);
        Self::decode(self.send(builder, "POST /register").await?).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, GatewayError> {
        let builder = self.request(Method::PUT, "/user/profile")?.json(update);
        Self::decode(self.send(builder, "PUT /user/profile").await?).await
    }

    async fn list_simulations(&self) -> Result<Vec<SimulationRecord>, GatewayError> {
        let builder = self.request(Method::GET, "/simulations")?;
        Self::decode(self.send(builder, "GET /simulations").await?).await
    }

    async fn get_simulation(&self, id: &str) -> Result<SimulationRecord, GatewayError> {
        let path = simulation_path(id)?;
        let builder = self.request(Method::GET, &path)?;
        Self::decode(self.send(builder, &format!("GET {path}")).await?).await
    }

    async fn submit(&self, request: &SimulationRequest) -> Result<CreatedSimulation, GatewayError> {
        let builder = self.request(Method::POST, "/simulations")?.json(request);
        let created: CreatedSimulation =
            Self::decode(self.send(builder, "POST /simulations").await?).await?;
        log::info!("simulation {} created", created.id);
        Ok(created)
    }

    async fn delete_simulation(&self, id: &str) -> Result<(), GatewayError> {
        let path = simulation_path(id)?;
        let builder = self.request(Method::DELETE, &path)?;
        self.send(builder, &format!("DELETE {path}")).await?;
        Ok(())
    }
}

/// `/simulations/{id}` with the id percent-encoded as one segment. Empty
/// and dot-only ids are refused since URL normalisation would drop them.
fn simulation_path(id: &str) -> Result<String, GatewayError> {
    if matches!(id, "" | "." | "..") {
        return Err(GatewayError::InvalidId(id.to_string()));
    }
    Ok(format!("/simulations/{}", urlencoding::encode(id)))
}
