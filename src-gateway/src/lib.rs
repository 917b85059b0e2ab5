//! Client side of the DE research backend
//!
//! [`RemoteGateway`] is the contract the dashboard and the configuration
//! wizard consume; [`HttpGateway`] implements it over reqwest. The bearer
//! token is persisted through a [`TokenStore`] and attached to every request.

pub mod client;
pub mod error;
pub mod session;
pub mod token;
pub mod types;

#[cfg(any(test, feature = "test-mocks"))]
pub mod test_mocks;

pub use client::{HttpGateway, RemoteGateway};
pub use error::GatewayError;
pub use session::AuthSession;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
pub use types::{
    CreatedSimulation, Credentials, LoginResponse, ProfileUpdate, Registration,
    RegistrationResponse, SimulationRecord, SimulationRequest, User,
};
