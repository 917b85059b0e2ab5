//! Login and registration forms

use deboard_gateway::{
    AuthSession, Credentials, GatewayError, LoginResponse, Registration, RemoteGateway,
};

use crate::error::DashboardError;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const LOGIN_NETWORK_MESSAGE: &str =
    "Network Error: Cannot connect to the backend server. Is your backend running?";
pub const LOGIN_REJECTED_MESSAGE: &str = "Invalid email or password";
pub const LOGIN_FALLBACK_MESSAGE: &str = "An error occurred. Please try again.";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<Credentials, &'static str> {
        if blank(&self.email) || self.password.is_empty() {
            return Err(MISSING_FIELDS_MESSAGE);
        }
        Ok(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub affiliation: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<Registration, &'static str> {
        if blank(&self.name)
            || blank(&self.email)
            || self.password.is_empty()
            || blank(&self.affiliation)
        {
            return Err(MISSING_FIELDS_MESSAGE);
        }
        Ok(Registration {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            affiliation: self.affiliation.trim().to_string(),
        })
    }
}

/// Text shown for a failed login
pub fn login_error_message(error: &GatewayError) -> String {
    match error {
        GatewayError::Network(_) => LOGIN_NETWORK_MESSAGE.to_string(),
        GatewayError::Http { .. } => error
            .server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(LOGIN_REJECTED_MESSAGE)
            .to_string(),
        _ => LOGIN_FALLBACK_MESSAGE.to_string(),
    }
}

/// Text shown after a successful login
pub fn login_success_message(response: &LoginResponse) -> &str {
    response
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(LOGIN_SUCCESS_MESSAGE)
}

/// Validate the form and log in; the error carries the text to show
pub async fn submit_login<G: RemoteGateway>(
    session: &mut AuthSession<G>,
    form: &LoginForm,
) -> Result<String, DashboardError> {
    let credentials = form
        .validate()
        .map_err(|m| DashboardError::Auth(m.to_string()))?;
    match session.login(&credentials).await {
        Ok(response) => Ok(login_success_message(&response).to_string()),
        Err(e) => {
            log::warn!("login failed: {e}");
            Err(DashboardError::Auth(login_error_message(&e)))
        }
    }
}

/// Validate the form and register; returns the backend's message if any
pub async fn submit_registration<G: RemoteGateway>(
    gateway: &G,
    form: &RegistrationForm,
) -> Result<Option<String>, DashboardError> {
    let registration = form
        .validate()
        .map_err(|m| DashboardError::Auth(m.to_string()))?;
    match gateway.register(&registration).await {
        Ok(response) => Ok(response.message),
        Err(e) => {
            log::warn!("registration failed: {e}");
            Err(DashboardError::Auth(REGISTRATION_FAILED_MESSAGE.to_string()))
        }
    }
}
