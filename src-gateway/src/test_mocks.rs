#[allow(dead_code)]
pub mod mocks {
    //! Scripted in-memory gateway for tests of the crates built on top of
    //! [`RemoteGateway`]

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use crate::client::RemoteGateway;
    use crate::error::GatewayError;
    use crate::types::{
        CreatedSimulation, Credentials, LoginResponse, ProfileUpdate, Registration,
        RegistrationResponse, SimulationRecord, SimulationRequest, User,
    };

    #[derive(Debug, Default)]
    pub struct MockGateway {
        submit_replies: Mutex<VecDeque<Result<CreatedSimulation, GatewayError>>>,
        login_replies: Mutex<VecDeque<Result<LoginResponse, GatewayError>>>,
        submitted: Mutex<Vec<SimulationRequest>>,
        records: Mutex<Vec<SimulationRecord>>,
        deleted: Mutex<Vec<String>>,
        hang_submissions: AtomicBool,
        next_id: AtomicUsize,
    }

    impl MockGateway {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the outcome of the next `submit`; unscripted submissions
        /// succeed and echo the request
        pub fn push_submit(&self, reply: Result<CreatedSimulation, GatewayError>) {
            self.submit_replies.lock().push_back(reply);
        }

        pub fn push_login(&self, reply: Result<LoginResponse, GatewayError>) {
            self.login_replies.lock().push_back(reply);
        }

        /// Make every later `submit` wait forever
        pub fn hang_submissions(&self) {
            self.hang_submissions.store(true, Ordering::SeqCst);
        }

        pub fn set_records(&self, records: Vec<SimulationRecord>) {
            *self.records.lock() = records;
        }

        /// Requests received by `submit`, in call order
        pub fn submitted(&self) -> Vec<SimulationRequest> {
            self.submitted.lock().clone()
        }

        pub fn deleted(&self) -> Vec<String> {
            self.deleted.lock().clone()
        }

        fn echo(&self, request: &SimulationRequest) -> CreatedSimulation {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let echoed = serde_json::to_value(request)
                .ok()
                .and_then(|v| v.as_object().cloned())
                .unwrap_or_default();
            CreatedSimulation {
                id: format!("mock-{n}"),
                echoed,
            }
        }
    }

    pub fn http_error(status: u16, message: Option<&str>) -> GatewayError {
        GatewayError::Http {
            status,
            message: message.map(str::to_string),
        }
    }

    impl RemoteGateway for MockGateway {
        async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
            let scripted = self.login_replies.lock().pop_front();
            scripted.unwrap_or_else(|| {
                Ok(LoginResponse {
                    token: "mock-token".to_string(),
                    user: Some(User {
                        id: "1".to_string(),
                        name: "Mock User".to_string(),
                        email: credentials.email.clone(),
                        affiliation: None,
                    }),
                    message: None,
                })
            })
        }

        async fn register(
            &self,
            _registration: &Registration,
        ) -> Result<RegistrationResponse, GatewayError> {
            Ok(RegistrationResponse::default())
        }

        async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, GatewayError> {
            Ok(User {
                id: "1".to_string(),
                name: update.name.clone().unwrap_or_default(),
                email: update.email.clone().unwrap_or_default(),
                affiliation: update.affiliation.clone(),
            })
        }

        async fn list_simulations(&self) -> Result<Vec<SimulationRecord>, GatewayError> {
            Ok(self.records.lock().clone())
        }

        async fn get_simulation(&self, id: &str) -> Result<SimulationRecord, GatewayError> {
            let found = self.records.lock().iter().find(|r| r.id == id).cloned();
            found.ok_or_else(|| http_error(404, Some("Simulation not found")))
        }

        async fn submit(
            &self,
            request: &SimulationRequest,
        ) -> Result<CreatedSimulation, GatewayError> {
            self.submitted.lock().push(request.clone());
            if self.hang_submissions.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            let scripted = self.submit_replies.lock().pop_front();
            scripted.unwrap_or_else(|| Ok(self.echo(request)))
        }

        async fn delete_simulation(&self, id: &str) -> Result<(), GatewayError> {
            let mut records = self.records.lock();
            let before = records.len();
            records.retain(|r| r.id != id);
            if records.len() == before {
                return Err(http_error(404, Some("Simulation not found")));
            }
            self.deleted.lock().push(id.to_string());
            Ok(())
        }
    }
}
