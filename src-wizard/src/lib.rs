//! Simulation configuration wizard
//!
//! Collects a [`SimulationRequest`](deboard_gateway::SimulationRequest)
//! over two validated pages, shows a confirmation step, submits through any
//! [`RemoteGateway`](deboard_gateway::RemoteGateway) and classifies the
//! outcome for display.

pub mod classify;
pub use classify::{
    NETWORK_ERROR_MESSAGE, QUEUE_FULL_MESSAGE, QUEUE_FULL_TITLE, SUBMISSION_FALLBACK_MESSAGE,
    SubmissionFailure, classify,
};

pub mod confirmation;
pub use confirmation::{ConfirmationView, Section};

pub mod context;
pub use context::{SimulationActivity, SimulationContext};

pub mod draft;
pub use draft::{Field, NumericField, SimulationDraft};

pub mod error;
pub use error::WizardError;

pub mod options;
pub use options::{BENCHMARK_FUNCTIONS, MUTATION_SCHEMES, SetField};

pub mod validation;
pub use validation::{ValidationErrors, build_request, check_page1, check_page2, parse_numeric};

pub mod wizard;
pub use wizard::{ConfigWizard, Page, SubmissionOutcome, SubmissionPhase};
