//! Research dashboard for Differential Evolution experiments
//!
//! Views built on top of the gateway, the configuration wizard and the
//! built-in result table, plus the `deboard` command line.

pub mod analytics;
pub use analytics::AnalyticsView;

pub mod auth;
pub use auth::{LoginForm, RegistrationForm, login_error_message, submit_login, submit_registration};

pub mod cli;
pub use cli::{Cli, Command, SubmitArgs, run};

pub mod error;
pub use error::DashboardError;

pub mod records;
pub use records::{BenchmarkFilter, DashboardStats, RecordTable, SortConfig, SortDirection, SortKey};
