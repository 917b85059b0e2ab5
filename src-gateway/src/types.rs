//! Wire types of the backend REST API
//!
//! Field names follow the backend's camelCase JSON; DE parameters keep their
//! short names (`np`, `f`, `cr`).

use chrono::{DateTime, Utc};
use deboard_results::{CrossoverMethod, SelectionMethod};
use serde::{Deserialize, Deserializer, Serialize};

/// Backend ids arrive either as JSON strings or as numbers
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Unsigned(n) => n.to_string(),
        RawId::Signed(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub affiliation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Partial profile update; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
}

/// Fully validated simulation configuration as sent to `POST /simulations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[serde(rename = "np")]
    pub population: u32,
    #[serde(rename = "f")]
    pub scaling_factor: f64,
    #[serde(rename = "cr")]
    pub crossover_rate: f64,
    pub dimension: u32,
    pub generations: u32,
    pub benchmarks: Vec<String>,
    pub mutation_schemes: Vec<String>,
    pub crossover_methods: Vec<CrossoverMethod>,
    pub selection_methods: Vec<SelectionMethod>,
}

/// Answer of a successful submission: the new id plus whatever the backend
/// echoed back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedSimulation {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub echoed: serde_json::Map<String, serde_json::Value>,
}

/// One row of the simulation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub model: String,
    pub benchmark: String,
    pub np: u32,
    pub f: f64,
    pub cr: f64,
    pub generations: u32,
    #[serde(default)]
    pub best_fitness: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}
