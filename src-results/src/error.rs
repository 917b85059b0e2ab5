use crate::methods::{CrossoverMethod, SelectionMethod};

/// Errors raised while building a result store
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("Failed to parse result table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate result for {crossover}/{selection}/{function}")]
    DuplicateRecord {
        crossover: CrossoverMethod,
        selection: SelectionMethod,
        function: String,
    },

    #[error("Invalid fitness {value} for variant {variant} of {function} (must be finite and >= 0)")]
    InvalidFitness {
        function: String,
        variant: String,
        value: f64,
    },

    #[error(
        "Variant {variant} of {function} is tagged {found_crossover}/{found_selection} but stored under {crossover}/{selection}"
    )]
    InconsistentScore {
        function: String,
        variant: String,
        crossover: CrossoverMethod,
        selection: SelectionMethod,
        found_crossover: CrossoverMethod,
        found_selection: SelectionMethod,
    },

    #[error("Unknown {kind}: {value}")]
    UnknownMethod { kind: &'static str, value: String },
}
