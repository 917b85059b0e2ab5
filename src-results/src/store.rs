//! Immutable table of pre-computed benchmark results
//!
//! Each record is addressed by a composite [`ResultKey`]
//! (crossover method, selection method, function key). Many combinations
//! have no data at all: lookups return `None` for them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ResultsError;
use crate::methods::{CrossoverMethod, SelectionMethod};

/// Table shipped with the crate
const BUILTIN_RESULTS: &str = include_str!("../data/results.json");

/// Mean best fitness reached by one DE variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantScore {
    #[serde(rename = "variant")]
    pub variant_name: String,
    #[serde(rename = "selection")]
    pub selection_method: SelectionMethod,
    #[serde(rename = "crossover")]
    pub crossover_method: CrossoverMethod,
    pub mean_best_fitness: f64,
}

/// Results of every recorded variant on one benchmark function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Human readable function name, e.g. "Sphere Function"
    #[serde(rename = "name")]
    pub function_name: String,
    /// LaTeX formula of the function
    #[serde(rename = "description")]
    pub math_description: String,
    #[serde(rename = "scores")]
    pub variant_scores: Vec<VariantScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResultKey {
    pub crossover: CrossoverMethod,
    pub selection: SelectionMethod,
    pub function: String,
}

impl ResultKey {
    pub fn new(crossover: CrossoverMethod, selection: SelectionMethod, function: &str) -> Self {
        Self {
            crossover,
            selection,
            function: function.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTable {
    records: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    crossover: CrossoverMethod,
    selection: SelectionMethod,
    function: String,
    #[serde(flatten)]
    record: ResultRecord,
}

/// Read-only result table
#[derive(Debug, Clone, Default)]
pub struct StaticResultStore {
    records: BTreeMap<ResultKey, ResultRecord>,
    function_names: Vec<String>,
}

impl StaticResultStore {
    /// Load the result table embedded in the crate
    pub fn builtin() -> Result<Self, ResultsError> {
        Self::from_json(BUILTIN_RESULTS)
    }

    /// Parse a table in the `{"records": [...]}` layout of the embedded data
    pub fn from_json(json: &str) -> Result<Self, ResultsError> {
        let table: RawTable = serde_json::from_str(json)?;
        let mut builder = StoreBuilder::new();
        for entry in table.records {
            builder.insert(entry.crossover, entry.selection, &entry.function, entry.record)?;
        }
        let store = builder.build();
        log::debug!(
            "loaded {} result records covering {} functions",
            store.len(),
            store.function_names.len()
        );
        Ok(store)
    }

    /// Direct lookup; `None` when nothing was recorded for the combination
    pub fn lookup(
        &self,
        crossover: CrossoverMethod,
        selection: SelectionMethod,
        function: &str,
    ) -> Option<&ResultRecord> {
        self.records
            .get(&ResultKey::new(crossover, selection, function))
    }

    /// Function keys in first-insertion order
    pub fn function_names(&self) -> &[String] {
        &self.function_names
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResultKey, &ResultRecord)> {
        self.records.iter()
    }
}

/// Incremental construction of a [`StaticResultStore`]
#[derive(Debug, Default)]
pub struct StoreBuilder {
    records: BTreeMap<ResultKey, ResultRecord>,
    function_names: Vec<String>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record.
    ///
    /// Rejects duplicates, negative or non-finite fitness values, and scores
    /// tagged with a different crossover/selection than the key.
    pub fn insert(
        &mut self,
        crossover: CrossoverMethod,
        selection: SelectionMethod,
        function: &str,
        record: ResultRecord,
    ) -> Result<&mut Self, ResultsError> {
        for score in &record.variant_scores {
            if !score.mean_best_fitness.is_finite() || score.mean_best_fitness < 0.0 {
                return Err(ResultsError::InvalidFitness {
                    function: function.to_string(),
                    variant: score.variant_name.clone(),
                    value: score.mean_best_fitness,
                });
            }
            if score.crossover_method != crossover || score.selection_method != selection {
                return Err(ResultsError::InconsistentScore {
                    function: function.to_string(),
                    variant: score.variant_name.clone(),
                    crossover,
                    selection,
                    found_crossover: score.crossover_method,
                    found_selection: score.selection_method,
                });
            }
        }

        let key = ResultKey::new(crossover, selection, function);
        if self.records.contains_key(&key) {
            return Err(ResultsError::DuplicateRecord {
                crossover,
                selection,
                function: function.to_string(),
            });
        }

        if !self.function_names.iter().any(|f| f == function) {
            self.function_names.push(function.to_string());
        }
        self.records.insert(key, record);
        Ok(self)
    }

    pub fn build(self) -> StaticResultStore {
        StaticResultStore {
            records: self.records,
            function_names: self.function_names,
        }
    }
}
