//! Editable simulation request
//!
//! Numeric fields keep the text as typed so that invalid input can be shown
//! back with its error; they are only parsed by validation.

use std::fmt;

use serde::Serialize;

use crate::options::SetField;

/// Numeric fields of page 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericField {
    Population,
    ScalingFactor,
    CrossoverRate,
    Dimension,
    Generations,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Population,
        NumericField::ScalingFactor,
        NumericField::CrossoverRate,
        NumericField::Dimension,
        NumericField::Generations,
    ];

    pub fn key(self) -> &'static str {
        match self {
            NumericField::Population => "population",
            NumericField::ScalingFactor => "scalingFactor",
            NumericField::CrossoverRate => "crossoverRate",
            NumericField::Dimension => "dimension",
            NumericField::Generations => "generations",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericField::Population => "Number of Population (NP)",
            NumericField::ScalingFactor => "Scaling Factor (F)",
            NumericField::CrossoverRate => "Crossover Rate (Cr)",
            NumericField::Dimension => "Dimension",
            NumericField::Generations => "Number of Generations",
        }
    }

    /// Closed interval of accepted values
    pub fn bounds(self) -> (f64, f64) {
        match self {
            NumericField::Population => (10.0, 20.0),
            NumericField::ScalingFactor => (0.1, 2.0),
            NumericField::CrossoverRate => (0.01, 1.0),
            NumericField::Dimension => (1.0, 1000.0),
            NumericField::Generations => (1.0, 100_000.0),
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            NumericField::Population | NumericField::Dimension | NumericField::Generations
        )
    }

    pub fn range_error(self) -> &'static str {
        match self {
            NumericField::Population => "Population must be between 10 and 20",
            NumericField::ScalingFactor => "Scaling factor must be between 0.1 and 2.0",
            NumericField::CrossoverRate => "Crossover rate must be between 0.01 and 1.0",
            NumericField::Dimension => "Dimension must be between 1 and 1000",
            NumericField::Generations => "Generations must be between 1 and 100000",
        }
    }

    /// Value prefilled by [`SimulationDraft::with_defaults`]
    pub fn default_text(self) -> &'static str {
        match self {
            NumericField::Population => "15",
            NumericField::ScalingFactor => "0.5",
            NumericField::CrossoverRate => "0.9",
            NumericField::Dimension => "30",
            NumericField::Generations => "1000",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Any wizard field; the key of the validation error map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Field {
    Numeric(NumericField),
    Set(SetField),
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Numeric(f) => f.key(),
            Field::Set(f) => f.key(),
        }
    }
}

impl From<NumericField> for Field {
    fn from(f: NumericField) -> Self {
        Field::Numeric(f)
    }
}

impl From<SetField> for Field {
    fn from(f: SetField) -> Self {
        Field::Set(f)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationDraft {
    population: String,
    scaling_factor: String,
    crossover_rate: String,
    dimension: String,
    generations: String,
    benchmarks: Vec<String>,
    mutation_schemes: Vec<String>,
    crossover_methods: Vec<String>,
    selection_methods: Vec<String>,
}

impl SimulationDraft {
    /// Every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric fields prefilled with the usual DE settings, sets empty
    pub fn with_defaults() -> Self {
        let mut draft = Self::new();
        for field in NumericField::ALL {
            draft.set_text(field, field.default_text());
        }
        draft
    }

    pub fn text(&self, field: NumericField) -> &str {
        match field {
            NumericField::Population => &self.population,
            NumericField::ScalingFactor => &self.scaling_factor,
            NumericField::CrossoverRate => &self.crossover_rate,
            NumericField::Dimension => &self.dimension,
            NumericField::Generations => &self.generations,
        }
    }

    pub fn set_text(&mut self, field: NumericField, value: impl Into<String>) {
        let slot = match field {
            NumericField::Population => &mut self.population,
            NumericField::ScalingFactor => &mut self.scaling_factor,
            NumericField::CrossoverRate => &mut self.crossover_rate,
            NumericField::Dimension => &mut self.dimension,
            NumericField::Generations => &mut self.generations,
        };
        *slot = value.into();
    }

    /// Selected members in selection order
    pub fn members(&self, field: SetField) -> &[String] {
        match field {
            SetField::Benchmarks => &self.benchmarks,
            SetField::MutationSchemes => &self.mutation_schemes,
            SetField::CrossoverMethods => &self.crossover_methods,
            SetField::SelectionMethods => &self.selection_methods,
        }
    }

    fn members_mut(&mut self, field: SetField) -> &mut Vec<String> {
        match field {
            SetField::Benchmarks => &mut self.benchmarks,
            SetField::MutationSchemes => &mut self.mutation_schemes,
            SetField::CrossoverMethods => &mut self.crossover_methods,
            SetField::SelectionMethods => &mut self.selection_methods,
        }
    }

    pub fn contains(&self, field: SetField, value: &str) -> bool {
        self.members(field).iter().any(|m| m == value)
    }

    /// Add `value` if absent, remove it otherwise. Returns whether it is now
    /// a member.
    pub fn toggle(&mut self, field: SetField, value: &str) -> bool {
        let members = self.members_mut(field);
        match members.iter().position(|m| m == value) {
            Some(idx) => {
                members.remove(idx);
                false
            }
            None => {
                members.push(value.to_string());
                true
            }
        }
    }

    /// Replace a whole set, dropping repeated values
    pub fn set_members<I, S>(&mut self, field: SetField, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = self.members_mut(field);
        members.clear();
        for value in values {
            let value: String = value.into();
            if !members.contains(&value) {
                members.push(value);
            }
        }
    }
}
