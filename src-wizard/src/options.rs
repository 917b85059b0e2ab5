//! Fixed option catalogs of the set-valued wizard fields

use std::fmt;

use deboard_results::{CrossoverMethod, SelectionMethod};
use serde::Serialize;

/// DE mutation schemes offered on page 2
pub const MUTATION_SCHEMES: [&str; 10] = [
    "DE/rand/1",
    "DE/rand/2",
    "DE/rand/3",
    "DE/best/1",
    "DE/best/2",
    "DE/best/3",
    "DE/current-to-best/1",
    "DE/current-to-best/2",
    "DE/current-to-rand/1",
    "DE/current-to-rand/2",
];

/// Benchmark functions a simulation can run against
pub const BENCHMARK_FUNCTIONS: [&str; 8] = [
    "Sphere Function",
    "Ackley Function",
    "Rastrigin Function",
    "Griewangk Function",
    "Schwefel 2.22",
    "Rosenbrock Function",
    "Zakharov Function",
    "Quartic Function",
];

/// Set-valued fields of page 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SetField {
    Benchmarks,
    MutationSchemes,
    CrossoverMethods,
    SelectionMethods,
}

impl SetField {
    pub const ALL: [SetField; 4] = [
        SetField::Benchmarks,
        SetField::MutationSchemes,
        SetField::CrossoverMethods,
        SetField::SelectionMethods,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SetField::Benchmarks => "benchmarks",
            SetField::MutationSchemes => "mutationSchemes",
            SetField::CrossoverMethods => "crossoverMethods",
            SetField::SelectionMethods => "selectionMethods",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SetField::Benchmarks => "Benchmark Functions",
            SetField::MutationSchemes => "Mutation Schemes",
            SetField::CrossoverMethods => "Crossover Methods",
            SetField::SelectionMethods => "Selection Methods",
        }
    }

    /// Singular noun used in messages
    fn noun(self) -> &'static str {
        match self {
            SetField::Benchmarks => "benchmark function",
            SetField::MutationSchemes => "mutation scheme",
            SetField::CrossoverMethods => "crossover method",
            SetField::SelectionMethods => "selection method",
        }
    }

    pub fn empty_error(self) -> String {
        format!("Please select at least one {}", self.noun())
    }

    /// Placeholder of an expanded but empty confirmation section
    pub fn empty_summary(self) -> String {
        format!("No {}s selected", self.noun())
    }

    /// Accepted values, in display order
    pub fn catalog(self) -> Vec<&'static str> {
        match self {
            SetField::Benchmarks => BENCHMARK_FUNCTIONS.to_vec(),
            SetField::MutationSchemes => MUTATION_SCHEMES.to_vec(),
            SetField::CrossoverMethods => CrossoverMethod::ALL.iter().map(|m| m.key()).collect(),
            SetField::SelectionMethods => SelectionMethod::ALL.iter().map(|m| m.key()).collect(),
        }
    }

    pub fn accepts(self, value: &str) -> bool {
        self.catalog().contains(&value)
    }

    /// Human readable form of a member; method keys are shown by label
    pub fn display_member(self, value: &str) -> String {
        let label = match self {
            SetField::CrossoverMethods => value.parse::<CrossoverMethod>().ok().map(|m| m.label()),
            SetField::SelectionMethods => value.parse::<SelectionMethod>().ok().map(|m| m.label()),
            _ => None,
        };
        label.unwrap_or(value).to_string()
    }
}

impl fmt::Display for SetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
