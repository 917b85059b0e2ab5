//! Field validators of both wizard pages

use std::collections::BTreeMap;

use deboard_gateway::SimulationRequest;
use deboard_results::{CrossoverMethod, SelectionMethod};
use serde::Serialize;

use crate::draft::{Field, NumericField, SimulationDraft};
use crate::error::WizardError;
use crate::options::SetField;

/// Per-field error messages of the last validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: impl Into<Field>) -> Option<&str> {
        self.errors.get(&field.into()).map(String::as_str)
    }

    pub fn contains(&self, field: impl Into<Field>) -> bool {
        self.errors.contains_key(&field.into())
    }

    pub fn insert(&mut self, field: impl Into<Field>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn remove(&mut self, field: impl Into<Field>) -> Option<String> {
        self.errors.remove(&field.into())
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Leading integer of `text`, ignoring whatever follows the digits:
/// "15.5" is 15, "1e3" is 1, "-7x" is -7
fn leading_integer(text: &str) -> Option<i64> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude = rest[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse one numeric field. `None` when unset, non-numeric, or outside the
/// field's closed interval. Integer fields keep only their leading integer.
pub fn parse_numeric(field: NumericField, text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let value = if field.is_integer() {
        leading_integer(text)? as f64
    } else {
        text.parse::<f64>().ok().filter(|v| v.is_finite())?
    };
    let (lo, hi) = field.bounds();
    (lo..=hi).contains(&value).then_some(value)
}

/// Numeric fields of page 1
pub fn check_page1(draft: &SimulationDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in NumericField::ALL {
        if parse_numeric(field, draft.text(field)).is_none() {
            errors.insert(field, field.range_error());
        }
    }
    errors
}

/// Set fields of page 2: each must be non-empty
pub fn check_page2(draft: &SimulationDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in SetField::ALL {
        if draft.members(field).is_empty() {
            errors.insert(field, field.empty_error());
        }
    }
    errors
}

/// Both pages, then the typed request with numerics coerced
pub fn build_request(draft: &SimulationDraft) -> Result<SimulationRequest, WizardError> {
    let mut errors = check_page1(draft);
    errors.merge(check_page2(draft));
    if !errors.is_empty() {
        return Err(WizardError::InvalidDraft(errors));
    }

    let number = |field: NumericField| -> Result<f64, WizardError> {
        parse_numeric(field, draft.text(field)).ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.insert(field, field.range_error());
            WizardError::InvalidDraft(errors)
        })
    };

    Ok(SimulationRequest {
        population: number(NumericField::Population)? as u32,
        scaling_factor: number(NumericField::ScalingFactor)?,
        crossover_rate: number(NumericField::CrossoverRate)?,
        dimension: number(NumericField::Dimension)? as u32,
        generations: number(NumericField::Generations)? as u32,
        benchmarks: draft.members(SetField::Benchmarks).to_vec(),
        mutation_schemes: draft.members(SetField::MutationSchemes).to_vec(),
        crossover_methods: draft
            .members(SetField::CrossoverMethods)
            .iter()
            .map(|m| m.parse::<CrossoverMethod>())
            .collect::<Result<Vec<_>, _>>()?,
        selection_methods: draft
            .members(SetField::SelectionMethods)
            .iter()
            .map(|m| m.parse::<SelectionMethod>())
            .collect::<Result<Vec<_>, _>>()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_bounds_inclusive() {
        assert_eq!(parse_numeric(NumericField::Population, "10"), Some(10.0));
        assert_eq!(parse_numeric(NumericField::Population, " 20 "), Some(20.0));
        assert_eq!(parse_numeric(NumericField::Population, "21"), None);
        assert_eq!(parse_numeric(NumericField::ScalingFactor, "0.1"), Some(0.1));
        assert_eq!(parse_numeric(NumericField::ScalingFactor, "0.09"), None);
        assert_eq!(parse_numeric(NumericField::CrossoverRate, "1.0"), Some(1.0));
        assert_eq!(parse_numeric(NumericField::Generations, "100000"), Some(100_000.0));
    }

    #[test]
    fn test_parse_numeric_rejects_malformed() {
        assert_eq!(parse_numeric(NumericField::Dimension, ""), None);
        assert_eq!(parse_numeric(NumericField::Dimension, "abc"), None);
        assert_eq!(parse_numeric(NumericField::Dimension, "."), None);
        assert_eq!(parse_numeric(NumericField::Dimension, "-"), None);
        assert_eq!(parse_numeric(NumericField::ScalingFactor, "NaN"), None);
        assert_eq!(parse_numeric(NumericField::ScalingFactor, "inf"), None);
    }

    #[test]
    fn test_integer_fields_truncate_to_leading_integer() {
        assert_eq!(parse_numeric(NumericField::Dimension, "30.5"), Some(30.0));
        assert_eq!(parse_numeric(NumericField::Population, "20.9"), Some(20.0));
        assert_eq!(parse_numeric(NumericField::Population, "9.99"), None);
        assert_eq!(parse_numeric(NumericField::Generations, "1e3"), Some(1.0));
        assert_eq!(parse_numeric(NumericField::Generations, "+250 gens"), Some(250.0));
        assert_eq!(parse_numeric(NumericField::Dimension, "-5"), None);
    }

    #[test]
    fn test_fractional_population_accepted_and_coerced() {
        let mut draft = SimulationDraft::with_defaults();
        draft.set_text(NumericField::Population, "15.5");
        assert!(!check_page1(&draft).contains(NumericField::Population));

        draft.set_members(SetField::Benchmarks, ["Sphere Function"]);
        draft.set_members(SetField::MutationSchemes, ["DE/rand/1"]);
        draft.set_members(SetField::CrossoverMethods, ["exponential"]);
        draft.set_members(SetField::SelectionMethods, ["sts"]);
        let request = build_request(&draft).unwrap();
        assert_eq!(request.population, 15);
    }

    #[test]
    fn test_page1_messages() {
        let mut draft = SimulationDraft::with_defaults();
        draft.set_text(NumericField::Population, "5");
        draft.set_text(NumericField::CrossoverRate, "");
        let errors = check_page1(&draft);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(NumericField::Population),
            Some("Population must be between 10 and 20")
        );
        assert_eq!(
            errors.get(NumericField::CrossoverRate),
            Some("Crossover rate must be between 0.01 and 1.0")
        );
    }

    #[test]
    fn test_page2_messages() {
        let mut draft = SimulationDraft::new();
        draft.toggle(SetField::Benchmarks, "Sphere Function");
        let errors = check_page2(&draft);
        assert_eq!(errors.len(), 3);
        assert!(!errors.contains(SetField::Benchmarks));
        assert_eq!(
            errors.get(SetField::CrossoverMethods),
            Some("Please select at least one crossover method")
        );
    }

    #[test]
    fn test_build_request_coerces_numerics() {
        let mut draft = SimulationDraft::with_defaults();
        draft.toggle(SetField::Benchmarks, "Sphere Function");
        draft.toggle(SetField::MutationSchemes, "DE/rand/1");
        draft.toggle(SetField::CrossoverMethods, "binomial");
        draft.toggle(SetField::CrossoverMethods, "exponential");
        draft.toggle(SetField::SelectionMethods, "sts");

        let req = build_request(&draft).unwrap();
        assert_eq!(req.population, 15);
        assert_eq!(req.scaling_factor, 0.5);
        assert_eq!(req.crossover_rate, 0.9);
        assert_eq!(req.dimension, 30);
        assert_eq!(req.generations, 1000);
        assert_eq!(
            req.crossover_methods,
            vec![CrossoverMethod::Binomial, CrossoverMethod::Exponential]
        );
        assert_eq!(req.selection_methods, vec![SelectionMethod::Sts]);
    }

    #[test]
    fn test_build_request_reports_both_pages() {
        let mut draft = SimulationDraft::new();
        draft.set_text(NumericField::Population, "12");
        match build_request(&draft) {
            Err(WizardError::InvalidDraft(errors)) => {
                assert_eq!(errors.len(), 8);
                assert!(!errors.contains(NumericField::Population));
            }
            other => panic!("expected invalid draft, got {other:?}"),
        }
    }
}
