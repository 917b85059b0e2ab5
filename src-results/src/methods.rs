use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResultsError;

/// Crossover method a result was recorded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverMethod {
    Exponential,
    Binomial,
    #[serde(rename = "onepoint")]
    OnePoint,
    #[serde(rename = "twopoint")]
    TwoPoint,
}

impl CrossoverMethod {
    /// All methods in enumeration order
    pub const ALL: [CrossoverMethod; 4] = [
        CrossoverMethod::Exponential,
        CrossoverMethod::Binomial,
        CrossoverMethod::OnePoint,
        CrossoverMethod::TwoPoint,
    ];

    /// Key used on the wire and in the result table
    pub fn key(self) -> &'static str {
        match self {
            CrossoverMethod::Exponential => "exponential",
            CrossoverMethod::Binomial => "binomial",
            CrossoverMethod::OnePoint => "onepoint",
            CrossoverMethod::TwoPoint => "twopoint",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CrossoverMethod::Exponential => "Exponential Crossover",
            CrossoverMethod::Binomial => "Binomial Crossover",
            CrossoverMethod::OnePoint => "One Point Crossover",
            CrossoverMethod::TwoPoint => "Two Point Crossover",
        }
    }
}

impl fmt::Display for CrossoverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CrossoverMethod {
    type Err = ResultsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_lowercase();
        match t.as_str() {
            "exponential" | "exp" => Ok(CrossoverMethod::Exponential),
            "binomial" | "bin" => Ok(CrossoverMethod::Binomial),
            "onepoint" | "one-point" | "one_point" => Ok(CrossoverMethod::OnePoint),
            "twopoint" | "two-point" | "two_point" => Ok(CrossoverMethod::TwoPoint),
            _ => Err(ResultsError::UnknownMethod {
                kind: "crossover method",
                value: s.to_string(),
            }),
        }
    }
}

/// Selection method a result was recorded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    Sts,
    Greedy,
}

impl SelectionMethod {
    pub const ALL: [SelectionMethod; 2] = [SelectionMethod::Sts, SelectionMethod::Greedy];

    pub fn key(self) -> &'static str {
        match self {
            SelectionMethod::Sts => "sts",
            SelectionMethod::Greedy => "greedy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SelectionMethod::Sts => "STS Selection",
            SelectionMethod::Greedy => "Greedy Selection",
        }
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SelectionMethod {
    type Err = ResultsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sts" => Ok(SelectionMethod::Sts),
            "greedy" => Ok(SelectionMethod::Greedy),
            _ => Err(ResultsError::UnknownMethod {
                kind: "selection method",
                value: s.to_string(),
            }),
        }
    }
}

/// Crossover filter of the analytics view: every method, or a single one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossoverFilter {
    All,
    Only(CrossoverMethod),
}

impl Default for CrossoverFilter {
    fn default() -> Self {
        CrossoverFilter::Only(CrossoverMethod::Exponential)
    }
}

impl CrossoverFilter {
    /// Methods to fetch for this filter, in enumeration order
    pub fn methods(self) -> Vec<CrossoverMethod> {
        match self {
            CrossoverFilter::All => CrossoverMethod::ALL.to_vec(),
            CrossoverFilter::Only(m) => vec![m],
        }
    }
}

impl fmt::Display for CrossoverFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverFilter::All => f.write_str("all"),
            CrossoverFilter::Only(m) => m.fmt(f),
        }
    }
}

impl FromStr for CrossoverFilter {
    type Err = ResultsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CrossoverFilter::All);
        }
        s.parse().map(CrossoverFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossover_keys_roundtrip_through_from_str() {
        for m in CrossoverMethod::ALL {
            assert_eq!(m.key().parse::<CrossoverMethod>().unwrap(), m);
        }
        assert_eq!(
            "One-Point".parse::<CrossoverMethod>().unwrap(),
            CrossoverMethod::OnePoint
        );
    }

    #[test]
    fn test_unknown_selection() {
        let err = "tournament".parse::<SelectionMethod>().unwrap_err();
        assert!(err.to_string().contains("tournament"));
    }

    #[test]
    fn test_filter_methods() {
        assert_eq!(CrossoverFilter::All.methods(), CrossoverMethod::ALL.to_vec());
        assert_eq!(
            "binomial".parse::<CrossoverFilter>().unwrap().methods(),
            vec![CrossoverMethod::Binomial]
        );
        assert_eq!("ALL".parse::<CrossoverFilter>().unwrap(), CrossoverFilter::All);
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&CrossoverMethod::TwoPoint).unwrap();
        assert_eq!(json, "\"twopoint\"");
        let sel: SelectionMethod = serde_json::from_str("\"greedy\"").unwrap();
        assert_eq!(sel, SelectionMethod::Greedy);
    }
}
