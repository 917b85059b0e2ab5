//! Chart preparation for aggregated fitness scores
//!
//! Fitness values span hundreds of orders of magnitude and many variants
//! reach exactly 0. For axis computation every value at or below
//! [`FITNESS_FLOOR`] is lifted to the floor so a logarithmic axis stays
//! finite; labels and tooltips keep showing the raw value.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ResultsError;
use crate::methods::SelectionMethod;
use crate::query::FunctionSeries;

/// Smallest value plotted on the fitness axis
pub const FITNESS_FLOOR: f64 = 1e-100;

/// Ratio between largest and smallest plotted value above which the y axis
/// switches to a logarithmic scale
const LOG_SCALE_RATIO: f64 = 1000.0;

/// Value used for axis computation
pub fn floor_fitness(value: f64) -> f64 {
    if value == 0.0 || value < FITNESS_FLOOR {
        FITNESS_FLOOR
    } else {
        value
    }
}

fn format_scientific(value: f64, digits: usize) -> String {
    let s = format!("{:.*e}", digits, value);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => s,
    }
}

/// Tooltip/label text of a raw fitness value, e.g. `0.0 -> "0.0000e+00"`
pub fn format_fitness(raw: f64) -> String {
    format_scientific(raw, 4)
}

/// Tick label of a plotted (floored) axis value
pub fn tick_label(plotted: f64) -> String {
    if plotted == FITNESS_FLOOR {
        "0".to_string()
    } else {
        format_scientific(plotted, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Logarithmic,
}

impl AxisScale {
    /// Log scale when the plotted values above the floor spread over more
    /// than three decades
    pub fn for_values(plotted: impl IntoIterator<Item = f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;
        for v in plotted.into_iter().filter(|&v| v > FITNESS_FLOOR) {
            seen = true;
            min = min.min(v);
            max = max.max(v);
        }
        if seen && max / min > LOG_SCALE_RATIO {
            AxisScale::Logarithmic
        } else {
            AxisScale::Linear
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => f.write_str("bar"),
            ChartKind::Line => f.write_str("line"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = ResultsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            _ => Err(ResultsError::UnknownMethod {
                kind: "chart kind",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Value as recorded
    pub raw: f64,
    /// Value used on the axis
    pub plotted: f64,
}

impl ChartPoint {
    pub fn new(raw: f64) -> Self {
        Self {
            raw,
            plotted: floor_fitness(raw),
        }
    }

    pub fn display(&self) -> String {
        format_fitness(self.raw)
    }
}

/// One bar/line group: the scores of a selection method per variant label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub selection: SelectionMethod,
    pub label: String,
    /// Aligned with [`FitnessChart::labels`]; `None` where the selection has
    /// no score for that variant
    pub points: Vec<Option<ChartPoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitnessChart {
    pub function: String,
    pub name: String,
    pub description: String,
    /// Distinct variant names in first-seen order
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub scale: AxisScale,
}

impl FitnessChart {
    /// Build the chart of one aggregated function.
    ///
    /// One dataset per selection method present in the series (sts first).
    /// When a variant appears several times for the same selection (several
    /// crossover methods), the first score is the one charted.
    pub fn from_series(series: &FunctionSeries) -> Self {
        let mut labels: Vec<String> = Vec::new();
        for m in &series.models {
            if !labels.contains(&m.variant_name) {
                labels.push(m.variant_name.clone());
            }
        }

        let datasets: Vec<ChartDataset> = SelectionMethod::ALL
            .into_iter()
            .filter(|&sel| series.models.iter().any(|m| m.selection_method == sel))
            .map(|sel| ChartDataset {
                selection: sel,
                label: sel.label().to_string(),
                points: labels
                    .iter()
                    .map(|label| {
                        series
                            .models
                            .iter()
                            .find(|m| m.selection_method == sel && &m.variant_name == label)
                            .map(|m| ChartPoint::new(m.mean_best_fitness))
                    })
                    .collect(),
            })
            .collect();

        let scale = AxisScale::for_values(
            datasets
                .iter()
                .flat_map(|d| d.points.iter().flatten().map(|p| p.plotted)),
        );

        Self {
            function: series.function.clone(),
            name: series.name.clone(),
            description: series.description.clone(),
            labels,
            datasets,
            scale,
        }
    }
}
