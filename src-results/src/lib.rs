//! Benchmark results of Differential Evolution variants
//!
//! - [`StaticResultStore`]: immutable table keyed by
//!   (crossover method, selection method, benchmark function)
//! - [`query`]: aggregation of variant scores across crossover and selection
//!   methods for the analytics view
//! - [`chart`]: preparation of chart data (degenerate-value flooring, axis
//!   scale selection, labels) and rendering to plotly
//!
//! # Example
//!
//! ```rust
//! use deboard_results::{CrossoverFilter, SelectionMethod, StaticResultStore};
//!
//! let store = StaticResultStore::builtin()?;
//! let series = store.aggregate(&["sphere"], CrossoverFilter::All, &[SelectionMethod::Sts]);
//! assert_eq!(series.get("sphere").map(|s| s.models.len()), Some(10));
//! # Ok::<(), deboard_results::ResultsError>(())
//! ```

pub mod chart;
pub mod error;
pub mod methods;
pub mod plot;
pub mod query;
pub mod store;

pub use chart::{
    AxisScale, ChartDataset, ChartKind, ChartPoint, FitnessChart, FITNESS_FLOOR, floor_fitness,
    format_fitness, tick_label,
};
pub use error::ResultsError;
pub use methods::{CrossoverFilter, CrossoverMethod, SelectionMethod};
pub use plot::chart_to_plot;
pub use query::{AggregatedChartSeries, FunctionSeries};
pub use store::{ResultKey, ResultRecord, StaticResultStore, StoreBuilder, VariantScore};
