//! Simulation history table: filtering, sorting and summary figures

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::str::FromStr;

use deboard_gateway::SimulationRecord;
use deboard_results::format_fitness;
use deboard_wizard::SimulationContext;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Model,
    Benchmark,
    BestFitness,
    Timestamp,
}

impl FromStr for SortKey {
    type Err = DashboardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "model" => Ok(SortKey::Model),
            "benchmark" => Ok(SortKey::Benchmark),
            "bestfitness" | "best-fitness" | "fitness" => Ok(SortKey::BestFitness),
            "timestamp" | "time" => Ok(SortKey::Timestamp),
            _ => Err(DashboardError::InvalidArgument {
                what: "sort key",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = DashboardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(DashboardError::InvalidArgument {
                what: "sort direction",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::Timestamp,
            direction: SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BenchmarkFilter {
    #[default]
    All,
    Only(String),
}

impl BenchmarkFilter {
    pub fn matches(&self, record: &SimulationRecord) -> bool {
        match self {
            BenchmarkFilter::All => true,
            BenchmarkFilter::Only(name) => &record.benchmark == name,
        }
    }
}

impl From<&str> for BenchmarkFilter {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            BenchmarkFilter::All
        } else {
            BenchmarkFilter::Only(s.to_string())
        }
    }
}

/// Ordering of two present values of `key`; `None` when either is missing
fn compare(key: SortKey, a: &SimulationRecord, b: &SimulationRecord) -> Option<Ordering> {
    match key {
        SortKey::Model => Some(a.model.cmp(&b.model)),
        SortKey::Benchmark => Some(a.benchmark.cmp(&b.benchmark)),
        SortKey::BestFitness => Some(a.best_fitness?.total_cmp(&b.best_fitness?)),
        SortKey::Timestamp => Some(a.timestamp?.cmp(&b.timestamp?)),
    }
}

fn has_value(key: SortKey, record: &SimulationRecord) -> bool {
    match key {
        SortKey::Model | SortKey::Benchmark => true,
        SortKey::BestFitness => record.best_fitness.is_some(),
        SortKey::Timestamp => record.timestamp.is_some(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    records: Vec<SimulationRecord>,
    filter: BenchmarkFilter,
    sort: SortConfig,
}

impl RecordTable {
    pub fn new(records: Vec<SimulationRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn filter(&self) -> &BenchmarkFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: BenchmarkFilter) {
        self.filter = filter;
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
    }

    /// Header click: ascending, or descending when `key` is already sorted
    /// ascending
    pub fn sort_by(&mut self, key: SortKey) {
        let direction = if self.sort.key == key && self.sort.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.sort = SortConfig { key, direction };
    }

    /// Drop a record by id
    pub fn remove(&mut self, id: &str) -> Option<SimulationRecord> {
        let idx = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(idx))
    }

    /// All records, unfiltered
    pub fn records(&self) -> &[SimulationRecord] {
        &self.records
    }

    /// Filtered and sorted view; records lacking the sort value come last
    pub fn rows(&self) -> Vec<&SimulationRecord> {
        let key = self.sort.key;
        let mut rows: Vec<&SimulationRecord> =
            self.records.iter().filter(|r| self.filter.matches(r)).collect();
        rows.sort_by(|a, b| match (has_value(key, a), has_value(key, b)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
            (true, true) => {
                let ord = compare(key, a, b).unwrap_or(Ordering::Equal);
                match self.sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
        });
        rows
    }

    pub fn stats(&self, context: &SimulationContext) -> DashboardStats {
        DashboardStats::compute(&self.records, context.is_simulating())
    }

    /// Fixed-width text rendering of [`rows`](Self::rows)
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<8} {:<22} {:<20} {:>12} {:<20} {}",
            "ID", "Model Variant", "Benchmark", "Best Fitness", "Timestamp", "Status"
        );
        for r in self.rows() {
            let fitness = r
                .best_fitness
                .map(format_fitness)
                .unwrap_or_else(|| "-".to_string());
            let timestamp = r
                .timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "{:<8} {:<22} {:<20} {:>12} {:<20} {}",
                r.id,
                r.model,
                r.benchmark,
                fitness,
                timestamp,
                r.status.as_deref().unwrap_or("-")
            );
        }
        out
    }
}

/// Summary figures above the table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    pub total_simulations: usize,
    /// Mean over records that report a best fitness
    pub mean_best_fitness: Option<f64>,
    pub active_jobs: usize,
}

impl DashboardStats {
    pub fn compute(records: &[SimulationRecord], simulating: bool) -> Self {
        let values: Vec<f64> = records.iter().filter_map(|r| r.best_fitness).collect();
        let mean_best_fitness =
            (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);
        Self {
            total_simulations: records.len(),
            mean_best_fitness,
            active_jobs: usize::from(simulating),
        }
    }

    pub fn render(&self) -> String {
        let mean = self
            .mean_best_fitness
            .map(|v| format!("{v:.2e}"))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "Total Simulations: {}  Avg. Best Fitness: {}  Active Jobs: {}",
            self.total_simulations, mean, self.active_jobs
        )
    }
}
