//! Analytics view over the built-in result table
//!
//! The view keeps the user's filter choices; every render aggregates the
//! store again, so toggling a selection method never changes the data.

use std::path::Path;

use build_html::*;
use deboard_results::{
    AggregatedChartSeries, ChartKind, CrossoverFilter, FitnessChart, SelectionMethod,
    StaticResultStore, chart_to_plot,
};

use crate::error::DashboardError;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-3.2.0.min.js";
const REPORT_TITLE: &str = "DE Variant Performance Analytics";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsView {
    pub filter: CrossoverFilter,
    pub show_sts: bool,
    pub show_greedy: bool,
    pub kind: ChartKind,
}

impl Default for AnalyticsView {
    fn default() -> Self {
        Self {
            filter: CrossoverFilter::default(),
            show_sts: true,
            show_greedy: true,
            kind: ChartKind::default(),
        }
    }
}

impl AnalyticsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection methods switched on, sts first
    pub fn enabled_selections(&self) -> Vec<SelectionMethod> {
        SelectionMethod::ALL
            .into_iter()
            .filter(|s| match s {
                SelectionMethod::Sts => self.show_sts,
                SelectionMethod::Greedy => self.show_greedy,
            })
            .collect()
    }

    pub fn series(&self, store: &StaticResultStore) -> AggregatedChartSeries {
        store.aggregate_all(self.filter, &self.enabled_selections())
    }

    pub fn charts(&self, store: &StaticResultStore) -> Vec<FitnessChart> {
        self.series(store)
            .iter()
            .map(FitnessChart::from_series)
            .collect()
    }

    /// Standalone HTML page with one plotly figure per function
    pub fn report_html(&self, store: &StaticResultStore) -> String {
        let charts = self.charts(store);
        let mut page = HtmlPage::new()
            .with_title(REPORT_TITLE)
            .with_script_link(PLOTLY_CDN)
            .with_header(1, REPORT_TITLE)
            .with_paragraph(format!(
                "Crossover: {}, selection: {}",
                self.filter,
                self.selection_summary()
            ));

        if charts.is_empty() {
            page = page.with_paragraph("No results for the current filter.");
        }

        for (i, chart) in charts.iter().enumerate() {
            let plot = chart_to_plot(chart, self.kind);
            let id = format!("chart-{}", chart.function);
            log::debug!("chart {i}: {} ({} datasets)", chart.function, chart.datasets.len());
            page = page
                .with_header(2, escape(&chart.name))
                .with_paragraph(escape(&chart.description))
                .with_raw(plot.to_inline_html(Some(id.as_str())));
        }

        page.to_html_string()
    }

    /// Write [`report_html`](Self::report_html) to `path`, creating its
    /// directory
    pub fn write_report(&self, store: &StaticResultStore, path: &Path) -> Result<(), DashboardError> {
        let html = self.report_html(store);
        let write_err = |source: std::io::Error| DashboardError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, html).map_err(write_err)?;
        log::info!("analytics report written to {}", path.display());
        Ok(())
    }

    fn selection_summary(&self) -> String {
        let enabled = self.enabled_selections();
        if enabled.is_empty() {
            return "none".to_string();
        }
        enabled
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deboard_results::CrossoverMethod;

    #[test]
    fn test_defaults() {
        let view = AnalyticsView::new();
        assert_eq!(view.filter, CrossoverFilter::Only(CrossoverMethod::Exponential));
        assert_eq!(view.enabled_selections(), SelectionMethod::ALL.to_vec());
        assert_eq!(view.kind, ChartKind::Bar);
    }

    #[test]
    fn test_toggles_drive_selections() {
        let store = StaticResultStore::builtin().unwrap();
        let mut view = AnalyticsView::new();
        let both = view.series(&store);
        let sphere = both.get("sphere").unwrap();
        assert!(sphere.models.iter().any(|m| m.selection_method == SelectionMethod::Greedy));

        view.show_greedy = false;
        assert_eq!(view.enabled_selections(), vec![SelectionMethod::Sts]);
        let sts_only = view.series(&store);
        assert!(
            sts_only
                .iter()
                .all(|s| s.models.iter().all(|m| m.selection_method == SelectionMethod::Sts))
        );

        view.show_sts = false;
        assert!(view.series(&store).is_empty());
        assert!(view.charts(&store).is_empty());
    }

    #[test]
    fn test_report_html() {
        let store = StaticResultStore::builtin().unwrap();
        let html = AnalyticsView::new().report_html(&store);
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains(REPORT_TITLE));
        assert!(html.contains("Sphere Function"));
        assert!(html.contains("chart-sphere"));
    }

    #[test]
    fn test_empty_report_says_so() {
        let store = StaticResultStore::builtin().unwrap();
        let view = AnalyticsView {
            show_sts: false,
            show_greedy: false,
            ..Default::default()
        };
        let html = view.report_html(&store);
        assert!(html.contains("No results for the current filter."));
        assert!(html.contains("selection: none"));
    }

    #[test]
    fn test_write_report_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("reports").join("analytics.html");
        let store = StaticResultStore::builtin().unwrap();
        AnalyticsView::new().write_report(&store, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<html"));
    }

    #[test]
    fn test_write_report_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let store = StaticResultStore::builtin().unwrap();
        let err = AnalyticsView::new()
            .write_report(&store, &blocker.join("report.html"))
            .unwrap_err();
        assert!(matches!(err, DashboardError::Write { .. }));
    }
}
