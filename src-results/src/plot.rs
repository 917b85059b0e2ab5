use plotly::common::{HoverInfo, Line, Marker, Mode};
use plotly::layout::{Axis, AxisType};
use plotly::{Bar, Layout, Plot, Scatter};

use crate::chart::{AxisScale, ChartDataset, ChartKind, FitnessChart};
use crate::methods::SelectionMethod;

fn selection_color(selection: SelectionMethod) -> &'static str {
    match selection {
        SelectionMethod::Sts => "rgb(37, 99, 235)",     // blue
        SelectionMethod::Greedy => "rgb(16, 185, 129)", // green
    }
}

fn hover_texts(dataset: &ChartDataset) -> Vec<String> {
    dataset
        .points
        .iter()
        .map(|p| match p {
            Some(p) => format!("{}: {}", dataset.label, p.display()),
            None => format!("{}: no data", dataset.label),
        })
        .collect()
}

/// Render a prepared chart as a plotly figure
///
/// Bars (or lines) carry the floored values; hover texts show the raw ones.
pub fn chart_to_plot(chart: &FitnessChart, kind: ChartKind) -> Plot {
    let mut plot = Plot::new();

    for dataset in &chart.datasets {
        let y: Vec<Option<f64>> = dataset
            .points
            .iter()
            .map(|p| p.map(|p| p.plotted))
            .collect();
        let color = selection_color(dataset.selection);

        match kind {
            ChartKind::Bar => {
                let trace = Bar::new(chart.labels.clone(), y)
                    .name(dataset.label.as_str())
                    .hover_text_array(hover_texts(dataset))
                    .hover_info(HoverInfo::Text)
                    .marker(Marker::new().color(color));
                plot.add_trace(trace);
            }
            ChartKind::Line => {
                let trace = Scatter::new(chart.labels.clone(), y)
                    .mode(Mode::LinesMarkers)
                    .name(dataset.label.as_str())
                    .hover_text_array(hover_texts(dataset))
                    .hover_info(HoverInfo::Text)
                    .line(Line::new().color(color).width(2.0));
                plot.add_trace(trace);
            }
        }
    }

    let y_type = match chart.scale {
        AxisScale::Linear => AxisType::Linear,
        AxisScale::Logarithmic => AxisType::Log,
    };

    let layout = Layout::new()
        .title(chart.name.clone())
        .x_axis(Axis::new().tick_angle(45.0))
        .y_axis(
            Axis::new()
                .title("Mean best fitness".to_string())
                .type_(y_type),
        );
    plot.set_layout(layout);

    plot
}
