use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::color::{color32_from_rgb, generate_palette};
use crate::data::chart::{histogram_bins, ChartData, ChartDescriptor, ChartKind};
use crate::data::model::Value;

const CHART_HEIGHT: f32 = 280.0;
const HISTOGRAM_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Chart rendering: ChartDescriptor → egui_plot
// ---------------------------------------------------------------------------

/// Render one resolved chart descriptor. `idx` keeps plot ids unique when
/// several charts share a page.
pub fn chart_view(ui: &mut Ui, idx: usize, descriptor: &ChartDescriptor) {
    if !descriptor.title.is_empty() {
        ui.strong(&descriptor.title);
    }
    let override_color = descriptor.color.map(color32_from_rgb);

    match &descriptor.data {
        ChartData::Series { x_name, x, series } => {
            series_chart(ui, idx, descriptor.kind, x_name, x, series, override_color);
        }
        ChartData::Pie { labels, values } => {
            pie_chart(ui, idx, labels, values, override_color);
        }
        ChartData::Histogram { x_name, values } => {
            histogram_chart(ui, idx, x_name, values, override_color);
        }
    }
}

// ---------------------------------------------------------------------------
// Line / Bar / Scatter: multi-series over a shared x axis
// ---------------------------------------------------------------------------

fn series_chart(
    ui: &mut Ui,
    idx: usize,
    kind: ChartKind,
    x_name: &str,
    x: &[Value],
    series: &[crate::data::chart::SeriesData],
    override_color: Option<Color32>,
) {
    // Numeric x plots at face value; otherwise rows plot at their index and
    // the axis shows the original labels.
    let numeric_x: Option<Vec<f64>> = x.iter().map(Value::as_f64).collect();
    let labels: Option<Vec<String>> = numeric_x
        .is_none()
        .then(|| x.iter().map(|v| v.to_string()).collect());
    let xs: Vec<f64> =
        numeric_x.unwrap_or_else(|| (0..x.len()).map(|i| i as f64).collect());

    let palette = generate_palette(series.len());
    let n_series = series.len().max(1);

    let mut plot = Plot::new(("chart", idx))
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(x_name.to_string());

    if let Some(labels) = labels {
        plot = plot.x_axis_formatter(move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 0.05 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        });
    }

    plot.show(ui, |plot_ui| {
        for (si, s) in series.iter().enumerate() {
            let color = override_color.unwrap_or(palette[si]);
            match kind {
                ChartKind::Line => {
                    let points: PlotPoints = xs
                        .iter()
                        .zip(&s.values)
                        .filter_map(|(&xv, yv)| yv.as_f64().map(|y| [xv, y]))
                        .collect();
                    plot_ui.line(Line::new(points).name(&s.name).color(color).width(1.5));
                }
                ChartKind::Scatter => {
                    let points: PlotPoints = xs
                        .iter()
                        .zip(&s.values)
                        .filter_map(|(&xv, yv)| yv.as_f64().map(|y| [xv, y]))
                        .collect();
                    plot_ui.points(Points::new(points).name(&s.name).color(color).radius(3.0));
                }
                ChartKind::Bar => {
                    // Side-by-side grouping around each x position.
                    let width = 0.8 / n_series as f64;
                    let offset = (si as f64 - (n_series as f64 - 1.0) / 2.0) * width;
                    let bars: Vec<Bar> = xs
                        .iter()
                        .zip(&s.values)
                        .filter_map(|(&xv, yv)| {
                            yv.as_f64().map(|y| Bar::new(xv + offset, y).width(width))
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(&s.name).color(color));
                }
                // specify() never pairs these kinds with Series data.
                ChartKind::Pie | ChartKind::Histogram => {}
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Pie: one filled wedge polygon per positive value
// ---------------------------------------------------------------------------

fn pie_chart(
    ui: &mut Ui,
    idx: usize,
    labels: &[String],
    values: &[f64],
    override_color: Option<Color32>,
) {
    let total: f64 = values.iter().sum();

    Plot::new(("chart", idx))
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            if total <= 0.0 {
                return;
            }
            let palette = generate_palette(values.len());
            let mut start = std::f64::consts::FRAC_PI_2;
            for (i, (&size, label)) in values.iter().zip(labels).enumerate() {
                if size <= 0.0 {
                    continue;
                }
                let sweep = size / total * std::f64::consts::TAU;
                // Enough arc segments for a smooth edge.
                let segments = ((sweep / 0.05).ceil() as usize).max(2);
                let mut points = Vec::with_capacity(segments + 2);
                points.push([0.0, 0.0]);
                for k in 0..=segments {
                    let angle = start - sweep * (k as f64 / segments as f64);
                    points.push([angle.cos(), angle.sin()]);
                }
                let color = override_color.unwrap_or(palette[i]);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(points))
                        .name(label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );
                start -= sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Histogram: equal-width bars over the binned x values
// ---------------------------------------------------------------------------

fn histogram_chart(
    ui: &mut Ui,
    idx: usize,
    x_name: &str,
    values: &[f64],
    override_color: Option<Color32>,
) {
    let bins = histogram_bins(values, HISTOGRAM_BINS);
    let color = override_color.unwrap_or_else(|| generate_palette(1)[0]);

    let bars: Vec<Bar> = bins
        .iter()
        .map(|&(bin_start, bin_end, count)| {
            let width = (bin_end - bin_start).max(1e-3);
            Bar::new((bin_start + bin_end) / 2.0, count as f64).width(width)
        })
        .collect();

    Plot::new(("chart", idx))
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(x_name.to_string())
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(x_name).color(color));
        });
}
