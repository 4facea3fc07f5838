use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, HLine, Legend, Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color::SplitColors;

const CHART_HEIGHT: f32 = 260.0;

/// Points per full circle of a pie.
const PIE_RESOLUTION: usize = 120;

// ---------------------------------------------------------------------------
// Year charts
// ---------------------------------------------------------------------------

/// One bar per year, with an optional horizontal reference line.
pub fn year_bars(
    ui: &mut Ui,
    id: &str,
    values: &[(i32, f64)],
    color: Color32,
    reference: Option<(&str, f64)>,
) {
    let bars: Vec<Bar> = values
        .iter()
        .map(|&(year, v)| Bar::new(year as f64, v).width(0.8).fill(color))
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
            if let Some((name, y)) = reference {
                plot_ui.hline(HLine::new(y).name(name).color(Color32::RED));
            }
        });
}

/// Two bars per year side by side (yes / no).
pub fn split_bars(
    ui: &mut Ui,
    id: &str,
    values: &[(i32, Option<f64>, Option<f64>)],
    names: (&str, &str),
    colors: SplitColors,
) {
    let yes: Vec<Bar> = values
        .iter()
        .filter_map(|&(year, v, _)| Some(Bar::new(year as f64 - 0.2, v?).width(0.4)))
        .collect();
    let no: Vec<Bar> = values
        .iter()
        .filter_map(|&(year, _, v)| Some(Bar::new(year as f64 + 0.2, v?).width(0.4)))
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(yes).name(names.0).color(colors.0));
            plot_ui.bar_chart(BarChart::new(no).name(names.1).color(colors.1));
        });
}

/// One line per named series over the years.
pub fn year_lines(ui: &mut Ui, id: &str, series: &[(&str, Color32, Vec<(i32, f64)>)]) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (name, color, values) in series {
                let points: PlotPoints = values.iter().map(|&(x, y)| [x as f64, y]).collect();
                plot_ui.line(Line::new(points).name(*name).color(*color).width(2.0));
            }
        });
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Pie chart; slices with a zero value are skipped.
pub fn pie(ui: &mut Ui, id: &str, slices: &[(String, f64, Color32)]) {
    let total: f64 = slices.iter().map(|(_, v, _)| v).sum();
    if total <= 0.0 {
        ui.label("No data");
        return;
    }

    Plot::new(id)
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (label, value, color) in slices {
                if *value <= 0.0 {
                    continue;
                }
                let sweep = value / total * TAU;
                let share = value / total * 100.0;
                plot_ui.polygon(
                    Polygon::new(wedge(start, sweep))
                        .name(format!("{label} ({share:.1}%)"))
                        .fill_color(*color)
                        .stroke((1.0, Color32::WHITE)),
                );
                if share >= 5.0 {
                    let mid = start + sweep / 2.0;
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        RichText::new(format!("{share:.0}%")).color(Color32::BLACK),
                    ));
                }
                start += sweep;
            }
        });
}

/// Outline of a unit-circle wedge starting at angle `start`.
fn wedge(start: f64, sweep: f64) -> PlotPoints<'static> {
    let steps = ((sweep / TAU) * PIE_RESOLUTION as f64).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + sweep * i as f64 / steps as f64;
        points.push([angle.cos(), angle.sin()]);
    }
    PlotPoints::from(points)
}

// ---------------------------------------------------------------------------
// Labelled bars
// ---------------------------------------------------------------------------

/// Two stacked series over categorical labels (e.g. developer and publisher
/// counts per country).
pub fn stacked_label_bars(
    ui: &mut Ui,
    id: &str,
    labels: &[String],
    series: [(&str, Color32, Vec<f64>); 2],
) {
    let [(first_name, first_color, first), (second_name, second_color, second)] = series;
    let bars = |values: Vec<f64>| -> Vec<Bar> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Bar::new(i as f64, v).width(0.7))
            .collect()
    };
    let bottom = BarChart::new(bars(first)).name(first_name).color(first_color);
    let top = BarChart::new(bars(second))
        .name(second_name)
        .color(second_color)
        .stack_on(&[&bottom]);

    let tick_labels = labels.to_vec();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let index = mark.value.round();
            if (mark.value - index).abs() > f64::EPSILON || index < 0.0 {
                return String::new();
            }
            tick_labels.get(index as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(bottom);
            plot_ui.bar_chart(top);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_starts_at_centre_and_spans_the_sweep() {
        let points = wedge(0.0, TAU / 4.0);
        let points = points.points();
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[0].y, 0.0);
        let last = points[points.len() - 1];
        assert!(last.x.abs() < 1e-9);
        assert!((last.y - 1.0).abs() < 1e-9);
        // a quarter circle gets a quarter of the resolution
        assert_eq!(points.len(), PIE_RESOLUTION / 4 + 2);
    }
}
