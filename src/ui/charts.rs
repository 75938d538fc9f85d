use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color::{generate_palette, ColorScale, GENERATION_COLORS};
use crate::data::metrics::Metrics;
use crate::data::model::{CountryRecord, Generation};
use crate::data::views;
use crate::state::ComparisonView;
use crate::ui::format_thousands;

const CHART_HEIGHT: f32 = 360.0;

/// Axis formatter labelling integer positions with category names.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let pos = mark.value;
        if pos.fract().abs() > f64::EPSILON || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

fn value_bars(
    rows: &[&CountryRecord],
    value: impl Fn(&CountryRecord) -> u64,
    scale: ColorScale,
) -> Vec<Bar> {
    let max = rows.iter().map(|r| value(r)).max().unwrap_or(0) as f64;
    rows.iter()
        .enumerate()
        .map(|(i, r)| {
            let v = value(r) as f64;
            Bar::new(i as f64, v)
                .name(&r.country)
                .fill(scale.for_value(v, max))
                .width(0.7)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Top countries (horizontal bars)
// ---------------------------------------------------------------------------

/// Horizontal bar chart of the `n` countries with most towers, largest on top.
pub fn top_countries(ui: &mut Ui, rows: &[&CountryRecord], n: usize) {
    let top = views::top_n(rows, n);
    if top.is_empty() {
        ui.label("No data matches the selected filters");
        return;
    }
    // Position 0 is the bottom of the chart.
    let mut bottom_up = top.clone();
    bottom_up.reverse();
    let labels: Vec<String> = bottom_up.iter().map(|r| r.country.clone()).collect();

    let chart = BarChart::new(value_bars(&bottom_up, |r| r.total_cells, ColorScale::Blues))
        .horizontal()
        .name("Towers");

    Plot::new("top_countries")
        .height(CHART_HEIGHT)
        .y_axis_formatter(category_formatter(labels))
        .x_axis_label("Towers")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Technology pie
// ---------------------------------------------------------------------------

/// Pie chart of tower counts per generation.
pub fn technology_pie(ui: &mut Ui, metrics: &Metrics) {
    let total = metrics.generation_total();
    if total == 0 {
        ui.label("No towers in the current selection");
        return;
    }

    Plot::new("technology_pie")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0_f64;
            for (generation, color) in Generation::ALL.into_iter().zip(GENERATION_COLORS) {
                let count = metrics.count(generation);
                if count == 0 {
                    continue;
                }
                let fraction = count as f64 / total as f64;
                let sweep = fraction * TAU;
                plot_ui.polygon(
                    Polygon::new(wedge(start, sweep))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE))
                        .name(generation.to_string()),
                );

                // Label wedges large enough to hold text.
                if fraction > 0.03 {
                    let mid = start + sweep / 2.0;
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        RichText::new(format!(
                            "{}\n{:.1}%",
                            generation.short_label(),
                            fraction * 100.0
                        ))
                        .color(Color32::BLACK),
                    ));
                }
                start += sweep;
            }
        });
}

/// Unit-circle sector from `start` spanning `sweep` radians.
fn wedge(start: f64, sweep: f64) -> PlotPoints<'static> {
    let steps = ((sweep / TAU) * 120.0).ceil().max(2.0) as usize;
    let mut points = vec![[0.0, 0.0]];
    points.extend((0..=steps).map(|i| {
        let a = start + sweep * i as f64 / steps as f64;
        [a.cos(), a.sin()]
    }));
    PlotPoints::from(points)
}

// ---------------------------------------------------------------------------
// Country comparisons
// ---------------------------------------------------------------------------

/// Render the comparison chart chosen in `view`.
pub fn comparison(
    ui: &mut Ui,
    view: ComparisonView,
    rows: &[&CountryRecord],
    has_population: bool,
) {
    match view {
        ComparisonView::Total => total_by_country(ui, rows),
        ComparisonView::ByTechnology => technology_by_country(ui, rows),
        ComparisonView::ByPopulation => {
            if has_population {
                density_scatter(ui, rows);
            } else {
                ui.label("No population data available");
            }
        }
        ComparisonView::Ranking5G => ranking_5g(ui, rows),
    }
}

fn total_by_country(ui: &mut Ui, rows: &[&CountryRecord]) {
    ui.strong("Total towers per country");
    let labels: Vec<String> = rows.iter().map(|r| r.country.clone()).collect();
    let chart = BarChart::new(value_bars(rows, |r| r.total_cells, ColorScale::Blues))
        .name("Total towers");
    Plot::new("compare_total")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("Total towers")
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// One stacked bar per generation, one stack segment per country.
fn technology_by_country(ui: &mut Ui, rows: &[&CountryRecord]) {
    ui.strong("Technology distribution per country");
    let labels: Vec<String> = Generation::ALL.iter().map(|g| g.to_string()).collect();
    let palette = generate_palette(rows.len());

    let mut charts: Vec<BarChart> = Vec::with_capacity(rows.len());
    for (record, color) in rows.iter().zip(palette) {
        let bars: Vec<Bar> = Generation::ALL
            .iter()
            .enumerate()
            .map(|(i, g)| Bar::new(i as f64, g.count(record) as f64).width(0.6))
            .collect();
        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(&record.country)
            .color(color)
            .stack_on(&below);
        charts.push(chart);
    }

    Plot::new("compare_technology")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("Towers")
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Towers per million inhabitants against population; rows without a
/// usable population are left out.
fn density_scatter(ui: &mut Ui, rows: &[&CountryRecord]) {
    ui.strong("Tower density vs population");
    let points = views::density(rows);
    let omitted = rows.len() - points.len();
    if points.is_empty() {
        ui.label("No population data available");
        return;
    }

    let palette = generate_palette(points.len());
    let max_total = points.iter().map(|p| p.record.total_cells).max().unwrap_or(0) as f64;

    Plot::new("compare_population")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Population (millions)")
        .y_axis_label("Towers per million inhabitants")
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\n{:.1}M people\n{:.0} towers / M", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for (p, color) in points.iter().zip(palette) {
                let radius = marker_radius(p.record.total_cells as f64, max_total, 25.0);
                plot_ui.points(
                    Points::new(vec![[p.population_millions, p.towers_per_million]])
                        .radius(radius)
                        .color(color)
                        .name(&p.record.country),
                );
            }
        });

    if omitted > 0 {
        ui.label(
            RichText::new(format!("{omitted} countries without population data omitted")).weak(),
        );
    }
}

fn ranking_5g(ui: &mut Ui, rows: &[&CountryRecord]) {
    ui.strong("5G infrastructure per country");
    let ranked = views::rank_5g(rows);
    let labels: Vec<String> = ranked.iter().map(|r| r.country.clone()).collect();
    let chart = BarChart::new(value_bars(&ranked, |r| r.nr, ColorScale::Purples))
        .name("5G towers")
        .element_formatter(Box::new(|bar, _chart| {
            format!("{}\n{} 5G towers", bar.name, format_thousands(bar.value as u64))
        }));
    Plot::new("compare_5g")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("5G towers")
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// Area-proportional marker radius, never smaller than 3 points.
pub fn marker_radius(value: f64, max: f64, max_radius: f32) -> f32 {
    if max <= 0.0 || value <= 0.0 {
        return 3.0;
    }
    ((value / max).sqrt() as f32 * max_radius).max(3.0)
}
