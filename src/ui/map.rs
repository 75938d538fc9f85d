use std::collections::HashMap;

use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Plot, PlotPoint, Points, Text};

use crate::color::ColorScale;
use crate::config::MapConfig;
use crate::data::model::CountryRecord;
use crate::state::TechFilter;
use crate::ui::charts::marker_radius;
use crate::ui::format_thousands;

/// Title naming the technology and the first selected region.
pub fn map_title(tech: TechFilter, first_region: Option<&str>) -> String {
    let what = match tech {
        TechFilter::All => "total towers".to_string(),
        TechFilter::Only(generation) => format!("{} towers", generation.short_label()),
    };
    format!("Map of {what} in {}", first_region.unwrap_or("Latin America"))
}

/// Geographic scatter: one marker per country at its coordinates, sized and
/// coloured by the technology filter's tower count.
pub fn tower_map(
    ui: &mut Ui,
    rows: &[&CountryRecord],
    tech: TechFilter,
    first_region: Option<&str>,
    config: &MapConfig,
) {
    let located: Vec<(&CountryRecord, (f64, f64))> = rows
        .iter()
        .filter_map(|&r| r.coordinates().map(|c| (r, c)))
        .collect();
    if located.is_empty() {
        ui.label("No coordinate data available to draw the map");
        return;
    }

    ui.strong(map_title(tech, first_region));

    let max = located.iter().map(|(r, _)| tech.value(r)).max().unwrap_or(0) as f64;
    let hover: HashMap<String, String> = located
        .iter()
        .map(|(r, _)| {
            let text = format!(
                "{}\nTotal: {}\n2G: {}  3G: {}\n4G: {}  5G: {}",
                r.country,
                format_thousands(r.total_cells),
                format_thousands(r.gsm),
                format_thousands(r.umts),
                format_thousands(r.lte),
                format_thousands(r.nr),
            );
            (r.country.clone(), text)
        })
        .collect();

    let half_span = config.span_degrees / 2.0;
    Plot::new("tower_map")
        .height(520.0)
        .data_aspect(1.0)
        .include_x(config.center_lon - half_span)
        .include_x(config.center_lon + half_span)
        .include_y(config.center_lat - half_span / 2.0)
        .include_y(config.center_lat + half_span / 2.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(move |name, value| match hover.get(name) {
            Some(text) => text.clone(),
            None => format!("{:.2}°, {:.2}°", value.y, value.x),
        })
        .show(ui, |plot_ui| {
            for (record, (lat, lon)) in &located {
                let value = tech.value(record) as f64;
                plot_ui.points(
                    Points::new(vec![[*lon, *lat]])
                        .radius(marker_radius(value, max, config.max_marker_radius))
                        .color(ColorScale::Turbo.for_value(value, max).gamma_multiply(0.85))
                        .name(&record.country),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(*lon, *lat),
                        RichText::new(&record.country).small().color(Color32::WHITE),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("Towers:").weak());
        for step in 0..=4 {
            let t = step as f64 / 4.0;
            ui.label(
                RichText::new(format_thousands((max * t).round() as u64))
                    .color(ColorScale::Turbo.at(t)),
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Generation;

    #[test]
    fn title_names_technology_and_region() {
        assert_eq!(
            map_title(TechFilter::Only(Generation::G5), Some("South America")),
            "Map of 5G towers in South America"
        );
        assert_eq!(map_title(TechFilter::All, None), "Map of total towers in Latin America");
    }
}
