use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::metrics::Metrics;
use crate::data::model::CountryRecord;
use crate::data::views::{dominant_generation, leader};
use crate::ui::format_thousands;

const SUCCESS: Color32 = Color32::from_rgb(40, 167, 69);
const WARNING: Color32 = Color32::from_rgb(255, 193, 7);
const INFO: Color32 = Color32::from_rgb(23, 162, 184);

fn card(ui: &mut Ui, label: &str, value: String, delta: Option<String>) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(24.0).strong());
        if let Some(delta) = delta {
            ui.label(RichText::new(delta).color(SUCCESS).small());
        }
    });
}

fn callout(ui: &mut Ui, color: Color32, title: String, lines: &[String]) {
    egui::Frame::group(ui.style())
        .fill(color.gamma_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, color))
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(title).strong());
            for line in lines {
                ui.label(format!("• {line}"));
            }
        });
}

/// Headline metric cards for the filtered view.
pub fn metric_cards(ui: &mut Ui, rows: &[&CountryRecord], metrics: &Metrics) {
    let lead = leader(rows);
    ui.columns(4, |cols: &mut [Ui]| {
        card(
            &mut cols[0],
            "Total towers",
            format_thousands(metrics.total),
            Some(format!("{} countries", rows.len())),
        );
        card(&mut cols[1], "5G coverage", format_thousands(metrics.g5), None);
        card(&mut cols[2], "4G coverage", format_thousands(metrics.g4), None);
        match &lead {
            Some(l) => card(
                &mut cols[3],
                "Regional leader",
                l.record.country.clone(),
                Some(format!("{} towers", format_thousands(l.record.total_cells))),
            ),
            None => card(
                &mut cols[3],
                "Regional leader",
                "N/A".to_string(),
                Some("0 towers".into()),
            ),
        }
    });
}

/// Key insight callouts: leader, 5G status and dominant technology.
pub fn insights(ui: &mut Ui, rows: &[&CountryRecord], metrics: &Metrics) {
    ui.columns(3, |cols: &mut [Ui]| {
        match leader(rows) {
            Some(l) => callout(
                &mut cols[0],
                SUCCESS,
                format!("{} leads the selection", l.record.country),
                &[
                    format!("{:.1}% of all towers", l.share),
                    format!("{} 5G towers", format_thousands(l.record.nr)),
                ],
            ),
            None => callout(&mut cols[0], INFO, "No data to show".into(), &[]),
        }

        if metrics.g5 > 0 {
            callout(
                &mut cols[1],
                WARNING,
                "5G under development".into(),
                &[
                    format!("{} 5G towers in the selection", format_thousands(metrics.g5)),
                    format!("{:.2}% of the total", metrics.pct_5g),
                ],
            );
        } else {
            callout(&mut cols[1], WARNING, "No 5G infrastructure in the selection".into(), &[]);
        }

        let (generation, share) = dominant_generation(metrics);
        callout(
            &mut cols[2],
            INFO,
            format!("{} is dominant", generation.short_label()),
            &[
                format!("{share:.1}% of the infrastructure"),
                "Most deployed technology".to_string(),
            ],
        );
    });
}
