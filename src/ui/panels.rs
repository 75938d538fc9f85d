use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::{APP_NAME, DATA_SOURCE_NOTE, VERSION};
use crate::data::export::export_file;
use crate::data::loader::DataSource;
use crate::data::model::Generation;
use crate::state::{AppState, TechFilter};
use crate::ui::format_thousands;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered) ----
    let logo = egui::include_image!("../../assets/logo.png");
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(logo)
                .max_width(ui.available_width() * 0.4)
                .max_height(80.0)
                .corner_radius(4.0),
        );
        ui.heading(RichText::new(APP_NAME).color(Color32::from_rgb(31, 119, 180)));
        ui.label(RichText::new("Unified interactive dashboard").weak());
    });
    ui.add_space(4.0);
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Filters");
            region_filter(ui, state);
            country_filter(ui, state);
            tech_selector(ui, state);
            ui.separator();

            ui.heading("Quick analysis");
            let top_label = format!("Top {} countries", state.config.top_n_quick);
            if ui
                .button(top_label)
                .on_hover_text("Show only the countries with the most towers")
                .clicked()
            {
                state.quick_top();
            }
            if ui
                .button("5G only")
                .on_hover_text("Show countries with 5G infrastructure")
                .clicked()
            {
                state.quick_5g();
            }
            if ui.button("All").on_hover_text("Show every country").clicked() {
                state.quick_all();
            }
            ui.separator();

            ui.heading("Dataset");
            dataset_details(ui, state);
            key_metrics(ui, state);
            ui.separator();

            ui.vertical_centered(|ui: &mut Ui| {
                ui.small(APP_NAME);
                ui.small(format!("Dashboard v{VERSION}"));
            });
        });
}

fn region_filter(ui: &mut Ui, state: &mut AppState) {
    if !state.dataset.has_region {
        return;
    }
    let regions = state.dataset.regions.clone();
    let header = format!("Regions  ({}/{})", state.filters.regions.len(), regions.len());

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("regions")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_regions();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_regions();
                }
            });
            for region in &regions {
                let mut checked = state.filters.regions.contains(region);
                if ui.checkbox(&mut checked, region.as_str()).changed() {
                    state.toggle_region(region);
                }
            }
        });
}

fn country_filter(ui: &mut Ui, state: &mut AppState) {
    let countries = state.available_countries();
    let n_selected = countries
        .iter()
        .filter(|c| state.filters.countries.contains(*c))
        .count();
    let header = format!("Countries  ({n_selected}/{})", countries.len());

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("countries")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_countries();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_countries();
                }
            });
            for country in &countries {
                let mut checked = state.filters.countries.contains(country);
                if ui.checkbox(&mut checked, country.as_str()).changed() {
                    state.toggle_country(country);
                }
            }
        });
}

fn tech_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Main technology");
    egui::ComboBox::from_id_salt("tech_filter")
        .selected_text(state.tech_filter.label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in TechFilter::OPTIONS {
                ui.selectable_value(&mut state.tech_filter, option, option.label());
            }
        });
}

fn dataset_details(ui: &mut Ui, state: &AppState) {
    egui::CollapsingHeader::new("Details")
        .id_salt("dataset_details")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("Source: {DATA_SOURCE_NOTE}"));
            ui.label(format!("File: {}", state.source));
            ui.label(format!("Coverage: {} countries", state.dataset.len()));
            ui.label("Technologies: 2G, 3G, 4G, 5G");
            if let DataSource::Fallback { reason } = &state.source {
                ui.label(RichText::new(reason).weak().small());
            }
        });
}

fn key_metrics(ui: &mut Ui, state: &AppState) {
    let m = &state.dataset_metrics;
    egui::CollapsingHeader::new("Key metrics")
        .id_salt("key_metrics")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("key_metrics_grid")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for generation in Generation::ALL.iter().rev() {
                        // 5G is a tiny share, so it gets more precision.
                        let share = if *generation == Generation::G5 {
                            format!("{:.2}%", m.share(*generation))
                        } else {
                            format!("{:.1}%", m.share(*generation))
                        };
                        ui.strong(generation.short_label());
                        ui.label(format_thousands(m.count(*generation)));
                        ui.label(share);
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export view as CSV…").clicked() {
                export_dialog(state, "csv");
                ui.close_menu();
            }
            if ui.button("Export view as JSON…").clicked() {
                export_dialog(state, "json");
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} countries loaded, {} visible",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        ui.separator();

        match &state.source {
            DataSource::File(_) => {
                ui.label(RichText::new(format!("Data: {}", state.source)).weak());
            }
            DataSource::Fallback { .. } => {
                ui.label(RichText::new("Using built-in dataset (10 countries)").weak());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tower data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}

fn export_dialog(state: &mut AppState, extension: &str) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered view")
        .set_file_name(format!("towers.{extension}"))
        .add_filter(extension.to_ascii_uppercase(), &[extension])
        .save_file();

    if let Some(path) = file {
        let result = export_file(&path, &state.visible());
        if let Err(e) = result {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
