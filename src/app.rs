use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::config::{DashboardConfig, APP_NAME, DATA_SOURCE_NOTE, VERSION};
use crate::data::metrics::aggregate;
use crate::data::model::CountryRecord;
use crate::state::{AppState, ComparisonView};
use crate::ui::{charts, map, panels, summary, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TechComViewApp {
    pub state: AppState,
}

impl TechComViewApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for TechComViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new(format!("{APP_NAME} – Unified Dashboard")).size(26.0));
    ui.label("Telecommunications infrastructure analysis – Latin America and the Caribbean");
    ui.separator();

    let rows: Vec<&CountryRecord> = state.visible();
    let metrics = aggregate(rows.iter().copied());

    ui.heading("Regional summary");
    summary::metric_cards(ui, &rows, &metrics);
    ui.separator();

    if rows.is_empty() {
        ui.label(RichText::new("⚠ No data matches the selected filters").strong());
        ui.label("Try widening the region or country selection in the side panel.");
        return;
    }

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].heading("Top countries – total towers");
        charts::top_countries(&mut cols[0], &rows, state.config.top_n_chart);
        cols[1].heading("Distribution by technology");
        charts::technology_pie(&mut cols[1], &metrics);
    });
    ui.separator();

    ui.heading("Interactive map");
    let first_region = state
        .dataset
        .regions
        .iter()
        .find(|r| state.filters.regions.contains(*r))
        .map(String::as_str);
    map::tower_map(ui, &rows, state.tech_filter, first_region, &state.config.map);
    ui.separator();

    ui.heading("Country comparisons");
    let mut comparison = state.comparison;
    egui::ComboBox::from_id_salt("comparison_view")
        .selected_text(comparison.label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in ComparisonView::OPTIONS {
                ui.selectable_value(&mut comparison, option, option.label());
            }
        });
    charts::comparison(ui, comparison, &rows, state.dataset.has_population);
    ui.separator();

    ui.heading("Detailed data per country");
    table::detail_table(ui, &rows, state.dataset.has_population);
    ui.separator();

    ui.heading("Key insights");
    summary::insights(ui, &rows, &metrics);
    ui.separator();

    ui.label(
        RichText::new(format!("{APP_NAME} | Data: {DATA_SOURCE_NOTE} | Dashboard v{VERSION}"))
            .small()
            .weak(),
    );

    state.comparison = comparison;
}
