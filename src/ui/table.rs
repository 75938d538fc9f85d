use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::CountryRecord;
use crate::data::views::{top_n, towers_per_million};
use crate::ui::format_thousands;

/// Display strings for one table row.
pub fn row_cells(record: &CountryRecord, with_population: bool) -> Vec<String> {
    let mut cells = vec![
        record.country.clone(),
        format_thousands(record.total_cells),
        format_thousands(record.gsm),
        format_thousands(record.umts),
        format_thousands(record.lte),
        format_thousands(record.nr),
    ];
    if with_population {
        cells.push(
            record
                .population_millions
                .map(|p| format!("{p:.1}M"))
                .unwrap_or_else(|| "n/a".to_string()),
        );
        cells.push(
            towers_per_million(record)
                .map(|d| format_thousands(d as u64))
                .unwrap_or_else(|| "n/a".to_string()),
        );
    }
    cells
}

/// Detailed per-country table, sorted by total towers descending.
pub fn detail_table(ui: &mut Ui, rows: &[&CountryRecord], with_population: bool) {
    let sorted = top_n(rows, rows.len());
    let mut headers = vec!["Country", "Total towers", "2G", "3G", "4G", "5G"];
    if with_population {
        headers.extend(["Population (M)", "Towers / M"]);
    }

    let mut builder = TableBuilder::new(ui)
        .id_salt("detail_table")
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .column(Column::auto().at_least(120.0));
    for _ in 1..headers.len() {
        builder = builder.column(Column::auto().at_least(80.0));
    }

    builder
        .header(22.0, |mut header| {
            for title in &headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(*title);
                });
            }
        })
        .body(|mut body| {
            for record in &sorted {
                body.row(20.0, |mut row| {
                    for (i, cell) in row_cells(record, with_population).into_iter().enumerate() {
                        row.col(|ui: &mut Ui| {
                            if i == 0 {
                                ui.label(RichText::new(cell).strong());
                            } else {
                                ui.label(cell);
                            }
                        });
                    }
                });
            }
        });
}
