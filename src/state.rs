use std::collections::BTreeSet;
use std::path::Path;

use crate::config::DashboardConfig;
use crate::data::filter::{filtered_indices, select, FilterState};
use crate::data::loader::{load_file, load_or_fallback, DataSource};
use crate::data::metrics::{aggregate, Metrics};
use crate::data::model::{CountryRecord, Dataset, Generation};
use crate::data::views;

// ---------------------------------------------------------------------------
// Selections that are not row filters
// ---------------------------------------------------------------------------

/// Technology shown on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TechFilter {
    #[default]
    All,
    Only(Generation),
}

impl TechFilter {
    pub const OPTIONS: [TechFilter; 5] = [
        TechFilter::All,
        TechFilter::Only(Generation::G2),
        TechFilter::Only(Generation::G3),
        TechFilter::Only(Generation::G4),
        TechFilter::Only(Generation::G5),
    ];

    pub fn label(self) -> String {
        match self {
            TechFilter::All => "All".to_string(),
            TechFilter::Only(generation) => generation.to_string(),
        }
    }

    /// Tower count this filter sizes map markers by.
    pub fn value(self, record: &CountryRecord) -> u64 {
        match self {
            TechFilter::All => record.total_cells,
            TechFilter::Only(generation) => generation.count(record),
        }
    }
}

/// Chart shown in the country comparison section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComparisonView {
    #[default]
    Total,
    ByTechnology,
    ByPopulation,
    Ranking5G,
}

impl ComparisonView {
    pub const OPTIONS: [ComparisonView; 4] = [
        ComparisonView::Total,
        ComparisonView::ByTechnology,
        ComparisonView::ByPopulation,
        ComparisonView::Ranking5G,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComparisonView::Total => "Total towers",
            ComparisonView::ByTechnology => "By technology",
            ComparisonView::ByPopulation => "By population",
            ComparisonView::Ranking5G => "5G ranking",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Active dataset; immutable until the user opens another file.
    pub dataset: Dataset,

    /// Where `dataset` came from.
    pub source: DataSource,

    /// Whole-dataset metrics for the sidebar summary.
    pub dataset_metrics: Metrics,

    /// Region / country selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    pub tech_filter: TechFilter,
    pub comparison: ComparisonView,

    /// Error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the first configured data file (or the built-in table) and
    /// select everything.
    pub fn new(config: DashboardConfig) -> Self {
        let outcome = load_or_fallback(&config.data_paths);
        let mut state = Self {
            config,
            dataset_metrics: Metrics::default(),
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            tech_filter: TechFilter::default(),
            comparison: ComparisonView::default(),
            status_message: None,
            dataset: outcome.dataset.clone(),
            source: outcome.source.clone(),
        };
        state.set_dataset(outcome.dataset, outcome.source);
        state
    }

    /// Ingest a newly loaded dataset and reset every selection.
    pub fn set_dataset(&mut self, dataset: Dataset, source: DataSource) {
        self.dataset_metrics = aggregate(&dataset.records);
        self.filters = FilterState::all_selected(&dataset);
        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
        self.refilter();
    }

    /// Replace the dataset with the contents of `path`. On failure the
    /// current dataset stays and the error is reported in the status line.
    pub fn open_file(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} countries from {}", dataset.len(), path.display());
                self.set_dataset(dataset, DataSource::File(path.to_path_buf()));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute `visible_indices` after a filter change.
    ///
    /// An empty region set means "no region constraint"; an empty country
    /// set means the user deselected every country and yields no rows.
    pub fn refilter(&mut self) {
        self.visible_indices = if self.filters.countries.is_empty() {
            Vec::new()
        } else {
            filtered_indices(&self.dataset, &self.filters)
        };
        log::debug!(
            "Filter: {} regions, {} countries -> {} rows",
            self.filters.regions.len(),
            self.filters.countries.len(),
            self.visible_indices.len()
        );
    }

    /// Records of the filtered view, in dataset order.
    pub fn visible(&self) -> Vec<&CountryRecord> {
        select(&self.dataset.records, &self.visible_indices)
    }

    /// Countries offered in the country list: those of the selected regions.
    pub fn available_countries(&self) -> Vec<String> {
        self.dataset.countries_in_regions(&self.filters.regions)
    }

    /// Toggle a region and reset the country selection to every country of
    /// the selected regions.
    pub fn toggle_region(&mut self, region: &str) {
        if !self.filters.regions.remove(region) {
            self.filters.regions.insert(region.to_string());
        }
        self.select_all_countries();
    }

    pub fn select_all_regions(&mut self) {
        self.filters.regions = self.dataset.regions.iter().cloned().collect();
        self.select_all_countries();
    }

    pub fn select_no_regions(&mut self) {
        self.filters.regions.clear();
        self.select_all_countries();
    }

    /// Toggle a single country.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.filters.countries.remove(country) {
            self.filters.countries.insert(country.to_string());
        }
        self.refilter();
    }

    pub fn select_all_countries(&mut self) {
        self.filters.countries = self.available_countries().into_iter().collect();
        self.refilter();
    }

    pub fn select_no_countries(&mut self) {
        self.filters.countries.clear();
        self.refilter();
    }

    /// Quick filter: the `top_n_quick` countries with most towers overall.
    pub fn quick_top(&mut self) {
        let all: Vec<&CountryRecord> = self.dataset.records.iter().collect();
        let countries = names(&views::top_n(&all, self.config.top_n_quick));
        self.set_quick_selection(countries);
    }

    /// Quick filter: countries with any 5G tower.
    pub fn quick_5g(&mut self) {
        let all: Vec<&CountryRecord> = self.dataset.records.iter().collect();
        let countries = names(&views::with_5g(&all));
        self.set_quick_selection(countries);
    }

    /// Quick filter: everything selected again.
    pub fn quick_all(&mut self) {
        self.filters = FilterState::all_selected(&self.dataset);
        self.refilter();
    }

    /// Quick filters pick countries across the whole dataset, so the region
    /// constraint is lifted.
    fn set_quick_selection(&mut self, countries: BTreeSet<String>) {
        self.filters.regions.clear();
        self.filters.countries = countries;
        self.refilter();
    }
}

fn names(rows: &[&CountryRecord]) -> BTreeSet<String> {
    rows.iter().map(|r| r.country.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::fallback_dataset;
    use crate::data::model::tests::record;

    fn state_with(dataset: Dataset) -> AppState {
        let mut state = AppState::new(DashboardConfig {
            data_paths: Vec::new(),
            ..DashboardConfig::default()
        });
        state.set_dataset(dataset, DataSource::File("test.csv".into()));
        state
    }

    fn visible_names(state: &AppState) -> Vec<String> {
        state.visible().iter().map(|r| r.country.clone()).collect()
    }

    #[test]
    fn starts_with_everything_visible() {
        let state = AppState::new(DashboardConfig {
            data_paths: Vec::new(),
            ..DashboardConfig::default()
        });
        assert!(matches!(state.source, DataSource::Fallback { .. }));
        assert_eq!(state.visible_indices.len(), 10);
        assert_eq!(state.dataset_metrics.total, aggregate(state.visible()).total);
    }

    #[test]
    fn deselecting_every_country_empties_the_view() {
        let mut state = state_with(fallback_dataset());
        state.select_no_countries();
        assert!(state.visible().is_empty());
        assert_eq!(aggregate(state.visible()), Metrics::default());
    }

    #[test]
    fn quick_top_selects_three_largest() {
        let mut state = state_with(fallback_dataset());
        state.quick_top();
        assert_eq!(visible_names(&state), vec!["Argentina", "Brasil", "Colombia"]);
        state.quick_all();
        assert_eq!(state.visible_indices.len(), 10);
    }

    #[test]
    fn quick_5g_selects_countries_with_nr() {
        let mut state = state_with(fallback_dataset());
        state.quick_5g();
        assert_eq!(visible_names(&state), vec!["Bolivia", "Brasil", "Colombia"]);
    }

    #[test]
    fn toggling_a_region_resets_countries_to_that_region() {
        let ds = Dataset::from_records(vec![
            record("Chile", 30, 0, Some("South America")),
            record("Cuba", 10, 0, Some("Caribbean")),
            record("Peru", 20, 0, Some("South America")),
        ])
        .unwrap();
        let mut state = state_with(ds);
        state.toggle_region("South America");
        assert_eq!(visible_names(&state), vec!["Cuba"]);
        assert_eq!(state.available_countries(), vec!["Cuba"]);

        state.select_no_regions();
        assert_eq!(visible_names(&state), vec!["Chile", "Cuba", "Peru"]);
    }

    #[test]
    fn rows_without_region_stay_visible_under_full_selection() {
        let ds = Dataset::from_records(vec![
            record("Chile", 30, 0, Some("South America")),
            record("Aruba", 4, 0, None),
        ])
        .unwrap();
        let mut state = state_with(ds);
        assert_eq!(visible_names(&state), vec!["Chile", "Aruba"]);
        assert_eq!(state.available_countries(), vec!["Chile", "Aruba"]);

        state.toggle_region("South America");
        state.toggle_region("South America");
        assert_eq!(visible_names(&state), vec!["Chile", "Aruba"]);

        state.quick_top();
        state.quick_all();
        assert_eq!(visible_names(&state), vec!["Chile", "Aruba"]);

        state.select_all_regions();
        assert_eq!(visible_names(&state), vec!["Chile", "Aruba"]);
    }

    #[test]
    fn failed_open_keeps_previous_dataset() {
        let mut state = state_with(fallback_dataset());
        state.open_file(Path::new("missing/towers.csv"));
        assert_eq!(state.dataset.len(), 10);
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
    }
}
