use techcomview::config::DashboardConfig;
use techcomview::data::metrics::aggregate;
use techcomview::data::model::Generation;
use techcomview::data::views::{density, dominant_generation, leader, rank_5g, top_n};
use techcomview::state::{AppState, TechFilter};

fn builtin_state() -> AppState {
    AppState::new(DashboardConfig {
        data_paths: Vec::new(),
        ..DashboardConfig::default()
    })
}

#[test]
fn builtin_dashboard_views() {
    let state = builtin_state();
    let rows = state.visible();
    let metrics = aggregate(rows.iter().copied());

    let top: Vec<&str> = top_n(&rows, 5).iter().map(|r| r.country.as_str()).collect();
    assert_eq!(top, vec!["Brasil", "Argentina", "Colombia", "Chile", "Perú"]);

    let ranked: Vec<&str> = rank_5g(&rows).iter().take(3).map(|r| r.country.as_str()).collect();
    assert_eq!(ranked, vec!["Brasil", "Bolivia", "Colombia"]);

    let lead = leader(&rows).unwrap();
    assert_eq!(lead.record.country, "Brasil");
    assert!((lead.share - 58.53).abs() < 0.01);

    // UMTS dominates the South American build-out.
    let (generation, _) = dominant_generation(&metrics);
    assert_eq!(generation, Generation::G3);

    assert_eq!(density(&rows).len(), 10);
}

#[test]
fn sidebar_metrics_ignore_filters() {
    let mut state = builtin_state();
    let before = state.dataset_metrics;
    state.quick_5g();
    assert_eq!(state.visible().len(), 3);
    assert_eq!(state.dataset_metrics, before);

    let filtered = aggregate(state.visible());
    assert_eq!(filtered.g5, before.g5);
    assert!(filtered.pct_5g > before.pct_5g);
}

#[test]
fn tech_filter_sizes_map_by_generation() {
    let state = builtin_state();
    let brasil = state
        .dataset
        .records
        .iter()
        .find(|r| r.country == "Brasil")
        .unwrap();
    assert_eq!(TechFilter::All.value(brasil), 1_903_025);
    assert_eq!(TechFilter::Only(Generation::G5).value(brasil), 170);
}
