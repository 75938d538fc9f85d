//! TechComView: interactive dashboard of cellular tower infrastructure in
//! Latin America and the Caribbean.
//!
//! The `data` module is UI-free and holds loading, filtering and
//! aggregation; `ui`, `app` and `state` build the egui front end on top.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
