//! Command-line dashboard for traffic-simulation scenarios and their vehicles.
//!
//! Scenarios and vehicles live in a remote JSON store reached through
//! [`store::DataStore`]. [`dashboard::Dashboard`] carries the page-level
//! operations, and [`simulation_engine`] animates a scenario's vehicles on a
//! fixed tick and renders each frame.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod global_variables;
pub mod models;
pub mod report;
pub mod simulation_engine;
pub mod store;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
