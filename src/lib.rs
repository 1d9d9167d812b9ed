pub mod api;
pub mod audit;
pub mod batch;
pub mod config;
pub mod core_types;
pub mod error;
pub mod finance;
pub mod model;
pub mod signals;
// cmd and reports are binary modules, wired up from main.rs.
