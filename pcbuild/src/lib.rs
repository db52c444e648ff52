//! Catalog loading, compatibility checks, build analysis and recommendations for
//! PC part builds.

pub mod common;
pub mod modules;
pub mod schemas;

pub use chrono;
