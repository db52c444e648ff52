pub mod analysis;
pub mod build;
pub mod components;
