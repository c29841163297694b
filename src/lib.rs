pub mod batch;
pub mod classifier;
pub mod config;
pub mod error;
pub mod genbank;
pub mod location;
pub mod organism;
pub mod overrides;
pub mod structures;
pub mod window;
