pub mod aggregate;
pub mod config;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod stats;
pub mod trial;
// cmd and reports belong to the binary (main.rs).
