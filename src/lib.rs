pub mod config;
pub mod encoder;
pub mod engine;
pub mod errors;
pub mod logger;
pub mod metrics;
pub mod pipeline;
pub mod renamer;
pub mod stats;
pub mod stripper;
