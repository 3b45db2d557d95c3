//! Chat Stats - Dialog Statistics and Charts
//!
//! A Rust library for turning exported chat dialogs into frequency charts.
//!
//! # Features
//!
//! - Read per-dialog CSV exports
//! - Classify records through a fixed chain of accumulators
//! - Text analysis: length, case, punctuation, term mentions, language
//! - Bucketed bar charts and pie charts rendered to SVG

/// Accumulators behind each chain link
pub mod accumulators;
/// Grouping of sorted tables into labeled buckets
pub mod bucketize;
/// Record classification chain
pub mod chain;
/// Configuration management
pub mod config;
/// Error types
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Text analysis
pub mod nlp;
/// Ingest-and-report run
pub mod pipeline;
/// Chart rendering
pub mod render;
/// Display requests and the report emitter
pub mod report;
/// Dialog record sources
pub mod source;
/// Timestamp helpers
pub mod utils;
/// Input validation
pub mod validation;

// Re-export key components for easier access
pub use chain::ClassifierChain;
pub use config::AppConfig;
pub use error::{ChatStatsError, Result};
pub use models::{MessageKind, MessageRecord};
pub use pipeline::AnalysisPipeline;
pub use render::{GraphRenderer, SvgRenderer};
pub use source::{DialogDirectory, RecordSource};
