//! Nexis Collector - continuous biometric telemetry collection for model
//! training.
//!
//! This library samples synthetic "biometric" metrics at a fixed rate,
//! aggregates them into in-memory telemetry streams, encodes a trailing
//! window of readings into a fixed-length feature vector, and durably
//! appends training records for downstream consumption. Every sensor
//! reading is currently a random draw; [`sampler::SensorSource`] is the
//! seam where real hardware plugs in.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Nexis Collector                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────┐   ┌──────────┐   ┌─────────┐  │
//! │  │ Sampler  │──▶│ Telemetry │   │ Encoder  │──▶│  Store  │  │
//! │  │ (synth)  │   │  streams  │   │ (768-d)  │   │ (JSONL) │  │
//! │  └──────────┘   └───────────┘   └──────────┘   └─────────┘  │
//! │        │              ▲               ▲                     │
//! │        └──────────────┴── history ────┘                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use nexis_collector::{
//!     core::encode_window,
//!     sampler::{SensorSource, SyntheticSampler},
//! };
//!
//! let mut sampler = SyntheticSampler::new();
//! let reading = sampler.sample().expect("synthetic sampling cannot fail");
//! let embedding = encode_window(std::slice::from_ref(&reading));
//! assert_eq!(embedding.len(), 768);
//! ```

pub mod config;
pub mod core;
pub mod pipeline;
pub mod sampler;
pub mod store;
pub mod telemetry;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use core::{encode_window, ReadingHistory, EMBEDDING_DIM, FEATURES_PER_READING};
pub use pipeline::{recovery_policy, CollectError, Pipeline, RecoveryAction};
pub use sampler::{Category, Reading, SampleError, SensorSource, SyntheticSampler};
pub use store::{
    read_records, SessionManifest, StoreError, TrainingDataWriter, TrainingRecord,
};
pub use telemetry::{
    create_shared_stats, create_shared_stats_with_persistence, CollectionStats, MetricSample,
    SharedCollectionStats, TelemetryLog,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
