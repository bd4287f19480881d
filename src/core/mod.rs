//! Core functionality for the biometric collector.
//!
//! This module contains:
//! - Reading history with trailing-window selection
//! - Feature encoding from reading windows

pub mod encoder;
pub mod history;

// Re-export commonly used types
pub use encoder::{encode_window, EMBEDDING_DIM, FEATURES_PER_READING};
pub use history::ReadingHistory;
