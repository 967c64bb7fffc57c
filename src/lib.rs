//! Campus Course & Records Manager
//!
//! Students, courses and instructors kept in an in-memory record store, with
//! enrollment rules (no duplicates, a per-semester credit ceiling), grading,
//! credit-weighted GPA, transcripts and rankings on top. CSV data directories,
//! backups and text reports sit around that core.

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::engine::{
    EnrollmentEngine, EnrollmentPolicy, RankedStudent, Transcript, TranscriptLine,
};
pub use crate::core::error::{DataError, EngineError};
pub use crate::core::models;
pub use crate::core::store::RecordStore;
