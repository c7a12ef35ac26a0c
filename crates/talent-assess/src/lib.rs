//! Psychometric scoring and career matching.
//!
//! [`scoring`] turns one completed sitting into dimension scores, validity
//! metrics and a readiness verdict. [`matching`] ranks careers and compares
//! team members against those results. [`assessments`] wires both behind
//! storage and report ports and exposes them over HTTP.

pub mod assessments;
pub mod config;
pub mod error;
pub mod matching;
pub mod scoring;
pub mod telemetry;

pub use error::AppError;
