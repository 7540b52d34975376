//! Error types for model assembly and dataset handling.

use jd_components::ComponentError;
use thiserror::Error;

/// Errors that can occur while assembling a robot model or stacking data.
#[derive(Error, Debug)]
pub enum IdentError {
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Component '{component}' does not match the joint set: {what}")]
    JointMismatch { component: String, what: String },

    #[error("Sample {sample}: {what} has length {found}, expected {expected}")]
    SampleLength {
        sample: usize,
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Sample {sample} has no measured torque")]
    MissingMeasurement { sample: usize },

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type IdentResult<T> = Result<T, IdentError>;
