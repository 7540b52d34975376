//! Error types for component construction.

use jd_config::ConfigError;
use jd_core::error::CoreError;
use thiserror::Error;

/// Errors raised while building an effect model from configuration.
///
/// Every variant is fatal: no component is produced. Evaluation itself has no
/// error path.
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid joint set '{key}': {source}")]
    JointSet {
        key: String,
        #[source]
        source: CoreError,
    },

    #[error("Component joint name '{joint}' is not an element of '{key}'")]
    UnknownJoint { joint: String, key: String },

    #[error("'{key}' has wrong dimensions: expected {expected}, found {found}")]
    WrongDimension {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("Non-finite value in '{key}': {source}")]
    NonFinite {
        key: String,
        #[source]
        source: CoreError,
    },

    #[error("Unknown effect kind '{kind}' for joint '{joint}'")]
    UnknownEffect { kind: String, joint: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    /// True when the failure came from a key that is absent from the source.
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, ComponentError::Config(ConfigError::MissingKey { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::WrongDimension {
            key: "arm/j1/spring/coefficients".into(),
            expected: 2,
            found: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("arm/j1/spring/coefficients"));
        assert!(msg.contains("expected 2, found 3"));
    }

    #[test]
    fn error_conversion() {
        let cfg = ConfigError::MissingKey {
            key: "arm/joint_names".into(),
        };
        let err: ComponentError = cfg.into();
        assert!(err.is_missing_parameter());
    }
}
