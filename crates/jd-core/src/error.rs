use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Joint set is empty")]
    EmptyJointSet,

    #[error("Duplicate joint name '{name}'")]
    DuplicateJoint { name: String },

    #[error("Joint '{name}' is not an element of the joint set")]
    UnknownJoint { name: String },
}
