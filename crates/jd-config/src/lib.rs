//! jd-config: read-only parameter store for effect model construction.
//!
//! Parameters live in a nested key-value tree addressed by slash-separated
//! keys such as `arm/joint_names` or `arm/j2/friction/coefficients`. Effect
//! models receive the store as a `&dyn ParameterSource`, so tests and tools can
//! build one in memory while applications load it from YAML or JSON.

pub mod source;
pub mod tree;
pub mod value;

pub use source::ParameterSource;
pub use tree::ParamTree;
pub use value::ParamValue;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Parameter '{key}' not found")]
    MissingKey { key: String },

    #[error("Parameter '{key}' has wrong type: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<ParamTree> {
    let content = std::fs::read_to_string(path)?;
    ParamTree::from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, tree: &ParamTree) -> ConfigResult<()> {
    let content = serde_yaml::to_string(tree)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ConfigResult<ParamTree> {
    let content = std::fs::read_to_string(path)?;
    ParamTree::from_json_str(&content)
}

/// Load by file extension: `.json` is read as JSON, everything else as YAML.
pub fn load(path: &std::path::Path) -> ConfigResult<ParamTree> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
