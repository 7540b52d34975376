//! In-memory nested parameter tree.

use crate::source::ParameterSource;
use crate::value::ParamValue;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Nested parameter store loaded from YAML/JSON or built in code.
///
/// ```
/// use jd_config::{ParamTree, ParameterSource};
///
/// let tree = ParamTree::from_yaml_str(
///     "arm:\n  joint_names: [j1, j2]\n  j1:\n    spring:\n      coefficients: [2.0, -1.0]\n",
/// )
/// .unwrap();
/// assert_eq!(tree.strings("arm/joint_names").unwrap(), vec!["j1", "j2"]);
/// assert_eq!(tree.reals("/arm/j1/spring/coefficients").unwrap(), vec![2.0, -1.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParamTree {
    root: BTreeMap<String, ParamValue>,
}

impl ParamTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Store `value` under `key`, creating intermediate maps as needed.
    ///
    /// Fails if the key is empty or a prefix of it already holds a non-map.
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) -> ConfigResult<()> {
        let segments = segments(key);
        let Some((last, parents)) = segments.split_last() else {
            return Err(ConfigError::InvalidKey {
                key: key.to_string(),
                reason: "empty key",
            });
        };

        let mut map = &mut self.root;
        for segment in parents {
            let entry = map
                .entry(segment.to_string())
                .or_insert_with(|| ParamValue::Map(BTreeMap::new()));
            map = match entry {
                ParamValue::Map(inner) => inner,
                _ => {
                    return Err(ConfigError::InvalidKey {
                        key: key.to_string(),
                        reason: "a prefix of the key holds a non-map value",
                    });
                }
            };
        }
        map.insert(last.to_string(), value.into());
        Ok(())
    }

    /// Builder form of [`ParamTree::insert`].
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> ConfigResult<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Top-level keys (typically robot names).
    pub fn top_level_keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for ParamTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ParamValue::deserialize(deserializer)? {
            ParamValue::Map(root) => Ok(Self { root }),
            other => Err(serde::de::Error::custom(format!(
                "parameter file must be a mapping, found {}",
                other.type_name()
            ))),
        }
    }
}

impl ParameterSource for ParamTree {
    fn get(&self, key: &str) -> Option<&ParamValue> {
        let segments = segments(key);
        let (first, rest) = segments.split_first()?;
        let mut value = self.root.get(*first)?;
        for segment in rest {
            value = value.as_map()?.get(*segment)?;
        }
        Some(value)
    }
}

// Leading, trailing and doubled slashes are ignored.
fn segments(key: &str) -> Vec<&str> {
    key.split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let tree = ParamTree::new()
            .with("arm/joint_names", vec!["j1", "j2"])
            .unwrap()
            .with("arm/j2/friction/coefficients", vec![0.1, 0.05, 0.01, 10.0])
            .unwrap();

        assert_eq!(tree.strings("arm/joint_names").unwrap(), vec!["j1", "j2"]);
        assert_eq!(
            tree.reals("arm/j2/friction/coefficients").unwrap(),
            vec![0.1, 0.05, 0.01, 10.0]
        );
        assert!(tree.get("arm/j1").is_none());
        assert!(tree.get("arm/j2").unwrap().as_map().is_some());
    }

    #[test]
    fn insert_through_scalar_fails() {
        let mut tree = ParamTree::new().with("arm/gain", 1.0).unwrap();
        let err = tree.insert("arm/gain/inner", 2.0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKey { .. }));
    }

    #[test]
    fn empty_key_rejected() {
        let mut tree = ParamTree::new();
        assert!(tree.insert("//", 1.0).is_err());
        assert!(tree.get("").is_none());
    }

    #[test]
    fn numeric_joint_names_and_keys() {
        let tree = ParamTree::from_yaml_str(
            "arm:\n  joint_names: [1, 2]\n  1:\n    spring:\n      coefficients: [2.0, -1.0]\n",
        )
        .unwrap();
        assert_eq!(tree.strings("arm/joint_names").unwrap(), vec!["1", "2"]);
        assert_eq!(tree.reals("arm/1/spring/coefficients").unwrap(), vec![2.0, -1.0]);
    }

    #[test]
    fn top_level_must_be_a_mapping() {
        let err = ParamTree::from_yaml_str("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("must be a mapping"), "{err}");
    }

    #[test]
    fn json_and_yaml_agree() {
        let yaml = ParamTree::from_yaml_str("arm:\n  joint_names: [a]\n").unwrap();
        let json = ParamTree::from_json_str(r#"{"arm": {"joint_names": ["a"]}}"#).unwrap();
        assert_eq!(yaml, json);
        assert_eq!(yaml.top_level_keys().collect::<Vec<_>>(), vec!["arm"]);
    }
}
