//! The read-only parameter lookup capability handed to effect models.

use crate::value::ParamValue;
use crate::{ConfigError, ConfigResult};

/// Read-only key-value parameter store.
///
/// Keys are slash-separated paths (`<robot>/<joint>/friction/coefficients`).
/// Implementors only provide [`ParameterSource::get`]; the typed accessors are
/// shared.
pub trait ParameterSource: Send + Sync {
    /// Look up the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<&ParamValue>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Like [`ParameterSource::get`] but a missing key is an error.
    fn require(&self, key: &str) -> ConfigResult<&ParamValue> {
        self.get(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
        })
    }

    /// A list of numbers. Integer entries are accepted.
    fn reals(&self, key: &str) -> ConfigResult<Vec<f64>> {
        let items = list_at(self.require(key)?, key, "list of reals")?;
        items
            .iter()
            .map(|item| {
                item.as_real().ok_or_else(|| ConfigError::TypeMismatch {
                    key: key.to_string(),
                    expected: "list of reals",
                    found: item.type_name(),
                })
            })
            .collect()
    }

    /// A list of names. Integer and bool entries are taken in their text form.
    fn strings(&self, key: &str) -> ConfigResult<Vec<String>> {
        let items = list_at(self.require(key)?, key, "list of strings")?;
        items
            .iter()
            .map(|item| {
                item.as_name()
                    .ok_or_else(|| ConfigError::TypeMismatch {
                        key: key.to_string(),
                        expected: "list of strings",
                        found: item.type_name(),
                    })
            })
            .collect()
    }

    /// Like [`ParameterSource::strings`] but an absent key yields an empty list.
    fn strings_or_empty(&self, key: &str) -> ConfigResult<Vec<String>> {
        if self.contains(key) {
            self.strings(key)
        } else {
            Ok(Vec::new())
        }
    }
}

fn list_at<'a>(
    value: &'a ParamValue,
    key: &str,
    expected: &'static str,
) -> ConfigResult<&'a [ParamValue]> {
    value.as_list().ok_or_else(|| ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: value.type_name(),
    })
}
