//! Ordered joint sets.

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// Ordered sequence of unique joint names.
///
/// The position of a name in the set is the row/index every effect model uses
/// for that joint, so the set is immutable once built.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<String>", into = "Vec<String>"))]
pub struct JointSet {
    names: Vec<String>,
}

impl JointSet {
    /// Build a joint set, rejecting empty lists and duplicated names.
    pub fn new<I, S>(names: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(CoreError::EmptyJointSet);
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(CoreError::DuplicateJoint { name: name.clone() });
            }
        }
        Ok(Self { names })
    }

    /// Number of joints (N).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `name` in the set.
    pub fn index_of(&self, name: &str) -> CoreResult<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| CoreError::UnknownJoint {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Debug for JointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.names).finish()
    }
}

impl TryFrom<Vec<String>> for JointSet {
    type Error = CoreError;

    fn try_from(names: Vec<String>) -> CoreResult<Self> {
        Self::new(names)
    }
}

impl From<JointSet> for Vec<String> {
    fn from(set: JointSet) -> Self {
        set.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_follows_insertion_order() {
        let set = JointSet::new(["shoulder", "elbow", "wrist"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.index_of("shoulder").unwrap(), 0);
        assert_eq!(set.index_of("wrist").unwrap(), 2);
        assert_eq!(set.name(1), Some("elbow"));
        assert_eq!(set.name(3), None);
    }

    #[test]
    fn rejects_empty() {
        let err = JointSet::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, CoreError::EmptyJointSet);
    }

    #[test]
    fn rejects_duplicates() {
        let err = JointSet::new(["j1", "j2", "j1"]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateJoint { ref name } if name == "j1"));
    }

    #[test]
    fn unknown_joint_is_an_error() {
        let set = JointSet::new(["j1"]).unwrap();
        assert!(set.contains("j1"));
        let err = set.index_of("j9").unwrap_err();
        assert!(err.to_string().contains("j9"));
    }
}
