//! Joint binding shared by every effect model.

use crate::error::{ComponentError, ComponentResult};
use jd_config::ParameterSource;
use jd_core::{JointSet, Real};
use nalgebra::{DMatrix, DVector};

/// Resolved placement of a component in the joint set.
///
/// Holds the robot and joint names, the target index and the joint count. The
/// index is looked up once and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointBinding {
    robot: String,
    joint: String,
    index: usize,
    joint_count: usize,
}

impl JointBinding {
    /// Resolve `joint` against `<robot>/joint_names` in `source`.
    pub fn resolve(joint: &str, robot: &str, source: &dyn ParameterSource) -> ComponentResult<Self> {
        let joints = load_joint_set(robot, source)?;
        Self::from_joint_set(joint, robot, &joints)
    }

    /// Resolve `joint` against an already loaded joint set.
    pub fn from_joint_set(joint: &str, robot: &str, joints: &JointSet) -> ComponentResult<Self> {
        let index = joints
            .index_of(joint)
            .map_err(|_| ComponentError::UnknownJoint {
                joint: joint.to_string(),
                key: joint_names_key(robot),
            })?;

        Ok(Self {
            robot: robot.to_string(),
            joint: joint.to_string(),
            index,
            joint_count: joints.len(),
        })
    }

    pub fn robot(&self) -> &str {
        &self.robot
    }

    pub fn joint(&self) -> &str {
        &self.joint
    }

    /// Target joint index in `[0, N)`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Joint count N.
    pub fn joint_count(&self) -> usize {
        self.joint_count
    }

    /// `<robot>/<joint>/<effect>/coefficients`
    pub fn coefficients_key(&self, effect: &str) -> String {
        format!("{}/{}/{}/coefficients", self.robot, self.joint, effect)
    }

    pub fn zero_torque(&self) -> DVector<Real> {
        DVector::zeros(self.joint_count)
    }

    pub fn zero_regressor(&self, parameter_count: usize) -> DMatrix<Real> {
        DMatrix::zeros(self.joint_count, parameter_count)
    }

    /// Torque vector with `value` at the target index and zeros elsewhere.
    pub fn torque_at(&self, value: Real) -> DVector<Real> {
        let mut torque = self.zero_torque();
        torque[self.index] = value;
        torque
    }

    /// Regressor with `row` written at the target row and zeros elsewhere.
    pub fn regressor_with_row(&self, row: &[Real]) -> DMatrix<Real> {
        let mut regressor = self.zero_regressor(row.len());
        for (col, value) in row.iter().enumerate() {
            regressor[(self.index, col)] = *value;
        }
        regressor
    }
}

/// `<robot>/joint_names`
pub fn joint_names_key(robot: &str) -> String {
    format!("{robot}/joint_names")
}

/// Read and validate `<robot>/joint_names`.
pub fn load_joint_set(robot: &str, source: &dyn ParameterSource) -> ComponentResult<JointSet> {
    let key = joint_names_key(robot);
    let names = source.strings(&key)?;
    JointSet::new(names).map_err(|err| ComponentError::JointSet { key, source: err })
}
