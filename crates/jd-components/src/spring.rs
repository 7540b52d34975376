//! Linear joint spring.

use crate::binding::JointBinding;
use crate::common::read_coefficients;
use crate::error::ComponentResult;
use crate::traits::{DynamicsComponent, JointSample};
use jd_config::ParameterSource;
use jd_core::Real;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Config segment: `<robot>/<joint>/spring/coefficients`.
pub const SPRING_KEY: &str = "spring";

const PARAMETER_NAMES: &[&str] = &["stiffness", "offset"];

/// Elastic element `τ = k·q + τ0` acting on the joint's own position.
#[derive(Debug, Clone)]
pub struct LinearSpring {
    name: String,
    binding: JointBinding,
    /// Stiffness k
    pub stiffness: Real,
    /// Constant torque offset τ0
    pub offset: Real,
}

impl LinearSpring {
    /// Build from `<robot>/<joint>/spring/coefficients` = `[stiffness, offset]`.
    pub fn new(joint: &str, robot: &str, source: &dyn ParameterSource) -> ComponentResult<Self> {
        let binding = JointBinding::resolve(joint, robot, source)?;
        Self::from_source(binding, source)
    }

    pub fn from_source(binding: JointBinding, source: &dyn ParameterSource) -> ComponentResult<Self> {
        let key = binding.coefficients_key(SPRING_KEY);
        let c = read_coefficients(source, &key, 2)?;
        Ok(Self::from_parts(binding, c[0], c[1]))
    }

    pub fn from_parts(binding: JointBinding, stiffness: Real, offset: Real) -> Self {
        let name = format!("{}/{}", binding.joint(), SPRING_KEY);
        debug!(component = %name, index = binding.index(), stiffness, offset, "built linear spring");
        Self {
            name,
            binding,
            stiffness,
            offset,
        }
    }
}

impl DynamicsComponent for LinearSpring {
    fn name(&self) -> &str {
        &self.name
    }

    fn binding(&self) -> &JointBinding {
        &self.binding
    }

    fn parameter_count(&self) -> usize {
        2
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        PARAMETER_NAMES
    }

    fn parameters(&self) -> DVector<Real> {
        DVector::from_column_slice(&[self.stiffness, self.offset])
    }

    fn compute_torque(&self, sample: JointSample<'_>) -> DVector<Real> {
        let q = sample.q[self.binding.index()];
        self.binding.torque_at(self.stiffness * q + self.offset)
    }

    fn compute_regressor(&self, sample: JointSample<'_>) -> DMatrix<Real> {
        let q = sample.q[self.binding.index()];
        self.binding.regressor_with_row(&[q, 1.0])
    }
}
