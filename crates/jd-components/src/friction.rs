//! First-order polynomial friction with a smoothed Coulomb term.

use crate::binding::JointBinding;
use crate::common::{
    DEFAULT_VELOCITY_CLAMP, MIN_VELOCITY_THRESHOLD, read_coefficients, saturate, smoothed_sign,
};
use crate::error::ComponentResult;
use crate::traits::{DynamicsComponent, JointSample};
use jd_config::ParameterSource;
use jd_core::Real;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

/// Config segment: `<robot>/<joint>/friction/coefficients`.
pub const FRICTION_KEY: &str = "friction";

const PARAMETER_NAMES: &[&str] = &["coulomb", "viscous"];

/// Velocity-dependent joint friction `τ = fc·s(ω) + fv·ω`.
///
/// `ω` is the joint velocity saturated at `±velocity_clamp` and `s` is a sign
/// function made linear inside `±velocity_threshold`, which keeps the model
/// continuous at zero velocity. Identifiable parameters are `[fc, fv]`.
#[derive(Debug, Clone)]
pub struct PolynomialFriction {
    name: String,
    binding: JointBinding,
    /// Coulomb coefficient fc
    pub coulomb: Real,
    /// Viscous coefficient fv
    pub viscous: Real,
    velocity_threshold: Real,
    velocity_clamp: Real,
}

impl PolynomialFriction {
    /// Build from `<robot>/<joint>/friction/coefficients`, a list of
    /// `[coulomb, viscous, velocity_threshold, velocity_clamp]`.
    pub fn new(joint: &str, robot: &str, source: &dyn ParameterSource) -> ComponentResult<Self> {
        let binding = JointBinding::resolve(joint, robot, source)?;
        Self::from_source(binding, source)
    }

    /// Build for an already resolved binding, reading only the coefficients.
    pub fn from_source(binding: JointBinding, source: &dyn ParameterSource) -> ComponentResult<Self> {
        let key = binding.coefficients_key(FRICTION_KEY);
        let c = read_coefficients(source, &key, 4)?;
        Ok(Self::from_parts(binding, c[0], c[1], c[2], c[3]))
    }

    /// Build from explicit values.
    ///
    /// A threshold at or below [`MIN_VELOCITY_THRESHOLD`] is raised to it and a
    /// non-positive clamp becomes [`DEFAULT_VELOCITY_CLAMP`]; both emit a warning.
    /// NaN counts as out of range for both.
    pub fn from_parts(
        binding: JointBinding,
        coulomb: Real,
        viscous: Real,
        velocity_threshold: Real,
        velocity_clamp: Real,
    ) -> Self {
        let name = format!("{}/{}", binding.joint(), FRICTION_KEY);

        let velocity_threshold = if velocity_threshold.is_nan()
            || velocity_threshold <= MIN_VELOCITY_THRESHOLD
        {
            warn!(
                component = %name,
                configured = velocity_threshold,
                "velocity threshold must be greater than {MIN_VELOCITY_THRESHOLD:e}, using default"
            );
            MIN_VELOCITY_THRESHOLD
        } else {
            velocity_threshold
        };

        let velocity_clamp = if velocity_clamp.is_nan() || velocity_clamp <= 0.0 {
            warn!(
                component = %name,
                configured = velocity_clamp,
                "velocity clamp must be strictly positive, using default {DEFAULT_VELOCITY_CLAMP:e}"
            );
            DEFAULT_VELOCITY_CLAMP
        } else {
            velocity_clamp
        };

        debug!(
            component = %name,
            index = binding.index(),
            coulomb,
            viscous,
            velocity_threshold,
            velocity_clamp,
            "built polynomial friction"
        );

        Self {
            name,
            binding,
            coulomb,
            viscous,
            velocity_threshold,
            velocity_clamp,
        }
    }

    pub fn velocity_threshold(&self) -> Real {
        self.velocity_threshold
    }

    pub fn velocity_clamp(&self) -> Real {
        self.velocity_clamp
    }

    /// Saturated velocity of the target joint.
    pub fn effective_velocity(&self, dq: &DVector<Real>) -> Real {
        saturate(dq[self.binding.index()], self.velocity_clamp)
    }

    /// Regressor row `[s(ω), ω]` of the target joint.
    fn regressor_row(&self, dq: &DVector<Real>) -> [Real; 2] {
        let omega = self.effective_velocity(dq);
        [smoothed_sign(omega, self.velocity_threshold), omega]
    }
}

impl DynamicsComponent for PolynomialFriction {
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
        DVector::from_column_slice(&[self.coulomb, self.viscous])
    }

    fn compute_torque(&self, sample: JointSample<'_>) -> DVector<Real> {
        let [sign, omega] = self.regressor_row(sample.dq);
        self.binding
            .torque_at(sign * self.coulomb + omega * self.viscous)
    }

    fn compute_regressor(&self, sample: JointSample<'_>) -> DMatrix<Real> {
        self.binding.regressor_with_row(&self.regressor_row(sample.dq))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use jd_core::JointSet;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sign_bounded_and_velocity_saturated(
            omega in -1e3_f64..1e3,
            threshold in 1e-3_f64..1.0,
            clamp in 1e-2_f64..50.0,
        ) {
            let joints = JointSet::new(["a", "b", "c"]).unwrap();
            let binding = JointBinding::from_joint_set("b", "r", &joints).unwrap();
            let friction = PolynomialFriction::from_parts(binding, 0.3, 0.02, threshold, clamp);

            let q = DVector::zeros(3);
            let dq = DVector::from_column_slice(&[7.0, omega, -7.0]);
            let sample = JointSample::new(&q, &dq, &q);
            let r = friction.compute_regressor(sample);

            prop_assert!(r[(1, 0)].abs() <= 1.0);
            prop_assert!(r[(1, 1)].abs() <= clamp);
            prop_assert_eq!(r[(1, 1)], omega.clamp(-clamp, clamp));
            for row in [0, 2] {
                prop_assert_eq!(r[(row, 0)], 0.0);
                prop_assert_eq!(r[(row, 1)], 0.0);
            }

            let torque = friction.compute_torque(sample);
            let expected = &r * friction.parameters();
            prop_assert!((torque[1] - expected[1]).abs() <= 1e-12 * (1.0 + expected[1].abs()));
            prop_assert_eq!(torque[0], 0.0);
            prop_assert_eq!(torque[2], 0.0);
        }
    }
}
