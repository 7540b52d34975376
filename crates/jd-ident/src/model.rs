//! Robot-wide effect model.

use crate::error::{IdentError, IdentResult};
use jd_components::{DynamicsComponent, JointSample, RobotEffects, build_components};
use jd_config::ParameterSource;
use jd_core::{JointSet, Real};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::debug;

/// All effect components of one robot, laid out over a shared joint set.
///
/// Regressor columns follow component order; component `i` owns columns
/// `column_offsets()[i] .. column_offsets()[i] + parameter_count()`.
pub struct EffectModel {
    joints: JointSet,
    components: Vec<Box<dyn DynamicsComponent>>,
    offsets: Vec<usize>,
    parameter_count: usize,
}

impl EffectModel {
    /// Assemble a model, checking every component against `joints`.
    pub fn new(joints: JointSet, components: Vec<Box<dyn DynamicsComponent>>) -> IdentResult<Self> {
        let mut offsets = Vec::with_capacity(components.len());
        let mut parameter_count = 0;

        for component in &components {
            let binding = component.binding();
            if binding.joint_count() != joints.len() {
                return Err(IdentError::JointMismatch {
                    component: component.name().to_string(),
                    what: format!(
                        "built for {} joints, joint set has {}",
                        binding.joint_count(),
                        joints.len()
                    ),
                });
            }
            if joints.name(binding.index()) != Some(binding.joint()) {
                return Err(IdentError::JointMismatch {
                    component: component.name().to_string(),
                    what: format!(
                        "joint '{}' is not at index {}",
                        binding.joint(),
                        binding.index()
                    ),
                });
            }
            offsets.push(parameter_count);
            parameter_count += component.parameter_count();
        }

        debug!(
            joints = joints.len(),
            components = components.len(),
            parameters = parameter_count,
            "assembled effect model"
        );

        Ok(Self {
            joints,
            components,
            offsets,
            parameter_count,
        })
    }

    /// Build every effect configured for `robot`.
    pub fn from_config(robot: &str, source: &dyn ParameterSource) -> IdentResult<Self> {
        let RobotEffects { joints, components } = build_components(robot, source)?;
        Self::new(joints, components)
    }

    pub fn joints(&self) -> &JointSet {
        &self.joints
    }

    pub fn components(&self) -> &[Box<dyn DynamicsComponent>] {
        &self.components
    }

    /// Total number of identifiable parameters (sum over components).
    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    pub fn column_offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Nominal θ of every component, concatenated in column order.
    pub fn parameters(&self) -> DVector<Real> {
        let mut theta = DVector::zeros(self.parameter_count);
        for (component, &offset) in self.components.iter().zip(&self.offsets) {
            let p = component.parameter_count();
            theta.rows_mut(offset, p).copy_from(&component.parameters());
        }
        theta
    }

    /// `<joint>/<effect>/<parameter>` for every column.
    pub fn parameter_labels(&self) -> Vec<String> {
        self.components
            .iter()
            .flat_map(|component| {
                component
                    .parameter_names()
                    .iter()
                    .map(move |param| format!("{}/{}", component.name(), param))
            })
            .collect()
    }

    /// Sum of every component's torque, length N.
    pub fn compute_torque(&self, sample: JointSample<'_>) -> DVector<Real> {
        self.components
            .par_iter()
            .map(|component| component.compute_torque(sample))
            .reduce(|| DVector::zeros(self.joints.len()), |a, b| a + b)
    }

    /// Column-concatenated regressor, N × parameter_count().
    pub fn compute_regressor(&self, sample: JointSample<'_>) -> DMatrix<Real> {
        let blocks: Vec<DMatrix<Real>> = self
            .components
            .par_iter()
            .map(|component| component.compute_regressor(sample))
            .collect();

        let mut regressor = DMatrix::zeros(self.joints.len(), self.parameter_count);
        for (block, &offset) in blocks.iter().zip(&self.offsets) {
            regressor.columns_mut(offset, block.ncols()).copy_from(block);
        }
        regressor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jd_components::{JointBinding, LinearSpring, PolynomialFriction};
    use jd_config::ParamTree;

    fn boxed(component: impl DynamicsComponent + 'static) -> Box<dyn DynamicsComponent> {
        Box::new(component)
    }

    fn two_joint_model() -> EffectModel {
        let joints = JointSet::new(["j1", "j2"]).unwrap();
        let spring = LinearSpring::from_parts(
            JointBinding::from_joint_set("j1", "arm", &joints).unwrap(),
            2.0,
            -1.0,
        );
        let friction = PolynomialFriction::from_parts(
            JointBinding::from_joint_set("j2", "arm", &joints).unwrap(),
            0.1,
            0.05,
            0.01,
            10.0,
        );
        EffectModel::new(joints, vec![boxed(spring), boxed(friction)]).unwrap()
    }

    #[test]
    fn layout() {
        let model = two_joint_model();
        assert_eq!(model.parameter_count(), 4);
        assert_eq!(model.column_offsets(), &[0, 2]);
        assert_eq!(model.parameters().as_slice(), &[2.0, -1.0, 0.1, 0.05]);
        assert_eq!(
            model.parameter_labels(),
            vec![
                "j1/spring/stiffness",
                "j1/spring/offset",
                "j2/friction/coulomb",
                "j2/friction/viscous",
            ]
        );
    }

    #[test]
    fn torque_and_regressor_agree() {
        let model = two_joint_model();
        let q = DVector::from_column_slice(&[3.0, 0.0]);
        let dq = DVector::from_column_slice(&[0.0, 12.0]);
        let ddq = DVector::zeros(2);
        let sample = JointSample::new(&q, &dq, &ddq);

        let torque = model.compute_torque(sample);
        assert!((torque[0] - 5.0).abs() < 1e-12);
        assert!((torque[1] - 0.6).abs() < 1e-12);

        let regressor = model.compute_regressor(sample);
        assert_eq!(regressor.shape(), (2, 4));
        assert_eq!(regressor.row(0).iter().copied().collect::<Vec<_>>(), vec![3.0, 1.0, 0.0, 0.0]);
        assert_eq!(regressor.row(1).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 1.0, 10.0]);

        let predicted = &regressor * model.parameters();
        assert!((predicted - torque).norm() < 1e-12);
    }

    #[test]
    fn same_joint_contributions_sum() {
        let joints = JointSet::new(["j1"]).unwrap();
        let binding = JointBinding::from_joint_set("j1", "arm", &joints).unwrap();
        let a = LinearSpring::from_parts(binding.clone(), 1.0, 0.5);
        let b = LinearSpring::from_parts(binding, 2.0, 0.25);
        let model = EffectModel::new(joints, vec![boxed(a), boxed(b)]).unwrap();

        let q = DVector::from_element(1, 2.0);
        let torque = model.compute_torque(JointSample::new(&q, &q, &q));
        assert_eq!(torque[0], (1.0 * 2.0 + 0.5) + (2.0 * 2.0 + 0.25));
    }

    #[test]
    fn rejects_foreign_joint_set() {
        let other = JointSet::new(["a", "b", "c"]).unwrap();
        let spring = LinearSpring::from_parts(
            JointBinding::from_joint_set("b", "arm", &other).unwrap(),
            1.0,
            0.0,
        );
        let joints = JointSet::new(["a", "b"]).unwrap();
        let err = EffectModel::new(joints, vec![boxed(spring)]).err().unwrap();
        assert!(matches!(err, IdentError::JointMismatch { .. }));

        let reordered = JointSet::new(["b", "a", "c"]).unwrap();
        let spring = LinearSpring::from_parts(
            JointBinding::from_joint_set("b", "arm", &other).unwrap(),
            1.0,
            0.0,
        );
        assert!(EffectModel::new(reordered, vec![boxed(spring)]).is_err());
    }

    #[test]
    fn from_config_propagates_component_errors() {
        let tree = ParamTree::new()
            .with("arm/joint_names", vec!["j1"])
            .unwrap()
            .with("arm/j1/effects", vec!["spring"])
            .unwrap()
            .with("arm/j1/spring/coefficients", vec![1.0, 2.0, 3.0])
            .unwrap();
        let err = EffectModel::from_config("arm", &tree).err().unwrap();
        assert!(matches!(err, IdentError::Component(_)));
    }
}
