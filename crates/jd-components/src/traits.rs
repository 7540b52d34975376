//! Core traits for joint effect models.

use crate::binding::JointBinding;
use jd_core::Real;
use nalgebra::{DMatrix, DVector};

/// Joint positions, velocities and accelerations for the whole joint set.
///
/// Every vector is indexed by joint-set position and must hold at least N
/// entries; shorter inputs make evaluation panic.
#[derive(Clone, Copy, Debug)]
pub struct JointSample<'a> {
    pub q: &'a DVector<Real>,
    pub dq: &'a DVector<Real>,
    pub ddq: &'a DVector<Real>,
}

impl<'a> JointSample<'a> {
    pub fn new(q: &'a DVector<Real>, dq: &'a DVector<Real>, ddq: &'a DVector<Real>) -> Self {
        Self { q, dq, ddq }
    }
}

/// Trait for effect models acting at a single joint of a serial chain.
///
/// Components are immutable after construction and every call returns freshly
/// owned results, so one instance can be evaluated from several threads.
/// Results are dense over the joint set but zero outside the component's own
/// index (torque) or row (regressor).
pub trait DynamicsComponent: Send + Sync {
    /// Component name for debugging and labelling, e.g. `j2/friction`.
    fn name(&self) -> &str;

    /// Which joint the component acts on and how large the joint set is.
    fn binding(&self) -> &JointBinding;

    /// Number of identifiable parameters (P), fixed at construction.
    fn parameter_count(&self) -> usize;

    /// Short names of the parameters, in regressor column order.
    fn parameter_names(&self) -> &'static [&'static str];

    /// Nominal parameter vector θ (length P) as read from configuration.
    fn parameters(&self) -> DVector<Real>;

    /// Torque contribution, length N, nonzero only at the target index.
    ///
    /// Equals `compute_regressor(sample) * parameters()`.
    fn compute_torque(&self, sample: JointSample<'_>) -> DVector<Real>;

    /// Regressor matrix, N × P, nonzero only in the target row.
    fn compute_regressor(&self, sample: JointSample<'_>) -> DMatrix<Real>;
}
