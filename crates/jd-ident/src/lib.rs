//! Robot-wide assembly of joint effect models for parameter identification.
//!
//! An [`EffectModel`] owns the joint set and every effect component of one
//! robot. It sums their torques and concatenates their regressors so that
//! `τ = Φ(q, q̇, q̈)·θ` holds for the whole robot. A [`Dataset`] of measured
//! samples can then be stacked into the tall identification matrix consumed by
//! an external least-squares solver.

pub mod dataset;
pub mod error;
pub mod model;

pub use dataset::{Dataset, Sample, SampleRecord, stack_measured, stack_regressor, stack_torque};
pub use error::{IdentError, IdentResult};
pub use model::EffectModel;
