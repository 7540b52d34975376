//! jd-components: per-joint dynamic effect models.
//!
//! Provides models for lumped joint effects:
//! - Polynomial friction with a smoothed Coulomb sign
//! - Linear springs
//!
//! All components implement the `DynamicsComponent` trait. For a sample
//! `(q, q̇, q̈)` each returns a torque vector and a regressor matrix sized to the
//! whole joint set but nonzero only at its own joint, so contributions stack
//! into one linear model `τ = Φ·θ`.
//!
//! # Example
//!
//! ```
//! use jd_components::{DynamicsComponent, JointSample, PolynomialFriction};
//! use jd_config::ParamTree;
//! use nalgebra::DVector;
//!
//! let params = ParamTree::new()
//!     .with("arm/joint_names", vec!["j1", "j2"]).unwrap()
//!     .with("arm/j2/friction/coefficients", vec![0.1, 0.05, 0.01, 10.0]).unwrap();
//!
//! let friction = PolynomialFriction::new("j2", "arm", &params).unwrap();
//!
//! let q = DVector::zeros(2);
//! let dq = DVector::from_column_slice(&[0.0, 12.0]);
//! let sample = JointSample::new(&q, &dq, &q);
//!
//! let torque = friction.compute_torque(sample);
//! assert!((torque[1] - 0.6).abs() < 1e-12);
//! assert_eq!(torque[0], 0.0);
//! ```

pub mod binding;
pub mod catalog;
pub mod common;
pub mod error;
pub mod friction;
pub mod spring;
pub mod traits;

// Re-exports
pub use binding::{JointBinding, load_joint_set};
pub use catalog::{EffectKind, RobotEffects, build_components};
pub use error::{ComponentError, ComponentResult};
pub use friction::PolynomialFriction;
pub use spring::LinearSpring;
pub use traits::{DynamicsComponent, JointSample};
