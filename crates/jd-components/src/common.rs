//! Common utilities for effect model calculations.

use crate::error::{ComponentError, ComponentResult};
use jd_config::ParameterSource;
use jd_core::Real;
use jd_core::numeric::ensure_all_finite;

/// Smallest accepted half-width of the zero-velocity band (rad/s)
pub const MIN_VELOCITY_THRESHOLD: Real = 1e-6;

/// Velocity saturation used when the configured one is not positive (rad/s)
pub const DEFAULT_VELOCITY_CLAMP: Real = 1e6;

/// Read `key` as a list of exactly `expected` finite reals.
pub fn read_coefficients(
    source: &dyn ParameterSource,
    key: &str,
    expected: usize,
) -> ComponentResult<Vec<Real>> {
    let values = source.reals(key)?;
    if values.len() != expected {
        return Err(ComponentError::WrongDimension {
            key: key.to_string(),
            expected,
            found: values.len(),
        });
    }
    ensure_all_finite(&values, "coefficient").map_err(|err| ComponentError::NonFinite {
        key: key.to_string(),
        source: err,
    })?;
    Ok(values)
}

/// Continuous sign approximation, linear inside `[-threshold, threshold]`.
///
/// Returns exactly 0.0 at zero and ±1.0 outside the band.
pub fn smoothed_sign(omega: Real, threshold: Real) -> Real {
    if omega == 0.0 {
        0.0
    } else if omega > threshold {
        1.0
    } else if omega < -threshold {
        -1.0
    } else {
        omega / threshold
    }
}

/// Clamp a value into `[-bound, bound]`.
pub fn saturate(value: Real, bound: Real) -> Real {
    value.clamp(-bound, bound)
}
