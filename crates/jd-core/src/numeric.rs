use crate::CoreError;

/// Floating point type used for joint quantities and coefficients
pub type Real = f64;

/// Absolute/relative tolerance pair for comparing reals.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// `|a - b| <= abs` or `|a - b| <= rel · max(|a|, |b|)`.
    pub fn approx_eq(&self, a: Real, b: Real) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    tol.approx_eq(a, b)
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// First non-finite entry of `values`, if any, as an error.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> Result<(), CoreError> {
    values
        .iter()
        .try_for_each(|&v| ensure_finite(v, what).map(|_| ()))
}
