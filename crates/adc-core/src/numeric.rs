use crate::AdcError;

/// Floating point type used throughout the toolkit
pub type Real = f64;

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

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, AdcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AdcError::NonFinite { what, value: v })
    }
}

/// Accepts finite values in the closed interval `[min, max]`.
pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, AdcError> {
    let v = ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(AdcError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_in_range_bounds_are_inclusive() {
        assert_eq!(ensure_in_range(0.0, 0.0, 1.0, "factor").unwrap(), 0.0);
        assert_eq!(ensure_in_range(1.0, 0.0, 1.0, "factor").unwrap(), 1.0);
        let err = ensure_in_range(1.5, 0.0, 1.0, "factor").unwrap_err();
        assert!(matches!(err, AdcError::OutOfRange { what: "factor", .. }));
    }
}
