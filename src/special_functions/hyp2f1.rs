//! Gauss hypergeometric series 2F1(a, b; c; z)

use crate::constants::*;
use crate::error::EvalError;

/// Sums the hypergeometric series term by term until a term falls
/// below `HYP2F1_TOL`. Convergence requires |z| well inside the unit
/// disk; hitting the term cap is a fatal error.
pub fn hyp2f1(a: f64, b: f64, c: f64, z: f64) -> Result<f64, EvalError> {
    let (mut an, mut bn, mut cn) = (a, b, c);
    let mut term = an * bn * z / cn;
    let mut value = 1.0 + term;
    let mut n = 1;

    while term.abs() > HYP2F1_TOL && n < HYP2F1_MAX_ITER {
        an += 1.0;
        bn += 1.0;
        cn += 1.0;
        n += 1;
        term *= an * bn * z / (cn * n as f64);
        value += term;
    }

    if n == HYP2F1_MAX_ITER {
        return Err(EvalError::convergence("hyp2f1", HYP2F1_MAX_ITER));
    }

    Ok(value)
}

/// Like [`hyp2f1`], but also returns the derivative with respect to z,
/// d/dz 2F1(a, b; c; z) = (a b / c) 2F1(a + 1, b + 1; c + 1; z).
pub fn hyp2f1_with_gradient(a: f64, b: f64, c: f64, z: f64) -> Result<(f64, f64), EvalError> {
    let value = hyp2f1(a, b, c, z)?;
    let deriv = a * b / c * hyp2f1(a + 1.0, b + 1.0, c + 1.0, z)?;
    Ok((value, deriv))
}
