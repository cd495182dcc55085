//! Complete elliptic integrals K(m), E(m) and Pi(n, m)
//!
//! K and E use the arithmetic-geometric mean, which converges
//! quadratically (DLMF 19.8); the third kind is assembled from the
//! Carlson symmetric forms (DLMF 19.25.2). The parameter convention is
//! m = k^2 throughout.

use std::f64::consts::PI;
use crate::constants::*;
use crate::error::EvalError;
use super::carlson::{rf, rj};

/// Computes the complete elliptic integral of the first kind, K(m),
/// for 0 <= m < 1. K diverges as m -> 1.
pub fn ellipk(m: f64) -> Result<f64, EvalError> {
    if m < 0.0 || m >= 1.0 {
        return Err(EvalError::domain("ellipk", "K(m) requires 0 <= m < 1"));
    }
    if m == 0.0 {
        return Ok(0.5 * PI);
    }

    let mut a: f64 = 1.0;
    let mut b = (1.0 - m).sqrt();

    for _ in 0..AGM_MAX_ITER {
        let an = 0.5 * (a + b);
        let bn = (a * b).sqrt();
        if (an - bn).abs() < AGM_TOL * an {
            return Ok(0.5 * PI / an);
        }
        a = an;
        b = bn;
    }

    Err(EvalError::convergence("ellipk", AGM_MAX_ITER))
}

/// Computes the complete elliptic integral of the second kind, E(m),
/// for 0 <= m <= 1.
pub fn ellipe(m: f64) -> Result<f64, EvalError> {
    if m < 0.0 || m > 1.0 {
        return Err(EvalError::domain("ellipe", "E(m) requires 0 <= m <= 1"));
    }
    if m == 0.0 {
        return Ok(0.5 * PI);
    }
    if m == 1.0 {
        return Ok(1.0);
    }

    let mut a: f64 = 1.0;
    let mut b = (1.0 - m).sqrt();
    let mut sum = m;
    let mut power2 = 1.0;

    for _ in 0..AGM_MAX_ITER {
        let c = 0.5 * (a - b);
        let an = 0.5 * (a + b);
        let bn = (a * b).sqrt();
        power2 *= 2.0;
        sum += power2 * c * c;
        if c.abs() < AGM_TOL * an {
            return Ok(0.5 * PI / an * (1.0 - 0.5 * sum));
        }
        a = an;
        b = bn;
    }

    Err(EvalError::convergence("ellipe", AGM_MAX_ITER))
}

/// Computes the complete elliptic integral of the third kind,
/// Pi(n, m), for n < 1 and 0 <= m < 1, via
/// Pi(n, m) = RF(0, 1 - m, 1) + (n / 3) RJ(0, 1 - m, 1, 1 - n).
pub fn ellippi(n: f64, m: f64) -> Result<f64, EvalError> {
    if m < 0.0 || m >= 1.0 || n >= 1.0 {
        return Err(EvalError::domain("ellippi", "Pi(n, m) requires n < 1 and 0 <= m < 1"));
    }
    let y = 1.0 - m;
    Ok(rf(0.0, y, 1.0)? + n / 3.0 * rj(0.0, y, 1.0, 1.0 - n)?)
}

#[cfg(test)]
mod tests {
    use crate::error::EvalErrorKind;
    use super::*;

    const MAX_REL_ERR: f64 = 1.0e-10;

    #[test]
    fn first_kind() {
        let pts = [
            (0.0, 0.5 * PI),
            (0.5, 1.8540746773013719),
            (0.9, 2.5780921133481733),
        ];
        for (m, target) in pts.iter() {
            let val = ellipk(*m).unwrap();
            println!("K({}) = {:.15e}, calculated = {:.15e}", m, target, val);
            assert!(((val - target) / target).abs() < MAX_REL_ERR);
        }
        assert_eq!(ellipk(1.0).unwrap_err().kind(), EvalErrorKind::Domain);
        assert_eq!(ellipk(-0.1).unwrap_err().kind(), EvalErrorKind::Domain);
    }

    #[test]
    fn second_kind() {
        let pts = [
            (0.0, 0.5 * PI),
            (0.5, 1.3506438810476755),
            (1.0, 1.0),
        ];
        for (m, target) in pts.iter() {
            let val = ellipe(*m).unwrap();
            println!("E({}) = {:.15e}, calculated = {:.15e}", m, target, val);
            assert!(((val - target) / target).abs() < MAX_REL_ERR);
        }
        assert_eq!(ellipe(1.1).unwrap_err().kind(), EvalErrorKind::Domain);
    }

    #[test]
    fn legendre_relation() {
        // E(m) K(1-m) + E(1-m) K(m) - K(m) K(1-m) = pi/2
        for &m in &[0.1, 0.3, 0.5, 0.7, 0.9] {
            let k = ellipk(m).unwrap();
            let e = ellipe(m).unwrap();
            let kp = ellipk(1.0 - m).unwrap();
            let ep = ellipe(1.0 - m).unwrap();
            let lhs = e * kp + ep * k - k * kp;
            assert!(((lhs - 0.5 * PI) / (0.5 * PI)).abs() < 1.0e-9);
        }
    }

    #[test]
    fn third_kind_reduces_to_first() {
        // Pi(0, m) = K(m)
        for &m in &[0.2, 0.5, 0.8] {
            let val = ellippi(0.0, m).unwrap();
            let target = ellipk(m).unwrap();
            println!("Pi(0, {}) = {:.12e}, K = {:.12e}", m, val, target);
            assert!(((val - target) / target).abs() < 1.0e-8);
        }
    }

    #[test]
    fn third_kind_circular() {
        // Pi(n, 0) = pi / (2 sqrt(1 - n)), including negative n, which
        // is the characteristic the combiner feeds in
        for &n in &[-3.0, -1.0, 0.3, 0.7] {
            let val = ellippi(n, 0.0).unwrap();
            let target = 0.5 * PI / (1.0 - n).sqrt();
            println!("Pi({}, 0) = {:.12e}, expected = {:.12e}", n, val, target);
            assert!(((val - target) / target).abs() < 1.0e-8);
        }
    }
}
