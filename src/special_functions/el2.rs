//! Incomplete elliptic integrals by duplication
//!
//! Algorithm adapted from:
//!
//! * R. Bulirsch,
//!   "Numerical calculation of elliptic integrals and elliptic functions",
//!   Numerische Mathematik 7, 78--90 (1965)

use crate::constants::*;
use crate::error::EvalError;

/// Computes the Bulirsch integral el2 for a whole vector of integration
/// limits `x` (tangents of the amplitude) sharing one complementary
/// modulus `kc` and coefficients `a`, `b`.
///
/// The halting condition of the duplication iteration depends only on
/// the scalar state, not on `x`, so evaluating all the limits at once
/// costs little more than evaluating one.
///
/// `kc == 0` is rejected: the integral diverges for unit modulus.
pub fn el2(x: &[f64], kc: f64, a: f64, b: f64) -> Result<Vec<f64>, EvalError> {
    if kc == 0.0 {
        return Err(EvalError::domain("el2", "kc = 0, the integral diverges for unit modulus"));
    }

    let len = x.len();
    let (mut a, mut b) = (a, b);

    // Per-element state
    let mut c: Vec<f64> = x.iter().map(|&x| x * x).collect();
    let mut d: Vec<f64> = c.iter().map(|&c| 1.0 + c).collect();
    let mut p: Vec<f64> = c.iter().zip(d.iter())
        .map(|(&c, &d)| ((1.0 + kc * kc * c) / d).sqrt())
        .collect();
    for i in 0..len {
        d[i] = x[i] / d[i];
        c[i] = d[i] / (2.0 * p[i]);
    }
    let mut y: Vec<f64> = x.iter().map(|&x| (1.0 / x).abs()).collect();
    let mut f = vec![0.0; len];
    let mut l = vec![0.0; len];

    // Scalar state
    let z = a - b;
    let mut i0 = a;
    a = 0.5 * (b + a);
    let mut m = 1.0;
    let mut kc = kc.abs();
    let mut e;
    let mut converged = false;

    for _ in 0..EL2_MAX_ITER {
        b = i0 * kc + b;
        e = m * kc;
        for i in 0..len {
            let g = e / p[i];
            d[i] = f[i] * g + d[i];
            p[i] = g + p[i];
        }
        f.copy_from_slice(&c);
        i0 = a;
        for i in 0..len {
            c[i] = 0.5 * (d[i] / p[i] + c[i]);
        }
        let g = m;
        m = kc + m;
        a = 0.5 * (b / m + a);
        for i in 0..len {
            y[i] = -e / y[i] + y[i];
            if y[i] == 0.0 {
                // Patched analytically to avoid dividing by zero on the
                // next pass
                y[i] = e.sqrt() * c[i] * b;
            }
        }

        // The test must be affirmative: NaN scalar state may never
        // count as converged, it has to run into the iteration cap
        if (g - kc).abs() <= EL2_CA * g {
            converged = true;
            break;
        }

        kc = 2.0 * e.sqrt();
        for i in 0..len {
            l[i] *= 2.0;
            if y[i] < 0.0 {
                l[i] += 1.0;
            }
        }
    }

    if !converged {
        return Err(EvalError::convergence("el2", EL2_MAX_ITER));
    }

    let mut res = vec![0.0; len];
    for i in 0..len {
        let wraps = if y[i] < 0.0 { 1.0 + l[i] } else { l[i] };
        let mut e = ((m / y[i]).atan() + std::f64::consts::PI * wraps) * a / m;
        if x[i] < 0.0 {
            e = -e;
        }
        res[i] = e + c[i] * z;
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use crate::error::EvalErrorKind;
    use crate::quadrature::integrate;
    use super::*;

    const MAX_REL_ERR: f64 = 1.0e-9;

    #[test]
    fn incomplete_f() {
        // el2(tan phi, kc, 1, 1) = F(phi, k), kc^2 = 1 - k^2
        let m: f64 = 0.36;
        let kc = (1.0 - m).sqrt();
        let phi: [f64; 3] = [0.2, 0.7, 1.2];
        let tanphi: Vec<f64> = phi.iter().map(|p| p.tan()).collect();
        let vals = el2(&tanphi, kc, 1.0, 1.0).unwrap();
        for (p, val) in phi.iter().zip(vals.iter()) {
            let target = integrate(|t| 1.0 / (1.0 - m * t.sin().powi(2)).sqrt(), 0.0, *p, 1.0e-12);
            println!("F({:.2}, k) = {:.12e}, calculated = {:.12e}", p, target, val);
            assert!(((val - target) / target).abs() < MAX_REL_ERR);
        }
    }

    #[test]
    fn incomplete_e() {
        // el2(tan phi, kc, 1, kc^2) = E(phi, k)
        let m: f64 = 0.75;
        let kc2 = 1.0 - m;
        let phi: [f64; 3] = [0.1, 0.9, 1.4];
        let tanphi: Vec<f64> = phi.iter().map(|p| p.tan()).collect();
        let vals = el2(&tanphi, kc2.sqrt(), 1.0, kc2).unwrap();
        for (p, val) in phi.iter().zip(vals.iter()) {
            let target = integrate(|t| (1.0 - m * t.sin().powi(2)).sqrt(), 0.0, *p, 1.0e-12);
            println!("E({:.2}, k) = {:.12e}, calculated = {:.12e}", p, target, val);
            assert!(((val - target) / target).abs() < MAX_REL_ERR);
        }
    }

    #[test]
    fn odd_in_x() {
        let kc = 0.6;
        let pos = el2(&[0.8], kc, 1.0, 1.0).unwrap();
        let neg = el2(&[-0.8], kc, 1.0, 1.0).unwrap();
        assert_eq!(pos[0], -neg[0]);
    }

    #[test]
    fn zero_limit() {
        let vals = el2(&[0.0], 0.7, 1.0, 1.0).unwrap();
        assert_eq!(vals[0], 0.0);
    }

    #[test]
    fn unit_modulus_rejected() {
        let err = el2(&[1.0], 0.0, 1.0, 1.0).unwrap_err();
        println!("el2(kc = 0) -> {}", err);
        assert_eq!(err.kind(), EvalErrorKind::Domain);
    }

    #[test]
    fn runaway_modulus() {
        // An infinite kc drives the scalar state to NaN, which never
        // passes the convergence test, so the iteration cap must trip
        let err = el2(&[1.0], f64::INFINITY, 1.0, 1.0).unwrap_err();
        println!("el2(kc = inf) -> {}", err);
        assert_eq!(err.kind(), EvalErrorKind::Convergence);
    }
}
