//! Combines the incomplete and complete elliptic integrals into the
//! definite values the flux assembler consumes.
//!
//! The boundary angles `kappa` produced by the intersection finder can
//! exceed the principal domain of the tangent-half-angle substitution
//! that `el2` relies on, so each antiderivative picks up an offset in
//! the complete integrals whenever its angle crosses pi or 3 pi
//! (analytic continuation per Abramowitz & Stegun 17.4.15-16, or
//! https://dlmf.nist.gov/19.7#ii).

use std::f64::consts::PI;
use crate::constants::*;
use crate::error::EvalError;
use crate::special_functions::{el2, rj, ellipk, ellipe, ellippi};

/// The five definite integrals, each already reduced over the angle
/// pairs in `kappa`.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct EllipticIntegrals {
    /// Incomplete integral of the first kind
    pub f: f64,
    /// Incomplete integral of the second kind
    pub e: f64,
    /// Carlson RF combination, -F
    pub rf: f64,
    /// Carlson RD combination, 3 k^2 (E - F)
    pub rd: f64,
    /// Carlson third-kind term
    pub rj: f64,
}

/// Returns the sum over pairwise differences of `v`, i.e. the value of
/// a series of definite integrals given the antiderivative at each of
/// the paired integration limits.
pub fn pairdiff(v: &[f64]) -> f64 {
    debug_assert!(v.len() % 2 == 0, "pairdiff needs paired limits");
    let mut sgn = -1.0;
    let mut total = 0.0;
    for x in v.iter() {
        total += sgn * x;
        sgn = -sgn;
    }
    total
}

/// Derives the squared elliptic modulus of the occultation geometry
/// from the centre-to-centre separation `bo` and occultor radius `ro`.
pub fn occultation_modulus(bo: f64, ro: f64) -> f64 {
    (1.0 - (bo - ro) * (bo - ro)) / (4.0 * bo * ro)
}

/// Computes the definite elliptic integrals (F, E, RF, RD, RJ) over
/// the paired boundary angles in `kappa`, for squared modulus `k2`.
///
/// Every regime decision is a branch on `k2` or on the magnitude of
/// the individual angle; no state survives the call.
pub fn ellip(bo: f64, ro: f64, kappa: &[f64], k2: f64) -> Result<EllipticIntegrals, EvalError> {
    if kappa.len() % 2 != 0 {
        return Err(EvalError::domain("ellip", "angle list must pair a start with every end"));
    }

    let k2inv = 1.0 / k2;

    // Complete integrals, needed for the offsets below
    let (k0, e0, rj0) = if k2 < 1.0 {
        let kk = ellipk(k2)?;
        let ee = ellipe(k2)?;
        (kk * k2.sqrt(), k2inv.sqrt() * (ee - (1.0 - k2) * kk), 0.0)
    } else {
        let kk = ellipk(k2inv)?;
        let ee = ellipe(k2inv)?;
        let rj0 = if bo != 0.0 && bo != ro {
            let p0 = (ro * ro + bo * bo + 2.0 * ro * bo) / (ro * ro + bo * bo - 2.0 * ro * bo);
            let pi0 = ellippi(1.0 - p0, k2inv)?;
            -12.0 / (1.0 - p0) * (pi0 - kk)
        } else {
            0.0
        };
        (kk, ee, rj0)
    };

    let mut fv: Vec<f64>;
    let mut ev: Vec<f64>;

    if k2 < 1.0 {
        let k = k2.sqrt();
        let kinv = k2inv.sqrt();
        let kc2 = 1.0 - k2;
        let kc = kc2.sqrt();

        let tanphi: Vec<f64> = kappa.iter()
            .map(|&kap| {
                let arg = kinv * (0.5 * kap).sin();
                if arg >= 1.0 {
                    HUGE_TAN
                } else if arg <= -1.0 {
                    -HUGE_TAN
                } else {
                    arg / (1.0 - arg * arg).sqrt()
                }
            })
            .collect();

        fv = el2(&tanphi, kc, 1.0, 1.0)?;
        for f in fv.iter_mut() {
            *f *= k;
        }
        ev = el2(&tanphi, kc, 1.0, kc2)?;
        for (e, f) in ev.iter_mut().zip(fv.iter()) {
            *e = kinv * (*e - kc2 * kinv * f);
        }

        // The substitution above only reaches one period; past that,
        // reflect or shift by the complete integrals
        for i in 0..kappa.len() {
            if kappa[i] > 3.0 * PI {
                fv[i] += 4.0 * k0;
                ev[i] += 4.0 * e0;
            } else if kappa[i] > PI {
                fv[i] = 2.0 * k0 - fv[i];
                ev[i] = 2.0 * e0 - ev[i];
            }
        }
    } else {
        let kc2inv = 1.0 - k2inv;
        let kcinv = kc2inv.sqrt();
        let tanphi: Vec<f64> = kappa.iter().map(|&kap| (0.5 * kap).tan()).collect();

        fv = el2(&tanphi, kcinv, 1.0, 1.0)?;
        ev = el2(&tanphi, kcinv, 1.0, kc2inv)?;

        for i in 0..kappa.len() {
            if kappa[i] > 3.0 * PI {
                fv[i] += 4.0 * k0;
                ev[i] += 4.0 * e0;
            } else if kappa[i] > PI {
                fv[i] += 2.0 * k0;
                ev[i] += 2.0 * e0;
            }
        }
    }

    let rfv: Vec<f64> = fv.iter().map(|f| -f).collect();
    let rdv: Vec<f64> = ev.iter().zip(fv.iter()).map(|(e, f)| (e - f) * 3.0 * k2).collect();

    // The third kind has no Legendre shortcut; evaluate the Carlson
    // form on the half-angle reduction of each boundary angle
    let mut rjv = vec![0.0; kappa.len()];
    if (bo - ro).abs() > BO_EQUALS_RO_TOL {
        let d2 = ro * ro + bo * bo - 2.0 * ro * bo;
        for i in 0..kappa.len() {
            let phi = (kappa[i] - PI).rem_euclid(2.0 * PI);
            let p = (ro * ro + bo * bo + 2.0 * ro * bo * phi.cos()) / d2;
            let cx = (0.5 * phi).cos();
            let sx = (0.5 * phi).sin();
            let w = 1.0 - cx * cx / k2;
            rjv[i] = (phi.cos() + 1.0) * cx * rj(w, sx * sx, 1.0, p)?;
        }

        if rj0 != 0.0 {
            for i in 0..kappa.len() {
                if kappa[i] > 3.0 * PI {
                    rjv[i] += 2.0 * rj0;
                } else if kappa[i] > PI {
                    rjv[i] += rj0;
                }
            }
        }
    }

    Ok(EllipticIntegrals {
        f: pairdiff(&fv),
        e: pairdiff(&ev),
        rf: pairdiff(&rfv),
        rd: pairdiff(&rdv),
        rj: pairdiff(&rjv),
    })
}

#[cfg(test)]
mod tests {
    use crate::error::EvalErrorKind;
    use crate::quadrature::integrate;
    use super::*;

    const MAX_REL_ERR: f64 = 1.0e-9;

    // Definite F and E between theta limits, from their integral
    // definitions, with parameter m
    fn legendre_f(m: f64, th1: f64, th2: f64) -> f64 {
        integrate(|t| 1.0 / (1.0 - m * t.sin().powi(2)).sqrt(), th1, th2, 1.0e-12)
    }

    fn legendre_e(m: f64, th1: f64, th2: f64) -> f64 {
        integrate(|t| (1.0 - m * t.sin().powi(2)).sqrt(), th1, th2, 1.0e-12)
    }

    #[test]
    fn odd_angle_list_rejected() {
        let err = ellip(0.3, 0.4, &[0.1, 0.5, 1.0], 2.0).unwrap_err();
        assert_eq!(err.kind(), EvalErrorKind::Domain);
    }

    #[test]
    fn empty_angle_list() {
        let ints = ellip(0.3, 0.4, &[], 2.0).unwrap();
        assert_eq!(ints.f, 0.0);
        assert_eq!(ints.rj, 0.0);
    }

    #[test]
    fn large_modulus_regime() {
        // (bo + ro)^2 < 1 puts k2 above 1; the definite F and E then
        // match the Legendre integrands with parameter 1/k2 directly
        let (bo, ro) = (0.3, 0.4);
        let k2 = occultation_modulus(bo, ro);
        assert!(k2 > 1.0);
        let m = 1.0 / k2;
        let kappa = [0.4, 1.1];
        let ints = ellip(bo, ro, &kappa, k2).unwrap();
        let f_ref = legendre_f(m, 0.5 * kappa[0], 0.5 * kappa[1]);
        let e_ref = legendre_e(m, 0.5 * kappa[0], 0.5 * kappa[1]);
        println!("F = {:.12e} ({:.12e}), E = {:.12e} ({:.12e})", ints.f, f_ref, ints.e, e_ref);
        assert!(((ints.f - f_ref) / f_ref).abs() < MAX_REL_ERR);
        assert!(((ints.e - e_ref) / e_ref).abs() < MAX_REL_ERR);
        assert!((ints.rf + ints.f).abs() < 1.0e-12);
        assert!((ints.rd - 3.0 * k2 * (ints.e - ints.f)).abs() < 1.0e-12);
    }

    #[test]
    fn small_modulus_regime() {
        // k2 < 1: valid boundary angles keep sin^2(kappa/2) below k2,
        // where the continued integrand stays real
        let (bo, ro) = (0.9, 0.6);
        let k2 = occultation_modulus(bo, ro);
        assert!(k2 < 1.0);
        let m = 1.0 / k2;
        let kappa = [0.3, 1.2];
        let ints = ellip(bo, ro, &kappa, k2).unwrap();
        let f_ref = legendre_f(m, 0.5 * kappa[0], 0.5 * kappa[1]);
        let e_ref = legendre_e(m, 0.5 * kappa[0], 0.5 * kappa[1]);
        println!("F = {:.12e} ({:.12e}), E = {:.12e} ({:.12e})", ints.f, f_ref, ints.e, e_ref);
        assert!(((ints.f - f_ref) / f_ref).abs() < MAX_REL_ERR);
        assert!(((ints.e - e_ref) / e_ref).abs() < MAX_REL_ERR);
    }

    #[test]
    fn wrapped_angles_pick_up_complete_offsets() {
        // An end angle in ]3 pi, 4 pi[ against its singly-wrapped
        // equivalent: the results differ by exactly twice the complete
        // integrals (and one complete third-kind offset)
        let (bo, ro) = (0.3, 0.4);
        let k2 = occultation_modulus(bo, ro);
        let m = 1.0 / k2;
        let k0 = ellipk(m).unwrap();
        let e0 = ellipe(m).unwrap();
        let p0 = (ro * ro + bo * bo + 2.0 * ro * bo) / (ro * ro + bo * bo - 2.0 * ro * bo);
        let pi0 = ellippi(1.0 - p0, m).unwrap();
        let rj0 = -12.0 / (1.0 - p0) * (pi0 - k0);

        let multi = ellip(bo, ro, &[0.4, 3.0 * PI + 0.3], k2).unwrap();
        let single = ellip(bo, ro, &[0.4, PI + 0.3], k2).unwrap();

        println!("dF = {:.12e}, 2 K0 = {:.12e}", multi.f - single.f, 2.0 * k0);
        assert!(((multi.f - single.f) - 2.0 * k0).abs() < 1.0e-9);
        assert!(((multi.e - single.e) - 2.0 * e0).abs() < 1.0e-9);
        assert!(((multi.rj - single.rj) - rj0).abs() < 1.0e-6 * rj0.abs());
    }

    #[test]
    fn multiple_pairs_reduce_additively() {
        let (bo, ro) = (0.3, 0.4);
        let k2 = occultation_modulus(bo, ro);
        let both = ellip(bo, ro, &[0.2, 0.9, 1.3, 2.0], k2).unwrap();
        let first = ellip(bo, ro, &[0.2, 0.9], k2).unwrap();
        let second = ellip(bo, ro, &[1.3, 2.0], k2).unwrap();
        assert!((both.f - (first.f + second.f)).abs() < 1.0e-12);
        assert!((both.e - (first.e + second.e)).abs() < 1.0e-12);
        assert!((both.rj - (first.rj + second.rj)).abs() < 1.0e-10);
    }
}
