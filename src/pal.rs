//! Closed-form antiderivative of the occultor-limb ("boundary arc")
//! primitive integral in reflected light, after Pal (2012), eq. 34,
//! expressed through the Carlson symmetric integrals.
//!
//! A. Pal,
//! "Light-curve modelling for mutual transits",
//! MNRAS 420, 1630--1635 (2012)

use std::f64::consts::PI;
use crate::constants::*;
use crate::error::EvalError;
use crate::special_functions::{rf, rd, rj};

/// Indefinite antiderivative of the boundary integral at angle `phi`,
/// for separation `bo` and occultor radius `ro`.
///
/// Two singular configurations, bo = ro - 1 and bo = 1 - ro, are
/// removable in the arctangent term; rather than solving those limits
/// separately, `bo` is nudged off them by a signed `SINGULAR_EPS`, and
/// `q2`, `d2` are clamped below 1 by the same amount. The substitution
/// is deterministic: equal inputs always take equal formula paths.
pub fn pal_indef(bo: f64, ro: f64, phi: f64) -> Result<f64, EvalError> {
    let mut bo = bo;

    if (bo - (ro - 1.0)).abs() < SINGULAR_EPS {
        let s = if bo >= ro - 1.0 { 1.0 } else { -1.0 };
        bo = ro - 1.0 + s * SINGULAR_EPS;
    }

    if (bo - (1.0 - ro)).abs() < SINGULAR_EPS {
        let s = if bo >= 1.0 - ro { 1.0 } else { -1.0 };
        bo = 1.0 - ro + s * SINGULAR_EPS;
    }

    let mut q2 = ro * ro + bo * bo + 2.0 * ro * bo * phi.cos();
    let mut d2 = ro * ro + bo * bo - 2.0 * ro * bo;
    let sx = (0.5 * phi).sin();
    let cx = (0.5 * phi).cos();

    if q2 > 1.0 {
        q2 = 1.0 - SINGULAR_EPS;
    }
    if d2 >= 1.0 {
        d2 = 1.0 - SINGULAR_EPS;
    }

    let w = (1.0 - q2) / (1.0 - d2);
    let mut beta = ((bo - ro) * sx).atan2((bo + ro) * cx);

    let rf_val = rf(w, sx * sx, 1.0)?;
    let rd_val = rd(w, sx * sx, 1.0)?;
    let near_equal = (bo - ro).abs() <= BO_EQUALS_RO_TOL;
    let rj_val = if !near_equal {
        rj(w, sx * sx, 1.0, q2 / d2)?
    } else {
        // The general third-kind term is singular as bo -> ro; its
        // closed-form limit is folded in below. The sign of beta must
        // flip when bo < ro here; this correction was found
        // empirically, so keep the regression tests on it.
        if bo < ro {
            beta = -beta;
        }
        0.0
    };

    // Pal (2012), eq. (34)
    let wq = cx / (1.0 - d2).sqrt();
    let mut iret = -beta / 3.0 + phi / 6.0
        + 2.0 / 9.0 * bo * ro * phi.sin() * (1.0 - q2).sqrt()
        + 1.0 / 3.0 * (1.0 + 2.0 * ro * ro * ro * ro - 4.0 * ro * ro) * wq * rf_val
        + 2.0 / 9.0 * ro * bo * (4.0 - 7.0 * ro * ro - bo * bo + 5.0 * ro * bo) * wq * rf_val
        - 4.0 / 27.0 * ro * bo * (4.0 - 7.0 * ro * ro - bo * bo) * wq * cx * cx * rd_val;

    if !near_equal {
        iret += 1.0 / 3.0 * wq * (ro + bo) / (ro - bo) * (rf_val - (q2 - d2) / (3.0 * d2) * rj_val);
    } else {
        iret -= 1.0 / 3.0 * wq * (ro + bo) * (q2 - d2) * PI / (2.0 * q2 * q2.sqrt());
    }

    Ok(iret)
}

/// Definite boundary integral between the angles `phi1` and `phi2`.
///
/// The span may wrap any number of periods and the endpoints may come
/// in either order; the span is cut at period boundaries and summed as
/// signed differences of [`pal_indef`]. When `bo` is exactly zero the
/// integrand loses its angle dependence and the result reduces to a
/// closed form, bypassing the Carlson machinery.
pub fn pal(bo: f64, ro: f64, phi1: f64, phi2: f64) -> Result<f64, EvalError> {
    if bo == 0.0 {
        if ro < 1.0 {
            let oz2 = 1.0 - ro * ro;
            return Ok((1.0 - oz2 * oz2.sqrt()) * (phi2 - phi1) / 3.0);
        } else {
            return Ok((phi2 - phi1) / 3.0);
        }
    }

    let sgn = if phi1 > phi2 { -1.0 } else { 1.0 };

    // Reduce the start into [0, 2 pi) and walk the span one period
    // at a time
    let mut x0 = phi1;
    let mut dx = phi2 - phi1;
    if dx < 0.0 {
        x0 += dx;
        dx = -dx;
    }
    while x0 < 0.0 {
        x0 += 2.0 * PI;
    }
    while x0 >= 2.0 * PI {
        x0 -= 2.0 * PI;
    }

    let mut ret = 0.0;
    while dx > 0.0 {
        let mut dc = 2.0 * PI - x0;
        let nx;
        if dx < dc {
            dc = dx;
            nx = x0 + dx;
        } else {
            nx = 0.0;
        }

        ret += sgn * (pal_indef(bo, ro, x0 + dc)? - pal_indef(bo, ro, x0)?);

        x0 = nx;
        dx -= dc;
    }

    Ok(ret)
}
