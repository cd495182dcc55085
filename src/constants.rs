//! Numerical tolerances, iteration caps and perturbation constants.
//!
//! These values are load-bearing: the perturbation constants select the
//! analytic formula path taken near singular occultation geometries, so
//! altering any of them changes numerical outputs measurably.

/// Maximum number of duplication steps in `el2`
pub const EL2_MAX_ITER: usize = 100;
/// Maximum number of duplication steps in the Carlson integrals
pub const CARLSON_MAX_ITER: usize = 100;

/// Arguments to the Carlson integrals below this are clamped up to it
pub const CARLSON_LO_LIM: f64 = 2.0e-26;
/// Arguments to the Carlson integrals above this are clamped down to it
pub const CARLSON_HI_LIM: f64 = 3.0e24;

/// Deviation tolerance that closes the RF duplication
pub const CRF_TOL: f64 = 1.0e-3;
/// Deviation tolerance that closes the RD duplication
pub const CRD_TOL: f64 = 1.0e-3;
/// Deviation tolerance that closes the RJ duplication
pub const CRJ_TOL: f64 = 2.0e-2;

/// Maximum number of terms summed for 2F1
pub const HYP2F1_MAX_ITER: usize = 200;
/// The 2F1 series is truncated once a term falls below this
pub const HYP2F1_TOL: f64 = 1.0e-15;

/// Square root of the desired precision in `el2`
pub const EL2_CA: f64 = 1.0e-8;

/// Stands in for an infinite tangent in the half-angle substitution
pub const HUGE_TAN: f64 = 1.0e15;

/// Maximum number of AGM steps for the complete integrals K and E
pub const AGM_MAX_ITER: usize = 30;
/// Relative tolerance of the AGM iteration
pub const AGM_TOL: f64 = 1.0e-15;

/// Below this, |bo - ro| is treated as zero and the third-kind Carlson
/// term is replaced by its closed-form limit
pub const BO_EQUALS_RO_TOL: f64 = 1.0e-6;

/// Signed perturbation applied to bo near the singular configurations
/// bo = ro - 1 and bo = 1 - ro, and to q2 and d2 as they approach 1
pub const SINGULAR_EPS: f64 = 1.0e-8;
