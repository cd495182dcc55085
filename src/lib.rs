//! Analytic occultation light curves in reflected light: the
//! elliptic-integral core.
//!
//! An external intersection finder reduces the flux behind an
//! occulting body to line integrals over arcs of the occultor limb,
//! the occulted limb and the day-night terminator. This crate supplies
//! the closed-form values those arcs need: the Carlson symmetric
//! integrals RF, RD and RJ, Bulirsch's el2, the complete Legendre
//! integrals, the hypergeometric series 2F1, the combined definite
//! integrals over an angle set ([`ellip`]) and Pal's closed-form
//! boundary integral ([`pal`]).
//!
//! Everything here is a pure function of its arguments: no state
//! survives a call, so concurrent use needs no synchronization.
//! Convergence and domain failures are fatal [`EvalError`]s, never
//! silent NaNs; near-singular geometries are instead handled by the
//! documented deterministic perturbations.

pub mod constants;
mod error;
pub mod special_functions;
pub mod ellip;
pub mod pal;
pub mod quadrature;
pub mod input;

pub use error::{EvalError, EvalErrorKind};
pub use ellip::{ellip, occultation_modulus, pairdiff, EllipticIntegrals};
pub use pal::{pal, pal_indef};
