//! Special functions needed by the analytic occultation integrals:
//! the Carlson symmetric elliptic integrals, Bulirsch's incomplete
//! elliptic integral el2, the complete Legendre-form integrals and the
//! Gauss hypergeometric series.

mod carlson;
mod el2;
mod hyp2f1;
mod legendre;

pub use carlson::*;
pub use el2::*;
pub use hyp2f1::*;
pub use legendre::*;
