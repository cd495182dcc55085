//! Errors raised by the integral evaluators

use std::fmt;
use std::error::Error;

/// Why did the evaluation fail?
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum EvalErrorKind {
    /// The arguments lie outside the domain on which the integral
    /// is defined, e.g. `kc == 0` in `el2`.
    Domain,
    /// The iteration cap was reached before the tolerance test was
    /// satisfied. Never downgraded to an approximate result.
    Convergence,
}

/// Error returned when an integral evaluation fails. Both kinds are
/// fatal: the caller should treat them as evidence that the occultation
/// geometry falls outside the supported analytic regime.
#[derive(Clone)]
pub struct EvalError {
    kind: EvalErrorKind,
    function: &'static str,
    cause: String,
}

impl fmt::Debug for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            EvalErrorKind::Domain => write!(f, "Invalid argument in call to `{}`: {}.", self.function, self.cause),
            EvalErrorKind::Convergence => write!(f, "`{}` failed to converge: {}.", self.function, self.cause),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for EvalError {}

impl EvalError {
    pub fn domain(function: &'static str, cause: &str) -> Self {
        Self {
            kind: EvalErrorKind::Domain,
            function,
            cause: cause.to_owned(),
        }
    }

    pub fn convergence(function: &'static str, iterations: usize) -> Self {
        Self {
            kind: EvalErrorKind::Convergence,
            function,
            cause: format!("tolerance not reached after {} iterations", iterations),
        }
    }

    pub fn kind(&self) -> EvalErrorKind {
        self.kind
    }
}
