use super::algorithms::{Algorithm, BracketFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil};
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use super::signs::opposite_sign;
use log::{debug, trace, warn};
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Bracket(BracketFamily::Bisection);

#[derive(Debug, Error, PartialEq)]
pub enum BisectionError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("no sign change on [{a}, {b}]: sign(f(a)) = sign(f(b))")]
    NoSignChange  { a: f64, b: f64 },

    #[error("invalid bounds: a and b must be finite. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },
}

/// Bisection configuration
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerances and optional `max_iter`.
///   `abs_x` is unused by bisection.
///
/// # Defaults
/// - `abs_fx = 1e-6`
/// - If `common.max_iter` is `None`, [`bisection`] uses
///   [`Algorithm::default_max_iter`] (500).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BisectionCfg {
    common: CommonCfg,
}
impl BisectionCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new()
        }
    }
}
impl Default for BisectionCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(BisectionCfg);

/// Calculates midpoint of [a, b]
///
/// Halves each bound before summing, so finite bounds give a finite midpoint.
#[inline]
pub(crate) fn midpoint(a: f64, b: f64) -> f64 {
    a * 0.5 + b * 0.5
}

/// Finds a root of a function using the
/// [bisection method](https://en.wikipedia.org/wiki/Bisection_method).
///
/// This method assumes that the function `func` is continuous on the interval `[a, b]`
/// and that `func(a)` and `func(b)` have opposite signs, guaranteeing a root exists
/// within the interval.
///
/// # Arguments
///
/// ┌ `func` - The function whose root is to be found.
/// ├ `a`    - One bound of the search interval. Must be finite.
/// ├ `b`    - Other bound of the search interval. Must be finite.
/// └ `cfg`  - [`BisectionCfg`] (`abs_fx`, optional `max_iter`)
///
/// # Returns
///
/// [`RootFindingReport`] with `stencil` = [`Stencil::Bracket`] holding the final bracket.
/// ├ [`TerminationReason::EndpointRoot`]     - `f(a)` or `f(b)` is exactly zero
/// ├ [`TerminationReason::ToleranceReached`] - |f(midpoint)| < abs_fx
/// └ [`TerminationReason::IterationLimit`]   - cap exhausted, midpoint of the final bracket
///
/// # Errors
///
/// ┌ [`BisectionError::InvalidBounds`] - `a` or `b` is NaN/inf.
/// ├ [`BisectionError::NoSignChange`]  - `func(a)` and `func(b)` share a sign.
/// └ [`BisectionError::RootFinding`]   - `func(x)` produced NaN/inf.
///
/// # Notes
/// └ Exhausting the cap is *not* an error: the midpoint of the remaining bracket
///   is returned as a best-effort estimate. Check [`RootFindingReport::is_converged`].
pub fn bisection<F>(
    mut func: F,
    mut a: f64,
    mut b: f64,
    cfg: BisectionCfg
) -> Result<RootFindingReport, BisectionError>
where F: FnMut(f64) -> f64 {

    if !(a.is_finite() && b.is_finite()) {
        return Err(BisectionError::InvalidBounds { a, b });
    }

    let abs_fx    = cfg.common.abs_fx();
    let num_iter  = cfg.common.max_iter_or(ALGORITHM.default_max_iter());
    let algo_name = ALGORITHM.algorithm_name();

    // number of function evaluations
    let mut evals = 0;

    // closure function, checks finiteness
    let mut eval = |x: f64| -> Result<f64, BisectionError> {
        let fx = { evals += 1; func(x) };
        if !fx.is_finite() {
            Err(RootFindingError::NonFiniteEvaluation { x, fx }.into())
        } else {
            Ok(fx)
        }
    };

    let mut fa = eval(a)?;
    let fb     = eval(b)?;

    // immediate bounds are roots
    if fa == 0.0 || fb == 0.0 {
        let (root, f_root) = if fa == 0.0 { (a, fa) } else { (b, fb) };
        debug!("{algo_name}: endpoint {root} is an exact root");
        return Ok(RootFindingReport {
            root,
            f_root,
            iterations          : 0,
            evaluations         : evals,
            termination_reason  : TerminationReason::EndpointRoot,
            tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
            stencil             : Stencil::bracket(a, b),
            algorithm_name      : algo_name,
        });
    }

    if !opposite_sign(fa, fb) {
        debug!("{algo_name}: no sign change on [{a}, {b}], f(a)={fa}, f(b)={fb}");
        return Err(BisectionError::NoSignChange { a, b });
    }

    for iter in 1..=num_iter {
        let m  = midpoint(a, b);
        let fm = eval(m)?;
        trace!("{algo_name}: iter={iter} bracket=[{a}, {b}] m={m} f(m)={fm}");

        if fm.abs() < abs_fx {
            debug!("{algo_name}: converged to {m} after {iter} iterations");
            return Ok(RootFindingReport {
                root                : m,
                f_root              : fm,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
                stencil             : Stencil::bracket(a, b),
                algorithm_name      : algo_name,
            });
        }

        // keep the half that still changes sign
        if opposite_sign(fa, fm) {
            b = m;
        } else {
            a  = m;
            fa = fm;
        }
    }

    let m  = midpoint(a, b);
    let fm = eval(m)?;
    warn!(
        "{algo_name}: iteration cap {num_iter} exhausted without |f(x)| < {abs_fx}; \
         returning best-effort estimate {m} (f={fm})"
    );

    Ok(RootFindingReport {
        root                : m,
        f_root              : fm,
        iterations          : num_iter,
        evaluations         : evals,
        termination_reason  : TerminationReason::IterationLimit,
        tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
        stencil             : Stencil::bracket(a, b),
        algorithm_name      : algo_name,
    })
}
