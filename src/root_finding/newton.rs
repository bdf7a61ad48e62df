//! Newton-Raphson method

use super::algorithms::{Algorithm, OpenFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil};
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use super::domain::{in_domain, valid_domain};
use log::{debug, trace};
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Open(OpenFamily::Newton);


#[derive(Debug, Error, PartialEq)]
pub enum NewtonError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("invalid domain: bounds must not be NaN and a <= b. got [{a}, {b}]")]
    InvalidDomain { a: f64, b: f64 },

    #[error("derivative vanished at x={x}; newton step undefined")]
    ZeroDerivative { x: f64 },

    #[error("derivative non-finite at x={x}, f'(x)={dfx}")]
    DerivativeNotFinite { x: f64, dfx: f64 },

    #[error("iterate x={x} left the trusted domain [{a}, {b}]")]
    OutOfDomain { x: f64, a: f64, b: f64 },

    #[error("no convergence within {iterations} iterations; last iterate x={last}")]
    NotConverged { iterations: usize, last: f64 },
}


/// Newton configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerances and optional `max_iter`.
///
/// # Construction
/// - Use [`NewtonCfg::new`] then optional setters.
///
/// # Defaults
/// - `abs_fx = 1e-6`, `abs_x = 1e-6`
/// - If `common.max_iter` is `None`, [`newton`] uses
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Newton`] (100).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NewtonCfg {
    common: CommonCfg,
}
impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
        }
    }
}
impl Default for NewtonCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(NewtonCfg);


/// Helpers
/// - `eval_fx_checked`  : evaluates `f(x)` with finite-check
/// - `eval_dfx_checked` : evaluates user-supplied derivative `df(x)`
#[inline]
fn eval_fx_checked<F>(
    f: &mut F,
    x: f64,
    evals: &mut usize
) -> Result<f64, NewtonError>  where F: FnMut(f64) -> f64 {
    let fx = { *evals += 1; f(x) };
    if !fx.is_finite() {
        return Err(RootFindingError::NonFiniteEvaluation { x, fx }.into());
    }

    Ok(fx)
}
#[inline]
fn eval_dfx_checked<G>(
    df: &mut G,
    x: f64,
    evals: &mut usize
) -> Result<f64, NewtonError> where G: FnMut(f64) -> f64 {
    let dfx = { *evals += 1; df(x) };
    if !dfx.is_finite() {
        return Err(NewtonError::DerivativeNotFinite { x, dfx });
    }
    if dfx == 0.0 {
        return Err(NewtonError::ZeroDerivative { x });
    }

    Ok(dfx)
}


/// Finds a root of `func` using the
/// [Newton–Raphson method](https://en.wikipedia.org/wiki/Newton_method).
///
/// # Arguments
/// - `func`  : function whose root is sought
/// - `dfunc` : analytic derivative of `func`
/// - `a`, `b`: trusted domain; an iterate outside `[a, b]` is an error.
///             Not a bracket: no sign change is required. Bounds may be infinite.
/// - `x0`    : finite initial guess
/// - `cfg`   : [`NewtonCfg`] (tolerances, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with:
/// - `root`                : approximate root
/// - `f_root`              : function value at `root`
/// - `iterations`          : number of iterations performed
/// - `evaluations`         : total evaluations (f and f')
/// - `termination_reason`  : always [`TerminationReason::ToleranceReached`]
/// - `tolerance_satisfied` : step size is tested first, then |f(x)|
/// - `stencil`             : previous iterate used to form the step
/// - `algorithm_name`      : "newton"
///
/// # Errors
/// - [`NewtonError::InvalidGuess`]         : `x0` non-finite
/// - [`NewtonError::InvalidDomain`]        : `a` or `b` NaN, or `a > b`
/// - [`NewtonError::ZeroDerivative`]       : `f'(x) == 0`
/// - [`NewtonError::DerivativeNotFinite`]  : `f'(x)` NaN/inf
/// - [`NewtonError::OutOfDomain`]          : next iterate outside `[a, b]`
/// - [`NewtonError::NotConverged`]         : `max_iter` exhausted
///
/// * Propagated via [`NewtonError::RootFinding`]:
/// - [`RootFindingError::NonFiniteEvaluation`] : `f(x)` produced NaN/inf
///
/// # Notes
/// - Unlike the bracketing methods there is no best-effort fallback:
///   hitting the cap is an error.
/// - Convergence is *local only* and depends on a good initial guess `x0` and
///   smoothness of `f`. For guaranteed convergence, use a **bracketed method**
///   (e.g. bisection).
pub fn newton<F, G>(
    mut func: F,
    mut dfunc: G,
    a: f64,
    b: f64,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<RootFindingReport, NewtonError>
where
    F: FnMut(f64) -> f64,
    G: FnMut(f64) -> f64 {

    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }
    if !valid_domain(a, b) {
        return Err(NewtonError::InvalidDomain { a, b });
    }

    let algo_name = ALGORITHM.algorithm_name();
    let abs_fx    = cfg.common.abs_fx();
    let abs_x     = cfg.common.abs_x();
    let num_iter  = cfg.common.max_iter_or(ALGORITHM.default_max_iter());

    let mut evals: usize = 0;

    let mut x  = x0;
    let mut fx = eval_fx_checked(&mut func, x, &mut evals)?;

    for iter in 1..=num_iter {
        let dfx = eval_dfx_checked(&mut dfunc, x, &mut evals).inspect_err(|e| {
            debug!("{algo_name}: iter={iter} {e}");
        })?;

        let x_next = x - fx / dfx;
        trace!("{algo_name}: iter={iter} x={x} f(x)={fx} f'(x)={dfx} x_next={x_next}");

        if !in_domain(x_next, a, b) {
            debug!("{algo_name}: iter={iter} iterate {x_next} left [{a}, {b}]");
            return Err(NewtonError::OutOfDomain { x: x_next, a, b });
        }

        let fx_next = eval_fx_checked(&mut func, x_next, &mut evals)?;

        let tolerance_satisfied = if (x_next - x).abs() < abs_x {
            Some(ToleranceSatisfied::StepSizeReached)
        } else if fx_next.abs() < abs_fx {
            Some(ToleranceSatisfied::AbsFxReached)
        } else {
            None
        };

        if let Some(tolerance_satisfied) = tolerance_satisfied {
            debug!("{algo_name}: converged to {x_next} after {iter} iterations");
            return Ok(RootFindingReport {
                root                : x_next,
                f_root              : fx_next,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied,
                stencil             : Stencil::singleton(x), // previous iterate
                algorithm_name      : algo_name,
            });
        }

        x  = x_next;
        fx = fx_next;
    }

    debug!("{algo_name}: no convergence within {num_iter} iterations, last x={x}");
    Err(NewtonError::NotConverged { iterations: num_iter, last: x })
}
