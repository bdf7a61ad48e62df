use super::algorithms::{Algorithm, OpenFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil};
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use super::domain::{in_domain, valid_domain};
use log::{debug, trace};
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Open(OpenFamily::Secant);


#[derive(Debug, Error, PartialEq)]
pub enum SecantError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("invalid domain: bounds must not be NaN and a <= b. got [{a}, {b}]")]
    InvalidDomain { a: f64, b: f64 },

    #[error("invalid perturbation: must be finite and non-zero. got {got}")]
    InvalidPerturbation { got: f64 },

    #[error("degenerate secant: f(x1) - f(x0) = 0 at x0={x0}, x1={x1}")]
    DegenerateSlope { x0: f64, x1: f64 },

    #[error("iterate x={x} left the trusted domain [{a}, {b}]")]
    OutOfDomain { x: f64, a: f64, b: f64 },

    #[error("no convergence within {iterations} iterations; last iterate x={last}")]
    NotConverged { iterations: usize, last: f64 },
}


/// Secant configuration
///
/// # Fields
/// - `common`       : [`CommonCfg`] with tolerances and optional `max_iter`.
/// - `perturbation` : offset of the second seed, `x1 = x0 + perturbation`.
///
/// # Construction
/// - Use [`SecantCfg::new`] then optional setters.
///
/// # Defaults
/// - `abs_fx = 1e-6`, `abs_x = 1e-6`, `perturbation = 1e-4`
/// - If `common.max_iter` is `None`, [`secant`] uses
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Secant`] (100).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SecantCfg {
    common: CommonCfg,
    perturbation: f64,
}
impl SecantCfg {
    pub const DEFAULT_PERTURBATION: f64 = 1e-4;

    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
            perturbation: Self::DEFAULT_PERTURBATION,
        }
    }

    pub fn set_perturbation(mut self, v: f64) -> Result<Self, SecantError> {
        if !v.is_finite() || v == 0.0 {
            return Err(SecantError::InvalidPerturbation { got: v });
        }
        self.perturbation = v;
        Ok(self)
    }

    pub fn perturbation(&self) -> f64 { self.perturbation }
}
impl Default for SecantCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(SecantCfg);


/// Calculates the secant x-intercept for the line
/// connecting `(x0, fx0)` and `(x1, fx1)`
///
/// `x1 - fx1 * (x1 - x0) / (fx1 - fx0)`
///
/// # Returns
/// - `Ok(x_next)`                : if denominator `fx1 - fx0` is non-zero
/// - `Err(DegenerateSlope)`      : if denominator is exactly zero
#[inline]
fn calculate_secant_x_intercept(
    (x0, fx0): (f64, f64),
    (x1, fx1): (f64, f64),
) -> Result<f64, SecantError> {
    let denom = fx1 - fx0;
    if denom == 0.0 {
        return Err(SecantError::DegenerateSlope { x0, x1 });
    }

    Ok(x1 - fx1 * (x1 - x0) / denom)
}


/// Finds a root of a function using the
/// [secant method](https://en.wikipedia.org/wiki/Secant_method).
///
/// # Arguments
/// - `func`  : The function whose root is to be found
/// - `a`, `b`: trusted domain; an iterate outside `[a, b]` is an error.
///             Not a bracket: no sign change is required. Bounds may be infinite.
/// - `x0`    : initial guess; the second seed is `x0 + cfg.perturbation()`
/// - `cfg`   : [`SecantCfg`] (tolerances, optional `max_iter`, seed perturbation)
///
/// # Returns
/// [`RootFindingReport`] with
/// - `root`                : approximate root
/// - `f_root`              : function value at `root`
/// - `iterations`          : number of iterations performed
/// - `evaluations`         : total function evaluations
/// - `termination_reason`  : always [`TerminationReason::ToleranceReached`]
/// - `tolerance_satisfied` : step size is tested first, then |f(x)|
/// - `stencil`             : {x_{k-1}, x_k} used to form the last step
/// - `algorithm_name`      : "secant"
///
/// # Errors
/// - [`SecantError::InvalidGuess`]    : `x0` non-finite
/// - [`SecantError::InvalidDomain`]   : `a` or `b` NaN, or `a > b`
/// - [`SecantError::DegenerateSlope`] : `f(x_k) - f(x_{k-1}) == 0`
/// - [`SecantError::OutOfDomain`]     : next iterate outside `[a, b]`
/// - [`SecantError::NotConverged`]    : `max_iter` exhausted
///
/// * Propagated via [`SecantError::RootFinding`]
/// - [`RootFindingError::NonFiniteEvaluation`] : `f(x)` produced NaN/inf
///
/// # Notes
/// - Convergence is superlinear (~1.618) near simple roots.
/// - Each iteration costs one function evaluation; values of the two
///   previous iterates are carried over.
///
/// # Warning
/// - Poor initial guesses may lead to divergence. For guaranteed convergence,
///   use a **bracketed method** (e.g. bisection or regula falsi).
pub fn secant<F> (
    mut func: F,
    a: f64,
    b: f64,
    x0: f64,
    cfg: SecantCfg
) -> Result<RootFindingReport, SecantError>
where F: FnMut(f64) -> f64 {

    if !x0.is_finite() {
        return Err(SecantError::InvalidGuess { x0 });
    }
    if !valid_domain(a, b) {
        return Err(SecantError::InvalidDomain { a, b });
    }

    let algo_name = ALGORITHM.algorithm_name();
    let abs_fx    = cfg.common.abs_fx();
    let abs_x     = cfg.common.abs_x();
    let num_iter  = cfg.common.max_iter_or(ALGORITHM.default_max_iter());

    // track function evaluations
    let mut evals = 0;

    // wraps func, increments evals, enforces finiteness
    let mut eval = |x: f64| -> Result<f64, SecantError> {
        let fx = { evals += 1; func(x) };
        if !fx.is_finite() {
            return Err(RootFindingError::NonFiniteEvaluation { x, fx }.into())
        }

        Ok(fx)
    };

    let mut x_prev = x0;
    let mut x_curr = x0 + cfg.perturbation();
    let mut f_prev = eval(x_prev)?;
    let mut f_curr = eval(x_curr)?;

    for iter in 1..=num_iter {
        let x_next = calculate_secant_x_intercept((x_prev, f_prev), (x_curr, f_curr))
            .inspect_err(|e| debug!("{algo_name}: iter={iter} {e}"))?;
        trace!("{algo_name}: iter={iter} x_prev={x_prev} x_curr={x_curr} x_next={x_next}");

        if !in_domain(x_next, a, b) {
            debug!("{algo_name}: iter={iter} iterate {x_next} left [{a}, {b}]");
            return Err(SecantError::OutOfDomain { x: x_next, a, b });
        }

        let f_next = eval(x_next)?;

        let tolerance_satisfied = if (x_next - x_curr).abs() < abs_x {
            Some(ToleranceSatisfied::StepSizeReached)
        } else if f_next.abs() < abs_fx {
            Some(ToleranceSatisfied::AbsFxReached)
        } else {
            None
        };

        if let Some(tolerance_satisfied) = tolerance_satisfied {
            debug!("{algo_name}: converged to {x_next} after {iter} iterations");
            return Ok(RootFindingReport {
                root                : x_next,
                f_root              : f_next,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied,
                stencil             : Stencil::doubleton(x_prev, x_curr),
                algorithm_name      : algo_name,
            });
        }

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f_next;
    }

    debug!("{algo_name}: no convergence within {num_iter} iterations, last x={x_curr}");
    Err(SecantError::NotConverged { iterations: num_iter, last: x_curr })
}
