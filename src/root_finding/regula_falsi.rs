use super::algorithms::{Algorithm, BracketFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil};
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use super::signs::opposite_sign;
use super::bisection::midpoint;
use log::{debug, trace, warn};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegulaFalsiError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("no sign change on [{a}, {b}]: sign(f(a)) = sign(f(b))")]
    NoSignChange  { a: f64, b: f64 },

    #[error("invalid bounds: a and b must be finite. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },
}

/// Which false-position variant to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegulaFalsiVariant {
    // classic regula falsi: one endpoint tends to stick for convex/concave f
    Pure,

    // illinois: once the same endpoint has been retained for more than one
    // consecutive iteration, halve its cached function value.
    Illinois,
}
impl RegulaFalsiVariant {
    pub const fn algorithm(self) -> Algorithm {
        match self {
            RegulaFalsiVariant::Pure     => Algorithm::Bracket(BracketFamily::RegulaFalsiPure),
            RegulaFalsiVariant::Illinois => Algorithm::Bracket(BracketFamily::RegulaFalsiIllinois),
        }
    }
}

/// RegulaFalsi configuration
///
/// # Fields
/// - `common`  : [`CommonCfg`] with tolerances and optional `max_iter`.
///   `abs_x` is unused by regula falsi.
/// - `variant` : [`RegulaFalsiVariant`], [`RegulaFalsiVariant::Illinois`] by default.
///
/// # Defaults
/// - `abs_fx = 1e-6`
/// - If `common.max_iter` is `None`, [`regula_falsi`] uses
///   [`Algorithm::default_max_iter`] (500).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegulaFalsiCfg {
    common:  CommonCfg,
    variant: RegulaFalsiVariant,
}
impl RegulaFalsiCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common:  CommonCfg::new(),
            variant: RegulaFalsiVariant::Illinois,
        }
    }

    #[must_use]
    pub fn set_variant(mut self, v: RegulaFalsiVariant) -> Self {
        self.variant = v;
        self
    }

    pub fn variant(&self) -> RegulaFalsiVariant { self.variant }
}
impl Default for RegulaFalsiCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(RegulaFalsiCfg);


/// Calculates the false-position point for the line
/// connecting `(a, fa)` and `(b, fb)`
///
/// `a - (b - a) * fa / (fb - fa)`
///
/// `fa / (fb - fa)` lies in `[-1, 0]` for opposite signs, so the product
/// cannot overflow unless `b - a` does.
/// Falls back to the midpoint of [a, b] if the result is non-finite.
#[inline]
fn false_position((a, fa): (f64, f64), (b, fb): (f64, f64)) -> f64 {
    let x = a - (b - a) * (fa / (fb - fa));
    if x.is_finite() { x } else { midpoint(a, b) }
}


/// Finds a root of a function using the
/// [regula falsi method](https://en.wikipedia.org/wiki/Regula_falsi),
/// with the Illinois correction by default.
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
/// └ `cfg`  - [`RegulaFalsiCfg`] (`abs_fx`, optional `max_iter`, `variant`)
///
/// # Returns
///
/// [`RootFindingReport`] with `stencil` = [`Stencil::Bracket`] holding the final bracket
/// and `algorithm_name` = `"regula_falsi_illinois"` or `"regula_falsi_pure"`.
/// ├ [`TerminationReason::EndpointRoot`]     - `f(a)` or `f(b)` is exactly zero
/// ├ [`TerminationReason::ToleranceReached`] - |f(x)| < abs_fx
/// └ [`TerminationReason::IterationLimit`]   - cap exhausted, false-position point
///                                             of the final bracket
///
/// # Errors
///
/// ┌ [`RegulaFalsiError::InvalidBounds`] - `a` or `b` is NaN/inf.
/// ├ [`RegulaFalsiError::NoSignChange`]  - `func(a)` and `func(b)` share a sign.
/// └ [`RegulaFalsiError::RootFinding`]   - `func(x)` produced NaN/inf.
///
/// # Behavior
/// - `count_a` / `count_b` count how many consecutive iterations an endpoint
///   was retained while the other one moved.
/// - Illinois: once a count exceeds 1, the retained endpoint's cached value
///   is halved before the next interpolation.
/// - The best-effort estimate on exhaustion uses the (possibly halved) cached values.
pub fn regula_falsi<F> (
    mut func: F,
    mut a: f64,
    mut b: f64,
    cfg: RegulaFalsiCfg
) -> Result<RootFindingReport, RegulaFalsiError>
where F: FnMut(f64) -> f64 {

    if !(a.is_finite() && b.is_finite()) {
        return Err(RegulaFalsiError::InvalidBounds { a, b });
    }

    let variant   = cfg.variant();
    let algorithm = variant.algorithm();
    let algo_name = algorithm.algorithm_name();
    let abs_fx    = cfg.common.abs_fx();
    let num_iter  = cfg.common.max_iter_or(algorithm.default_max_iter());

    // number of function evaluations
    let mut evals = 0;

    // closure function, checks finiteness
    let mut eval = |x: f64| -> Result<f64, RegulaFalsiError> {
        let fx = { evals += 1; func(x) };
        if !fx.is_finite() {
            Err(RootFindingError::NonFiniteEvaluation { x, fx }.into())
        } else {
            Ok(fx)
        }
    };

    let mut fa = eval(a)?;
    let mut fb = eval(b)?;

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
        return Err(RegulaFalsiError::NoSignChange { a, b });
    }

    let illinois    = variant == RegulaFalsiVariant::Illinois;
    let mut count_a = 0_usize;
    let mut count_b = 0_usize;

    for iter in 1..=num_iter {
        let x  = false_position((a, fa), (b, fb));
        let fx = eval(x)?;
        trace!("{algo_name}: iter={iter} bracket=[{a}, {b}] x={x} f(x)={fx}");

        if fx.abs() < abs_fx {
            debug!("{algo_name}: converged to {x} after {iter} iterations");
            return Ok(RootFindingReport {
                root                : x,
                f_root              : fx,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
                stencil             : Stencil::bracket(a, b),
                algorithm_name      : algo_name,
            });
        }

        // shrink interval, then correct a stuck endpoint
        if opposite_sign(fa, fx) {
            b  = x;
            fb = fx;
            count_b = 0;
            count_a += 1;
            if illinois && count_a > 1 { fa *= 0.5; }
        } else {
            a  = x;
            fa = fx;
            count_a = 0;
            count_b += 1;
            if illinois && count_b > 1 { fb *= 0.5; }
        }
    }

    let x  = false_position((a, fa), (b, fb));
    let fx = eval(x)?;
    warn!(
        "{algo_name}: iteration cap {num_iter} exhausted without |f(x)| < {abs_fx}; \
         returning best-effort estimate {x} (f={fx})"
    );

    Ok(RootFindingReport {
        root                : x,
        f_root              : fx,
        iterations          : num_iter,
        evaluations         : evals,
        termination_reason  : TerminationReason::IterationLimit,
        tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
        stencil             : Stencil::bracket(a, b),
        algorithm_name      : algo_name,
    })
}
