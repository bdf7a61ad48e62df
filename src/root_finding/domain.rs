//! Trusted-domain guard for the open root-finding algorithms.
//!
//! Open methods take `[a, b]` as guard rails rather than a bracket:
//! an iterate leaving it is treated as divergence.

/// Returns `true` if `[a, b]` is a usable domain: neither bound NaN and `a <= b`.
/// Infinite bounds leave that side unbounded; `[a, a]` admits only `x = a`.
#[inline]
pub(crate) fn valid_domain(a: f64, b: f64) -> bool {
    !a.is_nan() && !b.is_nan() && a <= b
}

/// Returns `true` if `x` lies in the closed interval `[a, b]`. NaN never does.
#[inline]
pub(crate) fn in_domain(x: f64, a: f64, b: f64) -> bool {
    (a..=b).contains(&x)
}
