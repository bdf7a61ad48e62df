//! Scalar root finding.
//!
//! Bracketing methods ([`root_finding::bisection`], [`root_finding::regula_falsi`])
//! and open methods ([`root_finding::newton`], [`root_finding::secant`]) for
//! continuous `f: f64 -> f64`.

pub mod root_finding;
