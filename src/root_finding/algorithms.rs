//! Root-finding algorithm definitions.
//!
//! Provides the [`Algorithm`] enum, which enumerates all supported methods,
//! grouped into bracketing and open families.


/// Root-finding algorithm variants.
/// - [`Algorithm::Bracket`] contains bracket methods for root-finding
/// - [`Algorithm::Open`]    contains open methods for root-finding
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    Bracket(BracketFamily),
    Open(OpenFamily),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BracketFamily {
    Bisection,
    RegulaFalsiPure,
    RegulaFalsiIllinois,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpenFamily {
    Secant,
    Newton
}

impl Algorithm {
    /// Default iteration cap if `max_iter` is unset in config.
    ///
    /// # Notes
    /// - Bracket methods fall back to a best-effort estimate once the cap is hit.
    /// - Open methods report non-convergence as an error once the cap is hit.
    pub const fn default_max_iter(self) -> usize {
        match self {
            Algorithm::Bracket(..)                  => 500,
            Algorithm::Open(OpenFamily::Secant)     => 100,
            Algorithm::Open(OpenFamily::Newton)     => 100,
        }
    }

    pub const fn algorithm_name(self) -> &'static str {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)           => "bisection",
            Algorithm::Bracket(BracketFamily::RegulaFalsiPure)     => "regula_falsi_pure",
            Algorithm::Bracket(BracketFamily::RegulaFalsiIllinois) => "regula_falsi_illinois",
            Algorithm::Open(OpenFamily::Secant)                    => "secant",
            Algorithm::Open(OpenFamily::Newton)                    => "newton",
        }
    }
}
impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}
