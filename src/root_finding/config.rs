//! Shared configuration for root-finding algorithms.
//!
//! Provides [`CommonCfg`] with default tolerances and iteration limits,
//! used by all root-finding configs.
//!
//! [`CommonCfg`] — universal fields
//! ├ `abs_fx`   : function-value tolerance, |f(x)| < abs_fx
//! ├ `abs_x`    : step-size tolerance, |x_{k+1} - x_k| < abs_x (open methods)
//! └ `max_iter` : iteration cap (optional)
//!
//! [`CommonCfg::new`] initializes configuration with default values.
//!
//! Some algorithms have additional config arguments
//! (e.g. the regula falsi variant, or the secant seed perturbation).


pub const DEFAULT_ABS_FX : f64 = 1e-6;
pub const DEFAULT_ABS_X  : f64 = 1e-6;


#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CommonCfg {
    abs_fx: f64,
    abs_x:  f64,
    max_iter: Option<usize>,
}

impl CommonCfg {
    pub fn new() -> Self {
        Self {
            abs_fx   : DEFAULT_ABS_FX,
            abs_x    : DEFAULT_ABS_X,
            max_iter : None
        }
    }

    // getters
    pub fn abs_fx(&self)   -> f64 { self.abs_fx }
    pub fn abs_x(&self)    -> f64 { self.abs_x }
    pub fn max_iter(&self) -> Option<usize> { self.max_iter }

    /// `max_iter` if set, otherwise `default`.
    pub fn max_iter_or(&self, default: usize) -> usize {
        self.max_iter.unwrap_or(default)
    }

    // setters (internal)
    pub(crate) fn with_abs_fx   (&mut self, v: f64)   { self.abs_fx   = v; }
    pub(crate) fn with_abs_x    (&mut self, v: f64)   { self.abs_x    = v; }
    pub(crate) fn with_max_iter (&mut self, v: usize) { self.max_iter = Some(v); }
}

impl Default for CommonCfg {
    fn default() -> Self { Self::new() }
}

macro_rules! impl_common_cfg {
    ($cfg:ty) => {
        impl $cfg {
            pub fn set_abs_fx(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                if !v.is_finite() || v <= 0.0 {
                    return Err(
                        $crate::root_finding::errors::ToleranceError::InvalidAbsFx { got: v }
                    );
                }
                self.common.with_abs_fx(v);
                Ok(self)
            }
            pub fn set_abs_x(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                if !v.is_finite() || v <= 0.0 {
                    return Err(
                        $crate::root_finding::errors::ToleranceError::InvalidAbsX { got: v }
                    );
                }
                self.common.with_abs_x(v);
                Ok(self)
            }
            pub fn set_max_iter(
                mut self, v: usize
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                if v == 0 {
                    return Err(
                        $crate::root_finding::errors::RootFindingError::InvalidMaxIter { got: v }
                    );
                }
                self.common.with_max_iter(v);
                Ok(self)
            }

            pub fn abs_fx(&self)   -> f64 { self.common.abs_fx() }
            pub fn abs_x(&self)    -> f64 { self.common.abs_x() }
            pub fn max_iter(&self) -> Option<usize> { self.common.max_iter() }
        }
    };
}
pub(crate) use impl_common_cfg;
