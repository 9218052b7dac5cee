use std::{fmt::Display, ops::Deref};

/// A share of the whole project, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.);
    pub const FULL: Percentage = Percentage(100.);

    /// Clamps `value` into `0..=100`. NaN is treated as 0.
    pub fn new_clamped(value: f64) -> Percentage {
        if value.is_nan() {
            return Self::ZERO;
        }
        Percentage(value.clamp(0., 100.))
    }

    /// Value rounded to one decimal place, the precision used in every report.
    pub fn rounded_tenths(&self) -> f64 {
        (self.0 * 10.).round() / 10.
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
