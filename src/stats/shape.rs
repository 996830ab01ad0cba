use std::fmt;

use super::moments::Moments;

/// Magnitude at which skewness or excess kurtosis stops counting as normal-like.
pub const SHAPE_THRESHOLD: f64 = 0.5;

// ---------------------------------------------------------------------------
// Shape labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkewKind {
    ApproximatelySymmetric,
    RightSkewed,
    LeftSkewed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KurtosisKind {
    Leptokurtic,
    Platykurtic,
    Mesokurtic,
}

/// The two independent labels describing a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub skew: SkewKind,
    pub kurtosis: KurtosisKind,
}

impl SkewKind {
    /// `|s| < 0.5` is symmetric, so a value of exactly ±0.5 is skewed.
    /// NaN (undefined skewness) is symmetric.
    pub fn classify(skewness: f64) -> Self {
        if skewness.is_nan() || skewness.abs() < SHAPE_THRESHOLD {
            SkewKind::ApproximatelySymmetric
        } else if skewness > 0.0 {
            SkewKind::RightSkewed
        } else {
            SkewKind::LeftSkewed
        }
    }
}

impl KurtosisKind {
    /// Strict on both sides: exactly ±0.5 is mesokurtic, as is NaN.
    pub fn classify(excess_kurtosis: f64) -> Self {
        if excess_kurtosis > SHAPE_THRESHOLD {
            KurtosisKind::Leptokurtic
        } else if excess_kurtosis < -SHAPE_THRESHOLD {
            KurtosisKind::Platykurtic
        } else {
            KurtosisKind::Mesokurtic
        }
    }
}

impl Shape {
    pub fn classify(skewness: f64, excess_kurtosis: f64) -> Self {
        Shape {
            skew: SkewKind::classify(skewness),
            kurtosis: KurtosisKind::classify(excess_kurtosis),
        }
    }

    pub fn of(moments: &Moments) -> Self {
        Self::classify(moments.skewness, moments.excess_kurtosis)
    }
}

impl fmt::Display for SkewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkewKind::ApproximatelySymmetric => "approximately symmetric",
            SkewKind::RightSkewed => "right skewed",
            SkewKind::LeftSkewed => "left skewed",
        })
    }
}

impl fmt::Display for KurtosisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KurtosisKind::Leptokurtic => "leptokurtic",
            KurtosisKind::Platykurtic => "platykurtic",
            KurtosisKind::Mesokurtic => "mesokurtic",
        })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.skew, self.kurtosis)
    }
}
