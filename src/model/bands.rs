use serde::Serialize;

/// Qualitative reliability tier. The six-tier ladder is canonical; the
/// five-tier ladder collapses the 0.5–0.7 span into `NeedsImprovement` and
/// survives as a selectable policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReliabilityBand {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Acceptable")]
    Acceptable,
    #[serde(rename = "Questionable")]
    Questionable,
    #[serde(rename = "Poor")]
    Poor,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    #[serde(rename = "Unacceptable")]
    Unacceptable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReliabilityScheme {
    SixTier,
    FiveTier,
}

impl ReliabilityBand {
    /// Evaluated high to low, first match wins.
    pub fn classify(alpha: f64, scheme: ReliabilityScheme) -> Self {
        match scheme {
            ReliabilityScheme::SixTier => {
                if alpha >= 0.9 {
                    Self::Excellent
                } else if alpha >= 0.8 {
                    Self::Good
                } else if alpha >= 0.7 {
                    Self::Acceptable
                } else if alpha >= 0.6 {
                    Self::Questionable
                } else if alpha >= 0.5 {
                    Self::Poor
                } else {
                    Self::Unacceptable
                }
            }
            ReliabilityScheme::FiveTier => {
                if alpha >= 0.9 {
                    Self::Excellent
                } else if alpha >= 0.8 {
                    Self::Good
                } else if alpha >= 0.7 {
                    Self::Acceptable
                } else if alpha >= 0.5 {
                    Self::NeedsImprovement
                } else {
                    Self::Unacceptable
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::Questionable => "Questionable",
            Self::Poor => "Poor",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Unacceptable => "Unacceptable",
        }
    }
}

/// Which of the two divergent per-item threshold schemes to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemScheme {
    /// Continuous thresholds on the item mean (5-point scale).
    ContinuousMean,
    /// Discrete per-value thresholds around the scale midpoint.
    DiscreteValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemBand {
    #[serde(rename = "Very Good")]
    VeryGood,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    Fair,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    #[serde(rename = "Very Positive")]
    VeryPositive,
    #[serde(rename = "Positive-Neutral")]
    PositiveNeutral,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Negative-Neutral")]
    NegativeNeutral,
    #[serde(rename = "Very Negative")]
    VeryNegative,
}

impl ItemBand {
    /// Evaluated high to low, first match wins.
    pub fn classify(mean: f64, scheme: ItemScheme) -> Self {
        match scheme {
            ItemScheme::ContinuousMean => {
                if mean >= 4.2 {
                    Self::VeryGood
                } else if mean >= 3.6 {
                    Self::Good
                } else if mean >= 3.0 {
                    Self::Fair
                } else {
                    Self::NeedsAttention
                }
            }
            ItemScheme::DiscreteValue => {
                if mean > 4.0 {
                    Self::VeryPositive
                } else if mean > 3.0 {
                    Self::PositiveNeutral
                } else if mean == 3.0 {
                    Self::Neutral
                } else if mean > 2.0 {
                    Self::NegativeNeutral
                } else {
                    Self::VeryNegative
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs Attention",
            Self::VeryPositive => "Very Positive",
            Self::PositiveNeutral => "Positive-Neutral",
            Self::Neutral => "Neutral",
            Self::NegativeNeutral => "Negative-Neutral",
            Self::VeryNegative => "Very Negative",
        }
    }
}

/// Band over the sum-based total score (0–100-like scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TotalBand {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Negative")]
    Negative,
}

impl TotalBand {
    pub fn classify(sum: f64) -> Self {
        if sum >= 80.0 {
            Self::VeryPositive
        } else if sum >= 60.0 {
            Self::Positive
        } else if sum >= 40.0 {
            Self::Neutral
        } else {
            Self::Negative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryPositive => "Very Positive",
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    pub const ALL: [TotalBand; 4] = [
        TotalBand::VeryPositive,
        TotalBand::Positive,
        TotalBand::Neutral,
        TotalBand::Negative,
    ];
}
