use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// Result-screen feedback bucket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FeedbackTier {
    Elite,
    NearElite,
    AboveAverage,
    Poor,
    Average,
}

impl FeedbackTier {
    /// First matching rule wins. `accuracy` is the unrounded 0..=1 value.
    pub fn from_result(accuracy: f64, percentile: u32) -> Self {
        if accuracy >= 0.95 {
            Self::Elite
        } else if accuracy >= 0.85 {
            Self::NearElite
        } else if percentile >= 70 {
            Self::AboveAverage
        } else if accuracy < 0.60 {
            Self::Poor
        } else {
            Self::Average
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Elite => "You are a SPEED DEMON!",
            Self::NearElite => "Ninja reflexes (almost)",
            Self::AboveAverage => "Better than most players!",
            Self::Poor => "Rough run, but it's only the beginning!",
            Self::Average => "Good game, there's room to climb the board!",
        }
    }
}

impl std::fmt::Display for FeedbackTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
