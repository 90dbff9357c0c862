use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Judgment quality of a note. `Miss` is only produced by time running out.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
pub enum JudgmentTier {
    #[strum(serialize = "PERFECT")]
    Perfect,
    #[strum(serialize = "GOOD")]
    Good,
    #[strum(serialize = "BAD")]
    Bad,
    #[strum(serialize = "MISS")]
    Miss,
}

impl JudgmentTier {
    pub fn points(&self) -> u64 {
        match self {
            Self::Perfect => 300,
            Self::Good => 100,
            Self::Bad => 50,
            Self::Miss => 0,
        }
    }

    /// Bad hits count toward accuracy but still reset the combo.
    pub fn breaks_combo(&self) -> bool {
        matches!(self, Self::Bad | Self::Miss)
    }

    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for JudgmentTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoStaticStr)]
pub enum SessionPhase {
    #[default]
    Ready,
    Playing,
    Completed,
    Aborted,
}

impl SessionPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
