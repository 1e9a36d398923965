/// Prompter display types
use serde::{Deserialize, Serialize};

/// Lyric display size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    /// Compact, fits the most lines
    Small,

    /// Default size
    #[default]
    Medium,

    /// Large print for distant screens
    Large,
}

impl FontSize {
    /// Multiplier applied to the base line height
    pub fn scale(self) -> f32 {
        match self {
            Self::Small => 0.75,
            Self::Medium => 1.0,
            Self::Large => 1.5,
        }
    }

    /// Next size up, saturating at `Large`
    pub fn larger(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium | Self::Large => Self::Large,
        }
    }

    /// Next size down, saturating at `Small`
    pub fn smaller(self) -> Self {
        match self {
            Self::Small | Self::Medium => Self::Small,
            Self::Large => Self::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_steps_saturate() {
        assert_eq!(FontSize::Large.larger(), FontSize::Large);
        assert_eq!(FontSize::Small.smaller(), FontSize::Small);
        assert_eq!(FontSize::Medium.larger(), FontSize::Large);
    }
}
