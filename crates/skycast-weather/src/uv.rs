//! UV index severity bands and their display colors.

use serde::{Deserialize, Serialize};

/// UV exposure band, ascending severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvSeverity {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvSeverity {
    /// Classify a UV index. A value equal to a threshold belongs to the
    /// higher band; negative values are `Low`.
    pub fn from_index(uvi: f64) -> Self {
        if uvi < 3.0 {
            Self::Low
        } else if uvi < 6.0 {
            Self::Moderate
        } else if uvi < 8.0 {
            Self::High
        } else if uvi < 11.0 {
            Self::VeryHigh
        } else {
            Self::Extreme
        }
    }

    /// Hex color used for the UV badge
    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "#30ba53",
            Self::Moderate => "#b3b319",
            Self::High => "#cf7a02",
            Self::VeryHigh => "#a30000",
            Self::Extreme => "#8d00a3",
        }
    }

    pub fn color_name(&self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Moderate => "yellow",
            Self::High => "orange",
            Self::VeryHigh => "red",
            Self::Extreme => "purple",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }
}

/// Display color for a UV index value.
pub fn color_for_uv_index(uvi: f64) -> &'static str {
    UvSeverity::from_index(uvi).color()
}
