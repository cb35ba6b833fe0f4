use crate::foundation::error::{ChoreoError, ChoreoResult};

/// Easing curves applied to a segment's normalized local progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in (`power1.in`).
    InQuad,
    /// Quadratic ease-out (`power1.out`).
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in (`power2.in`).
    InCubic,
    /// Cubic ease-out (`power2.out`).
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
}

impl Ease {
    /// Every curve, in declaration order.
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// Parse a curve name.
    ///
    /// Accepts the enum spelling (`"OutCubic"`) as well as the dotted family names used by web
    /// timelines (`"power2.out"`, `"quad.inOut"`, `"none"`).
    pub fn parse(name: &str) -> ChoreoResult<Self> {
        let key = name.trim();
        let ease = match key {
            "Linear" | "linear" | "none" => Self::Linear,
            "InQuad" | "power1.in" | "quad.in" => Self::InQuad,
            "OutQuad" | "power1.out" | "quad.out" | "power1" | "quad" => Self::OutQuad,
            "InOutQuad" | "power1.inOut" | "quad.inOut" => Self::InOutQuad,
            "InCubic" | "power2.in" | "cubic.in" => Self::InCubic,
            "OutCubic" | "power2.out" | "cubic.out" | "power2" | "cubic" => Self::OutCubic,
            "InOutCubic" | "power2.inOut" | "cubic.inOut" => Self::InOutCubic,
            _ => {
                return Err(ChoreoError::animation(format!("unknown ease '{key}'")));
            }
        };
        Ok(ease)
    }
}

impl std::str::FromStr for Ease {
    type Err = ChoreoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
