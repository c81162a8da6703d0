use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects which backing image model a request runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    #[default]
    Standard,
    Pro,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Standard => "standard",
            ModelTier::Pro => "pro",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelTier {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ModelTier::Standard),
            "pro" => Ok(ModelTier::Pro),
            other => Err(GenerationError::InvalidInput(format!(
                "Unknown model tier: {}",
                other
            ))),
        }
    }
}

/// Output aspect ratios accepted by the image models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    #[default]
    Square,
    Portrait2x3,
    Landscape3x2,
    Portrait3x4,
    Landscape4x3,
    Portrait4x5,
    Landscape5x4,
    Portrait9x16,
    Landscape16x9,
    Cinematic21x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 10] = [
        AspectRatio::Square,
        AspectRatio::Portrait2x3,
        AspectRatio::Landscape3x2,
        AspectRatio::Portrait3x4,
        AspectRatio::Landscape4x3,
        AspectRatio::Portrait4x5,
        AspectRatio::Landscape5x4,
        AspectRatio::Portrait9x16,
        AspectRatio::Landscape16x9,
        AspectRatio::Cinematic21x9,
    ];

    /// The `W:H` directive sent to the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait2x3 => "2:3",
            AspectRatio::Landscape3x2 => "3:2",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Landscape4x3 => "4:3",
            AspectRatio::Portrait4x5 => "4:5",
            AspectRatio::Landscape5x4 => "5:4",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Landscape16x9 => "16:9",
            AspectRatio::Cinematic21x9 => "21:9",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AspectRatio::ALL
            .iter()
            .copied()
            .find(|ratio| ratio.as_str() == wanted)
            .ok_or_else(|| {
                GenerationError::InvalidInput(format!("Unsupported aspect ratio: {}", wanted))
            })
    }
}

impl Serialize for AspectRatio {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AspectRatio {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
