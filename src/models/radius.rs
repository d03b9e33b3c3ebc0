use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Radius choices offered to the user, in kilometers
pub const RADIUS_OPTIONS_KM: [u32; 5] = [1, 5, 10, 20, 50];

/// Radius used when no valid preference is stored
pub const DEFAULT_RADIUS_KM: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("radius {0}km is not one of 1, 5, 10, 20, 50")]
pub struct InvalidRadius(pub u32);

/// Persisted search radius preference.
///
/// Always holds one of [`RADIUS_OPTIONS_KM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SearchRadius(u32);

impl SearchRadius {
    pub fn km(&self) -> u32 {
        self.0
    }

    /// Parse a stored preference value, falling back to the default for
    /// anything that is not an allowed integer.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<u32>().ok())
            .and_then(|km| Self::try_from(km).ok())
            .unwrap_or_default()
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_KM)
    }
}

impl TryFrom<u32> for SearchRadius {
    type Error = InvalidRadius;

    fn try_from(km: u32) -> Result<Self, Self::Error> {
        if RADIUS_OPTIONS_KM.contains(&km) {
            Ok(Self(km))
        } else {
            Err(InvalidRadius(km))
        }
    }
}

impl From<SearchRadius> for u32 {
    fn from(radius: SearchRadius) -> Self {
        radius.0
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
