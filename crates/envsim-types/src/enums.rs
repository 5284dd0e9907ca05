//! Enumeration types for the envsim workspace.
//!
//! Seasons, hemispheres, layer kinds, and the two configuration selectors
//! (season strategy and transition mode). Configuration files carry these
//! selectors as plain strings; [`std::str::FromStr`] implementations here are
//! the single place where names map onto variants.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// One of the four discrete seasons of the simulated year.
///
/// Quarters of (possibly hemisphere-shifted) year progress map onto seasons
/// with winter wrapping around the year boundary:
/// `[0.75, 1.0) ∪ [0, 0.25)` is winter, `[0.25, 0.5)` spring,
/// `[0.5, 0.75)` summer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// Cold season straddling the year boundary.
    Winter,
    /// Warming season.
    Spring,
    /// Warm season.
    Summer,
    /// Cooling season. The quarter mapping never produces it.
    Autumn,
}

impl Season {
    /// Map a normalized progress value onto a discrete season.
    ///
    /// Values outside `[0, 1)` are wrapped first.
    pub fn from_progress(progress: f64) -> Self {
        let normalized = progress.rem_euclid(1.0);
        if !(0.25..0.75).contains(&normalized) {
            Self::Winter
        } else if normalized < 0.5 {
            Self::Spring
        } else if normalized < 0.75 {
            Self::Summer
        } else {
            Self::Autumn
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Winter => "WINTER",
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
            Self::Autumn => "AUTUMN",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Hemispheres
// ---------------------------------------------------------------------------

/// Which seasonal curve applies to a coordinate.
///
/// Also the cache key the season manager uses to detect boundary crossings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Hemisphere {
    /// Upper half of the grid (and the equatorial band).
    Northern,
    /// Lower half of the grid, six months out of phase.
    Southern,
    /// Single world-wide curve.
    Global,
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Northern => "northern",
            Self::Southern => "southern",
            Self::Global => "global",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

/// The environmental scalar fields the composite environment can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LayerKind {
    /// Atmospheric temperature in degrees.
    Temperature,
    /// Relative humidity in `[0, 1]`.
    Humidity,
    /// Light intensity in `[0, 1]`.
    Luminosity,
}

impl LayerKind {
    /// Stable lowercase name, as used in configuration and diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Luminosity => "luminosity",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "temperature" | "atmospheric_temperature" => Ok(Self::Temperature),
            "humidity" => Ok(Self::Humidity),
            "luminosity" => Ok(Self::Luminosity),
            _ => Err(UnknownName(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration selectors
// ---------------------------------------------------------------------------

/// Which seasonal model drives the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum SeasonStrategyKind {
    /// Northern and southern halves run six months apart.
    Hemispheric,
    /// One curve for the whole world.
    GlobalUniform,
}

impl SeasonStrategyKind {
    /// Configuration name of the strategy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hemispheric => "HEMISPHERIC",
            Self::GlobalUniform => "GLOBAL_UNIFORM",
        }
    }
}

impl fmt::Display for SeasonStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonStrategyKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HEMISPHERIC" => Ok(Self::Hemispheric),
            "GLOBAL_UNIFORM" | "GLOBAL" => Ok(Self::GlobalUniform),
            _ => Err(UnknownName(s.to_owned())),
        }
    }
}

/// How season boundaries are presented.
///
/// `Smooth` is accepted for forward compatibility but currently computes
/// exactly what `Discretized` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum TransitionMode {
    /// Blend across boundaries (no distinct computation yet).
    Smooth,
    /// Hard quarter boundaries.
    Discretized,
}

impl TransitionMode {
    /// Configuration name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "SMOOTH",
            Self::Discretized => "DISCRETIZED",
        }
    }
}

impl fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SMOOTH" => Ok(Self::Smooth),
            "DISCRETIZED" => Ok(Self::Discretized),
            _ => Err(UnknownName(s.to_owned())),
        }
    }
}

/// A configuration name that matched no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name: {0}")]
pub struct UnknownName(pub String);

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Category of a tracked diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventType {
    /// Emitted by the simulation core.
    SimulationEvent,
    /// Emitted by a user-facing surface.
    UxAction,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn quarters_map_to_seasons() {
        assert_eq!(Season::from_progress(0.0), Season::Winter);
        assert_eq!(Season::from_progress(0.1), Season::Winter);
        assert_eq!(Season::from_progress(0.25), Season::Spring);
        assert_eq!(Season::from_progress(0.49), Season::Spring);
        assert_eq!(Season::from_progress(0.5), Season::Summer);
        assert_eq!(Season::from_progress(0.74), Season::Summer);
        assert_eq!(Season::from_progress(0.75), Season::Winter);
        assert_eq!(Season::from_progress(0.99), Season::Winter);
    }

    #[test]
    fn progress_wraps_before_mapping() {
        assert_eq!(Season::from_progress(1.3), Season::Spring);
        assert_eq!(Season::from_progress(-0.5), Season::Summer);
    }

    #[test]
    fn layer_names_parse() {
        assert_eq!("temperature".parse::<LayerKind>(), Ok(LayerKind::Temperature));
        assert_eq!(" Humidity ".parse::<LayerKind>(), Ok(LayerKind::Humidity));
        assert_eq!("luminosity".parse::<LayerKind>(), Ok(LayerKind::Luminosity));
        assert!("solar_energy".parse::<LayerKind>().is_err());
    }

    #[test]
    fn selector_names_parse() {
        assert_eq!(
            "hemispheric".parse::<SeasonStrategyKind>(),
            Ok(SeasonStrategyKind::Hemispheric)
        );
        assert_eq!(
            "GLOBAL_UNIFORM".parse::<SeasonStrategyKind>(),
            Ok(SeasonStrategyKind::GlobalUniform)
        );
        assert_eq!("smooth".parse::<TransitionMode>(), Ok(TransitionMode::Smooth));
        assert!("gradual".parse::<TransitionMode>().is_err());
    }

    #[test]
    fn unknown_name_reports_the_input() {
        let err = "tropical".parse::<SeasonStrategyKind>().unwrap_err();
        assert_eq!(err, UnknownName("tropical".to_owned()));
        assert_eq!(err.to_string(), "unknown name: tropical");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn season_serializes_screaming() {
        let json = serde_json::to_string(&Season::Winter).unwrap_or_default();
        assert_eq!(json, "\"WINTER\"");
    }
}
