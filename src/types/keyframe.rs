#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

/// Local planar position in meters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Object rotation in radians, after offset correction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotation {
    pub heading_rad: f64,
    pub roll_rad: f64,
    pub pitch_rad: f64,
}

impl Rotation {
    pub fn is_finite(&self) -> bool {
        self.heading_rad.is_finite() && self.roll_rad.is_finite() && self.pitch_rad.is_finite()
    }
}

/// Frame-indexed transform record handed to a keyframe sink
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keyframe {
    pub frame_index: u64,
    pub position: Position,
    pub rotation: Rotation,
}
