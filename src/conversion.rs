//! Coordinate conversion utilities for NMEA parsing
//!
//! Contains the packed degrees+minutes unpacking strategies, hemisphere sign
//! handling and the angle conversions used when building keyframes.

use crate::types::PackedCoordinate;
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a packed "DDMM.MMMM" value is turned into decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoordinatePacking {
    /// Whole degrees plus minutes / 60 (NMEA-0183 semantics)
    #[default]
    DegreesMinutes,
    /// Plain division by 100, as older scene scripts did
    Hundredths,
}

impl CoordinatePacking {
    /// Unpack an unsigned packed value to unsigned decimal degrees
    pub fn unpack(self, raw: f64) -> f64 {
        match self {
            CoordinatePacking::DegreesMinutes => {
                let degrees = (raw / 100.0).trunc();
                let minutes = raw - degrees * 100.0;
                degrees + minutes / 60.0
            }
            CoordinatePacking::Hundredths => raw / 100.0,
        }
    }
}

/// Convert a packed coordinate to signed decimal degrees
///
/// When `apply_hemisphere` is false the hemisphere letter is ignored and the
/// result is always positive, which only holds for northern/eastern inputs.
pub fn packed_to_degrees(
    coordinate: &PackedCoordinate,
    packing: CoordinatePacking,
    apply_hemisphere: bool,
) -> f64 {
    let degrees = packing.unpack(coordinate.raw);
    if apply_hemisphere {
        degrees * coordinate.hemisphere.sign()
    } else {
        degrees
    }
}

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Convert radians to degrees
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Convert a compass heading (clockwise from north) to a scene Z rotation
///
/// Scene rotations are counter-clockwise, so the heading is negated before
/// the offset is subtracted.
pub fn heading_to_rotation_rad(heading_deg: f64, heading_offset_deg: f64) -> f64 {
    deg_to_rad(-heading_deg - heading_offset_deg)
}

/// Apply a subtractive offset to roll/pitch and convert to radians
///
/// Missing angles yield 0.0 without the offset applied.
pub fn attitude_to_rotation_rad(angle_deg: Option<f64>, offset_deg: f64) -> f64 {
    match angle_deg {
        Some(angle) => deg_to_rad(angle - offset_deg),
        None => 0.0,
    }
}
