#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hemisphere letter attached to a packed coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Decode a single NMEA hemisphere letter (`N`, `S`, `E`, `W`)
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Sign applied to the unpacked decimal value
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

/// Coordinate in NMEA "DDMM.MMMM" (or "DDDMM.MMMM") packed form
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackedCoordinate {
    /// Raw unsigned value as written in the sentence
    pub raw: f64,
    pub hemisphere: Hemisphere,
}

/// Fields carried by a position-fix (GGA) sentence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixFields {
    /// Opaque UTC time token, only used as a presence marker
    pub timestamp: String,
    pub latitude: PackedCoordinate,
    pub longitude: PackedCoordinate,
}

/// Roll/pitch/heading triple from an attitude (PRDID) sentence
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attitude {
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub heading_deg: f64,
}

/// A decoded NMEA sentence of one of the supported shapes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sentence {
    /// `$GNGGA` position fix
    Fix(FixFields),
    /// `$HEHDT` true heading in degrees
    TrueHeading { heading_deg: f64 },
    /// `$PRDID` attitude
    Attitude(Attitude),
}

impl Sentence {
    /// Sentence identifier as it appears after the `$`
    pub fn identifier(&self) -> &'static str {
        match self {
            Sentence::Fix(_) => "GNGGA",
            Sentence::TrueHeading { .. } => "HEHDT",
            Sentence::Attitude(_) => "PRDID",
        }
    }
}
