#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orientation fields, heading measured clockwise from true north
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientationSample {
    pub heading_deg: f64,
    pub roll_deg: Option<f64>,
    pub pitch_deg: Option<f64>,
}

/// One fully aggregated position + orientation observation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrajectorySample {
    pub timestamp: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub heading_deg: f64,
    pub roll_deg: Option<f64>,
    pub pitch_deg: Option<f64>,
}

impl TrajectorySample {
    pub fn orientation(&self) -> OrientationSample {
        OrientationSample {
            heading_deg: self.heading_deg,
            roll_deg: self.roll_deg,
            pitch_deg: self.pitch_deg,
        }
    }
}

/// Line statistics gathered while aggregating a log
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParseStats {
    pub total_lines: u64,
    pub fix_sentences: u64,
    pub orientation_sentences: u64,
    /// Lines matching no supported pattern, or the inactive orientation family
    pub ignored_lines: u64,
    pub malformed_lines: u64,
    pub samples_emitted: u64,
}

/// Complete trajectory extracted from one NMEA log
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trajectory {
    pub samples: Vec<TrajectorySample>,
    pub stats: ParseStats,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check if any sample carries roll/pitch (PRDID source)
    pub fn has_attitude_data(&self) -> bool {
        self.samples
            .iter()
            .any(|s| s.roll_deg.is_some() || s.pitch_deg.is_some())
    }

    /// Get the first and last timestamp tokens
    pub fn time_span(&self) -> Option<(&str, &str)> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        Some((first.timestamp.as_str(), last.timestamp.as_str()))
    }
}
