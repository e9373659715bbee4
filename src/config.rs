//! Run configuration for trajectory extraction and keyframe building
//!
//! [`TrackOptions`] carries every per-run setting. The projection origin is
//! normally supplied by the surrounding scene; with the `json` feature it can
//! be loaded from a scene description via [`SceneConfig`].

use crate::conversion::CoordinatePacking;
use crate::error::{Result, TrackError};
use crate::projection::ProjectionOrigin;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which sentence family supplies orientation for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrientationSource {
    /// `$HEHDT` true heading only
    #[default]
    Hdt,
    /// `$PRDID` roll, pitch and heading
    Prdid,
}

impl std::str::FromStr for OrientationSource {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hdt" | "hehdt" => Ok(OrientationSource::Hdt),
            "prdid" => Ok(OrientationSource::Prdid),
            other => Err(TrackError::Config(format!(
                "unknown orientation source '{}' (expected hdt or prdid)",
                other
            ))),
        }
    }
}

/// How the aggregator decides a pending field has been observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompletenessPolicy {
    /// Per-field presence; a reading of exactly zero counts as observed
    #[default]
    Explicit,
    /// Zero values and empty timestamps count as missing (legacy output parity)
    Truthy,
}

/// Per-run settings for parsing, projection and keyframe output
#[derive(Debug, Clone)]
pub struct TrackOptions {
    pub origin: Option<ProjectionOrigin>,
    pub orientation_source: OrientationSource,
    pub packing: CoordinatePacking,
    pub completeness: CompletenessPolicy,
    /// Negate southern latitudes and western longitudes
    pub apply_hemisphere: bool,
    pub height_offset_m: f64,
    pub roll_offset_deg: f64,
    pub pitch_offset_deg: f64,
    pub heading_offset_deg: f64,
    /// Output frames between consecutive samples
    pub frame_stride: u64,
    /// Drop keyframes made non-finite by the projection singularity
    pub drop_non_finite: bool,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            origin: None,
            orientation_source: OrientationSource::Hdt,
            packing: CoordinatePacking::DegreesMinutes,
            completeness: CompletenessPolicy::Explicit,
            apply_hemisphere: true,
            height_offset_m: 0.0,
            roll_offset_deg: 0.0,
            pitch_offset_deg: 0.0,
            heading_offset_deg: 0.0,
            frame_stride: 2,
            drop_non_finite: false,
        }
    }
}

impl TrackOptions {
    pub fn with_origin(mut self, origin: ProjectionOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Options reproducing the legacy scene script: hundredths packing,
    /// truthy completeness and no hemisphere sign
    pub fn legacy(origin: ProjectionOrigin) -> Self {
        Self {
            origin: Some(origin),
            packing: CoordinatePacking::Hundredths,
            completeness: CompletenessPolicy::Truthy,
            apply_hemisphere: false,
            ..Self::default()
        }
    }

    /// Check everything keyframe building needs, returning the origin
    pub fn validate(&self) -> Result<ProjectionOrigin> {
        let origin = self
            .origin
            .ok_or_else(|| TrackError::Config("no projection origin supplied".to_string()))?;
        origin.validate()?;

        if self.frame_stride == 0 {
            return Err(TrackError::Config(
                "frame stride must be at least 1".to_string(),
            ));
        }

        let offsets = [
            ("height", self.height_offset_m),
            ("roll", self.roll_offset_deg),
            ("pitch", self.pitch_offset_deg),
            ("heading", self.heading_offset_deg),
        ];
        for (name, value) in offsets {
            if !value.is_finite() {
                return Err(TrackError::Config(format!(
                    "{} offset must be finite, got {}",
                    name, value
                )));
            }
        }

        Ok(origin)
    }
}

/// Reference origin as stored in a scene's custom properties
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

#[cfg(feature = "json")]
fn default_scale() -> f64 {
    1.0
}

#[cfg(feature = "json")]
impl SceneConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| TrackError::Config(format!("invalid scene configuration: {}", e)))
    }

    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TrackError::Config(format!("cannot read scene configuration {:?}: {}", path, e))
        })?;
        Self::from_json_str(&text)
    }

    pub fn origin(&self) -> ProjectionOrigin {
        ProjectionOrigin::new(self.lat, self.lon).with_scale_factor(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_origin_is_config_error() {
        let err = TrackOptions::default().validate().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_zero_stride_rejected() {
        let opts = TrackOptions {
            frame_stride: 0,
            ..TrackOptions::default().with_origin(ProjectionOrigin::new(48.0, 11.0))
        };
        assert!(opts.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_non_finite_offset_rejected() {
        let opts = TrackOptions {
            heading_offset_deg: f64::NAN,
            ..TrackOptions::default().with_origin(ProjectionOrigin::new(48.0, 11.0))
        };
        assert!(opts.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_valid_options_return_origin() {
        let opts = TrackOptions::default().with_origin(ProjectionOrigin::new(48.0, 11.0));
        let origin = opts.validate().unwrap();
        assert_eq!(origin.reference_latitude_deg, 48.0);
        assert_eq!(opts.frame_stride, 2);
    }

    #[test]
    fn test_orientation_source_from_str() {
        assert_eq!("HDT".parse::<OrientationSource>().unwrap(), OrientationSource::Hdt);
        assert_eq!("prdid".parse::<OrientationSource>().unwrap(), OrientationSource::Prdid);
        assert!("gsv".parse::<OrientationSource>().is_err());
    }

    #[test]
    fn test_legacy_options() {
        let opts = TrackOptions::legacy(ProjectionOrigin::new(48.0, 11.0));
        assert_eq!(opts.packing, CoordinatePacking::Hundredths);
        assert_eq!(opts.completeness, CompletenessPolicy::Truthy);
        assert!(!opts.apply_hemisphere);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_scene_config_from_json() {
        let scene = SceneConfig::from_json_str(r#"{"lat": 48.1, "lon": 11.5}"#).unwrap();
        let origin = scene.origin();
        assert_eq!(origin.reference_latitude_deg, 48.1);
        assert_eq!(origin.reference_longitude_deg, 11.5);
        assert_eq!(origin.scale_factor, 1.0);

        let err = SceneConfig::from_json_str(r#"{"lat": 48.1}"#).unwrap_err();
        assert!(err.is_config());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_scene_config_from_json_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"lat": -33.85, "lon": 151.2, "scale": 0.9996}"#).unwrap();

        let origin = SceneConfig::from_json_file(&path).unwrap().origin();
        assert_eq!(origin.reference_latitude_deg, -33.85);
        assert_eq!(origin.scale_factor, 0.9996);

        let err = SceneConfig::from_json_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_config());
    }
}
