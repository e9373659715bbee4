//! Transverse Mercator projection around a fixed reference origin
//!
//! Conversion formulas follow
//! <http://en.wikipedia.org/wiki/Transverse_Mercator_projection> and
//! <http://mathworld.wolfram.com/MercatorProjection.html> for a spherical
//! earth. The projection is only meaningful for small areas around the origin.

use crate::conversion::{deg_to_rad, rad_to_deg};
use crate::error::{Result, TrackError};
use crate::types::{GeoPoint, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Spherical earth radius in meters (WGS84 semi-major axis)
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Reference point the local planar frame is centered on
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectionOrigin {
    pub reference_latitude_deg: f64,
    pub reference_longitude_deg: f64,
    pub scale_factor: f64,
}

impl ProjectionOrigin {
    pub fn new(reference_latitude_deg: f64, reference_longitude_deg: f64) -> Self {
        Self {
            reference_latitude_deg,
            reference_longitude_deg,
            scale_factor: 1.0,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Reject origins that would make every projected value meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.reference_latitude_deg.is_finite() || !self.reference_longitude_deg.is_finite() {
            return Err(TrackError::Config(format!(
                "projection origin must be finite (lat {}, lon {})",
                self.reference_latitude_deg, self.reference_longitude_deg
            )));
        }
        if self.reference_latitude_deg.abs() > 90.0 {
            return Err(TrackError::Config(format!(
                "reference latitude {} outside [-90, 90]",
                self.reference_latitude_deg
            )));
        }
        if !self.scale_factor.is_finite() || self.scale_factor == 0.0 {
            return Err(TrackError::Config(format!(
                "scale factor must be finite and non-zero, got {}",
                self.scale_factor
            )));
        }
        Ok(())
    }
}

/// Forward/inverse Transverse Mercator transform for one run
#[derive(Debug, Clone, Copy)]
pub struct TransverseMercator {
    origin: ProjectionOrigin,
    origin_lat_rad: f64,
}

impl TransverseMercator {
    pub fn new(origin: ProjectionOrigin) -> Result<Self> {
        origin.validate()?;
        Ok(Self {
            origin,
            origin_lat_rad: deg_to_rad(origin.reference_latitude_deg),
        })
    }

    pub fn origin(&self) -> &ProjectionOrigin {
        &self.origin
    }

    fn k_radius(&self) -> f64 {
        self.origin.scale_factor * EARTH_RADIUS_M
    }

    /// Project geographic degrees to local meters, `z` is always 0
    ///
    /// Points at 90° of longitude from the origin are singular: `x` becomes
    /// ±infinity (or NaN exactly on the pole of the transverse cylinder)
    /// instead of panicking.
    pub fn forward(&self, latitude_deg: f64, longitude_deg: f64) -> Position {
        let lat = deg_to_rad(latitude_deg);
        let dlon = deg_to_rad(longitude_deg - self.origin.reference_longitude_deg);

        let b = dlon.sin() * lat.cos();
        let x = 0.5 * self.k_radius() * ((1.0 + b) / (1.0 - b)).ln();
        let y = self.k_radius() * ((lat.tan() / dlon.cos()).atan() - self.origin_lat_rad);

        Position { x, y, z: 0.0 }
    }

    /// Project a geographic point
    pub fn forward_point(&self, point: GeoPoint) -> Position {
        self.forward(point.latitude_deg, point.longitude_deg)
    }

    /// Inverse of [`TransverseMercator::forward`], returning degrees
    pub fn inverse(&self, x: f64, y: f64) -> GeoPoint {
        let x = x / self.k_radius();
        let y = y / self.k_radius();
        let d = y + self.origin_lat_rad;

        let lon = (x.sinh() / d.cos()).atan();
        let lat = (d.sin() / x.cosh()).asin();

        GeoPoint {
            latitude_deg: rad_to_deg(lat),
            longitude_deg: self.origin.reference_longitude_deg + rad_to_deg(lon),
        }
    }
}
