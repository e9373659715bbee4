//! Keyframe building
//!
//! Turns aggregated trajectory samples into frame-indexed transform records:
//! projects each geographic sample into local meters, applies the configured
//! height and angle offsets, and spaces samples `frame_stride` frames apart.

use crate::config::TrackOptions;
use crate::conversion::{attitude_to_rotation_rad, heading_to_rotation_rad};
use crate::export::KeyframeSink;
use crate::filters::retain_finite_keyframes;
use crate::parser::{parse_nmea_file, parse_nmea_str};
use crate::projection::TransverseMercator;
use crate::types::{Keyframe, ParseStats, Rotation, Trajectory, TrajectorySample};
use crate::error::{Result, TrackError};
use std::path::Path;

/// Maps samples to keyframes for one run
#[derive(Debug, Clone)]
pub struct KeyframeBuilder {
    projection: TransverseMercator,
    options: TrackOptions,
}

impl KeyframeBuilder {
    /// Validate the options and set up the projection
    pub fn new(options: &TrackOptions) -> Result<Self> {
        let origin = options.validate()?;
        Ok(Self {
            projection: TransverseMercator::new(origin)?,
            options: options.clone(),
        })
    }

    pub fn projection(&self) -> &TransverseMercator {
        &self.projection
    }

    /// Frame index of the `sample_index`-th emitted sample
    ///
    /// Fails with a configuration error when the index does not fit in `u64`.
    pub fn frame_index(&self, sample_index: usize) -> Result<u64> {
        (sample_index as u64)
            .checked_mul(self.options.frame_stride)
            .ok_or_else(|| {
                TrackError::Config(format!(
                    "frame index overflows for sample {} with frame stride {}",
                    sample_index, self.options.frame_stride
                ))
            })
    }

    /// Build the keyframe for the `sample_index`-th sample
    pub fn keyframe(&self, sample_index: usize, sample: &TrajectorySample) -> Result<Keyframe> {
        let mut position = self
            .projection
            .forward(sample.latitude_deg, sample.longitude_deg);
        position.z = self.options.height_offset_m;

        let rotation = Rotation {
            heading_rad: heading_to_rotation_rad(
                sample.heading_deg,
                self.options.heading_offset_deg,
            ),
            roll_rad: attitude_to_rotation_rad(sample.roll_deg, self.options.roll_offset_deg),
            pitch_rad: attitude_to_rotation_rad(sample.pitch_deg, self.options.pitch_offset_deg),
        };

        Ok(Keyframe {
            frame_index: self.frame_index(sample_index)?,
            position,
            rotation,
        })
    }

    pub fn build(&self, samples: &[TrajectorySample]) -> Result<Vec<Keyframe>> {
        let mut keyframes = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| self.keyframe(i, sample))
            .collect::<Result<Vec<_>>>()?;
        if self.options.drop_non_finite {
            retain_finite_keyframes(&mut keyframes);
        }
        Ok(keyframes)
    }
}

/// Build keyframes for all samples
pub fn build_keyframes(samples: &[TrajectorySample], options: &TrackOptions) -> Result<Vec<Keyframe>> {
    KeyframeBuilder::new(options)?.build(samples)
}

/// Clear `sink`, insert one keyframe per sample in order, then finish it
///
/// Returns the number of keyframes inserted.
pub fn drive_sink<S: KeyframeSink + ?Sized>(
    samples: &[TrajectorySample],
    options: &TrackOptions,
    sink: &mut S,
) -> Result<usize> {
    let keyframes = build_keyframes(samples, options)?;
    sink.clear()?;
    for keyframe in &keyframes {
        sink.insert_keyframe(keyframe)?;
    }
    sink.finish()?;
    Ok(keyframes.len())
}

/// Result of a complete log-to-sink conversion
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub stats: ParseStats,
    pub samples: usize,
    pub keyframes_written: usize,
}

fn finish_conversion<S: KeyframeSink + ?Sized>(
    trajectory: Trajectory,
    options: &TrackOptions,
    sink: &mut S,
) -> Result<ConversionReport> {
    let keyframes_written = drive_sink(&trajectory.samples, options, sink)?;
    Ok(ConversionReport {
        samples: trajectory.samples.len(),
        stats: trajectory.stats,
        keyframes_written,
    })
}

/// Read an NMEA log, aggregate, project and write keyframes to `sink`
///
/// Configuration is validated before the file is opened, so a missing origin
/// fails without reading any input.
pub fn convert_nmea_file<S: KeyframeSink + ?Sized>(
    file_path: &Path,
    options: &TrackOptions,
    sink: &mut S,
    debug: bool,
) -> Result<ConversionReport> {
    options.validate()?;
    let trajectory = parse_nmea_file(file_path, options, debug)?;
    finish_conversion(trajectory, options, sink)
}

/// Same as [`convert_nmea_file`] for text already in memory
pub fn convert_nmea_str<S: KeyframeSink + ?Sized>(
    text: &str,
    options: &TrackOptions,
    sink: &mut S,
    debug: bool,
) -> Result<ConversionReport> {
    options.validate()?;
    let trajectory = parse_nmea_str(text, options, debug)?;
    finish_conversion(trajectory, options, sink)
}
