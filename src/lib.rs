//! NMEA Track Library
//!
//! A Rust library for extracting vehicle trajectories (position + orientation)
//! from NMEA-0183 logs and projecting them into a local planar frame for
//! driving a 3D scene object over time.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV keyframe export
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`** (default): Enable JSON keyframe export and JSON scene configuration
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse a log and build keyframes around a reference origin:
//! ```rust,no_run
//! use nmea_track::{build_keyframes, parse_nmea_file, ProjectionOrigin, TrackOptions};
//! use std::path::Path;
//!
//! let options = TrackOptions::default().with_origin(ProjectionOrigin::new(48.1173, 11.5167));
//! let trajectory = parse_nmea_file(Path::new("drive.nmea"), &options, false).unwrap();
//! let keyframes = build_keyframes(&trajectory.samples, &options).unwrap();
//! println!("{} samples, last frame {:?}", trajectory.len(), keyframes.last().map(|k| k.frame_index));
//! ```
//!
//! Stream keyframes straight into a sink:
//! ```rust,no_run
//! use nmea_track::{convert_nmea_file, Keyframe, ProjectionOrigin, TrackOptions};
//! use std::path::Path;
//!
//! let options = TrackOptions::default().with_origin(ProjectionOrigin::new(48.1173, 11.5167));
//! let mut sink: Vec<Keyframe> = Vec::new();
//! let report = convert_nmea_file(Path::new("drive.nmea"), &options, &mut sink, false).unwrap();
//! println!("wrote {} keyframes", report.keyframes_written);
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_nmea_file`] - Parse an NMEA log file into a [`Trajectory`]
//! - [`parse_nmea_bytes`] - Parse NMEA data from memory
//! - [`parse_nmea_str`] - Parse NMEA text
//! - [`SampleAggregator`] - Push-style API for live streams
//!
//! ## Projection
//! - [`TransverseMercator`] - Forward/inverse projection around a [`ProjectionOrigin`]
//!
//! ## Keyframes and Export
//! - [`build_keyframes`] / [`KeyframeBuilder`] - Samples to frame-indexed transforms
//! - [`convert_nmea_file`] - Complete log-to-sink pipeline
//! - [`KeyframeSink`] - Sink capability; implemented by `Vec<Keyframe>`,
//!   `CsvKeyframeSink` and `JsonKeyframeSink`
//! - [`export_to_gpx`] - Export geographic samples as a GPX track
//!
//! ## Filtering Functions
//! - [`retain_finite_keyframes`] - Drop keyframes hit by the projection singularity
//! - [`should_skip_export`] - Skip logs without any complete sample

// Module declarations
pub mod config;
pub mod conversion;
pub mod error;
pub mod export;
pub mod filters;
pub mod parser;
pub mod projection;
pub mod track;
pub mod types;

// Re-export everything from modules for convenience
// Submodule names overlap (`types::sentence`, `parser::sentence`); items do not
#[allow(ambiguous_glob_reexports)]
pub use config::*;
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use filters::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use projection::*;
#[allow(ambiguous_glob_reexports)]
pub use track::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
