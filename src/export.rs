//! Export functionality for trajectory data
//!
//! Keyframes are handed to a [`KeyframeSink`], the stand-in for a scene's
//! animation track. This module provides the sink trait, an in-memory sink,
//! CSV and JSON file sinks, and GPX export of the geographic samples.

use crate::error::{Result, TrackError};
use crate::types::{Keyframe, TrajectorySample};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Receiver of frame-indexed transform records
pub trait KeyframeSink {
    /// Drop existing keyframes before a new run is written
    fn clear(&mut self) -> Result<()>;

    /// Insert one keyframe; called in frame order
    fn insert_keyframe(&mut self, keyframe: &Keyframe) -> Result<()>;

    /// Flush buffered output once every keyframe was inserted
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl KeyframeSink for Vec<Keyframe> {
    fn clear(&mut self) -> Result<()> {
        Vec::clear(self);
        Ok(())
    }

    fn insert_keyframe(&mut self, keyframe: &Keyframe) -> Result<()> {
        self.push(*keyframe);
        Ok(())
    }
}

/// Column names of keyframe CSV files
pub const CSV_HEADER: [&str; 7] = [
    "frame",
    "x",
    "y",
    "z",
    "heading_rad",
    "roll_rad",
    "pitch_rad",
];

/// Streams keyframes as CSV rows
#[cfg(feature = "csv")]
pub struct CsvKeyframeSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
    rows: usize,
}

#[cfg(feature = "csv")]
impl<W: Write> CsvKeyframeSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_written: false,
            rows: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            self.writer.write_record(CSV_HEADER)?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Recover the underlying writer after [`KeyframeSink::finish`]
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| TrackError::Export(format!("CSV flush failed: {}", e.error())))
    }
}

#[cfg(feature = "csv")]
impl<W: Write> KeyframeSink for CsvKeyframeSink<W> {
    fn clear(&mut self) -> Result<()> {
        if self.rows > 0 {
            return Err(TrackError::Export(
                "cannot clear a CSV sink after rows were written".to_string(),
            ));
        }
        Ok(())
    }

    fn insert_keyframe(&mut self, keyframe: &Keyframe) -> Result<()> {
        self.write_header()?;
        self.writer.write_record(&[
            keyframe.frame_index.to_string(),
            format!("{:.6}", keyframe.position.x),
            format!("{:.6}", keyframe.position.y),
            format!("{:.6}", keyframe.position.z),
            format!("{:.6}", keyframe.rotation.heading_rad),
            format!("{:.6}", keyframe.rotation.roll_rad),
            format!("{:.6}", keyframe.rotation.pitch_rad),
        ])?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects keyframes and writes them as one JSON array on finish
///
/// Non-finite values serialize as `null`.
#[cfg(feature = "json")]
pub struct JsonKeyframeSink<W: Write> {
    writer: W,
    keyframes: Vec<Keyframe>,
    pretty: bool,
}

#[cfg(feature = "json")]
impl<W: Write> JsonKeyframeSink<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            keyframes: Vec::new(),
            pretty,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(feature = "json")]
impl<W: Write> KeyframeSink for JsonKeyframeSink<W> {
    fn clear(&mut self) -> Result<()> {
        self.keyframes.clear();
        Ok(())
    }

    fn insert_keyframe(&mut self, keyframe: &Keyframe) -> Result<()> {
        self.keyframes.push(*keyframe);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.keyframes)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.keyframes)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub json: bool,
    pub gpx: bool,
    pub output_dir: Option<String>,
    pub force_export: bool,
}

impl ExportOptions {
    pub fn any_selected(&self) -> bool {
        self.csv || self.json || self.gpx
    }
}

/// Output file locations derived from an input log path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub csv: PathBuf,
    pub json: PathBuf,
    pub gpx: PathBuf,
}

/// Files actually written by an export run
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub csv_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
    pub gpx_path: Option<PathBuf>,
}

/// Compute export paths for an input log
///
/// Files land in `output_dir` when set, otherwise next to the input.
pub fn compute_export_paths(input_path: &Path, export_options: &ExportOptions) -> ExportPaths {
    let base_name = input_path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let output_dir = match export_options.output_dir.as_deref() {
        Some(dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    ExportPaths {
        csv: output_dir.join(format!("{base_name}.keyframes.csv")),
        json: output_dir.join(format!("{base_name}.keyframes.json")),
        gpx: output_dir.join(format!("{base_name}.gps.gpx")),
    }
}

fn create_output_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrackError::Export(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }
    }
    let file = File::create(path)
        .map_err(|e| TrackError::Export(format!("Failed to create {:?}: {}", path, e)))?;
    Ok(BufWriter::new(file))
}

fn write_keyframes<S: KeyframeSink>(sink: &mut S, keyframes: &[Keyframe]) -> Result<()> {
    sink.clear()?;
    for keyframe in keyframes {
        sink.insert_keyframe(keyframe)?;
    }
    sink.finish()
}

/// Export keyframes to `<stem>.keyframes.csv`
#[cfg(feature = "csv")]
pub fn export_to_csv(
    keyframes: &[Keyframe],
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<PathBuf> {
    let path = compute_export_paths(input_path, export_options).csv;
    let mut sink = CsvKeyframeSink::new(create_output_file(&path)?);
    write_keyframes(&mut sink, keyframes)?;
    Ok(path)
}

/// Export keyframes to `<stem>.keyframes.json`
#[cfg(feature = "json")]
pub fn export_to_json(
    keyframes: &[Keyframe],
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<PathBuf> {
    let path = compute_export_paths(input_path, export_options).json;
    let mut sink = JsonKeyframeSink::new(create_output_file(&path)?, true);
    write_keyframes(&mut sink, keyframes)?;
    Ok(path)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Export geographic samples to `<stem>.gps.gpx`
///
/// Timestamp tokens are not validated clock times, so they go into each
/// point's `<name>` rather than `<time>`. Returns `None` without writing a
/// file when there are no samples.
pub fn export_to_gpx(
    input_path: &Path,
    samples: &[TrajectorySample],
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if samples.is_empty() {
        return Ok(None);
    }

    let path = compute_export_paths(input_path, export_options).gpx;
    let mut gpx_file = create_output_file(&path)?;

    writeln!(gpx_file, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        gpx_file,
        r#"<gpx creator="nmea_track" version="1.1" xmlns="http://www.topografix.com/GPX/1/1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#
    )?;
    writeln!(gpx_file, "<metadata><name>NMEA vehicle track</name></metadata>")?;
    writeln!(gpx_file, "<trk><name>NMEA vehicle track</name><trkseg>")?;

    for sample in samples {
        writeln!(
            gpx_file,
            r#"  <trkpt lat="{:.7}" lon="{:.7}"><name>{}</name><extensions><heading>{:.2}</heading></extensions></trkpt>"#,
            sample.latitude_deg,
            sample.longitude_deg,
            escape_xml(&sample.timestamp),
            sample.heading_deg
        )?;
    }

    writeln!(gpx_file, "</trkseg></trk>")?;
    writeln!(gpx_file, "</gpx>")?;
    gpx_file.flush()?;

    Ok(Some(path))
}
