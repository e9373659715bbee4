//! Integration tests for export functionality
//!
//! Tests the export layer across different scenarios:
//! - Keyframe CSV/JSON export with directory creation
//! - GPX export of geographic samples
//! - Output directory defaulting to input parent
//! - Full log-to-file conversion through a sink

use nmea_track::export::*;
use nmea_track::{
    build_keyframes, convert_nmea_file, parse_nmea_file, Keyframe, Position, ProjectionOrigin,
    Rotation, TrackOptions, TrajectorySample,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DRIVE_LOG: &str = "\
$GNGGA,120000.00,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47
$HEHDT,90.00,T*2E
$GNGGA,120001.00,4807.040,N,01131.002,E,1,08,0.9,545.4,M,46.9,M,,*41
$HEHDT,91.50,T*1A
$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48
$GNGGA,120002.00,4807.042,N,01131.004,E,1,08,0.9,545.4,M,46.9,M,,*43
$HEHDT,93.00,T*1C
";

fn options() -> TrackOptions {
    TrackOptions::default().with_origin(ProjectionOrigin::new(48.1173, 11.0 + 31.0 / 60.0))
}

fn write_log(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, DRIVE_LOG).expect("Failed to write test log");
    path
}

fn sample(timestamp: &str, lat: f64, lon: f64) -> TrajectorySample {
    TrajectorySample {
        timestamp: timestamp.to_string(),
        latitude_deg: lat,
        longitude_deg: lon,
        heading_deg: 90.0,
        roll_deg: None,
        pitch_deg: None,
    }
}

#[test]
fn test_compute_export_paths_defaults_to_input_parent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("drive.nmea");

    let paths = compute_export_paths(&input, &ExportOptions::default());
    assert_eq!(paths.csv, temp_dir.path().join("drive.keyframes.csv"));
    assert_eq!(paths.json, temp_dir.path().join("drive.keyframes.json"));
    assert_eq!(paths.gpx, temp_dir.path().join("drive.gps.gpx"));
}

#[test]
fn test_compute_export_paths_bare_filename_uses_current_dir() {
    let paths = compute_export_paths(Path::new("drive.nmea"), &ExportOptions::default());
    assert_eq!(paths.csv, Path::new(".").join("drive.keyframes.csv"));
}

#[test]
fn test_compute_export_paths_with_output_dir() {
    let export_opts = ExportOptions {
        output_dir: Some("/tmp/keyframes".to_string()),
        ..ExportOptions::default()
    };
    let paths = compute_export_paths(Path::new("/data/logs/drive.nmea"), &export_opts);
    assert_eq!(paths.gpx, Path::new("/tmp/keyframes/drive.gps.gpx"));
}

#[test]
fn test_export_options_default_selects_nothing() {
    let export_opts = ExportOptions::default();
    assert!(!export_opts.any_selected());
    assert!(!export_opts.force_export);
    assert!(export_opts.output_dir.is_none());
}

#[cfg(feature = "csv")]
#[test]
fn test_export_csv_creates_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nested_dir = temp_dir.path().join("nonexistent").join("output");
    let log_path = write_log(&temp_dir, "drive.nmea");

    let trajectory = parse_nmea_file(&log_path, &options(), false).expect("parse failed");
    assert_eq!(trajectory.len(), 3);
    let keyframes = build_keyframes(&trajectory.samples, &options()).expect("build failed");

    let export_opts = ExportOptions {
        csv: true,
        output_dir: Some(nested_dir.to_str().unwrap().to_string()),
        ..ExportOptions::default()
    };
    let csv_path = export_to_csv(&keyframes, &log_path, &export_opts).expect("CSV export failed");

    assert!(nested_dir.exists(), "Output directory should be created");
    assert_eq!(csv_path, nested_dir.join("drive.keyframes.csv"));

    let content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], CSV_HEADER.join(","));
    assert_eq!(lines.len(), 4);

    let frames: Vec<&str> = lines[1..]
        .iter()
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(frames, vec!["0", "2", "4"]);
}

#[cfg(feature = "json")]
#[test]
fn test_export_json_keyframes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = write_log(&temp_dir, "drive.nmea");

    let trajectory = parse_nmea_file(&log_path, &options(), false).expect("parse failed");
    let keyframes = build_keyframes(&trajectory.samples, &options()).expect("build failed");

    let export_opts = ExportOptions {
        json: true,
        ..ExportOptions::default()
    };
    let json_path =
        export_to_json(&keyframes, &log_path, &export_opts).expect("JSON export failed");
    assert_eq!(json_path, temp_dir.path().join("drive.keyframes.json"));

    let content = fs::read_to_string(&json_path).expect("Failed to read JSON");
    let value: serde_json::Value = serde_json::from_str(&content).expect("invalid JSON");
    let array = value.as_array().expect("top level should be an array");
    assert_eq!(array.len(), 3);
    assert_eq!(array[2]["frame_index"], 4);
    assert!(array[0]["position"]["x"].is_number());
}

#[test]
fn test_export_gpx_writes_track_points() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nested_dir = temp_dir.path().join("gpx");
    let input = temp_dir.path().join("drive.nmea");

    let export_opts = ExportOptions {
        gpx: true,
        output_dir: Some(nested_dir.to_str().unwrap().to_string()),
        ..ExportOptions::default()
    };
    let samples = vec![
        sample("120000.00", 48.1173, 11.5167),
        sample("120001.00", -33.85, -70.5),
    ];

    let gpx_path = export_to_gpx(&input, &samples, &export_opts)
        .expect("GPX export failed")
        .expect("GPX file should be written");
    assert_eq!(gpx_path, nested_dir.join("drive.gps.gpx"));

    let content = fs::read_to_string(&gpx_path).expect("Failed to read GPX");
    assert!(content.starts_with("<?xml"));
    assert!(content.contains(r#"lat="48.1173000" lon="11.5167000""#));
    assert!(content.contains(r#"lat="-33.8500000" lon="-70.5000000""#));
    assert!(content.contains("<name>120001.00</name>"));
    assert!(content.trim_end().ends_with("</gpx>"));
}

#[test]
fn test_export_gpx_empty_samples_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("empty.nmea");
    let export_opts = ExportOptions {
        gpx: true,
        ..ExportOptions::default()
    };

    let result = export_to_gpx(&input, &[], &export_opts).expect("GPX export failed");
    assert!(result.is_none());
    assert!(!temp_dir.path().join("empty.gps.gpx").exists());
}

#[test]
fn test_convert_file_into_vec_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = write_log(&temp_dir, "drive.nmea");

    let stale = Keyframe {
        frame_index: 99,
        position: Position::default(),
        rotation: Rotation::default(),
    };
    let mut sink: Vec<Keyframe> = vec![stale];
    let report = convert_nmea_file(&log_path, &options(), &mut sink, false)
        .expect("conversion failed");

    // The sink is cleared before the first insert
    assert_eq!(sink.len(), 3);
    assert_eq!(report.keyframes_written, 3);
    assert_eq!(report.stats.total_lines, 7);
    assert_eq!(report.stats.ignored_lines, 1);

    // The first fix sits on the origin
    assert!(sink[0].position.x.abs() < 1e-3);
    assert!(sink[0].position.y.abs() < 1e-3);
    // Later fixes move north and east
    assert!(sink[2].position.x > 0.0);
    assert!(sink[2].position.y > 0.0);
}

#[test]
fn test_convert_missing_file_reports_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut sink: Vec<Keyframe> = Vec::new();
    let err = convert_nmea_file(
        &temp_dir.path().join("missing.nmea"),
        &options(),
        &mut sink,
        false,
    )
    .unwrap_err();
    assert!(!err.is_config());
    assert!(sink.is_empty());
}
