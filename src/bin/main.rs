//! CLI binary for NMEA Track
//!
//! This provides the command-line interface for the nmea_track library.

use anyhow::{anyhow, Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use glob::glob;
use nmea_track::{
    build_keyframes, export_to_gpx, parse_nmea_file, should_skip_export, CompletenessPolicy,
    CoordinatePacking, ExportOptions, OrientationSource, ProjectionOrigin, TrackOptions,
};
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["nmea", "txt", "log", "gps"];

fn build_command() -> Command {
    Command::new("NMEA Track")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract vehicle trajectories from NMEA logs and write scene keyframes.")
        .arg(
            Arg::new("files")
                .help("NMEA log files to convert (.nmea, .txt, .log, .gps extensions, case-insensitive, supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("origin-lat")
                .long("origin-lat")
                .help("Reference latitude of the scene origin in decimal degrees")
                .value_name("DEG")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .requires("origin-lon"),
        )
        .arg(
            Arg::new("origin-lon")
                .long("origin-lon")
                .help("Reference longitude of the scene origin in decimal degrees")
                .value_name("DEG")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .requires("origin-lat"),
        )
        .arg(
            Arg::new("scene")
                .long("scene")
                .help("JSON scene configuration with \"lat\" and \"lon\" keys (overrides --origin-*)")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .help("Orientation sentence family: hdt ($HEHDT heading) or prdid ($PRDID roll/pitch/heading)")
                .value_parser(["hdt", "prdid"])
                .default_value("hdt"),
        )
        .arg(
            Arg::new("packing")
                .long("packing")
                .help("Packed coordinate decoding: degrees-minutes (NMEA) or hundredths (legacy)")
                .value_parser(["degrees-minutes", "hundredths"])
                .default_value("degrees-minutes"),
        )
        .arg(
            Arg::new("truthy-completeness")
                .long("truthy-completeness")
                .help("Treat zero-valued fields as missing, matching legacy outputs")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ignore-hemisphere")
                .long("ignore-hemisphere")
                .help("Do not negate southern latitudes and western longitudes")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(offset_arg("height-offset", "Height of the object above the plane in meters"))
        .arg(offset_arg("roll-offset", "Roll correction subtracted before output, in degrees"))
        .arg(offset_arg("pitch-offset", "Pitch correction subtracted before output, in degrees"))
        .arg(offset_arg("heading-offset", "Heading correction subtracted before output, in degrees"))
        .arg(
            Arg::new("frame-stride")
                .long("frame-stride")
                .help("Frames between consecutive samples")
                .value_name("N")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("2"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export keyframes to CSV files (.keyframes.csv)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export keyframes to JSON files (.keyframes.json)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gpx")
                .long("gpx")
                .help("Export geographic samples to GPX XML files (.gps.gpx)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("keep-non-finite")
                .long("keep-non-finite")
                .help("Keep keyframes made non-finite by the projection singularity")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Export even when a log produced no complete samples")
                .action(clap::ArgAction::SetTrue),
        )
}

fn offset_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_name("VALUE")
        .allow_negative_numbers(true)
        .value_parser(value_parser!(f64))
        .default_value("0")
}

fn resolve_origin(matches: &ArgMatches) -> Result<ProjectionOrigin> {
    if let Some(scene_path) = matches.get_one::<String>("scene") {
        return load_scene_origin(Path::new(scene_path));
    }

    match (
        matches.get_one::<f64>("origin-lat"),
        matches.get_one::<f64>("origin-lon"),
    ) {
        (Some(&lat), Some(&lon)) => Ok(ProjectionOrigin::new(lat, lon)),
        _ => Err(anyhow!(
            "no projection origin supplied (use --origin-lat/--origin-lon or --scene)"
        )),
    }
}

#[cfg(feature = "json")]
fn load_scene_origin(path: &Path) -> Result<ProjectionOrigin> {
    let scene = nmea_track::SceneConfig::from_json_file(path)?;
    Ok(scene.origin())
}

#[cfg(not(feature = "json"))]
fn load_scene_origin(path: &Path) -> Result<ProjectionOrigin> {
    Err(anyhow!(
        "--scene {:?} requires the `json` feature",
        path
    ))
}

fn build_track_options(matches: &ArgMatches) -> Result<TrackOptions> {
    let origin = resolve_origin(matches)?;

    let orientation_source = matches
        .get_one::<String>("source")
        .map(|s| s.parse::<OrientationSource>())
        .transpose()?
        .unwrap_or_default();

    let packing = match matches.get_one::<String>("packing").map(String::as_str) {
        Some("hundredths") => CoordinatePacking::Hundredths,
        _ => CoordinatePacking::DegreesMinutes,
    };

    let completeness = if matches.get_flag("truthy-completeness") {
        CompletenessPolicy::Truthy
    } else {
        CompletenessPolicy::Explicit
    };

    let offset = |name: &str| matches.get_one::<f64>(name).copied().unwrap_or(0.0);

    let options = TrackOptions {
        origin: Some(origin),
        orientation_source,
        packing,
        completeness,
        apply_hemisphere: !matches.get_flag("ignore-hemisphere"),
        height_offset_m: offset("height-offset"),
        roll_offset_deg: offset("roll-offset"),
        pitch_offset_deg: offset("pitch-offset"),
        heading_offset_deg: offset("heading-offset"),
        frame_stride: matches.get_one::<u64>("frame-stride").copied().unwrap_or(2),
        drop_non_finite: !matches.get_flag("keep-non-finite"),
    };
    options.validate()?;

    Ok(options)
}

/// Expand patterns and keep existing files with a supported extension
fn collect_input_paths(file_patterns: &[&String], debug: bool) -> Vec<PathBuf> {
    let mut valid_paths = Vec::new();

    for pattern in file_patterns {
        if debug {
            println!("Processing pattern: {pattern}");
        }

        let paths: Vec<PathBuf> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                    Ok(paths) => {
                        if debug {
                            println!("Glob pattern '{pattern}' matched {} files", paths.len());
                        }
                        paths
                    }
                    Err(e) => {
                        eprintln!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![PathBuf::from(pattern.as_str())]
        };

        for path in paths {
            if !path.exists() {
                eprintln!("Warning: File does not exist: {path:?}");
                continue;
            }

            let valid_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);

            if !valid_extension {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                continue;
            }

            if debug {
                println!("Added valid file: {path:?}");
            }
            valid_paths.push(path);
        }
    }

    valid_paths
}

fn process_file(
    path: &Path,
    options: &TrackOptions,
    export_options: &ExportOptions,
    debug: bool,
) -> Result<()> {
    let trajectory = parse_nmea_file(path, options, debug)
        .with_context(|| format!("Failed to parse {:?}", path))?;

    println!(
        "  {} samples from {} lines ({} malformed)",
        trajectory.len(),
        trajectory.stats.total_lines,
        trajectory.stats.malformed_lines
    );

    let (skip, reason) = should_skip_export(&trajectory, export_options.force_export);
    if skip {
        println!("  Skipping export: {reason}");
        return Ok(());
    }

    let keyframes = build_keyframes(&trajectory.samples, options)?;
    let dropped = trajectory.len() - keyframes.len();
    if dropped > 0 {
        eprintln!("  Warning: dropped {dropped} non-finite keyframes (use --keep-non-finite to keep them)");
    }

    #[cfg(feature = "csv")]
    {
        if export_options.csv {
            let csv_path = nmea_track::export_to_csv(&keyframes, path, export_options)?;
            println!("  Exported keyframes to: {}", csv_path.display());
        }
    }

    #[cfg(feature = "json")]
    {
        if export_options.json {
            let json_path = nmea_track::export_to_json(&keyframes, path, export_options)?;
            println!("  Exported keyframes to: {}", json_path.display());
        }
    }

    if export_options.gpx {
        if let Some(gpx_path) = export_to_gpx(path, &trajectory.samples, export_options)? {
            println!("  Exported GPS track to: {}", gpx_path.display());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        json: matches.get_flag("json"),
        gpx: matches.get_flag("gpx"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
        force_export: matches.get_flag("force"),
    };

    if !export_options.any_selected() {
        eprintln!("Error: no output selected. Use --csv, --json and/or --gpx.");
        std::process::exit(1);
    }

    #[cfg(not(feature = "csv"))]
    {
        if export_options.csv {
            eprintln!("Error: --csv requires the `csv` feature");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "json"))]
    {
        if export_options.json {
            eprintln!("Error: --json requires the `json` feature");
            std::process::exit(1);
        }
    }

    let options = match build_track_options(&matches) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if debug {
        println!(
            "nmea_track {} (git {}, {})",
            env!("CARGO_PKG_VERSION"),
            option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
            option_env!("VERGEN_GIT_COMMIT_DATE").unwrap_or("unknown date")
        );
        println!("Track options: {options:?}");
    }

    let file_patterns: Vec<&String> = matches
        .get_many::<String>("files")
        .map(|values| values.collect())
        .unwrap_or_default();
    let valid_paths = collect_input_paths(&file_patterns, debug);

    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extensions: .nmea, .txt, .log, .gps (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut processed_files = 0;
    for (index, path) in valid_paths.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        match process_file(path, &options, &export_options, debug) {
            Ok(()) => processed_files += 1,
            Err(e) => {
                eprintln!("Error processing {filename}: {e:#}");
                eprintln!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}
