//! Keyframe CSV Export Example
//!
//! Parses an NMEA log, projects every complete sample around the given origin
//! and writes `<stem>.keyframes.csv` next to the log (or into `output_dir`).
//!
//! Pass `prdid` as the fifth argument to take roll, pitch and heading from
//! `$PRDID` sentences instead of `$HEHDT`.

use nmea_track::{
    build_keyframes, export_to_csv, parse_nmea_file, should_skip_export, ExportOptions,
    OrientationSource, ProjectionOrigin, TrackOptions,
};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: track_export <input.nmea> <origin_lat> <origin_lon> [output_dir] [hdt|prdid]");
        println!("Example: track_export drive.nmea 48.1173 11.5167 ./output");
        std::process::exit(1);
    }

    let input_file = &args[1];
    let origin = ProjectionOrigin::new(args[2].parse()?, args[3].parse()?);
    let output_dir = args.get(4).cloned();
    let orientation_source: OrientationSource = match args.get(5) {
        Some(source) => source.parse()?,
        None => OrientationSource::default(),
    };

    let options = TrackOptions {
        orientation_source,
        drop_non_finite: true,
        ..TrackOptions::default().with_origin(origin)
    };
    let export_opts = ExportOptions {
        csv: true,
        output_dir,
        ..ExportOptions::default()
    };

    println!("Parsing: {}", input_file);
    let trajectory = parse_nmea_file(Path::new(input_file), &options, false)?;

    println!("\nTrajectory Information:");
    println!("  Lines: {}", trajectory.stats.total_lines);
    println!("  Samples: {}", trajectory.len());
    if let Some((first, last)) = trajectory.time_span() {
        println!("  Time span: {} .. {}", first, last);
    }
    println!("  Attitude data: {}", trajectory.has_attitude_data());

    let (skip, reason) = should_skip_export(&trajectory, export_opts.force_export);
    if skip {
        println!("\nNothing to export: {}", reason);
        return Ok(());
    }

    let keyframes = build_keyframes(&trajectory.samples, &options)?;
    println!("\nExporting {} keyframes to CSV...", keyframes.len());
    let csv_path = export_to_csv(&keyframes, Path::new(input_file), &export_opts)?;
    println!("✓ CSV export complete: {}", csv_path.display());

    Ok(())
}
