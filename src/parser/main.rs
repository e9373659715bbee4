use crate::config::TrackOptions;
use crate::error::TrackError;
use crate::parser::aggregator::SampleAggregator;
use crate::types::Trajectory;
use crate::Result;
use std::io::BufRead;
use std::path::Path;

/// Parse an NMEA log file into a trajectory
pub fn parse_nmea_file(file_path: &Path, options: &TrackOptions, debug: bool) -> Result<Trajectory> {
    if debug {
        println!("=== PARSING NMEA FILE ===");
        let metadata = std::fs::metadata(file_path)?;
        println!(
            "File size: {} bytes ({:.2} MB)",
            metadata.len(),
            metadata.len() as f64 / 1024.0 / 1024.0
        );
    }

    let file = std::fs::File::open(file_path).map_err(|e| {
        TrackError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open NMEA file {:?}: {}", file_path, e),
        ))
    })?;

    parse_nmea_reader(std::io::BufReader::new(file), options, debug)
}

/// Parse NMEA sentences from any buffered reader
///
/// Lines are split on `\n` and decoded lossily, so stray binary bytes only
/// spoil the line they appear on.
pub fn parse_nmea_reader<R: BufRead>(
    reader: R,
    options: &TrackOptions,
    debug: bool,
) -> Result<Trajectory> {
    let lines = reader
        .split(b'\n')
        .map(|chunk| chunk.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()));
    let trajectory = SampleAggregator::new(options, debug)?.try_process_lines(lines)?;

    if debug {
        print_stats(&trajectory);
    }

    Ok(trajectory)
}

/// Parse NMEA data from memory
pub fn parse_nmea_bytes(data: &[u8], options: &TrackOptions, debug: bool) -> Result<Trajectory> {
    if debug {
        println!("=== PARSING NMEA DATA ===");
        println!("Data size: {} bytes", data.len());
    }
    parse_nmea_reader(data, options, debug)
}

/// Parse NMEA text already held as a string
pub fn parse_nmea_str(text: &str, options: &TrackOptions, debug: bool) -> Result<Trajectory> {
    let trajectory = SampleAggregator::new(options, debug)?.process_lines(text.lines());
    if debug {
        print_stats(&trajectory);
    }
    Ok(trajectory)
}

fn print_stats(trajectory: &Trajectory) {
    let stats = &trajectory.stats;
    println!("Lines read: {}", stats.total_lines);
    println!("  Fix sentences: {}", stats.fix_sentences);
    println!("  Orientation sentences: {}", stats.orientation_sentences);
    println!("  Ignored lines: {}", stats.ignored_lines);
    println!("  Malformed lines: {}", stats.malformed_lines);
    println!("Samples emitted: {}", stats.samples_emitted);
}
