//! Projection Example
//!
//! Projects a few points around an origin with the spherical Transverse
//! Mercator projection and maps them back, printing the round-trip error.

use nmea_track::{ProjectionOrigin, TransverseMercator};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let (lat, lon) = match (args.get(1), args.get(2)) {
        (Some(lat), Some(lon)) => (lat.parse::<f64>()?, lon.parse::<f64>()?),
        _ => {
            println!("Usage: projection_roundtrip <origin_lat> <origin_lon>");
            println!("Using default origin 48.1173, 11.5167\n");
            (48.1173, 11.5167)
        }
    };

    let projection = TransverseMercator::new(ProjectionOrigin::new(lat, lon))?;

    let offsets = [(0.0, 0.0), (0.001, 0.0), (0.0, 0.001), (0.01, -0.02), (-0.5, 1.5)];
    println!("{:>12} {:>12} {:>14} {:>14} {:>10}", "lat", "lon", "x (m)", "y (m)", "error (m)");
    for (dlat, dlon) in offsets {
        let (point_lat, point_lon) = (lat + dlat, lon + dlon);
        let position = projection.forward(point_lat, point_lon);
        let back = projection.inverse(position.x, position.y);
        let round_trip = projection.forward_point(back);
        let error = ((round_trip.x - position.x).powi(2) + (round_trip.y - position.y).powi(2)).sqrt();
        println!(
            "{:>12.6} {:>12.6} {:>14.3} {:>14.3} {:>10.2e}",
            point_lat, point_lon, position.x, position.y, error
        );
    }

    Ok(())
}
