//! Basic example converting GPS waypoints to local meters.
//!
//! Run with: RUST_LOG=gpsned=debug cargo run --example basic

use gpsned::{
    to_local_meters, CoordinateInput, GpsnedError, WaypointConverterBuilder, WaypointInput,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), GpsnedError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gpsned=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Single waypoint, origin in decimal and target in DMS
    let waypoint = to_local_meters(
        &CoordinateInput::Decimal(40.25787274333326),
        &CoordinateInput::Decimal(-111.65480308234692),
        -20.0,
        &CoordinateInput::dms("N40-15-25.38"),
        &CoordinateInput::dms("W111-39-15.19"),
        -20.0,
        0,
    )?;

    println!("Waypoint (meters):");
    println!("{:-<50}", "");
    println!("  North:    {:.2}", waypoint.north);
    println!("  East:     {:.2}", waypoint.east);
    println!("  Altitude: {:.2}", waypoint.altitude);
    println!("  Distance: {:.2}", waypoint.distance);

    // A short route, configured from GPSNED_* environment variables
    let converter = WaypointConverterBuilder::from_env()?.build();
    let origin = WaypointInput::new(40.2578, -111.6548, 0.0);
    let route = [
        WaypointInput::new(CoordinateInput::dms("N40-15-30"), -111.6540, 10.0),
        WaypointInput::new(40.2590, CoordinateInput::dms("W111-39-10"), 20.0),
        WaypointInput::new(40.2578, -111.6548, 0.0),
    ];

    println!("\nRoute ({:?} altitudes):", converter.altitude_unit());
    for (i, leg) in converter.convert_batch(&origin, &route)?.iter().enumerate() {
        println!("  {}: {}", i + 1, leg);
    }

    Ok(())
}
