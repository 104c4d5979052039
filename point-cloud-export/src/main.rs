/// Synthetic point cloud export entry point
mod bounds;
mod constants;
mod encoder;
mod error;
mod exporter;
mod generator;
mod index;
mod octree;
mod point;
mod sphere;

use constants::{DEFAULT_POINT_COUNT, OUTPUT_FILENAME};
use exporter::CloudExporter;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 4 {
        eprintln!("Usage: {} [output.las] [points] [seed]", args[0]);
        std::process::exit(1);
    }

    let output_path = args.get(1).map_or(OUTPUT_FILENAME, String::as_str);
    let point_count = match args.get(2) {
        Some(raw) => raw.parse()?,
        None => DEFAULT_POINT_COUNT,
    };
    let seed = match args.get(3) {
        Some(raw) => Some(raw.parse()?),
        None => None,
    };

    let exporter = CloudExporter::new(output_path, point_count, seed);
    exporter.export()?;

    Ok(())
}
