/// Raster image to point cloud converter entry point
mod converter;

use converter::{ConvertOptions, RasterConverter};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <input-image> [output.ply] [--step N] [--size X] [--z X] \
             [--alpha N] [--mode NAME] [--brightness X] [--tint R,G,B]",
            args[0]
        );
        std::process::exit(1);
    }

    let options = ConvertOptions::parse(&args[1..])?;
    let converter = RasterConverter::new(options);
    converter.convert()?;

    Ok(())
}
