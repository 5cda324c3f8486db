/// Image decoding, downsampling, and pipeline orchestration
use constants::MAX_RASTER_EDGE;
use image::GenericImageView;
use image::imageops::FilterType;
use indicatif::ProgressBar;
use pixel_cloud_core::{ColorMode, PointCloud, Raster, SamplingConfig, ply, sample};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Parsed command line: input/output paths plus the sampling parameters
#[derive(Debug)]
pub struct ConvertOptions {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub config: SamplingConfig,
}

impl ConvertOptions {
    /// Parse positional paths and `--flag value` pairs into options.
    /// The sampling config is validated before any file is touched.
    pub fn parse(args: &[String]) -> Result<Self, Box<dyn std::error::Error>> {
        let Some(input) = args.first() else {
            return Err("missing input image path".into());
        };
        let input_path = PathBuf::from(input);
        let mut output_path: Option<PathBuf> = None;
        let mut config = SamplingConfig::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--step" => {
                    config.step = parse_value(args, i, "--step")?;
                    i += 2;
                }
                "--size" => {
                    config.particle_size = parse_value(args, i, "--size")?;
                    i += 2;
                }
                "--z" => {
                    config.z_extrusion = parse_value(args, i, "--z")?;
                    i += 2;
                }
                "--alpha" => {
                    config.alpha_threshold = parse_value(args, i, "--alpha")?;
                    i += 2;
                }
                "--brightness" => {
                    config.brightness = parse_value(args, i, "--brightness")?;
                    i += 2;
                }
                "--mode" => {
                    let name: String = parse_value(args, i, "--mode")?;
                    config.color_mode = name.parse().map_err(|_| {
                        format!(
                            "unknown colour mode '{}' (expected one of: {})",
                            name,
                            ColorMode::ALL.map(|m| m.name()).join(", ")
                        )
                    })?;
                    i += 2;
                }
                "--tint" => {
                    let triple: String = parse_value(args, i, "--tint")?;
                    config.tint = parse_tint(&triple)?;
                    i += 2;
                }
                other if other.starts_with("--") => {
                    return Err(format!("unknown option '{}'", other).into());
                }
                other => {
                    output_path = Some(PathBuf::from(other));
                    i += 1;
                }
            }
        }

        config.validate()?;

        let output_path =
            output_path.unwrap_or_else(|| input_path.with_extension("ply"));

        Ok(Self {
            input_path,
            output_path,
            config,
        })
    }
}

fn parse_value<T: std::str::FromStr>(
    args: &[String],
    i: usize,
    flag: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    args.get(i + 1)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| format!("{} expects a value", flag).into())
}

/// Parse an "R,G,B" float triple
fn parse_tint(triple: &str) -> Result<[f32; 3], Box<dyn std::error::Error>> {
    let channels: Vec<f32> = triple
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|_| format!("--tint expects R,G,B floats, got '{}'", triple))?;
    if channels.len() != 3 {
        return Err(format!("--tint expects exactly three channels, got '{}'", triple).into());
    }
    Ok([channels[0], channels[1], channels[2]])
}

/// Orchestrates one image-to-cloud conversion: decode, downsample, sample,
/// export PLY, and write the metadata sidecar.
pub struct RasterConverter {
    options: ConvertOptions,
}

impl RasterConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Execute the full conversion pipeline
    pub fn convert(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!(
            "Converting {} to point cloud...",
            self.options.input_path.display()
        );

        let (raster, downsampled) = self.load_raster(&self.options.input_path)?;
        println!(
            "  Raster: {}x{} ({} pixels scanned at stride {})",
            raster.width(),
            raster.height(),
            raster.width() as u64 * raster.height() as u64,
            self.options.config.effective_step()
        );

        let spinner = ProgressBar::new_spinner();
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Sampling raster");
        let cloud = sample(&raster, &self.options.config);
        spinner.finish_with_message(format!("Sampled {} points", cloud.len()));

        self.print_cloud_stats(&raster, &cloud);

        let ply_file = File::create(&self.options.output_path)?;
        let mut writer = BufWriter::new(ply_file);
        ply::write_ply(&mut writer, &cloud)?;
        println!(
            "Saved {} ({} vertices, ASCII PLY)",
            self.options.output_path.display(),
            cloud.len()
        );

        self.save_metadata(&raster, &cloud, downsampled)?;

        println!("Conversion complete!");
        Ok(())
    }

    /// Decode the input image and downsample oversized rasters so the
    /// sampler always sees a bounded input
    fn load_raster(&self, path: &Path) -> Result<(Raster, bool), Box<dyn std::error::Error>> {
        let img = image::open(path)?;
        let (width, height) = img.dimensions();

        let (img, downsampled) = match capped_dimensions(width, height, MAX_RASTER_EDGE) {
            Some((new_width, new_height)) => {
                println!(
                    "  Downsampling {}x{} -> {}x{} (max edge {})",
                    width, height, new_width, new_height, MAX_RASTER_EDGE
                );
                (
                    img.resize_exact(new_width, new_height, FilterType::Lanczos3),
                    true,
                )
            }
            None => (img, false),
        };

        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();
        Ok((Raster::from_rgba(width, height, rgba.into_raw()), downsampled))
    }

    /// Print point counts and scene-space bounds for verification
    fn print_cloud_stats(&self, raster: &Raster, cloud: &PointCloud) {
        let step = self.options.config.effective_step() as u64;
        let scanned = raster.width().div_ceil(self.options.config.effective_step()) as u64
            * raster.height().div_ceil(self.options.config.effective_step()) as u64;
        let kept = if scanned > 0 {
            cloud.len() as f64 / scanned as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "  Points: {} of {} scanned positions kept ({:.1}%, stride {})",
            cloud.len(),
            scanned,
            kept,
            step
        );

        if !cloud.is_empty() {
            let bounds = cloud.bounds();
            println!("Scene bounds:");
            println!("  X: {:.3} to {:.3}", bounds.min_x, bounds.max_x);
            println!("  Y: {:.3} to {:.3}", bounds.min_y, bounds.max_y);
            println!("  Z: {:.3} to {:.3} (depth)", bounds.min_z, bounds.max_z);
        }
    }

    /// Save conversion metadata as a JSON sidecar next to the PLY output
    fn save_metadata(
        &self,
        raster: &Raster,
        cloud: &PointCloud,
        downsampled: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let bounds = if cloud.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::to_value(cloud.bounds())?
        };

        let metadata = serde_json::json!({
            "source": self.options.input_path.display().to_string(),
            "raster": {
                "width": raster.width(),
                "height": raster.height(),
                "downsampled": downsampled,
            },
            "points": cloud.len(),
            "config": serde_json::to_value(&self.options.config)?,
            "bounds": bounds,
        });

        let metadata_path = self.metadata_path();
        std::fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)?;
        println!("Saved {}", metadata_path.display());

        Ok(())
    }

    fn metadata_path(&self) -> PathBuf {
        let stem = self
            .options
            .output_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.options
            .output_path
            .with_file_name(format!("{}_metadata.json", stem))
    }
}

/// Dimensions capped to the maximum edge, aspect preserved.
/// Returns None when the raster is already small enough.
fn capped_dimensions(width: u32, height: u32, max_edge: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max_edge || longest == 0 {
        return None;
    }

    let scale = max_edge as f64 / longest as f64;
    let new_width = ((width as f64 * scale).round() as u32).max(1);
    let new_height = ((height as f64 * scale).round() as u32).max(1);
    Some((new_width, new_height))
}
