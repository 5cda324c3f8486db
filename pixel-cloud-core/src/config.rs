/// Sampling configuration, style presets, and validation
use constants::{
    DEFAULT_ALPHA_THRESHOLD, DEFAULT_BRIGHTNESS, DEFAULT_PARTICLE_SIZE, DEFAULT_STEP,
    DEFAULT_Z_EXTRUSION,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Error types for configuration validation and name parsing.
#[derive(Debug)]
pub enum ConfigError {
    NonFinite { field: &'static str },
    OutOfRange { field: &'static str },
    UnknownColorMode(String),
    UnknownShape(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonFinite { field } => {
                write!(f, "configuration field '{}' is not finite", field)
            }
            ConfigError::OutOfRange { field } => {
                write!(f, "configuration field '{}' is out of range", field)
            }
            ConfigError::UnknownColorMode(name) => write!(f, "unknown colour mode '{}'", name),
            ConfigError::UnknownShape(name) => write!(f, "unknown point shape '{}'", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Stylistic colour remapping presets.
/// Each is a fixed arithmetic recombination of the source channels and/or
/// luminance, not derived from a shared formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    Original,
    CoolBlack,
    Cyberpunk,
    Matrix,
    Golden,
    Ocean,
    Inferno,
    Vaporwave,
    Arctic,
    Mono,
    Sepia,
    Blueprint,
}

impl ColorMode {
    pub const ALL: [ColorMode; 12] = [
        ColorMode::Original,
        ColorMode::CoolBlack,
        ColorMode::Cyberpunk,
        ColorMode::Matrix,
        ColorMode::Golden,
        ColorMode::Ocean,
        ColorMode::Inferno,
        ColorMode::Vaporwave,
        ColorMode::Arctic,
        ColorMode::Mono,
        ColorMode::Sepia,
        ColorMode::Blueprint,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Original => "original",
            ColorMode::CoolBlack => "cool_black",
            ColorMode::Cyberpunk => "cyberpunk",
            ColorMode::Matrix => "matrix",
            ColorMode::Golden => "golden",
            ColorMode::Ocean => "ocean",
            ColorMode::Inferno => "inferno",
            ColorMode::Vaporwave => "vaporwave",
            ColorMode::Arctic => "arctic",
            ColorMode::Mono => "mono",
            ColorMode::Sepia => "sepia",
            ColorMode::Blueprint => "blueprint",
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "original" => Ok(ColorMode::Original),
            "cool_black" | "coolblack" => Ok(ColorMode::CoolBlack),
            "cyberpunk" => Ok(ColorMode::Cyberpunk),
            "matrix" => Ok(ColorMode::Matrix),
            "golden" => Ok(ColorMode::Golden),
            "ocean" => Ok(ColorMode::Ocean),
            "inferno" => Ok(ColorMode::Inferno),
            "vaporwave" => Ok(ColorMode::Vaporwave),
            "arctic" => Ok(ColorMode::Arctic),
            "mono" => Ok(ColorMode::Mono),
            "sepia" => Ok(ColorMode::Sepia),
            "blueprint" => Ok(ColorMode::Blueprint),
            other => Err(ConfigError::UnknownColorMode(other.to_string())),
        }
    }
}

/// Primitive instanced per point by the render adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointShape {
    Sphere,
    Cube,
    Octahedron,
}

impl FromStr for PointShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sphere" => Ok(PointShape::Sphere),
            "cube" => Ok(PointShape::Cube),
            "octahedron" => Ok(PointShape::Octahedron),
            other => Err(ConfigError::UnknownShape(other.to_string())),
        }
    }
}

/// Parameters for one sampler pass.
/// Any geometry- or colour-affecting change warrants a resample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Sampling stride in source pixels; clamped to a minimum of 1
    pub step: f32,
    /// Scales geometric spacing and rendered point size
    pub particle_size: f32,
    /// Maximum depth range mapped from pixel luminance
    pub z_extrusion: f32,
    /// Minimum alpha for a pixel to produce a point
    pub alpha_threshold: u8,
    pub color_mode: ColorMode,
    /// Multiplicative gain applied after the colour transform
    pub brightness: f32,
    /// Channel-wise multiplicative tint; identity at white
    pub tint: [f32; 3],
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            particle_size: DEFAULT_PARTICLE_SIZE,
            z_extrusion: DEFAULT_Z_EXTRUSION,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            color_mode: ColorMode::Original,
            brightness: DEFAULT_BRIGHTNESS,
            tint: [1.0, 1.0, 1.0],
        }
    }
}

impl SamplingConfig {
    /// Fail fast on non-finite or out-of-range numeric fields rather than
    /// letting NaN geometry propagate into the cloud
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_fields = [
            ("step", self.step),
            ("particle_size", self.particle_size),
            ("z_extrusion", self.z_extrusion),
            ("brightness", self.brightness),
            ("tint.r", self.tint[0]),
            ("tint.g", self.tint[1]),
            ("tint.b", self.tint[2]),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if self.particle_size <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "particle_size",
            });
        }
        if self.z_extrusion < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "z_extrusion",
            });
        }
        if self.brightness < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "brightness",
            });
        }
        for (field, channel) in [
            ("tint.r", self.tint[0]),
            ("tint.g", self.tint[1]),
            ("tint.b", self.tint[2]),
        ] {
            if !(0.0..=1.0).contains(&channel) {
                return Err(ConfigError::OutOfRange { field });
            }
        }

        Ok(())
    }

    /// Effective integer stride: floor(step) clamped to a minimum of 1
    pub fn effective_step(&self) -> u32 {
        self.step.floor().max(1.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SamplingConfig::default().validate().is_ok());
    }

    #[test]
    fn step_is_clamped_to_one() {
        let mut config = SamplingConfig::default();
        config.step = 0.2;
        assert_eq!(config.effective_step(), 1);
        config.step = 3.7;
        assert_eq!(config.effective_step(), 3);
        config.step = 1.0;
        assert_eq!(config.effective_step(), 1);
    }

    #[test]
    fn non_finite_fields_are_rejected() {
        let mut config = SamplingConfig::default();
        config.z_extrusion = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "z_extrusion"
            })
        ));

        let mut config = SamplingConfig::default();
        config.brightness = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "brightness"
            })
        ));
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let mut config = SamplingConfig::default();
        config.particle_size = 0.0;
        assert!(config.validate().is_err());

        let mut config = SamplingConfig::default();
        config.tint = [1.0, 1.2, 0.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "tint.g" })
        ));
    }

    #[test]
    fn every_mode_name_parses_back() {
        for mode in ColorMode::ALL {
            assert_eq!(mode.name().parse::<ColorMode>().unwrap(), mode);
        }
        assert!("neon_garbage".parse::<ColorMode>().is_err());
    }

    #[test]
    fn shapes_parse_by_name() {
        assert_eq!("sphere".parse::<PointShape>().unwrap(), PointShape::Sphere);
        assert_eq!("CUBE".parse::<PointShape>().unwrap(), PointShape::Cube);
        assert!("torus".parse::<PointShape>().is_err());
    }
}
