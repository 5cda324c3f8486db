/// Per-pixel colour transform for the 12 style presets
use crate::config::ColorMode;

/// Rec. 601 luma weights; every luminance-driven preset shares these
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Map a source pixel to its styled colour.
/// Output is intentionally unclamped except where a preset clamps its own
/// channels (sepia, vaporwave); export and rendering clamp downstream.
pub fn transform(rgb: [u8; 3], mode: ColorMode, brightness: f32, tint: [f32; 3]) -> [f32; 3] {
    let r = rgb[0] as f32 / 255.0;
    let g = rgb[1] as f32 / 255.0;
    let b = rgb[2] as f32 / 255.0;
    let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;

    let [mut out_r, mut out_g, mut out_b] = match mode {
        ColorMode::Original => [r, g, b],
        ColorMode::CoolBlack => [luma * 0.25, luma * 0.45, luma * 1.10],
        ColorMode::Cyberpunk => [r * 1.50, g * 0.25, b * 1.70],
        ColorMode::Matrix => [0.0, luma * 1.50, 0.0],
        ColorMode::Golden => [luma * 1.60, luma * 1.05, luma * 0.25],
        ColorMode::Ocean => [luma * 0.15, luma * 0.65, luma * 1.35],
        ColorMode::Inferno => [luma * 1.90, luma * luma * 1.10, luma * 0.20],
        ColorMode::Vaporwave => [
            (r * 0.60 + 0.45).min(1.0),
            (g * 0.35 + 0.20).min(1.0),
            (b * 0.70 + 0.50).min(1.0),
        ],
        ColorMode::Arctic => [luma * 0.75 + 0.15, luma * 0.85 + 0.20, luma * 0.95 + 0.30],
        ColorMode::Mono => [luma, luma, luma],
        ColorMode::Sepia => [
            (0.393 * r + 0.769 * g + 0.189 * b).min(1.0),
            (0.349 * r + 0.686 * g + 0.168 * b).min(1.0),
            (0.272 * r + 0.534 * g + 0.131 * b).min(1.0),
        ],
        ColorMode::Blueprint => [luma * 0.30, luma * 0.50, luma * 0.55 + 0.45],
    };

    if tint != [1.0, 1.0, 1.0] {
        out_r *= tint[0];
        out_g *= tint[1];
        out_b *= tint[2];
    }

    [
        out_r * brightness,
        out_g * brightness,
        out_b * brightness,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE_TINT: [f32; 3] = [1.0, 1.0, 1.0];

    const SAMPLE_PIXELS: [[u8; 3]; 6] = [
        [0, 0, 0],
        [255, 255, 255],
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [120, 33, 200],
    ];

    fn luma_of(rgb: [u8; 3]) -> f32 {
        LUMA_R * rgb[0] as f32 / 255.0
            + LUMA_G * rgb[1] as f32 / 255.0
            + LUMA_B * rgb[2] as f32 / 255.0
    }

    #[test]
    fn original_passes_channels_through() {
        let out = transform([51, 102, 204], ColorMode::Original, 1.0, WHITE_TINT);
        assert!((out[0] - 0.2).abs() < 1e-6);
        assert!((out[1] - 0.4).abs() < 1e-6);
        assert!((out[2] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn mono_is_grayscale_for_any_pixel() {
        for rgb in SAMPLE_PIXELS {
            let out = transform(rgb, ColorMode::Mono, 1.0, WHITE_TINT);
            assert!((out[0] - out[1]).abs() < 1e-6);
            assert!((out[1] - out[2]).abs() < 1e-6);
            assert!((out[0] - luma_of(rgb)).abs() < 1e-6);
        }
    }

    #[test]
    fn matrix_zeroes_red_and_blue() {
        for rgb in SAMPLE_PIXELS {
            let out = transform(rgb, ColorMode::Matrix, 1.0, WHITE_TINT);
            assert_eq!(out[0], 0.0);
            assert_eq!(out[2], 0.0);
            assert!((out[1] - luma_of(rgb) * 1.5).abs() < 1e-6);
        }
    }

    #[test]
    fn sepia_clamps_its_own_channels() {
        let out = transform([255, 255, 255], ColorMode::Sepia, 1.0, WHITE_TINT);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], 1.0);
        // Blue coefficient row sums below one, so it stays under the clamp
        assert!(out[2] < 1.0);
    }

    #[test]
    fn vaporwave_clamps_its_own_channels() {
        let out = transform([255, 255, 255], ColorMode::Vaporwave, 1.0, WHITE_TINT);
        assert!(out.iter().all(|&c| c <= 1.0));
        assert_eq!(out[0], 1.0);
        assert_eq!(out[2], 1.0);
    }

    #[test]
    fn unclamped_modes_may_exceed_one() {
        let out = transform([255, 255, 255], ColorMode::Matrix, 1.0, WHITE_TINT);
        assert!(out[1] > 1.0);
        let out = transform([255, 255, 255], ColorMode::Golden, 1.0, WHITE_TINT);
        assert!(out[0] > 1.0);
    }

    #[test]
    fn tint_multiplies_channel_wise() {
        let out = transform([255, 255, 255], ColorMode::Original, 1.0, [0.5, 1.0, 0.25]);
        assert!((out[0] - 0.5).abs() < 1e-6);
        assert!((out[1] - 1.0).abs() < 1e-6);
        assert!((out[2] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn brightness_applies_after_tint() {
        let out = transform([255, 255, 255], ColorMode::Original, 2.0, [0.5, 0.5, 0.5]);
        // 1.0 * 0.5 * 2.0 per channel; gain is allowed to push past 1.0
        assert!(out.iter().all(|&c| (c - 1.0).abs() < 1e-6));

        let out = transform([255, 255, 255], ColorMode::Original, 0.0, WHITE_TINT);
        assert_eq!(out, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn every_mode_yields_finite_colour() {
        for mode in ColorMode::ALL {
            for rgb in SAMPLE_PIXELS {
                let out = transform(rgb, mode, 1.0, WHITE_TINT);
                assert!(out.iter().all(|c| c.is_finite()), "{:?}", mode);
            }
        }
    }
}
