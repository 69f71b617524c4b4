//! RGB <-> HSL conversion used by the lightness blend filters.

use crate::core::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// A color in the hue/saturation/lightness model.
///
/// `hue` lies in `[0, 360)`, `saturation` and `lightness` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue angle in degrees.
    pub hue: f64,
    /// Saturation.
    pub saturation: f64,
    /// Lightness.
    pub lightness: f64,
}

impl Hsl {
    /// Create an HSL triple.
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self { hue, saturation, lightness }
    }

    /// Same hue and saturation with a different lightness.
    pub fn with_lightness(self, lightness: f64) -> Self {
        Self { lightness, ..self }
    }
}

/// Convert RGB channels on the 0..=255 scale to HSL.
///
/// Fails if any channel lies outside 0..=255.
pub fn rgb_to_hsl(red: f64, green: f64, blue: f64) -> ModelResult<Hsl> {
    let r = normalize("Red", red)?;
    let g = normalize("Green", green)?;
    let b = normalize("Blue", blue)?;
    Ok(unit_rgb_to_hsl(r, g, b))
}

/// Convert 8-bit RGB channels to HSL. Cannot fail since every `u8` is in range.
pub fn rgb8_to_hsl(rgb: [u8; 3]) -> Hsl {
    let [r, g, b] = rgb.map(|c| c as f64 / 255.0);
    unit_rgb_to_hsl(r, g, b)
}

fn unit_rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let component_max = r.max(g).max(b);
    let component_min = r.min(g).min(b);
    let delta = component_max - component_min;
    let lightness = (component_max + component_min) / 2.0;

    if delta == 0.0 {
        return Hsl::new(0.0, 0.0, lightness);
    }

    let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
    let sector = if component_max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if component_max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl::new(sector * 60.0, saturation, lightness)
}

/// Convert an HSL color to RGB channels on the 0..=255 scale.
pub fn hsl_to_rgb(hsl: Hsl) -> [u8; 3] {
    let channel = |n: f64| (basis(hsl, n) * 255.0).round().clamp(0.0, 255.0) as u8;
    [channel(0.0), channel(8.0), channel(4.0)]
}

fn basis(hsl: Hsl, n: f64) -> f64 {
    let k = (n + hsl.hue / 30.0) % 12.0;
    let a = hsl.saturation * hsl.lightness.min(1.0 - hsl.lightness);
    hsl.lightness - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
}

fn normalize(channel: &'static str, value: f64) -> ModelResult<f64> {
    let unit = value / 255.0;
    if !(0.0..=1.0).contains(&unit) {
        return Err(ModelError::HslChannelOutOfRange { channel, value });
    }
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rgb_to_hsl() {
        let hsl = rgb_to_hsl(23.0, 199.0, 100.0).unwrap();
        assert_abs_diff_eq!(hsl.hue, 146.25, epsilon = 0.001);
        assert_abs_diff_eq!(hsl.saturation, 0.79279, epsilon = 0.001);
        assert_abs_diff_eq!(hsl.lightness, 0.43529, epsilon = 0.001);
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(hsl_to_rgb(Hsl::new(146.25, 0.79279, 0.43529)), [23, 199, 100]);
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 0.0, 1.0)), [255, 255, 255]);
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 1.0, 0.5)), [255, 0, 0]);
    }

    #[test]
    fn test_achromatic() {
        let hsl = rgb_to_hsl(128.0, 128.0, 128.0).unwrap();
        assert_eq!(hsl.hue, 0.0);
        assert_eq!(hsl.saturation, 0.0);
        assert_abs_diff_eq!(hsl.lightness, 128.0 / 255.0);
    }

    #[test]
    fn test_hue_sectors() {
        assert_abs_diff_eq!(rgb_to_hsl(255.0, 0.0, 255.0).unwrap().hue, 300.0);
        assert_abs_diff_eq!(rgb_to_hsl(0.0, 0.0, 255.0).unwrap().hue, 240.0);
        assert_abs_diff_eq!(rgb_to_hsl(0.0, 255.0, 0.0).unwrap().hue, 120.0);
    }

    #[test]
    fn test_rgb8_matches_checked_conversion() {
        let checked = rgb_to_hsl(47.0, 75.0, 83.0).unwrap();
        assert_eq!(rgb8_to_hsl([47, 75, 83]), checked);
    }

    #[test]
    fn test_out_of_range() {
        assert!(rgb_to_hsl(-1.0, 0.0, 0.0).is_err());
        assert!(rgb_to_hsl(0.0, 256.0, 0.0).is_err());
        assert!(rgb_to_hsl(0.0, 0.0, 300.0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_round_trip_is_close() {
        for rgb in [[12u8, 40, 48], [33, 2, 3], [200, 100, 50], [0, 0, 0]] {
            let hsl = rgb_to_hsl(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64).unwrap();
            let back = hsl_to_rgb(hsl);
            for (a, b) in rgb.iter().zip(back.iter()) {
                assert!((*a as i32 - *b as i32).abs() <= 1);
            }
        }
    }
}
