use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

use crate::data::model::SeriesCollection;

// ---------------------------------------------------------------------------
// HSL anchor (config-friendly)
// ---------------------------------------------------------------------------

/// An HSL color: hue in degrees, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl HslColor {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        HslColor {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn to_color32(self) -> Color32 {
        let hsl = Hsl::new(self.hue, self.saturation, self.lightness);
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(to_channel(rgb.red), to_channel(rgb.green), to_channel(rgb.blue))
    }
}

fn to_channel(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ---------------------------------------------------------------------------
// ColorScale: normalized ratio → Color32
// ---------------------------------------------------------------------------

/// Dark end of the default blue ramp.
pub const DEFAULT_LOW: HslColor = HslColor::new(200.0, 1.0, 0.25);
/// Light end of the default blue ramp.
pub const DEFAULT_HIGH: HslColor = HslColor::new(200.0, 1.0, 0.60);

/// Linear HSL interpolation between a low and a high anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub low: HslColor,
    pub high: HslColor,
}

impl Default for ColorScale {
    fn default() -> Self {
        ColorScale::new(DEFAULT_LOW, DEFAULT_HIGH)
    }
}

impl ColorScale {
    pub fn new(low: HslColor, high: HslColor) -> Self {
        ColorScale { low, high }
    }

    /// Colour for a ratio; values outside `[0, 1]` are clamped.
    pub fn color_at(&self, ratio: f64) -> Color32 {
        let t = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) as f32 };
        let lerp = |a: f32, b: f32| a * (1.0 - t) + b * t;
        HslColor::new(
            lerp(self.low.hue, self.high.hue),
            lerp(self.low.saturation, self.high.saturation),
            lerp(self.low.lightness, self.high.lightness),
        )
        .to_color32()
    }

    /// `steps` evenly spaced samples from low to high, for the legend.
    pub fn gradient(&self, steps: usize) -> Vec<Color32> {
        match steps {
            0 => Vec::new(),
            1 => vec![self.color_at(0.0)],
            n => (0..n)
                .map(|i| self.color_at(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Colour mapping: series → colour sequence
// ---------------------------------------------------------------------------

/// One colour per day, same length as the source series.
pub type ColorSequence = Vec<Color32>;

/// A region's colours for the active view.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredRegion {
    pub name: String,
    pub colors: ColorSequence,
}

/// Scale each value by the series maximum into `[0, 1]`.
///
/// A non-positive maximum maps every day to 0, as do negative values.
pub fn normalized_ratios(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_nan() || max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|&v| (v / max).clamp(0.0, 1.0)).collect()
}

/// Map each region's series to colours, normalizing per region.
///
/// Output order is the collection order.
pub fn colorize(collection: &SeriesCollection, scale: &ColorScale) -> Vec<ColoredRegion> {
    collection
        .iter()
        .map(|series| ColoredRegion {
            name: series.name.clone(),
            colors: normalized_ratios(&series.values)
                .into_iter()
                .map(|r| scale.color_at(r))
                .collect(),
        })
        .collect()
}

/// CSS notation, e.g. `rgb(0, 109, 128)`.
pub fn css_rgb(c: Color32) -> String {
    format!("rgb({}, {}, {})", c.r(), c.g(), c.b())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Series;

    fn brightness(c: Color32) -> u32 {
        c.r() as u32 + c.g() as u32 + c.b() as u32
    }

    #[test]
    fn ratios_stay_in_unit_range() {
        let r = normalized_ratios(&[-5.0, 0.0, 2.5, 10.0]);
        assert_eq!(r, vec![0.0, 0.0, 0.25, 1.0]);
        assert!(r.iter().all(|x| (0.0..=1.0).contains(x)));
    }

    #[test]
    fn zero_or_negative_max_maps_to_zero() {
        assert_eq!(normalized_ratios(&[0.0, 0.0, 0.0]), vec![0.0; 3]);
        assert_eq!(normalized_ratios(&[-3.0, -1.0]), vec![0.0; 2]);
        assert!(normalized_ratios(&[]).is_empty());
    }

    #[test]
    fn scale_endpoints_match_anchors() {
        let scale = ColorScale::default();
        assert_eq!(scale.color_at(0.0), DEFAULT_LOW.to_color32());
        assert_eq!(scale.color_at(1.0), DEFAULT_HIGH.to_color32());
        assert_eq!(scale.color_at(-2.0), scale.color_at(0.0));
        assert_eq!(scale.color_at(7.0), scale.color_at(1.0));
        let low = DEFAULT_LOW.to_color32();
        assert!(low.r() == 0 && low.g() < low.b());
    }

    #[test]
    fn scale_is_monotonic_and_deterministic() {
        let scale = ColorScale::default();
        let samples = scale.gradient(50);
        assert_eq!(samples.len(), 50);
        for pair in samples.windows(2) {
            assert!(brightness(pair[0]) <= brightness(pair[1]));
        }
        assert_eq!(scale.color_at(0.37), scale.color_at(0.37));
    }

    #[test]
    fn colorize_normalizes_per_region() {
        let collection = SeriesCollection::new(
            2,
            vec![
                Series::new("Big", vec![500.0, 1000.0]),
                Series::new("Small", vec![1.0, 2.0]),
                Series::new("Flat", vec![0.0, 0.0]),
            ],
        )
        .unwrap();
        let scale = ColorScale::default();
        let colored = colorize(&collection, &scale);

        assert_eq!(
            colored.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Big", "Small", "Flat"]
        );
        assert_eq!(colored[0].colors, colored[1].colors);
        assert_eq!(colored[0].colors[1], scale.color_at(1.0));
        assert_eq!(colored[2].colors, vec![scale.color_at(0.0); 2]);
    }

    #[test]
    fn css_formatting() {
        assert_eq!(css_rgb(Color32::from_rgb(1, 2, 3)), "rgb(1, 2, 3)");
    }
}
