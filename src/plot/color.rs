use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_rgb(hue, 0.75, 0.55)
        })
        .collect()
}

/// Single accent colour used for non-categorical series.
pub fn accent() -> RGBColor {
    hsl_to_rgb(210.0, 0.6, 0.45)
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> RGBColor {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    RGBColor(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(4);
        assert_eq!(colours.len(), 4);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!((a.0, a.1, a.2), (b.0, b.1, b.2));
            }
        }
    }

    #[test]
    fn empty_palette() {
        assert!(generate_palette(0).is_empty());
    }
}
