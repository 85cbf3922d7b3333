use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Style vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
    Square,
    TriangleUp,
    Diamond,
    TriangleDown,
    Pentagon,
    Star,
    Hexagon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

/// How one series is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// CSS colour name or `#rrggbb`.
    pub color: String,
    pub marker: Marker,
    pub line: LineStyle,
}

impl SeriesStyle {
    fn new(color: &str, marker: Marker, line: LineStyle) -> Self {
        Self {
            color: color.to_string(),
            marker,
            line,
        }
    }

    /// Resolve `color` to RGB, grey when the name is unknown.
    pub fn rgb(&self) -> [u8; 3] {
        let parsed = palette::named::from_str(&self.color)
            .or_else(|| Srgb::<u8>::from_str(&self.color).ok());
        match parsed {
            Some(c) => [c.red, c.green, c.blue],
            None => [128, 128, 128],
        }
    }
}

// ---------------------------------------------------------------------------
// PlotStyle – ordered style cycle handed to the renderer
// ---------------------------------------------------------------------------

/// Ordered list of series styles; series `i` uses entry `i % len`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    pub series: Vec<SeriesStyle>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        use LineStyle::*;
        use Marker::*;
        Self {
            series: vec![
                SeriesStyle::new("red", Circle, Solid),
                SeriesStyle::new("blue", Square, Dashed),
                SeriesStyle::new("green", TriangleUp, DashDot),
                SeriesStyle::new("orange", Diamond, Dotted),
                SeriesStyle::new("purple", TriangleDown, Solid),
                SeriesStyle::new("cyan", Pentagon, Dashed),
                SeriesStyle::new("magenta", Star, DashDot),
                SeriesStyle::new("brown", Hexagon, Dotted),
            ],
        }
    }
}

impl PlotStyle {
    /// `n` styles with evenly spaced hues, for more series than the default cycle.
    pub fn generated(n: usize) -> Self {
        let markers = [
            Marker::Circle,
            Marker::Square,
            Marker::TriangleUp,
            Marker::Diamond,
        ];
        let lines = [LineStyle::Solid, LineStyle::Dashed, LineStyle::DashDot];
        let series = generate_palette(n)
            .into_iter()
            .enumerate()
            .map(|(i, [r, g, b])| SeriesStyle {
                color: format!("#{r:02x}{g:02x}{b:02x}"),
                marker: markers[i % markers.len()],
                line: lines[i % lines.len()],
            })
            .collect();
        Self { series }
    }

    /// Style for the `index`-th series, cycling through the list.
    pub fn style_for(&self, index: usize) -> SeriesStyle {
        if self.series.is_empty() {
            return SeriesStyle::new("gray", Marker::Circle, LineStyle::Solid);
        }
        self.series[index % self.series.len()].clone()
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<[u8; 3]> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cycle_wraps_around() {
        let style = PlotStyle::default();
        assert_eq!(style.style_for(0), style.style_for(8));
        assert_eq!(style.style_for(1).marker, Marker::Square);
        assert_eq!(style.style_for(9).line, LineStyle::Dashed);
    }

    #[test]
    fn named_and_hex_colours_resolve() {
        let red = SeriesStyle::new("red", Marker::Circle, LineStyle::Solid);
        assert_eq!(red.rgb(), [255, 0, 0]);
        let hex = SeriesStyle::new("#102030", Marker::Circle, LineStyle::Solid);
        assert_eq!(hex.rgb(), [0x10, 0x20, 0x30]);
        let junk = SeriesStyle::new("not-a-colour", Marker::Circle, LineStyle::Solid);
        assert_eq!(junk.rgb(), [128, 128, 128]);
    }

    #[test]
    fn generated_palette_has_distinct_entries() {
        let style = PlotStyle::generated(12);
        assert_eq!(style.series.len(), 12);
        let first = style.series[0].rgb();
        assert!(style.series[1..].iter().all(|s| s.rgb() != first));
    }

    #[test]
    fn empty_style_list_still_yields_a_style() {
        let style = PlotStyle { series: Vec::new() };
        assert_eq!(style.style_for(3).color, "gray");
    }
}
