//! Laying out and rendering the traffic chart.

pub mod path;
pub mod scale;

mod svg;

pub use svg::generate;

use crate::config::Color;
use crate::themes::Theme;

/// Caller-specified chart dimensions.
#[derive(Debug, Clone, Copy)]
pub struct ChartGeometry {
    pub width: u32,
    pub height: u32,
    /// Corner radius of the background rectangle.
    pub radius: u32,
    /// Requested number of y-axis ticks.
    pub ticks: usize,
}

/// Optional per-request color overrides, applied on top of a theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorOverrides {
    pub bg_color: Option<Color>,
    pub views_color: Option<Color>,
    pub clones_color: Option<Color>,
    pub views_point_color: Option<Color>,
    pub clones_point_color: Option<Color>,
}

/// The fully resolved set of colors a chart is drawn with.
#[derive(Debug, Clone, Copy)]
pub struct ChartPalette {
    pub background: Color,
    pub views_line: Color,
    pub clones_line: Color,
    pub views_point: Color,
    pub clones_point: Color,
    pub text: Color,
    pub grid: Color,
}

impl ChartPalette {
    #[must_use]
    pub fn resolve(theme: &Theme, overrides: &ColorOverrides) -> Self {
        Self {
            background: overrides.bg_color.unwrap_or(theme.background_color),
            views_line: overrides.views_color.unwrap_or(theme.line_colors.views),
            clones_line: overrides.clones_color.unwrap_or(theme.line_colors.clones),
            views_point: overrides.views_point_color.unwrap_or(theme.point_colors.views),
            clones_point: overrides.clones_point_color.unwrap_or(theme.point_colors.clones),
            text: theme.text_color,
            grid: theme.grid_color,
        }
    }
}

/// Format a coordinate or opacity for SVG output: two decimal places with
/// trailing zeros trimmed.
#[must_use]
pub(crate) fn fmt_num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::BuiltinTheme;

    #[test]
    fn test_palette_prefers_overrides() {
        let theme = BuiltinTheme::Default.load().unwrap();
        let overrides = ColorOverrides {
            bg_color: Some(Color::new(0, 0, 0)),
            views_color: None,
            clones_color: Some(Color::new(1, 2, 3)),
            views_point_color: None,
            clones_point_color: None,
        };

        let palette = ChartPalette::resolve(&theme, &overrides);
        assert_eq!(palette.background.hex(), "#000000");
        assert_eq!(palette.clones_line.hex(), "#010203");
        assert_eq!(palette.views_line, theme.line_colors.views);
        assert_eq!(palette.text, theme.text_color);
    }

    #[test]
    fn test_fmt_num_trims() {
        assert_eq!(fmt_num(60.0), "60");
        assert_eq!(fmt_num(33.333), "33.33");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(0.0), "0");
    }
}
