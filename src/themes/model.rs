use crate::config::Color;
use serde::{Deserialize, Serialize};

/// Per-series colors, one value for each of the two charted series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesColors {
    pub views: Color,
    pub clones: Color,
}

/// A named color palette applied to the rendered chart.
///
/// Themes are flat JSON documents; see the files under `themes/` for the
/// built-in set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Theme {
    pub background_color: Color,
    pub line_colors: SeriesColors,
    pub point_colors: SeriesColors,
    pub text_color: Color,
    pub grid_color: Color,
}
