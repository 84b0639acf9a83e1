//! Query-string configuration for one chart.

use crate::Result;
use crate::chart::ColorOverrides;
use core::fmt::Display;
use core::str::FromStr;
use ohno::{IntoAppError, app_err, bail};
use percent_encoding::percent_decode_str;

pub const DEFAULT_THEME: &str = "default";

pub const MIN_WIDTH: u32 = 800;
pub const MIN_HEIGHT: u32 = 400;
pub const MIN_TICKS: usize = 5;
const DEFAULT_RADIUS: u32 = 20;

/// Chart configuration extracted from the query string, with documented
/// defaults and minimums. Unknown parameters are ignored.
#[derive(Debug, Clone)]
pub struct ChartParams {
    pub username: Option<String>,
    pub theme: String,
    pub width: u32,
    pub height: u32,
    pub radius: u32,
    pub ticks: usize,
    pub exclude_repos: Vec<String>,
    pub colors: ColorOverrides,
}

impl Default for ChartParams {
    fn default() -> Self {
        Self {
            username: None,
            theme: DEFAULT_THEME.to_string(),
            width: MIN_WIDTH,
            height: MIN_HEIGHT,
            radius: DEFAULT_RADIUS,
            ticks: MIN_TICKS,
            exclude_repos: Vec::new(),
            colors: ColorOverrides::default(),
        }
    }
}

impl ChartParams {
    /// Parse a raw (still percent-encoded) query string.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut params = Self::default();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(key)?;
            let value = decode(value)?;

            match key.as_str() {
                "username" => {
                    if !value.is_empty() {
                        params.username = Some(value);
                    }
                }
                "theme" => params.theme = value,
                "width" => params.width = parse_min("width", &value, MIN_WIDTH)?,
                "height" => params.height = parse_min("height", &value, MIN_HEIGHT)?,
                "ticks" => params.ticks = parse_min("ticks", &value, MIN_TICKS)?,
                "radius" => params.radius = parse_number("radius", &value)?,
                "exclude_repos" => {
                    params.exclude_repos = value.split(',').filter(|name| !name.is_empty()).map(str::to_string).collect();
                }
                "bg_color" => params.colors.bg_color = Some(parse_color("bg_color", &value)?),
                "views_color" => params.colors.views_color = Some(parse_color("views_color", &value)?),
                "clones_color" => params.colors.clones_color = Some(parse_color("clones_color", &value)?),
                "views_point_color" => params.colors.views_point_color = Some(parse_color("views_point_color", &value)?),
                "clones_point_color" => params.colors.clones_point_color = Some(parse_color("clones_point_color", &value)?),
                _ => {}
            }
        }

        Ok(params)
    }
}

fn decode(s: &str) -> Result<String> {
    // '+' means space in query strings; percent_decode leaves it alone
    let s = s.replace('+', " ");
    let decoded = percent_decode_str(&s)
        .decode_utf8()
        .into_app_err_with(|| format!("query parameter is not valid UTF-8: '{s}'"))?;
    Ok(decoded.into_owned())
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| app_err!("invalid value '{value}' for parameter '{name}': {e}"))
}

fn parse_min<T: FromStr + PartialOrd + Display>(name: &str, value: &str, min: T) -> Result<T>
where
    T::Err: Display,
{
    let parsed = parse_number(name, value)?;
    if parsed < min {
        bail!("parameter '{name}' must be at least {min}, got {parsed}");
    }
    Ok(parsed)
}

fn parse_color(name: &str, value: &str) -> Result<crate::config::Color> {
    value
        .parse()
        .map_err(|e| app_err!("invalid value '{value}' for parameter '{name}': {e}"))
}
