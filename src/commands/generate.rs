use super::common::{Common, CommonArgs};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::Parser;
use ohno::{IntoAppError, app_err};
use owo_colors::OwoColorize;
use repo_traffic::Result;
use repo_traffic::chart::{self, ChartGeometry, ChartPalette, ColorOverrides};
use repo_traffic::config::Color;
use repo_traffic::traffic::{DayTotals, TrafficReport, aggregate_daily};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::{IsTerminal, stdout};

/// Parses a [`Color`] for clap, mapping the parse error to a `String` so it
/// satisfies clap's value-parser trait bounds. Parsing behavior is unchanged.
fn parse_color(s: &str) -> Result<Color, String> {
    s.parse::<Color>().map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Output file for the rendered chart
    #[arg(long, short = 'o', value_name = "PATH", default_value = "traffic_chart.svg")]
    pub output: Utf8PathBuf,

    /// Chart theme
    #[arg(long, value_name = "NAME", default_value = "default")]
    pub theme: String,

    /// Chart width in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 800, value_parser = clap::value_parser!(u32).range(800..))]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 400, value_parser = clap::value_parser!(u32).range(400..))]
    pub height: u32,

    /// Corner radius of the chart background
    #[arg(long, value_name = "PIXELS", default_value_t = 20)]
    pub radius: u32,

    /// Number of y-axis ticks
    #[arg(long, value_name = "COUNT", default_value_t = 5, value_parser = clap::value_parser!(u16).range(5..))]
    pub ticks: u16,

    /// Repositories to exclude from the chart
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude_repos: Vec<String>,

    /// Background color (hex without '#', e.g. '00000000' for transparent black)
    #[arg(long, value_name = "COLOR", help_heading = "Colors", value_parser = parse_color)]
    pub bg_color: Option<Color>,

    /// Color for the views line
    #[arg(long, value_name = "COLOR", help_heading = "Colors", value_parser = parse_color)]
    pub views_color: Option<Color>,

    /// Color for the clones line
    #[arg(long, value_name = "COLOR", help_heading = "Colors", value_parser = parse_color)]
    pub clones_color: Option<Color>,

    /// Color for view points
    #[arg(long, value_name = "COLOR", help_heading = "Colors", value_parser = parse_color)]
    pub views_point_color: Option<Color>,

    /// Color for clone points
    #[arg(long, value_name = "COLOR", help_heading = "Colors", value_parser = parse_color)]
    pub clones_point_color: Option<Color>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_generate(args: &GenerateArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let username = common.require_username()?;

    let theme = common
        .themes
        .load(&args.theme)?
        .ok_or_else(|| app_err!("theme '{}' not found", args.theme))?;

    let report = common.provider.fetch_report(username).await?;

    let mut exclude: HashSet<String> = args.exclude_repos.iter().cloned().collect();
    exclude.extend(common.settings.exclude_repos.iter().cloned());
    let totals = aggregate_daily(&report, &exclude);

    let overrides = ColorOverrides {
        bg_color: args.bg_color,
        views_color: args.views_color,
        clones_color: args.clones_color,
        views_point_color: args.views_point_color,
        clones_point_color: args.clones_point_color,
    };
    let palette = ChartPalette::resolve(&theme, &overrides);
    let geometry = ChartGeometry {
        width: args.width,
        height: args.height,
        radius: args.radius,
        ticks: usize::from(args.ticks),
    };

    let mut svg = String::new();
    chart::generate(&report.profile_name, &totals, &palette, geometry, &mut svg)?;

    fs::write(&args.output, &svg).into_app_err_with(|| format!("writing chart to {}", args.output))?;

    print_summary(&report, &totals, &args.output);
    Ok(())
}

fn print_summary(report: &TrafficReport, totals: &BTreeMap<NaiveDate, DayTotals>, output: &Utf8Path) {
    let views: u64 = totals.values().map(|day| day.views).sum();
    let clones: u64 = totals.values().map(|day| day.clones).sum();

    if stdout().is_terminal() {
        println!("{} Chart written to {}", "✓".green().bold(), output.bold());
    } else {
        println!("Chart written to {output}");
    }
    println!("  Repositories: {} charted, {} skipped", report.repos.len(), report.failures.len());
    println!("  Last {} day(s): {views} views, {clones} clones", totals.len());

    if !report.failures.is_empty() {
        eprintln!("\nNo traffic data for (push access required):");
        for name in &report.failures {
            eprintln!("  - {name}");
        }
    }
}
