//! A tool that renders GitHub repository traffic as an SVG chart.
//!
//! # Overview
//!
//! `repo-traffic` fetches the daily views and clones that GitHub records for
//! every public repository of a user, sums them by date, and draws the result
//! as an animated SVG line chart. The chart can be written to a file or served
//! over HTTP, which makes it easy to embed in a profile README:
//!
//! ```markdown
//! ![Traffic](https://your-host.example/api?username=octocat&theme=tokyo-night)
//! ```
//!
//! # Installation
//!
//! ```bash
//! cargo install repo-traffic
//! ```
//!
//! # Quick Start
//!
//! Render a chart for your repositories into `traffic_chart.svg`:
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! repo-traffic generate --username octocat
//! ```
//!
//! Or run the HTTP endpoint:
//!
//! ```bash
//! repo-traffic serve --listen 0.0.0.0:8080
//! curl 'http://localhost:8080/api?username=octocat' > chart.svg
//! ```
//!
//! # GitHub Access
//!
//! GitHub only reports traffic for repositories the token can push to, so the
//! token must belong to the charted user. Create one at
//! <https://github.com/settings/tokens> and pass it via the `GITHUB_TOKEN`
//! environment variable or `--github-token`. Repositories the token cannot
//! read traffic for are skipped and listed in the command summary.
//!
//! # The `/api` Endpoint
//!
//! `GET /api` accepts the following query parameters:
//!
//! | Parameter | Default | Notes |
//! |---|---|---|
//! | `username` | from settings | GitHub user to chart |
//! | `theme` | `default` | see `repo-traffic themes` |
//! | `width` | 800 | minimum 800 |
//! | `height` | 400 | minimum 400 |
//! | `radius` | 20 | corner radius of the background |
//! | `ticks` | 5 | minimum 5, y-axis tick count |
//! | `exclude_repos` | none | comma-separated repository names |
//! | `bg_color` | theme | hex without `#`, 8 digits for alpha |
//! | `views_color` | theme | hex without `#` |
//! | `clones_color` | theme | hex without `#` |
//! | `views_point_color` | theme | hex without `#` |
//! | `clones_point_color` | theme | hex without `#` |
//!
//! Responses carry `Cache-Control` headers tuned to how often GitHub refreshes
//! traffic counts; fetched data is additionally reused in-process for
//! `cache_ttl_minutes` (default 30).
//!
//! # Themes
//!
//! A theme is a small JSON document naming the chart colors:
//!
//! ```json
//! {
//!   "background_color": "#1a1b26",
//!   "line_colors": { "views": "#7aa2f7", "clones": "#bb9af7" },
//!   "point_colors": { "views": "#2ac3de", "clones": "#9d7cd8" },
//!   "text_color": "#c0caf5",
//!   "grid_color": "#3b4261"
//! }
//! ```
//!
//! `repo-traffic themes` lists the built-in set. Extra themes can be dropped
//! into a directory named by `--theme-dir` (or `theme_dir` in the settings
//! file); a file named like a built-in theme shadows it.
//!
//! # Settings
//!
//! Defaults live in `traffic.toml`, `traffic.yml`, `traffic.yaml`, or
//! `traffic.json` next to the working directory, or wherever `--config`
//! points. `repo-traffic init` writes a commented starter file.
//!
//! # Scheduled Generation
//!
//! GitHub keeps only two weeks of traffic history, so charts are best
//! regenerated on a schedule:
//!
//! ```yaml
//! name: Traffic Chart
//!
//! on:
//!   schedule:
//!     - cron: "23 5 * * *"
//!
//! jobs:
//!   chart:
//!     runs-on: ubuntu-latest
//!     steps:
//!       - uses: actions/checkout@v4
//!       - run: cargo install repo-traffic
//!       - env:
//!           GITHUB_TOKEN: ${{ secrets.TRAFFIC_TOKEN }}
//!         run: repo-traffic generate --username ${{ github.repository_owner }}
//! ```

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use repo_traffic::Result;

mod commands;

use crate::commands::{GenerateArgs, InitArgs, ServeArgs, ThemesArgs, init_settings, list_themes, process_generate, process_serve};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-traffic", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve traffic charts over HTTP
    Serve(ServeArgs),
    /// Fetch traffic data and write the chart to a file
    Generate(Box<GenerateArgs>),
    /// List available themes
    Themes(ThemesArgs),
    /// Generate a default settings file
    Init(InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        Command::Serve(serve_args) => process_serve(serve_args).await,
        Command::Generate(generate_args) => process_generate(generate_args).await,
        Command::Themes(themes_args) => list_themes(themes_args),
        Command::Init(init_args) => init_settings(init_args),
    }
}
