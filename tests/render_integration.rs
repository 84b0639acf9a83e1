//! Integration test for the full render pipeline: query parameters, theme
//! resolution, aggregation, and SVG generation, with a fixed traffic report
//! standing in for the GitHub API.

use repo_traffic::chart::{self, ChartGeometry, ChartPalette};
use repo_traffic::server::ChartParams;
use repo_traffic::themes::ThemeStore;
use repo_traffic::traffic::{DailySample, RepoTraffic, TrafficReport, aggregate_daily};
use std::collections::HashSet;

fn sample(date: &str, count: u64) -> DailySample {
    DailySample {
        timestamp: format!("{date}T00:00:00Z").parse().unwrap(),
        count,
        uniques: count.min(3),
    }
}

fn fixed_report() -> TrafficReport {
    TrafficReport {
        timestamp: chrono::Utc::now(),
        profile_name: "Octo Cat".to_string(),
        repos: vec![
            RepoTraffic {
                name: "alpha".to_string(),
                views: vec![sample("2026-08-01", 30), sample("2026-08-02", 12), sample("2026-08-03", 5)],
                clones: vec![sample("2026-08-01", 4), sample("2026-08-03", 2)],
            },
            RepoTraffic {
                name: "beta".to_string(),
                views: vec![sample("2026-08-02", 17)],
                clones: vec![sample("2026-08-02", 1)],
            },
            RepoTraffic {
                name: "noisy-mirror".to_string(),
                views: vec![sample("2026-08-01", 100_000)],
                clones: vec![],
            },
        ],
        failures: vec!["private-thing".to_string()],
    }
}

#[test]
fn test_query_to_svg() {
    let params = ChartParams::from_query("username=octocat&theme=dark&width=1000&height=500&radius=8&ticks=5&exclude_repos=noisy-mirror").unwrap();

    let store = ThemeStore::default();
    let theme = store.load(&params.theme).unwrap().unwrap();

    let report = fixed_report();
    let exclude: HashSet<String> = params.exclude_repos.iter().cloned().collect();
    let totals = aggregate_daily(&report, &exclude);

    // Three distinct dates survive, and the excluded repository's spike is gone
    assert_eq!(totals.len(), 3);
    let max_views = totals.values().map(|day| day.views).max().unwrap();
    assert_eq!(max_views, 30);

    let palette = ChartPalette::resolve(&theme, &params.colors);
    let geometry = ChartGeometry {
        width: params.width,
        height: params.height,
        radius: params.radius,
        ticks: params.ticks,
    };

    let mut svg = String::new();
    chart::generate(&report.profile_name, &totals, &palette, geometry, &mut svg).unwrap();

    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="500" viewBox="0 0 1000 500">"#));
    assert!(svg.contains("Octo Cat's Repo Traffic Stats"));
    assert!(svg.contains(r#"rx="8""#));

    // Dark theme colors flow through
    assert!(svg.contains("#0d1117"));
    assert!(svg.contains("#58a6ff"));

    // Two series, one circle pair per surviving date
    assert_eq!(svg.matches("<path ").count(), 2);
    assert_eq!(svg.matches("<circle ").count(), 6);

    // Excluded repository's spike would have pushed the axis into the
    // hundred-thousands; with it gone the axis tops out at 30
    assert!(svg.contains(">30</text>"));
    assert!(!svg.contains(">100000</text>"));
}

#[test]
fn test_color_overrides_flow_through() {
    let params = ChartParams::from_query("username=octocat&bg_color=00000000&views_color=33ff57").unwrap();

    let store = ThemeStore::default();
    let theme = store.load(&params.theme).unwrap().unwrap();
    let palette = ChartPalette::resolve(&theme, &params.colors);

    let report = fixed_report();
    let totals = aggregate_daily(&report, &HashSet::new());

    let mut svg = String::new();
    chart::generate(
        &report.profile_name,
        &totals,
        &palette,
        ChartGeometry {
            width: params.width,
            height: params.height,
            radius: params.radius,
            ticks: params.ticks,
        },
        &mut svg,
    )
    .unwrap();

    // Transparent background: color plus zero opacity
    assert!(svg.contains(r##"fill="#000000" fill-opacity="0""##));
    assert!(svg.contains("#33ff57"));
}

#[test]
fn test_empty_report_still_renders() {
    let report = TrafficReport {
        timestamp: chrono::Utc::now(),
        profile_name: "Octo Cat".to_string(),
        repos: Vec::new(),
        failures: Vec::new(),
    };
    let totals = aggregate_daily(&report, &HashSet::new());

    let store = ThemeStore::default();
    let theme = store.load("default").unwrap().unwrap();
    let palette = ChartPalette::resolve(&theme, &repo_traffic::chart::ColorOverrides::default());

    let mut svg = String::new();
    chart::generate(
        &report.profile_name,
        &totals,
        &palette,
        ChartGeometry {
            width: 800,
            height: 400,
            radius: 20,
            ticks: 5,
        },
        &mut svg,
    )
    .unwrap();

    assert!(svg.contains("<svg"));
    assert!(!svg.contains("<path "));
    assert!(svg.contains("Clones"));
    assert!(svg.contains("Views"));
}
