use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One day of traffic for a single repository, as reported by GitHub.
///
/// `uniques` is carried for completeness; the chart plots `count`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailySample {
    pub timestamp: DateTime<Utc>,
    pub count: u64,
    pub uniques: u64,
}

/// The views and clones series of a single repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoTraffic {
    pub name: String,
    pub views: Vec<DailySample>,
    pub clones: Vec<DailySample>,
}

/// Everything one chart needs: the profile display name for the title and the
/// per-repository series that survived fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficReport {
    /// When the data was fetched; drives cache expiry.
    pub timestamp: DateTime<Utc>,
    pub profile_name: String,
    pub repos: Vec<RepoTraffic>,
    /// Repositories whose traffic could not be fetched.
    pub failures: Vec<String>,
}

/// Summed views and clones for one calendar day across all repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTotals {
    pub views: u64,
    pub clones: u64,
}

/// Sum each repository's daily counts into per-date totals, skipping excluded
/// repositories. A date present in only one series contributes zero to the
/// other.
#[must_use]
pub fn aggregate_daily(report: &TrafficReport, exclude: &HashSet<String>) -> BTreeMap<NaiveDate, DayTotals> {
    let mut totals: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();

    for repo in report.repos.iter().filter(|repo| !exclude.contains(&repo.name)) {
        for sample in &repo.views {
            totals.entry(sample.timestamp.date_naive()).or_default().views += sample.count;
        }
        for sample in &repo.clones {
            totals.entry(sample.timestamp.date_naive()).or_default().clones += sample.count;
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(date: &str, count: u64) -> DailySample {
        DailySample {
            timestamp: format!("{date}T00:00:00Z").parse().unwrap(),
            count,
            uniques: 1,
        }
    }

    fn report(repos: Vec<RepoTraffic>) -> TrafficReport {
        TrafficReport {
            timestamp: Utc::now(),
            profile_name: "Octo Cat".to_string(),
            repos,
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_merges_across_repositories() {
        let report = report(vec![
            RepoTraffic {
                name: "alpha".to_string(),
                views: vec![sample("2026-08-01", 10), sample("2026-08-02", 5)],
                clones: vec![sample("2026-08-01", 2)],
            },
            RepoTraffic {
                name: "beta".to_string(),
                views: vec![sample("2026-08-02", 7)],
                clones: vec![sample("2026-08-03", 1)],
            },
        ]);

        let totals = aggregate_daily(&report, &HashSet::new());
        assert_eq!(totals.len(), 3);

        let dates: Vec<NaiveDate> = totals.keys().copied().collect();
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));

        let day2 = totals[&NaiveDate::from_ymd_opt(2026, 8, 2).unwrap()];
        assert_eq!(day2, DayTotals { views: 12, clones: 0 });

        let day3 = totals[&NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()];
        assert_eq!(day3, DayTotals { views: 0, clones: 1 });
    }

    #[test]
    fn test_excluded_repositories_are_skipped() {
        let report = report(vec![
            RepoTraffic {
                name: "alpha".to_string(),
                views: vec![sample("2026-08-01", 10)],
                clones: vec![],
            },
            RepoTraffic {
                name: "noisy-fork".to_string(),
                views: vec![sample("2026-08-01", 1000)],
                clones: vec![],
            },
        ]);

        let exclude: HashSet<String> = ["noisy-fork".to_string()].into_iter().collect();
        let totals = aggregate_daily(&report, &exclude);

        let day1 = totals[&NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()];
        assert_eq!(day1.views, 10);
    }

    #[test]
    fn test_empty_report_yields_no_totals() {
        let totals = aggregate_daily(&report(Vec::new()), &HashSet::new());
        assert!(totals.is_empty());
    }
}
