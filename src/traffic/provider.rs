use crate::Result;
use crate::traffic::{DailySample, RepoTraffic, TrafficReport};
use chrono::Utc;
use futures_util::future::join_all;
use octocrab::Octocrab;
use octocrab::models::Repository;
use ohno::{EnrichableExt, IntoAppError, bail};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "   traffic";
const API_BASE: &str = "https://api.github.com";
const REPO_PAGE_SIZE: u8 = 100;

/// Maximum number of repositories whose traffic is fetched concurrently.
/// Each repository costs two requests (views and clones), so a batch stays
/// well inside GitHub's secondary rate limits.
const FETCH_BATCH_SIZE: usize = 10;

/// GitHub traffic client.
///
/// Repository listing goes through octocrab's typed API; the traffic
/// endpoints have no typed counterpart and are fetched with a raw client.
#[derive(Debug, Clone)]
pub struct Provider {
    octocrab: Octocrab,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ViewsPayload {
    #[serde(default)]
    views: Vec<DailySample>,
}

#[derive(Debug, Deserialize)]
struct ClonesPayload {
    #[serde(default)]
    clones: Vec<DailySample>,
}

#[derive(Debug, Deserialize)]
struct ProfilePayload {
    name: Option<String>,
    login: String,
}

impl Provider {
    /// Create a new GitHub API client
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        let mut client_builder = Client::builder().user_agent("repo-traffic");

        let mut headers = reqwest::header::HeaderMap::new();
        let _ = headers.insert(reqwest::header::ACCEPT, reqwest::header::HeaderValue::from_static("application/vnd.github+json"));
        let _ = headers.insert("X-GitHub-Api-Version", reqwest::header::HeaderValue::from_static("2022-11-28"));

        if let Some(t) = token {
            let mut auth_val = reqwest::header::HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(reqwest::header::AUTHORIZATION, auth_val);

            builder = builder.personal_token(t);
        }

        client_builder = client_builder.default_headers(headers);

        Ok(Self {
            octocrab: builder.build()?,
            client: client_builder.build()?,
        })
    }

    /// Fetch traffic for every public repository of `username`.
    ///
    /// Repositories whose traffic cannot be fetched (most commonly because
    /// the token lacks push access to them) are logged, recorded in the
    /// report's failure list, and skipped; partial data is a success.
    pub async fn fetch_report(&self, username: &str) -> Result<TrafficReport> {
        let mut pending = self.list_repo_names(username).await?;

        log::info!(target: LOG_TARGET, "Fetching traffic for {} repositories of '{username}'", pending.len());

        let mut repos = Vec::with_capacity(pending.len());
        let mut failures = Vec::new();

        // Process repositories in batches to bound concurrent requests
        while !pending.is_empty() {
            let batch_size = pending.len().min(FETCH_BATCH_SIZE);
            let batch: Vec<String> = pending.drain(..batch_size).collect();

            let batch_futures = batch.iter().map(|repo| self.fetch_repo_traffic(username, repo));
            let batch_results = join_all(batch_futures).await;

            for (repo, result) in batch.iter().zip(batch_results) {
                match result {
                    Ok(traffic) => repos.push(traffic),
                    Err(e) => {
                        log::info!(target: LOG_TARGET, "Skipping repository '{repo}': {e:#}");
                        failures.push(repo.clone());
                    }
                }
            }
        }

        let profile_name = match self.get_profile_name().await {
            Ok(name) => name,
            Err(e) => {
                log::info!(target: LOG_TARGET, "Could not fetch profile name, falling back to '{username}': {e:#}");
                username.to_string()
            }
        };

        log::debug!(target: LOG_TARGET, "Completed traffic fetch for '{username}' ({} ok, {} failed)", repos.len(), failures.len());

        Ok(TrafficReport {
            timestamp: Utc::now(),
            profile_name,
            repos,
            failures,
        })
    }

    /// List the names of all public repositories of a user
    async fn list_repo_names(&self, username: &str) -> Result<Vec<String>> {
        log::debug!(target: LOG_TARGET, "Listing repositories of '{username}'");

        let mut page = self
            .octocrab
            .users(username)
            .repos()
            .per_page(REPO_PAGE_SIZE)
            .send()
            .await
            .into_app_err_with(|| format!("could not list repositories of '{username}'"))?;

        let mut names: Vec<String> = page.take_items().into_iter().map(|repo| repo.name).collect();

        while let Some(next_uri) = &page.next {
            let next_page_result = self.octocrab.get_page::<Repository>(&Some(next_uri.clone())).await?;

            if let Some(mut next_page) = next_page_result {
                names.extend(next_page.take_items().into_iter().map(|repo| repo.name));
                page = next_page;
            } else {
                break;
            }
        }

        Ok(names)
    }

    /// Fetch the views and clones series for a single repository
    async fn fetch_repo_traffic(&self, owner: &str, repo: &str) -> Result<RepoTraffic> {
        let views_url = format!("{API_BASE}/repos/{owner}/{repo}/traffic/views");
        let clones_url = format!("{API_BASE}/repos/{owner}/{repo}/traffic/clones");

        let (views_res, clones_res) = tokio::join!(self.get_json::<ViewsPayload>(&views_url), self.get_json::<ClonesPayload>(&clones_url));

        let views = views_res.map_err(|e| e.enrich_with(|| format!("could not fetch view traffic for repository '{owner}/{repo}'")))?;
        let clones = clones_res.map_err(|e| e.enrich_with(|| format!("could not fetch clone traffic for repository '{owner}/{repo}'")))?;

        Ok(RepoTraffic {
            name: repo.to_string(),
            views: views.views,
            clones: clones.clones,
        })
    }

    /// Fetch the display name of the authenticated user, falling back to the
    /// login when no display name is set
    async fn get_profile_name(&self) -> Result<String> {
        let profile: ProfilePayload = self.get_json(&format!("{API_BASE}/user")).await?;
        Ok(profile.name.filter(|name| !name.is_empty()).unwrap_or(profile.login))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!(target: LOG_TARGET, "Fetching '{url}'");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("GitHub returned {status} for '{url}': {}", body.trim());
        }

        Ok(resp.json().await?)
    }
}
