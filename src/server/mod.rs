//! The HTTP endpoint serving charts.
//!
//! A plain `TcpListener` accept loop with one task per connection; each
//! connection carries a single GET request and is closed after the response.

mod http;
mod params;

pub use http::{RequestHead, Response, parse_request_line};
pub use params::ChartParams;

use crate::Result;
use crate::chart::{self, ChartGeometry, ChartPalette};
use crate::config::Settings;
use crate::themes::ThemeStore;
use crate::traffic::{Provider, TrafficCache, TrafficReport, aggregate_daily};
use core::net::SocketAddr;
use ohno::IntoAppError;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

const LOG_TARGET: &str = "    server";

/// Where `GET /` redirects to.
const PROJECT_URL: &str = "https://github.com/geeknoid/repo-traffic";

/// Upper bound on header lines read before the request is answered; the
/// headers themselves are never routed on.
const MAX_HEADER_LINES: usize = 100;

/// Shared state for request handling.
#[derive(Debug)]
pub struct ServerState {
    pub provider: Provider,
    pub themes: ThemeStore,
    pub cache: TrafficCache,
    pub settings: Settings,
}

/// Run the HTTP server on the given address.
pub async fn run(addr: SocketAddr, state: Arc<ServerState>) -> Result<()> {
    let listener = TcpListener::bind(addr).await.into_app_err_with(|| format!("binding to {addr}"))?;
    log::info!(target: LOG_TARGET, "Listening on http://{addr}");

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let state = Arc::clone(&state);

        let _ = tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, state).await {
                log::warn!(target: LOG_TARGET, "Connection error from {peer_addr}: {e:#}");
            }
        });
    }
}

/// Handle a single connection: one request, one response.
async fn handle_connection(mut stream: TcpStream, state: Arc<ServerState>) -> Result<()> {
    let response = match read_request_head(&mut stream).await {
        Ok(head) => {
            let response = handle_request(&head, &state).await;
            log::debug!(target: LOG_TARGET, "{} {} -> {}", head.method, head.path, response.status());
            response
        }
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Malformed request: {e:#}");
            Response::error(400, "malformed request")
        }
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

async fn read_request_head(stream: &mut TcpStream) -> Result<RequestHead> {
    let mut reader = BufReader::new(stream);

    let mut line = String::new();
    let _ = reader.read_line(&mut line).await?;
    let head = parse_request_line(line.trim_end())?;

    // Drain the header block before answering
    for _ in 0..MAX_HEADER_LINES {
        let mut header = String::new();
        let n = reader.read_line(&mut header).await?;
        if n == 0 || header.trim_end().is_empty() {
            break;
        }
    }

    Ok(head)
}

async fn handle_request(head: &RequestHead, state: &ServerState) -> Response {
    if head.method != "GET" {
        return Response::error(405, "only GET is supported");
    }

    match head.path.as_str() {
        "/" => Response::redirect(PROJECT_URL),
        "/api" => match chart_response(&head.query, state).await {
            Ok(response) => response,
            Err(e) => {
                log::info!(target: LOG_TARGET, "Request failed ({}): {}", e.status, e.message);
                Response::error(e.status, &e.message)
            }
        },
        _ => Response::error(404, "not found"),
    }
}

struct HttpError {
    status: u16,
    message: String,
}

impl HttpError {
    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

async fn chart_response(query: &str, state: &ServerState) -> Result<Response, HttpError> {
    let params = ChartParams::from_query(query).map_err(|e| HttpError::new(400, format!("{e:#}")))?;

    let username = params
        .username
        .clone()
        .or_else(|| state.settings.username.clone())
        .ok_or_else(|| HttpError::new(400, "missing 'username' parameter and no default username is configured"))?;

    // Resolve the theme before touching the network so an unknown name fails
    // fast with a 404.
    let theme = state
        .themes
        .load(&params.theme)
        .map_err(|e| HttpError::new(500, format!("{e:#}")))?
        .ok_or_else(|| HttpError::new(404, format!("theme '{}' not found", params.theme)))?;

    let report = cached_report(state, &username)
        .await
        .map_err(|e| HttpError::new(502, format!("{e:#}")))?;

    let mut exclude: HashSet<String> = params.exclude_repos.iter().cloned().collect();
    exclude.extend(state.settings.exclude_repos.iter().cloned());
    let totals = aggregate_daily(&report, &exclude);

    let palette = ChartPalette::resolve(&theme, &params.colors);
    let geometry = ChartGeometry {
        width: params.width,
        height: params.height,
        radius: params.radius,
        ticks: params.ticks,
    };

    let mut svg = String::new();
    chart::generate(&report.profile_name, &totals, &palette, geometry, &mut svg).map_err(|e| HttpError::new(500, format!("{e:#}")))?;

    Ok(Response::svg(svg))
}

async fn cached_report(state: &ServerState, username: &str) -> Result<Arc<TrafficReport>> {
    if let Some(report) = state.cache.get(username).await {
        return Ok(report);
    }

    let report = state.provider.fetch_report(username).await?;
    Ok(state.cache.put(username, report).await)
}
