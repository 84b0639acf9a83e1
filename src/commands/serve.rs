use super::common::{Common, CommonArgs};
use clap::Parser;
use core::net::SocketAddr;
use core::time::Duration;
use repo_traffic::Result;
use repo_traffic::server::{self, ServerState};
use repo_traffic::traffic::TrafficCache;
use std::sync::Arc;

const SECONDS_PER_MINUTE: u64 = 60;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on [default: from settings]
    #[arg(long, short = 'l', value_name = "ADDR")]
    pub listen: Option<SocketAddr>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_serve(args: &ServeArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    let addr = args.listen.unwrap_or(common.settings.listen);
    let cache_ttl = Duration::from_secs(common.settings.cache_ttl_minutes * SECONDS_PER_MINUTE);

    let state = Arc::new(ServerState {
        provider: common.provider,
        themes: common.themes,
        cache: TrafficCache::new(cache_ttl),
        settings: common.settings,
    });

    server::run(addr, state).await
}
