#![cfg(not(tarpaulin_include))]

use pv_dashboard::app;
use pv_dashboard::config::DashboardConfig;
use std::env;

/// Main entry point for the dashboard web server
///
/// # Arguments
/// * `[data_dir]` - Directory holding the workbooks (default `data`)
/// * `[bind_addr]` - Address to listen on (default `127.0.0.1:3000`)
///
/// Log verbosity follows `RUST_LOG` and defaults to `info`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = DashboardConfig::from_args(&args);

    app::run(config).await
}
