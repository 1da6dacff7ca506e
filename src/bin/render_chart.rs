#![cfg(not(tarpaulin_include))]
use pv_dashboard::config::DashboardConfig;
use pv_dashboard::dashboard::Dashboard;
use pv_dashboard::graph::{GraphOptions, render_stacked_svg};
use std::env;

/// Renders one primary scenario chart to an SVG file
///
/// Usage: `render_chart <data_dir> <category> <scenario> <out.svg>`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        return Err("usage: render_chart <data_dir> <category> <scenario> <out.svg>".into());
    }

    let config = DashboardConfig::from_args(&args[..2]);
    let dashboard = Dashboard::new(&config);
    let chart = dashboard.primary_chart(&args[2], &args[3])?;
    let svg = render_stacked_svg(&chart, &GraphOptions::default())?;
    std::fs::write(&args[4], svg)?;

    println!("Rendered `{}` to {}", chart.title, args[4]);
    Ok(())
}
