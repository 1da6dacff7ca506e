#![cfg(not(tarpaulin_include))]
use pv_dashboard::demo::write_demo_workbooks;
use std::env;

/// Writes sample workbooks for every sheet the dashboard can show
///
/// Usage: `demo_data [dir]` (default `data`)
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let dir = args.get(1).map(String::as_str).unwrap_or("data");

    for path in write_demo_workbooks(dir)? {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
