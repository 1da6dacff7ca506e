#![allow(dead_code)]

use pv_dashboard::config::DashboardConfig;
use pv_dashboard::dashboard::Dashboard;
use pv_dashboard::demo::write_demo_workbooks;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A cell to write into a fixture sheet
pub enum Value {
    Text(&'static str),
    Num(f64),
}

/// Writes one workbook with the given sheets, each a list of
/// `(row, col, value)` cells.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<(u32, u16, Value)>)]) {
    let mut workbook = Workbook::new();
    for (name, cells) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet name");
        for (row, col, value) in cells {
            match value {
                Value::Text(s) => worksheet.write_string(*row, *col, *s).expect("write text"),
                Value::Num(n) => worksheet.write_number(*row, *col, *n).expect("write number"),
            };
        }
    }
    workbook.save(path).expect("save workbook");
}

/// A temp directory holding the demo workbooks, and a dashboard over it
pub fn demo_dashboard() -> (TempDir, Dashboard) {
    let dir = tempfile::tempdir().expect("temp dir");
    write_demo_workbooks(dir.path()).expect("demo workbooks");
    let config = DashboardConfig {
        data_dir: dir.path().to_path_buf(),
        static_dir: dir.path().to_path_buf(),
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::new(&config);
    (dir, dashboard)
}

pub fn temp_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
