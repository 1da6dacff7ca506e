//! Sample workbooks laid out the way the dashboard reads them
//!
//! The real cost-model workbooks are maintained by hand outside this
//! repository. These generated ones carry every sheet the selection tables
//! refer to, so the dashboard can be run and tested without them.

use crate::config::PRIMARY_WORKBOOK;
use crate::layout::{country, primary};
use crate::scenario::{ImportFileMap, ScenarioMap};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::error::Error;
use std::path::{Path, PathBuf};

pub const DEMO_COUNTRIES: &[&str] = &["China", "India", "United States", "Germany", "Viet Nam"];

pub const DEMO_COMPONENTS: &[&str] = &[
    "Materials",
    "Labour",
    "Electricity",
    "Depreciation",
    "Maintenance",
    "Overheads",
    "Transport",
    "Tariffs",
    "Profit margin",
];

pub const DEMO_SEGMENTS: [&str; 4] = ["Polysilicon", "Wafer", "Cell", "Module"];

/// Exporting countries per import workbook
const DEMO_EXPORTERS: &[(&str, &[&str])] = &[
    ("India", &["China", "Viet Nam", "Malaysia"]),
    ("South Africa", &["China", "Thailand"]),
];

/// Writes the primary workbook and one workbook per import country into
/// `dir`, returning the paths written.
///
/// # Examples
/// ```no_run
/// use pv_dashboard::demo::write_demo_workbooks;
///
/// let written = write_demo_workbooks("data").unwrap();
/// for path in written {
///     println!("wrote {}", path.display());
/// }
/// ```
pub fn write_demo_workbooks(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join(PRIMARY_WORKBOOK);
    write_primary_workbook(&path, &ScenarioMap::primary())?;
    written.push(path);

    for (country, file) in ImportFileMap::shipped().files() {
        let exporters = DEMO_EXPORTERS
            .iter()
            .find(|(c, _)| *c == country)
            .map(|(_, e)| *e)
            .unwrap_or(&["China"]);
        let path = dir.join(file);
        write_import_workbook(&path, country, exporters)?;
        written.push(path);
    }

    Ok(written)
}

/// One primary-layout sheet per sheet name in `scenarios`
pub fn write_primary_workbook(path: &Path, scenarios: &ScenarioMap) -> Result<(), Box<dyn Error>> {
    let mut workbook = Workbook::new();

    for (index, sheet_name) in scenarios.sheets().enumerate() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;
        write_primary_sheet(worksheet, sheet_name, index)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// One country-layout sheet per exporter
pub fn write_import_workbook(
    path: &Path,
    importer: &str,
    exporters: &[&str],
) -> Result<(), Box<dyn Error>> {
    let mut workbook = Workbook::new();

    for (index, exporter) in exporters.iter().enumerate() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*exporter)?;
        write_country_sheet(worksheet, importer, exporter, index)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_primary_sheet(
    worksheet: &mut Worksheet,
    sheet_name: &str,
    variant: usize,
) -> Result<(), Box<dyn Error>> {
    let title = [
        "IRENA Solar PV Manufacturing Cost Model",
        sheet_name,
        "Levelised cost breakdown",
        "USD per watt",
    ];
    for (row, text) in primary::TITLE_ROWS.zip(title) {
        worksheet.write_string(row as u32, primary::LABEL_COL as u16, text)?;
    }

    for (i, country) in DEMO_COUNTRIES.iter().enumerate() {
        let col = primary::FIRST_CATEGORY_COL + i;
        worksheet.write_string(primary::HEADER_ROW as u32, col as u16, *country)?;
    }

    for (row, component) in primary::DATA_ROWS.zip(DEMO_COMPONENTS) {
        let r = row - primary::DATA_ROWS.start();
        worksheet.write_string(row as u32, primary::LABEL_COL as u16, *component)?;
        for c in 0..DEMO_COUNTRIES.len() {
            let col = primary::FIRST_CATEGORY_COL + c;
            worksheet.write_number(row as u32, col as u16, demo_value(variant, r, c))?;
        }
    }

    Ok(())
}

fn write_country_sheet(
    worksheet: &mut Worksheet,
    importer: &str,
    exporter: &str,
    variant: usize,
) -> Result<(), Box<dyn Error>> {
    let (title_row, title_col) = country::TITLE_CELL;
    let title = format!("Imports to {} from {}", importer, exporter);
    worksheet.write_string(title_row as u32, title_col as u16, &title)?;

    for (col, segment) in country::CATEGORY_COLS.zip(DEMO_SEGMENTS) {
        worksheet.write_string(country::HEADER_ROW as u32, col as u16, segment)?;
    }

    for (row, component) in country::DATA_ROWS.zip(DEMO_COMPONENTS) {
        let r = row - country::DATA_ROWS.start();
        worksheet.write_string(row as u32, country::LABEL_COL as u16, *component)?;
        for col in country::CATEGORY_COLS {
            let c = col - country::CATEGORY_COLS.start();
            worksheet.write_number(row as u32, col as u16, demo_value(variant + 3, r, c))?;
        }
    }

    Ok(())
}

/// Deterministic, plausible-looking cost figure in USD per watt
fn demo_value(variant: usize, row: usize, col: usize) -> f64 {
    let base = 0.004 + 0.003 * ((row * 7 + col * 3 + variant * 5) % 11) as f64;
    (base * 1000.0).round() / 1000.0
}
