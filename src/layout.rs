//! Fixed-offset chart layouts
//!
//! The workbooks are not self-describing: every chart sheet follows one of
//! two hand-maintained conventions and the extractors read cells at fixed
//! positions. Shifting any of the offsets below silently produces a wrong
//! chart, so they are kept as named constants per layout.

use crate::cell::CellValue;
use crate::error::{DashboardError, Result};
use crate::spreadsheet::Sheet;
use log::warn;
use serde::Serialize;
use std::ops::RangeInclusive;

/// Primary scenario sheets
pub mod primary {
    use std::ops::RangeInclusive;

    /// Rows holding the title segments, in column 0
    pub const TITLE_ROWS: RangeInclusive<usize> = 0..=3;
    pub const TITLE_SEPARATOR: &str = " | ";
    pub const HEADER_ROW: usize = 5;
    pub const FIRST_CATEGORY_COL: usize = 1;
    pub const DATA_ROWS: RangeInclusive<usize> = 6..=17;
    pub const LABEL_COL: usize = 0;
}

/// Country comparison sheets
pub mod country {
    use std::ops::RangeInclusive;

    pub const TITLE_CELL: (usize, usize) = (0, 0);
    pub const HEADER_ROW: usize = 1;
    pub const CATEGORY_COLS: RangeInclusive<usize> = 1..=4;
    pub const DATA_ROWS: RangeInclusive<usize> = 3..=13;
    pub const LABEL_COL: usize = 0;
}

/// One data row of a chart sheet
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    /// Aligned with the categories; `None` marks a missing cell
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Series {
            label: label.into(),
            values,
        }
    }
}

/// What a layout pulls out of a sheet
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ExtractedChart {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

/// A sheet layout convention that yields chart data
pub trait ChartLayout {
    fn extract(&self, sheet: &Sheet) -> Result<ExtractedChart>;
}

/// Title in rows 0-3, categories in row 5, series in rows 6-17
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimaryLayout;

/// Title in `A1`, four categories in row 1, series in rows 3-13
#[derive(Clone, Copy, Debug, Default)]
pub struct CountryLayout;

impl ChartLayout for PrimaryLayout {
    fn extract(&self, sheet: &Sheet) -> Result<ExtractedChart> {
        use primary::*;

        let title = TITLE_ROWS
            .filter_map(|r| sheet.get(r, LABEL_COL).as_label())
            .collect::<Vec<_>>()
            .join(TITLE_SEPARATOR);

        if sheet.rows <= HEADER_ROW {
            return Err(malformed(sheet, format!("no header row {}", HEADER_ROW + 1)));
        }

        // Categories run up to the last non-empty header cell
        let last_category_col = (FIRST_CATEGORY_COL..sheet.cols)
            .rev()
            .find(|&c| !sheet.get(HEADER_ROW, c).is_empty());
        let Some(last_category_col) = last_category_col else {
            return Err(malformed(sheet, "header row has no categories".to_string()));
        };
        let category_cols = FIRST_CATEGORY_COL..=last_category_col;
        let categories = header_labels(sheet, HEADER_ROW, category_cols.clone());

        let rows = clip_rows(DATA_ROWS, sheet.rows);
        if rows.is_empty() {
            return Err(malformed(sheet, "no data rows".to_string()));
        }
        let series = read_series(sheet, rows, LABEL_COL, category_cols)?;

        Ok(ExtractedChart {
            title,
            categories,
            series,
        })
    }
}

impl ChartLayout for CountryLayout {
    fn extract(&self, sheet: &Sheet) -> Result<ExtractedChart> {
        use country::*;

        let title = sheet
            .get(TITLE_CELL.0, TITLE_CELL.1)
            .as_label()
            .unwrap_or_default();

        if sheet.rows <= HEADER_ROW {
            return Err(malformed(sheet, format!("no header row {}", HEADER_ROW + 1)));
        }
        if sheet.cols <= *CATEGORY_COLS.end() {
            return Err(malformed(
                sheet,
                format!(
                    "expected {} category columns, found {}",
                    CATEGORY_COLS.clone().count(),
                    sheet.cols.saturating_sub(*CATEGORY_COLS.start())
                ),
            ));
        }
        let categories = header_labels(sheet, HEADER_ROW, CATEGORY_COLS);

        let rows = clip_rows(DATA_ROWS, sheet.rows);
        if rows.is_empty() {
            return Err(malformed(sheet, "no data rows".to_string()));
        }
        let series = read_series(sheet, rows, LABEL_COL, CATEGORY_COLS)?;

        Ok(ExtractedChart {
            title,
            categories,
            series,
        })
    }
}

/// Extracts a sheet laid out by the primary scenario convention.
pub fn extract_primary(sheet: &Sheet) -> Result<ExtractedChart> {
    PrimaryLayout.extract(sheet)
}

/// Extracts a sheet laid out by the country comparison convention.
pub fn extract_secondary(sheet: &Sheet) -> Result<ExtractedChart> {
    CountryLayout.extract(sheet)
}

fn header_labels(sheet: &Sheet, row: usize, cols: RangeInclusive<usize>) -> Vec<String> {
    cols.map(|c| sheet.get(row, c).as_label().unwrap_or_default())
        .collect()
}

fn clip_rows(rows: RangeInclusive<usize>, height: usize) -> RangeInclusive<usize> {
    let end = (*rows.end()).min(height.saturating_sub(1));
    if height == 0 || end < *rows.start() {
        // an empty inclusive range
        return 1..=0;
    }
    *rows.start()..=end
}

fn read_series(
    sheet: &Sheet,
    rows: RangeInclusive<usize>,
    label_col: usize,
    value_cols: RangeInclusive<usize>,
) -> Result<Vec<Series>> {
    let mut series = Vec::new();
    for r in rows {
        let label = sheet.get(r, label_col).as_label().unwrap_or_default();
        let mut values = Vec::with_capacity(value_cols.clone().count());
        for c in value_cols.clone() {
            values.push(numeric_cell(sheet, r, c)?);
        }
        series.push(Series { label, values });
    }
    Ok(series)
}

fn numeric_cell(sheet: &Sheet, row: usize, col: usize) -> Result<Option<f64>> {
    match sheet.get(row, col) {
        CellValue::Empty => Ok(None),
        CellValue::Number(n) => Ok(Some(*n)),
        CellValue::Error(e) => {
            warn!(
                "sheet `{}`: {} at row {} column {} treated as missing",
                sheet.name,
                e,
                row + 1,
                col + 1
            );
            Ok(None)
        }
        other => Err(malformed(
            sheet,
            format!(
                "expected a number at row {} column {}, found `{}`",
                row + 1,
                col + 1,
                other
            ),
        )),
    }
}

fn malformed(sheet: &Sheet, message: String) -> DashboardError {
    DashboardError::MalformedLayout(format!("sheet `{}`: {}", sheet.name, message))
}
