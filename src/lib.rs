/*!
# PV Manufacturing Cost Dashboard

A web dashboard that presents pre-computed solar PV manufacturing cost
breakdowns, read from spreadsheet workbooks, as stacked bar charts.

## Overview

The cost figures themselves are produced elsewhere and maintained by hand in
workbooks. This crate only reads fixed regions of those workbooks and turns
them into charts, so the interesting part is the contract between the two:
which sheet a selection maps to, and where on that sheet the title, the
category labels and the numbers live.

## Architecture

Data flows through four layers:

1. **Sheet Loader** (`loader`, `spreadsheet`, `cell`) - opens a workbook with
   calamine and copies a sheet into a positional grid. Results are memoized
   per path and per `(path, sheet)`.
2. **Layout Extractor** (`layout`) - reads the title block, the category
   header row and the data rows at fixed offsets. Two conventions exist:
   the primary scenario sheets and the country comparison sheets.
3. **Scenario Resolver** (`scenario`) - maps a two-level dropdown selection
   to a sheet name, and an import country to its workbook file.
4. **Chart Builder** (`chart`) - turns series into stacked bar layers and
   colors them by component name.

On top of those, `dashboard` wires the layers together and the `web`
feature adds the server (`app`, `page`) and SVG export (`graph`).

## Missing values

An empty numeric cell stays `None` all the way to the chart. The browser
chart leaves a gap for it and the SVG export draws no segment; neither
treats it as zero.

## REST API Endpoints

- `/` - The dashboard page
- `/api/scenarios` - Both selection tables
- `/api/exporters?country=` - Exporting countries for an import country
- `/api/chart/primary?category=&scenario=` - Primary chart as JSON
- `/api/chart/country?country=&exporter=` - Country chart as JSON
- `/chart/primary.svg`, `/chart/country.svg` - The same charts as SVG
*/

pub mod cell;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod layout;
pub mod loader;
pub mod scenario;
pub mod spreadsheet;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod graph;
#[cfg(feature = "web")]
pub mod page;

/// Re-export the types most callers need
pub use cell::CellValue;
pub use chart::{ChartSpec, ColorMap, DEFAULT_COLOR, build_stacked_bars};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::DashboardError;
pub use layout::{ChartLayout, CountryLayout, ExtractedChart, PrimaryLayout, Series};
pub use loader::SheetLoader;
pub use scenario::{ImportFileMap, ScenarioMap};
pub use spreadsheet::Sheet;
