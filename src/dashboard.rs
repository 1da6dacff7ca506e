use crate::chart::{ChartSpec, ColorMap, DEFAULT_COLOR_MAP};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::layout::{ChartLayout, CountryLayout, PrimaryLayout};
use crate::loader::SheetLoader;
use crate::scenario::{ImportFileMap, ScenarioMap};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

/// The page logic behind both charts
///
/// Owns the sheet loader (and with it every cached sheet) plus the static
/// selection tables. Each chart is built independently, so a failure in
/// one never affects the other.
#[derive(Debug)]
pub struct Dashboard {
    data_dir: PathBuf,
    primary_workbook: String,
    loader: SheetLoader,
    scenarios: ScenarioMap,
    imports: ImportFileMap,
    colors: ColorMap,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        Dashboard {
            data_dir: config.data_dir.clone(),
            primary_workbook: config.primary_workbook.clone(),
            loader: SheetLoader::new(),
            scenarios: ScenarioMap::primary(),
            imports: ImportFileMap::shipped(),
            colors: DEFAULT_COLOR_MAP.clone(),
        }
    }

    pub fn with_tables(mut self, scenarios: ScenarioMap, imports: ImportFileMap) -> Self {
        self.scenarios = scenarios;
        self.imports = imports;
        self
    }

    pub fn scenarios(&self) -> &ScenarioMap {
        &self.scenarios
    }

    pub fn imports(&self) -> &ImportFileMap {
        &self.imports
    }

    pub fn loader(&self) -> &SheetLoader {
        &self.loader
    }

    pub fn primary_path(&self) -> PathBuf {
        self.data_dir.join(&self.primary_workbook)
    }

    /// Stacked bar chart for a primary `(category, scenario)` selection
    pub fn primary_chart(&self, category: &str, scenario: &str) -> Result<ChartSpec> {
        let sheet_name = self.scenarios.resolve(category, scenario)?;
        let sheet = self.loader.read_sheet(self.primary_path(), sheet_name)?;
        let extracted = PrimaryLayout.extract(&sheet)?;

        Ok(ChartSpec::from_extracted(&extracted, &self.colors)
            .with_title(sheet_name)
            .with_description(format!("The scenario selected is {}", extracted.title))
            .with_axes("Country", "Value", "Component"))
    }

    /// Exporting countries available for `country`: its workbook's sheets
    pub fn exporters(&self, country: &str) -> Result<Arc<Vec<String>>> {
        let file = self.imports.resolve(country)?;
        self.loader.list_sheets(self.data_dir.join(file))
    }

    /// Stacked bar chart comparing what `country` imports from `exporter`
    pub fn country_chart(&self, country: &str, exporter: &str) -> Result<ChartSpec> {
        let file = self.imports.resolve(country)?;
        let sheet = self.loader.read_sheet(self.data_dir.join(file), exporter)?;
        let extracted = CountryLayout.extract(&sheet)?;

        Ok(ChartSpec::from_extracted(&extracted, &self.colors)
            .with_title(exporter)
            .with_description(extracted.title.clone())
            .with_axes("Segment", "Value", "Component"))
    }

    /// Logs every sheet the scenario table expects but the primary
    /// workbook lacks. Returns the missing names.
    pub fn check_workbooks(&self) -> Vec<String> {
        let path = self.primary_path();
        match self.loader.list_sheets(&path) {
            Ok(names) => {
                let missing = self.scenarios.check_against(&names);
                for sheet in &missing {
                    warn!("{} has no sheet `{}`", path.display(), sheet);
                }
                if missing.is_empty() {
                    info!(
                        "{} provides all {} scenario sheets",
                        path.display(),
                        self.scenarios.sheets().count()
                    );
                }
                missing
            }
            Err(e) => {
                warn!("cannot check scenario sheets: {}", e);
                self.scenarios.sheets().map(str::to_string).collect()
            }
        }
    }
}
