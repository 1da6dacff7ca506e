use crate::error::{DashboardError, Result};
use serde::Serialize;

/// Display label → sheet name, for one category
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct SubScenario {
    pub label: String,
    pub sheet: String,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Category {
    pub name: String,
    pub scenarios: Vec<SubScenario>,
}

/// Two-level selection table of the primary workbook
///
/// Categories and their sub-scenarios keep the order they were authored in,
/// which is also the order of the dropdowns. Display labels and sheet names
/// are unrelated strings; only this table connects them.
#[derive(Clone, Serialize, Debug, PartialEq, Default)]
pub struct ScenarioMap {
    categories: Vec<Category>,
}

/// The shipped table for `Dashboard data.xlsx`
const PRIMARY_SCENARIOS: &[(&str, &[(&str, &str)])] = &[
    (
        "Domestic manufacturing",
        &[
            (
                "Domestic manufacturing - 2025: graph 1",
                "Domestic manufacturing in 2025",
            ),
            (
                "Domestic manufacturing - 2030: graph 2",
                "Domestic manufacturing in 2030",
            ),
        ],
    ),
    (
        "Imported from China",
        &[
            (
                "Imported - China - Polysilicon: graph 3",
                "Imported Polysilicon from China",
            ),
            (
                "Imported - China - Wafer: graph 4",
                "Imported Wafer from China",
            ),
            ("Imported - China - Cell: graph 5", "Imported Cell from China"),
            (
                "Imported - China - Module: graph 6",
                "Imported Module from China",
            ),
        ],
    ),
    (
        "Imported from South-East Asia",
        &[
            ("Imported - SEA - Cell: graph 7", "Imported Cell from SEA"),
            ("Imported - SEA - Module: graph 8", "Imported Module from SEA"),
        ],
    ),
];

/// Import country → workbook file, for the country comparison charts
const IMPORT_FILES: &[(&str, &str)] = &[
    ("India", "India imports.xlsx"),
    ("South Africa", "South Africa imports.xlsx"),
];

impl ScenarioMap {
    pub fn from_table(table: &[(&str, &[(&str, &str)])]) -> Self {
        let categories = table
            .iter()
            .map(|(name, scenarios)| Category {
                name: name.to_string(),
                scenarios: scenarios
                    .iter()
                    .map(|(label, sheet)| SubScenario {
                        label: label.to_string(),
                        sheet: sheet.to_string(),
                    })
                    .collect(),
            })
            .collect();
        ScenarioMap { categories }
    }

    /// The table shipped with the primary workbook
    pub fn primary() -> Self {
        Self::from_table(PRIMARY_SCENARIOS)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Sub-scenario labels of `category`, in authored order.
    pub fn sub_scenarios(&self, category: &str) -> Result<Vec<&str>> {
        Ok(self
            .category(category)?
            .scenarios
            .iter()
            .map(|s| s.label.as_str())
            .collect())
    }

    /// Sheet name for a `(category, sub-scenario)` selection.
    ///
    /// # Errors
    /// * `UnknownCategory` if `category` is not in the table
    /// * `UnknownSubScenario` if the category has no such sub-scenario
    ///
    /// # Examples
    /// ```
    /// use pv_dashboard::scenario::ScenarioMap;
    ///
    /// let map = ScenarioMap::primary();
    /// let sheet = map
    ///     .resolve("Imported from China", "Imported - China - Wafer: graph 4")
    ///     .unwrap();
    /// assert_eq!(sheet, "Imported Wafer from China");
    /// ```
    pub fn resolve(&self, category: &str, sub_scenario: &str) -> Result<&str> {
        self.category(category)?
            .scenarios
            .iter()
            .find(|s| s.label == sub_scenario)
            .map(|s| s.sheet.as_str())
            .ok_or_else(|| DashboardError::UnknownSubScenario {
                category: category.to_string(),
                sub_scenario: sub_scenario.to_string(),
            })
    }

    /// Sheets referenced by the table that are absent from `sheet_names`.
    pub fn check_against(&self, sheet_names: &[String]) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|c| c.scenarios.iter())
            .filter(|s| !sheet_names.iter().any(|name| name == &s.sheet))
            .map(|s| s.sheet.clone())
            .collect()
    }

    /// Every sheet name the table refers to, in table order
    pub fn sheets(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.scenarios.iter())
            .map(|s| s.sheet.as_str())
    }

    fn category(&self, category: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .ok_or_else(|| DashboardError::UnknownCategory(category.to_string()))
    }
}

/// Import country → workbook file name
///
/// The exporters offered for a country are the sheet names of its workbook,
/// so unlike [`ScenarioMap`] the label a user picks is the sheet name itself.
#[derive(Clone, Serialize, Debug, PartialEq, Default)]
pub struct ImportFileMap {
    files: Vec<(String, String)>,
}

impl ImportFileMap {
    pub fn from_table(table: &[(&str, &str)]) -> Self {
        ImportFileMap {
            files: table
                .iter()
                .map(|(country, file)| (country.to_string(), file.to_string()))
                .collect(),
        }
    }

    pub fn shipped() -> Self {
        Self::from_table(IMPORT_FILES)
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(country, _)| country.as_str())
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(c, f)| (c.as_str(), f.as_str()))
    }

    /// File name of the workbook for `country`.
    pub fn resolve(&self, country: &str) -> Result<&str> {
        self.files
            .iter()
            .find(|(c, _)| c == country)
            .map(|(_, file)| file.as_str())
            .ok_or_else(|| DashboardError::UnknownCategory(country.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_wafer_from_china() {
        let map = ScenarioMap::primary();
        assert_eq!(
            map.resolve("Imported from China", "Imported - China - Wafer: graph 4")
                .unwrap(),
            "Imported Wafer from China"
        );
    }

    #[test]
    fn keeps_authored_order() {
        let map = ScenarioMap::primary();
        let categories: Vec<_> = map.categories().collect();
        assert_eq!(
            categories,
            vec![
                "Domestic manufacturing",
                "Imported from China",
                "Imported from South-East Asia"
            ]
        );
        let first = map.sub_scenarios("Imported from China").unwrap();
        assert_eq!(first[0], "Imported - China - Polysilicon: graph 3");
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn unknown_keys_are_explicit_errors() {
        let map = ScenarioMap::primary();
        assert!(matches!(
            map.resolve("Nowhere", "x"),
            Err(DashboardError::UnknownCategory(c)) if c == "Nowhere"
        ));
        assert!(matches!(
            map.resolve("Imported from China", "Imported - China - Glass"),
            Err(DashboardError::UnknownSubScenario { .. })
        ));
        assert!(map.sub_scenarios("Nowhere").is_err());
    }

    #[test]
    fn sheet_names_fit_excel_limit() {
        for sheet in ScenarioMap::primary().sheets() {
            assert!(sheet.chars().count() <= 31, "{sheet} is too long for a sheet name");
        }
    }

    #[test]
    fn reports_sheets_missing_from_workbook() {
        let map = ScenarioMap::primary();
        let present = vec!["Domestic manufacturing in 2025".to_string()];
        let missing = map.check_against(&present);
        assert!(!missing.contains(&"Domestic manufacturing in 2025".to_string()));
        assert!(missing.contains(&"Imported Wafer from China".to_string()));
    }

    #[test]
    fn import_files() {
        let files = ImportFileMap::shipped();
        assert_eq!(files.resolve("India").unwrap(), "India imports.xlsx");
        assert!(matches!(
            files.resolve("Atlantis"),
            Err(DashboardError::UnknownCategory(_))
        ));
    }
}
