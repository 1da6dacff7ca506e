#![cfg(feature = "web")]
//! What the dashboard page shows for a given selection
//!
//! Each panel is built on its own: when one chart fails, its panel carries
//! the error message and the other panel is unaffected.

use crate::chart::ChartSpec;
use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use log::error;
use serde::{Deserialize, Serialize};

/// Query string of the dashboard page. Empty values count as absent.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PageQuery {
    pub category: Option<String>,
    pub scenario: Option<String>,
    pub country: Option<String>,
    pub exporter: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct PageContext {
    pub primary: Panel,
    pub country: Panel,
}

#[derive(Serialize, Debug)]
pub struct Panel {
    pub id: &'static str,
    pub heading: &'static str,
    pub selectors: Vec<Selector>,
    pub chart: Option<ChartSpec>,
    pub chart_json: Option<String>,
    pub svg_link: Option<String>,
    pub error: Option<String>,
}

/// A dropdown. Changing it resets the dependent dropdown named by `clears`.
#[derive(Serialize, Debug)]
pub struct Selector {
    pub name: &'static str,
    pub label: &'static str,
    pub clears: Option<&'static str>,
    pub options: Vec<SelectOption>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

impl Selector {
    fn new<'a>(
        name: &'static str,
        label: &'static str,
        clears: Option<&'static str>,
        options: impl IntoIterator<Item = &'a str>,
        selected: &str,
    ) -> Self {
        Selector {
            name,
            label,
            clears,
            options: options
                .into_iter()
                .map(|value| SelectOption {
                    value: value.to_string(),
                    selected: value == selected,
                })
                .collect(),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.selected)
            .map(|o| o.value.as_str())
    }
}

impl Panel {
    fn new(id: &'static str, heading: &'static str) -> Self {
        Panel {
            id,
            heading,
            selectors: Vec::new(),
            chart: None,
            chart_json: None,
            svg_link: None,
            error: None,
        }
    }

    fn failed(mut self, err: DashboardError) -> Self {
        error!("{} chart: {}", self.id, err);
        self.error = Some(err.to_string());
        self
    }

    fn show(mut self, chart: ChartSpec, svg_link: String) -> Self {
        match chart.to_script_json() {
            Ok(json) => {
                self.chart_json = Some(json);
                self.chart = Some(chart);
                self.svg_link = Some(svg_link);
                self
            }
            Err(e) => self.failed(DashboardError::Render(e.to_string())),
        }
    }
}

pub fn build_page(dashboard: &Dashboard, query: &PageQuery) -> PageContext {
    PageContext {
        primary: primary_panel(
            dashboard,
            chosen(&query.category),
            chosen(&query.scenario),
        ),
        country: country_panel(dashboard, chosen(&query.country), chosen(&query.exporter)),
    }
}

fn chosen(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn primary_panel(dashboard: &Dashboard, category: Option<&str>, scenario: Option<&str>) -> Panel {
    let mut panel = Panel::new("primary", "Manufacturing cost by scenario");
    let scenarios = dashboard.scenarios();

    let Some(category) = category.or_else(|| scenarios.categories().next()) else {
        return panel.failed(DashboardError::UnknownCategory(String::new()));
    };
    panel.selectors.push(Selector::new(
        "category",
        "Select a Scenario:",
        Some("scenario"),
        scenarios.categories(),
        category,
    ));

    let sub_scenarios = match scenarios.sub_scenarios(category) {
        Ok(subs) => subs,
        Err(e) => return panel.failed(e),
    };
    let Some(scenario) = scenario.or_else(|| sub_scenarios.first().copied()) else {
        return panel.failed(DashboardError::UnknownSubScenario {
            category: category.to_string(),
            sub_scenario: String::new(),
        });
    };
    panel.selectors.push(Selector::new(
        "scenario",
        "Select a Sub-scenario:",
        None,
        sub_scenarios.iter().copied(),
        scenario,
    ));

    match dashboard.primary_chart(category, scenario) {
        Ok(chart) => {
            let link = format!(
                "/chart/primary.svg?category={}&scenario={}",
                urlencoding::encode(category),
                urlencoding::encode(scenario)
            );
            panel.show(chart, link)
        }
        Err(e) => panel.failed(e),
    }
}

fn country_panel(dashboard: &Dashboard, country: Option<&str>, exporter: Option<&str>) -> Panel {
    let mut panel = Panel::new("country", "Import costs by exporting country");
    let imports = dashboard.imports();

    let Some(country) = country.or_else(|| imports.countries().next()) else {
        return panel.failed(DashboardError::UnknownCategory(String::new()));
    };
    panel.selectors.push(Selector::new(
        "country",
        "Select an Importing Country:",
        Some("exporter"),
        imports.countries(),
        country,
    ));

    let exporters = match dashboard.exporters(country) {
        Ok(names) => names,
        Err(e) => return panel.failed(e),
    };
    let Some(exporter) = exporter.or_else(|| exporters.first().map(String::as_str)) else {
        return panel.failed(DashboardError::MalformedLayout(format!(
            "the workbook for {} has no sheets",
            country
        )));
    };
    panel.selectors.push(Selector::new(
        "exporter",
        "Select an Exporting Country:",
        None,
        exporters.iter().map(String::as_str),
        exporter,
    ));

    match dashboard.country_chart(country, exporter) {
        Ok(chart) => {
            let link = format!(
                "/chart/country.svg?country={}&exporter={}",
                urlencoding::encode(country),
                urlencoding::encode(exporter)
            );
            panel.show(chart, link)
        }
        Err(e) => panel.failed(e),
    }
}
