use crate::layout::{ExtractedChart, Series};
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

/// Color of any series whose label has no entry in the color map
pub const DEFAULT_COLOR: &str = "#7F7F7F";

/// Cost components and their colors, as used across the dashboard
const COMPONENT_COLORS: &[(&str, &str)] = &[
    ("Polysilicon", "#1F77B4"),
    ("Wafer", "#FF7F0E"),
    ("Cell", "#2CA02C"),
    ("Module", "#9467BD"),
    ("Materials", "#8C564B"),
    ("Labour", "#DC143C"),
    ("Electricity", "#FFD700"),
    ("Depreciation", "#17BECF"),
    ("Maintenance", "#BCBD22"),
    ("Overheads", "#E377C2"),
    ("Transport", "#0073AB"),
    ("Tariffs", "#58585A"),
    ("Profit margin", "#2E8B57"),
];

lazy_static! {
    /// The shipped component palette
    pub static ref DEFAULT_COLOR_MAP: ColorMap = ColorMap::from_pairs(COMPONENT_COLORS);
}

/// Series label → display color, matched on the exact label
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorMap {
    colors: HashMap<String, String>,
}

impl ColorMap {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        ColorMap {
            colors: pairs
                .iter()
                .map(|(label, color)| (label.to_string(), color.to_string()))
                .collect(),
        }
    }

    /// Color for `label`, or [`DEFAULT_COLOR`] when it is not mapped
    pub fn color_for(&self, label: &str) -> &str {
        self.colors
            .get(label)
            .map(String::as_str)
            .unwrap_or(DEFAULT_COLOR)
    }
}

/// One stacked layer: a series drawn across every category
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct BarLayer {
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub color: String,
}

/// A drawn piece of a single bar
#[derive(Clone, Debug, PartialEq)]
pub struct StackSegment {
    pub name: String,
    pub base: f64,
    pub top: f64,
    pub color: String,
}

/// Everything needed to draw one stacked bar chart
///
/// `layers` are in stacking order: the first layer sits at the bottom of
/// each bar. The struct serializes to the JSON consumed by the browser.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub description: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub legend_title: String,
    pub categories: Vec<String>,
    pub layers: Vec<BarLayer>,
}

/// Builds one layer per series, in input order
///
/// Values are copied as they are: nothing is sorted, filtered or summed,
/// and missing values stay missing.
///
/// # Examples
/// ```
/// use pv_dashboard::chart::{build_stacked_bars, DEFAULT_COLOR_MAP};
/// use pv_dashboard::layout::Series;
///
/// let spec = build_stacked_bars(
///     &["China".to_string()],
///     &[Series::new("Labour", vec![Some(0.02)])],
///     &DEFAULT_COLOR_MAP,
/// );
/// assert_eq!(spec.layers[0].color, "#DC143C");
/// ```
pub fn build_stacked_bars(categories: &[String], series: &[Series], colors: &ColorMap) -> ChartSpec {
    let layers = series
        .iter()
        .map(|s| BarLayer {
            name: s.label.clone(),
            values: s.values.clone(),
            color: colors.color_for(&s.label).to_string(),
        })
        .collect();

    ChartSpec {
        title: String::new(),
        description: String::new(),
        x_axis_title: String::new(),
        y_axis_title: String::new(),
        legend_title: String::new(),
        categories: categories.to_vec(),
        layers,
    }
}

impl ChartSpec {
    pub fn from_extracted(chart: &ExtractedChart, colors: &ColorMap) -> Self {
        build_stacked_bars(&chart.categories, &chart.series, colors)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_axes(
        mut self,
        x_axis: impl Into<String>,
        y_axis: impl Into<String>,
        legend: impl Into<String>,
    ) -> Self {
        self.x_axis_title = x_axis.into();
        self.y_axis_title = y_axis.into();
        self.legend_title = legend.into();
        self
    }

    /// Segments of the bar at `category`, bottom to top.
    ///
    /// Positive values stack upward from zero and negative values downward,
    /// each in layer order. Missing values draw nothing and do not move the
    /// stack.
    pub fn stack(&self, category: usize) -> Vec<StackSegment> {
        let mut up = 0.0;
        let mut down = 0.0;
        let mut segments = Vec::new();

        for layer in &self.layers {
            let Some(value) = layer.values.get(category).copied().flatten() else {
                continue;
            };
            let (base, top) = if value >= 0.0 {
                let base = up;
                up += value;
                (base, up)
            } else {
                let base = down;
                down += value;
                (base, down)
            };
            segments.push(StackSegment {
                name: layer.name.clone(),
                base,
                top,
                color: layer.color.clone(),
            });
        }

        segments
    }

    /// Lowest and highest stacked value over all bars, always spanning zero
    pub fn value_bounds(&self) -> (f64, f64) {
        (0..self.categories.len())
            .flat_map(|c| self.stack(c))
            .fold((0.0_f64, 0.0_f64), |(lo, hi), s| {
                (lo.min(s.top).min(s.base), hi.max(s.top).max(s.base))
            })
    }

    /// JSON for embedding in a `<script>` block
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_category() -> Vec<String> {
        vec!["China".to_string()]
    }

    #[test]
    fn single_value_gives_single_segment() {
        let spec = build_stacked_bars(
            &one_category(),
            &[Series::new("Wafer", vec![Some(0.3)])],
            &DEFAULT_COLOR_MAP,
        );
        let stack = spec.stack(0);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack[0].base, 0.0);
        assert_eq!(stack[0].top, 0.3);
    }

    #[test]
    fn first_series_is_at_the_bottom() {
        let spec = build_stacked_bars(
            &one_category(),
            &[
                Series::new("A", vec![Some(1.0)]),
                Series::new("B", vec![Some(2.0)]),
            ],
            &DEFAULT_COLOR_MAP,
        );
        let stack = spec.stack(0);
        assert_eq!(stack[0].name, "A");
        assert_eq!((stack[0].base, stack[0].top), (0.0, 1.0));
        assert_eq!(stack[1].name, "B");
        assert_eq!((stack[1].base, stack[1].top), (1.0, 3.0));
    }

    #[test]
    fn colors_fall_back_to_default() {
        let colors = &*DEFAULT_COLOR_MAP;
        assert_eq!(colors.color_for("Labour"), "#DC143C");
        assert_eq!(colors.color_for("Unknown Thing"), DEFAULT_COLOR);
        // exact match only
        assert_eq!(colors.color_for("labour"), DEFAULT_COLOR);
    }

    #[test]
    fn missing_values_are_omitted_not_zeroed() {
        let spec = build_stacked_bars(
            &one_category(),
            &[
                Series::new("A", vec![Some(1.0)]),
                Series::new("B", vec![None]),
                Series::new("C", vec![Some(2.0)]),
            ],
            &DEFAULT_COLOR_MAP,
        );
        let names: Vec<_> = spec.stack(0).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(spec.layers[1].values, vec![None]);
    }

    #[test]
    fn negative_values_stack_below_zero() {
        let spec = build_stacked_bars(
            &one_category(),
            &[
                Series::new("A", vec![Some(2.0)]),
                Series::new("Subsidy", vec![Some(-0.5)]),
                Series::new("B", vec![Some(1.0)]),
            ],
            &DEFAULT_COLOR_MAP,
        );
        let stack = spec.stack(0);
        assert_eq!((stack[1].base, stack[1].top), (0.0, -0.5));
        assert_eq!((stack[2].base, stack[2].top), (2.0, 3.0));
        assert_eq!(spec.value_bounds(), (-0.5, 3.0));
    }

    #[test]
    fn script_json_cannot_close_the_script_tag() {
        let spec = build_stacked_bars(
            &["</script>".to_string()],
            &[],
            &DEFAULT_COLOR_MAP,
        );
        let json = spec.to_script_json().unwrap();
        assert!(!json.contains("</script>"));
        let back: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back["categories"][0], "</script>");
    }
}
