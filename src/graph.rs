#![cfg(feature = "web")]
use crate::chart::{ChartSpec, DEFAULT_COLOR};
use crate::error::{DashboardError, Result};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;

/// Size of a rendered graph
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Width of the graph in pixels
    pub width: u32,

    /// Height of the graph in pixels
    pub height: u32,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 560,
        }
    }
}

/// Renders a stacked bar chart as an SVG document
///
/// Bars are drawn segment by segment from [`ChartSpec::stack`], so the
/// stacking order and the treatment of missing and negative values are the
/// same as in the browser chart.
///
/// # Examples
/// ```no_run
/// use pv_dashboard::chart::{build_stacked_bars, DEFAULT_COLOR_MAP};
/// use pv_dashboard::graph::{render_stacked_svg, GraphOptions};
/// use pv_dashboard::layout::Series;
///
/// let spec = build_stacked_bars(
///     &["China".to_string(), "India".to_string()],
///     &[Series::new("Labour", vec![Some(0.02), Some(0.01)])],
///     &DEFAULT_COLOR_MAP,
/// )
/// .with_title("Domestic manufacturing in 2025");
///
/// let svg = render_stacked_svg(&spec, &GraphOptions::default()).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn render_stacked_svg(spec: &ChartSpec, options: &GraphOptions) -> Result<String> {
    let mut svg = String::new();
    draw_stacked(spec, options, &mut svg).map_err(|e| DashboardError::Render(e.to_string()))?;
    Ok(svg)
}

fn draw_stacked(
    spec: &ChartSpec,
    options: &GraphOptions,
    out: &mut String,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::with_string(out, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let bars = spec.categories.len().max(1) as u32;
    let (low, high) = padded_bounds(spec.value_bounds());

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..bars).into_segmented(), low..high)?;

    let categories = &spec.categories;
    let category_label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            categories.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars as usize)
        .x_label_formatter(&category_label)
        .x_desc(spec.x_axis_title.as_str())
        .y_desc(spec.y_axis_title.as_str())
        .draw()?;

    for (index, layer) in spec.layers.iter().enumerate() {
        let color = hex_to_rgb(&layer.color)
            .or_else(|| hex_to_rgb(DEFAULT_COLOR))
            .unwrap_or(BLACK);

        let rectangles: Vec<_> = (0..spec.categories.len())
            .filter_map(|c| segment_of_layer(spec, c, index).map(|span| (c as u32, span)))
            .map(|(c, (base, top))| {
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(c), base), (SegmentValue::Exact(c + 1), top)],
                    color.filled(),
                );
                bar.set_margin(0, 0, 12, 12);
                bar
            })
            .collect();

        chart
            .draw_series(rectangles)?
            .label(layer.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Lower and upper end of layer `layer` in the bar at `category`; `None`
/// when the layer has no value there
fn segment_of_layer(spec: &ChartSpec, category: usize, layer: usize) -> Option<(f64, f64)> {
    spec.layers.get(layer)?.values.get(category).copied().flatten()?;

    // segments keep layer order, skipping layers with no value here
    let drawn_before = spec
        .layers
        .get(..layer)?
        .iter()
        .filter(|l| l.values.get(category).copied().flatten().is_some())
        .count();
    spec.stack(category)
        .get(drawn_before)
        .map(|s| (s.base.min(s.top), s.base.max(s.top)))
}

fn padded_bounds((low, high): (f64, f64)) -> (f64, f64) {
    if high - low <= f64::EPSILON {
        return (low, low + 1.0);
    }
    let pad = (high - low) * 0.05;
    (if low < 0.0 { low - pad } else { low }, high + pad)
}

/// Parses `#RRGGBB`
pub fn hex_to_rgb(hex: &str) -> Option<RGBColor> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        let crimson = hex_to_rgb("#DC143C").map(|c| (c.0, c.1, c.2));
        assert_eq!(crimson, Some((0xDC, 0x14, 0x3C)));
        assert!(hex_to_rgb("DC143C").is_none());
        assert!(hex_to_rgb("#12").is_none());
        assert!(hex_to_rgb("#GGGGGG").is_none());
    }

    #[test]
    fn layers_map_to_stacked_spans() {
        use crate::chart::{ColorMap, build_stacked_bars};
        use crate::layout::Series;

        let spec = build_stacked_bars(
            &["China".to_string()],
            &[
                Series::new("Materials", vec![Some(2.0)]),
                Series::new("Labour", vec![None]),
                Series::new("Subsidy", vec![Some(-0.5)]),
                Series::new("Margin", vec![Some(1.0)]),
            ],
            &ColorMap::default(),
        );

        assert_eq!(segment_of_layer(&spec, 0, 0), Some((0.0, 2.0)));
        assert_eq!(segment_of_layer(&spec, 0, 1), None);
        assert_eq!(segment_of_layer(&spec, 0, 2), Some((-0.5, 0.0)));
        assert_eq!(segment_of_layer(&spec, 0, 3), Some((2.0, 3.0)));
        assert_eq!(segment_of_layer(&spec, 1, 0), None);
        assert_eq!(segment_of_layer(&spec, 0, 4), None);
    }

    #[test]
    fn flat_charts_get_a_unit_axis() {
        assert_eq!(padded_bounds((0.0, 0.0)), (0.0, 1.0));
        let (low, high) = padded_bounds((0.0, 2.0));
        assert_eq!(low, 0.0);
        assert!(high > 2.0);
        let (low, _) = padded_bounds((-1.0, 2.0));
        assert!(low < -1.0);
    }
}
