use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use thiserror::Error;
use crate::models::{midnight_utc, ChartSeries, Focus, PricePoint, Tooltip};
use crate::utils::{LinearScale, TimeScale};

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 400;
pub const MARGIN: Margin = Margin { top: 20, right: 30, bottom: 70, left: 80 };

const HISTORICAL_COLOR: RGBColor = RGBColor(0, 128, 0);
const PREDICTED_COLOR: RGBColor = BLUE;
const MARKER_COLOR: RGBColor = RED;
const FOCUS_LINE_COLOR: RGBColor = RGBColor(128, 128, 128);

const PLOT_TOP: i32 = MARGIN.top as i32;
const PLOT_BOTTOM: i32 = (CHART_HEIGHT - MARGIN.bottom) as i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    pub fn inner_width(&self) -> u32 {
        CHART_WIDTH - self.left - self.right
    }

    pub fn inner_height(&self) -> u32 {
        CHART_HEIGHT - self.top - self.bottom
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Failed to write chart file: {0}")]
    Io(#[from] std::io::Error),
}

/// Presentation settings shared by every draw
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Date annotated by the "Today" marker
    pub reference_date: NaiveDate,
    pub y_label: String,
    pub currency_symbol: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            reference_date: NaiveDate::from_ymd_opt(2025, 4, 7).unwrap_or_default(),
            y_label: "Price".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Vertical "Today" marker, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceMarker {
    pub date: NaiveDate,
    pub x: f64,
}

/// Everything computed for one draw: scales, pixel paths, marker
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub series: ChartSeries,
    /// Sorted by date; searched by the crosshair
    pub combined: Vec<PricePoint>,
    pub x_scale: TimeScale,
    pub y_scale: LinearScale,
    pub historical_path: Vec<(f64, f64)>,
    pub predicted_path: Vec<(f64, f64)>,
    pub reference_marker: Option<ReferenceMarker>,
    pub config: ChartConfig,
}

/// Vertical domain with 5% headroom below the minimum and above the maximum
pub fn price_domain(points: &[PricePoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }

    let min_price = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);

    Some((min_price * 0.95, max_price * 1.05))
}

/// Earliest and latest date across the points
pub fn date_domain(points: &[PricePoint]) -> Option<(NaiveDate, NaiveDate)> {
    let min_date = points.iter().map(|p| p.date).min()?;
    let max_date = points.iter().map(|p| p.date).max()?;
    Some((min_date, max_date))
}

/// Lay out a chart for the given series
/// Returns `None` when there is nothing to draw
pub fn build_chart(series: ChartSeries, config: &ChartConfig) -> Option<RenderedChart> {
    let combined = series.combined();
    let (min_date, max_date) = date_domain(&combined)?;
    let y_domain = price_domain(&combined)?;

    let x_scale = TimeScale::new(
        (midnight_utc(min_date), midnight_utc(max_date)),
        (MARGIN.left as f64, (CHART_WIDTH - MARGIN.right) as f64),
    );
    let y_scale = LinearScale::new(
        y_domain,
        ((CHART_HEIGHT - MARGIN.bottom) as f64, MARGIN.top as f64),
    );

    let project = |points: &[PricePoint]| -> Vec<(f64, f64)> {
        points
            .iter()
            .map(|p| (x_scale.scale(p.timestamp()), y_scale.scale(p.price)))
            .collect()
    };
    let historical_path = project(&series.historical);
    let predicted_path = project(&series.predicted);

    let reference = midnight_utc(config.reference_date);
    let reference_marker = x_scale.contains(reference).then(|| ReferenceMarker {
        date: config.reference_date,
        x: x_scale.scale(reference),
    });

    Some(RenderedChart {
        series,
        combined,
        x_scale,
        y_scale,
        historical_path,
        predicted_path,
        reference_marker,
        config: config.clone(),
    })
}

fn to_pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn to_pixels(path: &[(f64, f64)]) -> Vec<(i32, i32)> {
    path.iter().copied().map(to_pixel).collect()
}

/// Axis domain handed to plotters; zero-width domains get widened
fn plot_bounds(chart: &RenderedChart) -> ((DateTime<Utc>, DateTime<Utc>), (f64, f64)) {
    let (mut x_min, mut x_max) = chart.x_scale.domain();
    if x_min == x_max {
        x_min -= Duration::days(1);
        x_max += Duration::days(1);
    }

    let (mut y_min, mut y_max) = chart.y_scale.domain();
    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }

    ((x_min, x_max), (y_min, y_max))
}

/// Draw the chart, plus the focus overlay when present, as an SVG document
///
/// Plotters lays out the axes over the same plot area; series, marker and
/// focus are drawn from the pixel projections in `chart` and `focus`.
pub fn draw_svg(chart: &RenderedChart, focus: Option<&Focus>) -> Result<String, ChartError> {
    let mut buffer = String::new();

    {
        let root = SVGBackend::with_string(&mut buffer, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| ChartError::Drawing(format!("Failed to fill canvas: {}", e)))?;

        let ((x_min, x_max), (y_min, y_max)) = plot_bounds(chart);

        let mut ctx = ChartBuilder::on(&root)
            .margin_top(MARGIN.top)
            .margin_right(MARGIN.right)
            .x_label_area_size(MARGIN.bottom)
            .y_label_area_size(MARGIN.left)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| ChartError::Drawing(format!("Failed to build chart: {}", e)))?;

        let short_span = x_max - x_min <= Duration::days(92);
        let x_format = move |t: &DateTime<Utc>| {
            if short_span {
                t.format("%b %d").to_string()
            } else {
                t.format("%b %Y").to_string()
            }
        };

        ctx.configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(8)
            .y_labels(10)
            .x_label_formatter(&x_format)
            .x_desc("Time Period")
            .y_desc(chart.config.y_label.as_str())
            .axis_desc_style(("sans-serif", 14))
            .draw()
            .map_err(|e| ChartError::Drawing(format!("Failed to draw axes: {}", e)))?;

        if !chart.historical_path.is_empty() {
            root.draw(&PathElement::new(
                to_pixels(&chart.historical_path),
                HISTORICAL_COLOR.stroke_width(2),
            ))
            .map_err(|e| ChartError::Drawing(format!("Failed to draw historical series: {}", e)))?;
        }

        if !chart.predicted_path.is_empty() {
            root.draw(&DashedPathElement::new(
                to_pixels(&chart.predicted_path),
                4,
                4,
                PREDICTED_COLOR.stroke_width(2),
            ))
            .map_err(|e| ChartError::Drawing(format!("Failed to draw predicted series: {}", e)))?;
        }

        if let Some(marker) = &chart.reference_marker {
            let x = marker.x.round() as i32;
            root.draw(&DashedPathElement::new(
                vec![(x, PLOT_TOP), (x, PLOT_BOTTOM)],
                4,
                4,
                MARKER_COLOR.stroke_width(2),
            ))
            .map_err(|e| ChartError::Drawing(format!("Failed to draw reference marker: {}", e)))?;

            let label_style = ("sans-serif", 12)
                .into_font()
                .color(&MARKER_COLOR)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            root.draw(&Text::new("Today", (x, PLOT_TOP - 5), label_style))
                .map_err(|e| ChartError::Drawing(format!("Failed to draw reference label: {}", e)))?;
        }

        if let Some(focus) = focus {
            let (cx, cy) = to_pixel((focus.cx, focus.cy));
            root.draw(&DashedPathElement::new(
                vec![(cx, focus.line_top.round() as i32), (cx, focus.line_bottom.round() as i32)],
                3,
                3,
                FOCUS_LINE_COLOR.stroke_width(1),
            ))
            .map_err(|e| ChartError::Drawing(format!("Failed to draw focus line: {}", e)))?;
            root.draw(&Circle::new((cx, cy), 4, BLACK.filled()))
                .map_err(|e| ChartError::Drawing(format!("Failed to draw focus dot: {}", e)))?;
        }

        root.present().map_err(|e| ChartError::Drawing(format!("Failed to render chart: {}", e)))?;
    }

    Ok(buffer)
}

/// The drawing surface owned by the renderer: the last chart and its overlay
#[derive(Debug, Clone, Default)]
pub struct ChartSurface {
    chart: Option<RenderedChart>,
    focus: Option<Focus>,
    tooltip: Option<Tooltip>,
}

impl ChartSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the chart along with its focus dot, focus line and tooltip
    pub fn clear(&mut self) {
        self.chart = None;
        self.focus = None;
        self.tooltip = None;
    }

    /// Clear, then lay out and keep the new chart
    /// Returns false when the series had nothing to draw
    pub fn draw(&mut self, series: ChartSeries, config: &ChartConfig) -> bool {
        self.clear();
        self.chart = build_chart(series, config);
        self.chart.is_some()
    }

    pub fn chart(&self) -> Option<&RenderedChart> {
        self.chart.as_ref()
    }

    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Whether a chart is currently on the surface
    pub fn is_drawn(&self) -> bool {
        self.chart.is_some()
    }

    pub(crate) fn set_overlay(&mut self, focus: Option<Focus>, tooltip: Option<Tooltip>) {
        self.focus = focus;
        self.tooltip = tooltip;
    }

    /// Current surface as SVG; `None` when nothing is drawn
    pub fn to_svg(&self) -> Result<Option<String>, ChartError> {
        match &self.chart {
            Some(chart) => draw_svg(chart, self.focus.as_ref()).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(historical: &[(NaiveDate, f64)], predicted: &[(NaiveDate, f64)]) -> ChartSeries {
        ChartSeries {
            historical: historical.iter().map(|&(d, p)| PricePoint::new(d, p)).collect(),
            predicted: predicted.iter().map(|&(d, p)| PricePoint::new(d, p)).collect(),
        }
    }

    #[test]
    fn test_price_domain_padding() {
        let points = vec![
            PricePoint::new(day(2024, 1, 1), 200.0),
            PricePoint::new(day(2024, 1, 2), 80.0),
            PricePoint::new(day(2024, 1, 3), 120.0),
        ];
        assert_eq!(price_domain(&points), Some((80.0 * 0.95, 200.0 * 1.05)));
        assert_eq!(price_domain(&[]), None);
    }

    /// `points` of every polyline drawn in `color`
    fn polylines(svg: &str, color: &str) -> Vec<String> {
        let stroke = format!("stroke=\"{}\"", color);
        svg.split("<polyline")
            .skip(1)
            .filter(|tag| tag.split("/>").next().unwrap_or("").contains(&stroke))
            .filter_map(|tag| {
                let rest = tag.split("points=\"").nth(1)?;
                Some(rest.split('"').next()?.trim().to_string())
            })
            .collect()
    }

    #[test]
    fn test_scales_span_both_series() {
        let s = series(
            &[(day(2024, 1, 1), 100.0), (day(2024, 6, 1), 150.0)],
            &[(day(2024, 7, 1), 160.0), (day(2024, 12, 31), 90.0)],
        );
        let chart = build_chart(s, &ChartConfig::default()).unwrap();

        assert_eq!(chart.y_scale.domain(), (90.0 * 0.95, 160.0 * 1.05));
        assert_eq!(chart.y_scale.scale(90.0 * 0.95), 330.0);
        assert_eq!(chart.y_scale.scale(160.0 * 1.05), 20.0);
        assert_eq!(
            chart.x_scale.domain(),
            (midnight_utc(day(2024, 1, 1)), midnight_utc(day(2024, 12, 31)))
        );
        assert_eq!(chart.historical_path[0].0, 80.0);
        assert_eq!(chart.predicted_path[1].0, 770.0);

        let svg = draw_svg(&chart, None).unwrap();
        let historical = polylines(&svg, "#008000");
        assert_eq!(historical.len(), 1);
        assert!(historical[0].starts_with("80,"));

        // dashes are separate segments starting at the first predicted point
        let predicted = polylines(&svg, "#0000FF");
        assert!(predicted.len() > 1);
        let (x0, y0) = to_pixel(chart.predicted_path[0]);
        assert!(predicted[0].starts_with(&format!("{},{} ", x0, y0)));
    }

    #[test]
    fn test_reference_marker_inclusive_bounds() {
        let config = ChartConfig::default();
        let reference = config.reference_date;

        let ends_on_reference = series(&[(day(2025, 1, 1), 1.0), (reference, 2.0)], &[]);
        let chart = build_chart(ends_on_reference, &config).unwrap();
        assert_eq!(chart.reference_marker.map(|m| m.x), Some(770.0));

        let starts_on_reference = series(&[(reference, 1.0)], &[(day(2025, 5, 1), 2.0)]);
        let chart = build_chart(starts_on_reference, &config).unwrap();
        assert_eq!(chart.reference_marker.map(|m| m.x), Some(80.0));

        let before = series(&[(day(2024, 1, 1), 1.0), (day(2025, 4, 6), 2.0)], &[]);
        assert!(build_chart(before, &config).unwrap().reference_marker.is_none());
    }

    #[test]
    fn test_single_historical_point() {
        let s = series(&[(day(2024, 1, 1), 100.0)], &[]);
        let chart = build_chart(s, &ChartConfig::default()).unwrap();

        assert_eq!(chart.historical_path.len(), 1);
        assert!(chart.predicted_path.is_empty());
        assert!(chart.reference_marker.is_none());
        assert_eq!(chart.y_scale.domain(), (100.0 * 0.95, 100.0 * 1.05));
        // zero-width time domain sits in the middle
        assert_eq!(chart.historical_path, vec![(425.0, 175.0)]);

        let svg = draw_svg(&chart, None).unwrap();
        assert!(svg.contains("Time Period"));
        assert!(!svg.contains("Today"));
        assert_eq!(polylines(&svg, "#008000"), vec!["425,175".to_string()]);
        assert!(polylines(&svg, "#0000FF").is_empty());
    }

    #[test]
    fn test_empty_series_builds_nothing() {
        assert!(build_chart(ChartSeries::default(), &ChartConfig::default()).is_none());
    }

    #[test]
    fn test_svg_contains_axes_labels_and_marker() {
        let s = series(
            &[(day(2025, 1, 1), 100.0), (day(2025, 4, 1), 110.0)],
            &[(day(2025, 4, 8), 111.0), (day(2025, 6, 1), 120.0)],
        );
        let chart = build_chart(s, &ChartConfig::default()).unwrap();
        let svg = draw_svg(&chart, None).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Time Period"));
        assert!(svg.contains("Price"));
        assert!(svg.contains("Today"));

        // marker spans the plot height at the reference date's x
        let x = chart.reference_marker.unwrap().x.round() as i32;
        let marker = polylines(&svg, "#FF0000");
        assert!(!marker.is_empty());
        assert!(marker[0].starts_with(&format!("{},20", x)));
        assert!(marker.iter().all(|segment| segment.split(' ').all(|p| p.starts_with(&format!("{},", x)))));
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let s = series(&[(day(2024, 1, 1), 10.0), (day(2024, 2, 1), 12.0)], &[]);
        let mut surface = ChartSurface::new();

        assert!(surface.draw(s.clone(), &ChartConfig::default()));
        let first = surface.to_svg().unwrap();
        assert!(surface.draw(s, &ChartConfig::default()));
        let second = surface.to_svg().unwrap();

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_draw_with_nothing_clears_surface() {
        let mut surface = ChartSurface::new();
        surface.draw(series(&[(day(2024, 1, 1), 10.0)], &[]), &ChartConfig::default());
        assert!(surface.is_drawn());

        assert!(!surface.draw(ChartSeries::default(), &ChartConfig::default()));
        assert!(!surface.is_drawn());
        assert!(surface.to_svg().unwrap().is_none());
    }

    #[test]
    fn test_margin_inner_area() {
        assert_eq!(MARGIN.inner_width(), 690);
        assert_eq!(MARGIN.inner_height(), 310);
    }
}
