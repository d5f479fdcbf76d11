use chrono::{DateTime, Utc};
use crate::models::{Focus, PointerEvent, PricePoint, Tooltip};
use crate::services::chart_service::{ChartSurface, RenderedChart, CHART_HEIGHT, MARGIN};

/// Tooltip offset from the pointer, in page pixels
const TOOLTIP_OFFSET: (f64, f64) = (10.0, -20.0);

/// Find the point closest in time to `candidate`
///
/// `points` must be sorted by date. The insertion index is found by left
/// bisection starting at 1; the points either side of it are compared and the
/// later one wins a tie.
pub fn nearest_point(points: &[PricePoint], candidate: DateTime<Utc>) -> Option<PricePoint> {
    if points.is_empty() {
        return None;
    }

    let i = points.partition_point(|p| p.timestamp() < candidate).max(1);
    let d0 = points[i - 1];

    match points.get(i) {
        Some(&d1) if candidate - d0.timestamp() >= d1.timestamp() - candidate => Some(d1),
        _ => Some(d0),
    }
}

/// Date as shown in the tooltip (month/day/year, no padding)
pub fn format_tooltip_date(point: &PricePoint) -> String {
    point.date.format("%-m/%-d/%Y").to_string()
}

pub fn tooltip_html(point: &PricePoint, currency_symbol: &str) -> String {
    format!(
        "Date: {}<br/>Price: {}{}",
        format_tooltip_date(point),
        currency_symbol,
        point.price
    )
}

/// Whether an overlay-local position falls on the overlay
fn on_overlay(event: &PointerEvent) -> bool {
    event.x >= 0.0
        && event.x <= MARGIN.inner_width() as f64
        && event.y >= 0.0
        && event.y <= MARGIN.inner_height() as f64
}

/// Resolve a pointer position into focus dot, focus line and tooltip
pub fn locate_focus(chart: &RenderedChart, event: &PointerEvent) -> Option<(Focus, Tooltip)> {
    let candidate = chart.x_scale.invert(event.x + MARGIN.left as f64);
    let point = nearest_point(&chart.combined, candidate)?;

    let focus = Focus {
        point,
        cx: chart.x_scale.scale(point.timestamp()),
        cy: chart.y_scale.scale(point.price),
        line_top: MARGIN.top as f64,
        line_bottom: (CHART_HEIGHT - MARGIN.bottom) as f64,
    };
    let tooltip = Tooltip {
        left: event.page_x + TOOLTIP_OFFSET.0,
        top: event.page_y + TOOLTIP_OFFSET.1,
        html: tooltip_html(&point, &chart.config.currency_symbol),
    };

    Some((focus, tooltip))
}

/// Pointer moved over the overlay
/// Returns the focused point, or `None` when nothing is drawn
pub fn pointer_move(surface: &mut ChartSurface, event: &PointerEvent) -> Option<PricePoint> {
    if !on_overlay(event) {
        pointer_leave(surface);
        return None;
    }

    let located = surface.chart().and_then(|chart| locate_focus(chart, event));
    match located {
        Some((focus, tooltip)) => {
            let point = focus.point;
            surface.set_overlay(Some(focus), Some(tooltip));
            Some(point)
        }
        None => {
            surface.set_overlay(None, None);
            None
        }
    }
}

/// Pointer left the overlay: hide dot, line and tooltip
pub fn pointer_leave(surface: &mut ChartSurface) {
    surface.set_overlay(None, None);
}
