use std::fs;
use std::path::Path;
use crate::models::{RangeButton, Tooltip};
use crate::services::chart_service::{ChartError, ChartSurface, CHART_HEIGHT, CHART_WIDTH};

/// Escape text for use inside HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_button(button: &RangeButton) -> String {
    format!(
        "<button data-range=\"{range}\" style=\"margin: 5px; padding: 8px 12px; background-color: {bg}; color: {fg}; border: none; border-radius: 4px; cursor: pointer;\">{range}</button>",
        range = button.range,
        bg = button.style.background,
        fg = button.style.color,
    )
}

fn render_tooltip(tooltip: &Tooltip) -> String {
    format!(
        "<div class=\"tooltip\" style=\"position: absolute; left: {}px; top: {}px; background: #fff; padding: 6px; border: 1px solid #ccc; border-radius: 4px; pointer-events: none; display: inline-block; font-size: 12px;\">{}</div>",
        tooltip.left, tooltip.top, tooltip.html
    )
}

/// Button row, chart and tooltip as one HTML document
pub fn render_page(title: &str, buttons: &[RangeButton], surface: &ChartSurface) -> Result<String, ChartError> {
    let svg = match surface.to_svg()? {
        Some(svg) => svg,
        None => format!("<svg width=\"{}\" height=\"{}\"></svg>", CHART_WIDTH, CHART_HEIGHT),
    };

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n");
    page.push_str(&format!(
        "<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n",
        escape_html(title)
    ));
    page.push_str("<div style=\"background-color: white; border-radius: 20px;\">\n");
    page.push_str("<div style=\"margin-bottom: 10px; text-align: center;\">\n");
    for button in buttons {
        page.push_str(&render_button(button));
        page.push('\n');
    }
    page.push_str("</div>\n");
    page.push_str(&svg);
    page.push('\n');
    page.push_str("</div>\n");
    if let Some(tooltip) = surface.tooltip() {
        page.push_str(&render_tooltip(tooltip));
        page.push('\n');
    }
    page.push_str("</body>\n</html>\n");

    Ok(page)
}

/// Write the chart SVG; returns false when nothing is drawn
pub fn save_svg(surface: &ChartSurface, path: &Path) -> Result<bool, ChartError> {
    match surface.to_svg()? {
        Some(svg) => {
            fs::write(path, svg)?;
            tracing::info!("✓ Chart written to {}", path.display());
            Ok(true)
        }
        None => Ok(false),
    }
}

pub fn save_page(title: &str, buttons: &[RangeButton], surface: &ChartSurface, path: &Path) -> Result<(), ChartError> {
    let page = render_page(title, buttons, surface)?;
    fs::write(path, page)?;
    tracing::info!("✓ Page written to {}", path.display());
    Ok(())
}
