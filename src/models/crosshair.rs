//! Pointer and tooltip models

use super::chart::PricePoint;

/// A pointer position over the chart overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Horizontal offset from the overlay's left edge
    pub x: f64,
    /// Vertical offset from the overlay's top edge
    pub y: f64,
    /// Page coordinates, used to place the tooltip
    pub page_x: f64,
    pub page_y: f64,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, page_x: f64, page_y: f64) -> Self {
        Self { x, y, page_x, page_y }
    }
}

/// Focus dot and focus line, both in chart pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Focus {
    pub point: PricePoint,
    pub cx: f64,
    pub cy: f64,
    /// Vertical extent of the focus line
    pub line_top: f64,
    pub line_bottom: f64,
}

/// Floating tooltip placed near the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub left: f64,
    pub top: f64,
    pub html: String,
}
