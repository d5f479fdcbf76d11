//! Data models for the fund chart
//!
//! Plain data shared by the controller, the renderer and the host shell.

pub mod chart;
pub mod controls;
pub mod crosshair;
pub mod range;

// Re-export commonly used types for convenience
pub use chart::{midnight_utc, ChartSeries, PricePoint};
pub use controls::{RangeButton, RenderOutcome};
pub use crosshair::{Focus, PointerEvent, Tooltip};
pub use range::ChartRange;
