//! Range button and render cycle models

use super::range::ChartRange;

/// Colors of one range button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub background: &'static str,
    pub color: &'static str,
}

impl ButtonStyle {
    pub const ACTIVE: ButtonStyle = ButtonStyle { background: "#007bff", color: "#fff" };
    pub const INACTIVE: ButtonStyle = ButtonStyle { background: "#f0f0f0", color: "#000" };
}

/// One of the six range selector buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeButton {
    pub range: ChartRange,
    pub active: bool,
    pub style: ButtonStyle,
}

impl RangeButton {
    /// The full button row with `selected` highlighted
    pub fn row(selected: ChartRange) -> Vec<RangeButton> {
        ChartRange::ALL
            .iter()
            .map(|&range| {
                let active = range == selected;
                RangeButton {
                    range,
                    active,
                    style: if active { ButtonStyle::ACTIVE } else { ButtonStyle::INACTIVE },
                }
            })
            .collect()
    }
}

/// How a fetch-render cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Chart drawn with this many points
    Drawn { points: usize },
    /// Response carried no usable records; surface cleared
    Empty,
    /// Request failed; surface untouched
    Failed(String),
    /// A newer request was issued before this one resolved
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_active_button() {
        let row = RangeButton::row(ChartRange::OneYear);
        assert_eq!(row.len(), 6);

        let active: Vec<&RangeButton> = row.iter().filter(|b| b.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].range, ChartRange::OneYear);
        assert_eq!(active[0].style, ButtonStyle::ACTIVE);
        assert!(row.iter().filter(|b| !b.active).all(|b| b.style == ButtonStyle::INACTIVE));
    }
}
