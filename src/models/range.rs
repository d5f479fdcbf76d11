//! Range selector models

use std::fmt;
use std::str::FromStr;

/// Lookback window requested from the graph endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartRange {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    ThreeYears,
    #[default]
    FiveYears,
}

impl ChartRange {
    /// Every range in button order
    pub const ALL: [ChartRange; 6] = [
        ChartRange::OneMonth,
        ChartRange::ThreeMonths,
        ChartRange::SixMonths,
        ChartRange::OneYear,
        ChartRange::ThreeYears,
        ChartRange::FiveYears,
    ];

    /// Label used both on the button and in the `range` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartRange::OneMonth => "1M",
            ChartRange::ThreeMonths => "3M",
            ChartRange::SixMonths => "6M",
            ChartRange::OneYear => "1Y",
            ChartRange::ThreeYears => "3Y",
            ChartRange::FiveYears => "5Y",
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        ChartRange::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == upper)
            .ok_or_else(|| format!("❌ Unknown range: '{}'. Supported: 1M, 3M, 6M, 1Y, 3Y, 5Y", s))
    }
}
