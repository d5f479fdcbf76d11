//! Chart data models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// A single validated data point on the price chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// The point's date as UTC midnight
    pub fn timestamp(&self) -> DateTime<Utc> {
        midnight_utc(self.date)
    }
}

/// Both series of one render, already shaped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub historical: Vec<PricePoint>,
    pub predicted: Vec<PricePoint>,
}

impl ChartSeries {
    /// Historical then predicted, stable-sorted by date
    pub fn combined(&self) -> Vec<PricePoint> {
        let mut all: Vec<PricePoint> = self
            .historical
            .iter()
            .chain(self.predicted.iter())
            .copied()
            .collect();
        all.sort_by_key(|p| p.date);
        all
    }

    pub fn len(&self) -> usize {
        self.historical.len() + self.predicted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// UTC midnight at the start of `date`
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc)
}
