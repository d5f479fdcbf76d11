use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use crate::api::finsage::{GraphResponse, RawRecord};
use crate::models::{ChartSeries, PricePoint};

/// Parse the `Date` field of a record
/// Accepts "YYYY-MM-DD" and full timestamps, keeping only the calendar date
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map(|dt| dt.date())
        .ok()
}

/// Coerce a `Price` value to a number
pub fn coerce_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => return None,
    };

    price.is_finite().then_some(price)
}

/// Validate one record; `None` when the date is missing or the price is null
pub fn shape_record(record: &RawRecord) -> Option<PricePoint> {
    let date = record.date.as_deref().filter(|d| !d.is_empty())?;
    let price = record.price.as_ref().filter(|p| !p.is_null())?;

    Some(PricePoint::new(parse_record_date(date)?, coerce_price(price)?))
}

/// Shape a list of records, preserving input order
pub fn shape_records(records: &[RawRecord]) -> Vec<PricePoint> {
    records.iter().filter_map(shape_record).collect()
}

/// Shape both arrays of a graph response
/// Returns `None` when nothing survives validation
pub fn shape_series(response: &GraphResponse) -> Option<ChartSeries> {
    let series = ChartSeries {
        historical: shape_records(response.historical.as_deref().unwrap_or_default()),
        predicted: shape_records(response.predictions.as_deref().unwrap_or_default()),
    };

    tracing::debug!(
        "Shaped {} historical and {} predicted points",
        series.historical.len(),
        series.predicted.len()
    );

    if series.is_empty() {
        None
    } else {
        Some(series)
    }
}
