use chrono::{DateTime, Duration, Utc};

/// Continuous linear mapping from a numeric domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Map a domain value onto the range
    /// A zero-width domain maps everything to the middle of the range
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        r0 + t * (r1 - r0)
    }

    /// Map a range value back onto the domain
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Linear mapping over time, stored in milliseconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        let (start, end) = domain;
        Self {
            start,
            end,
            inner: LinearScale::new(
                (start.timestamp_millis() as f64, end.timestamp_millis() as f64),
                range,
            ),
        }
    }

    pub fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    /// Inclusive on both ends
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t <= self.end
    }

    pub fn scale(&self, t: DateTime<Utc>) -> f64 {
        self.inner.scale(t.timestamp_millis() as f64)
    }

    pub fn invert(&self, pixel: f64) -> DateTime<Utc> {
        let millis = self.inner.invert(pixel).round() as i64;
        self.start + Duration::milliseconds(millis - self.start.timestamp_millis())
    }
}
