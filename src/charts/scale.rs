//! Chart Scales
//! Time scale for the year axis and point scale for the race-time categories.

use chrono::{Datelike, NaiveDate};

/// Linear mapping from calendar dates to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    range: (f32, f32),
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    pub fn position(&self, date: NaiveDate) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = (d1 - d0).num_days();
        if span == 0 {
            return (r0 + r1) / 2.0;
        }

        let t = (date - d0).num_days() as f64 / span as f64;
        r0 + (t * (r1 - r0) as f64) as f32
    }

    /// 1 January of every year inside the domain, labelled `%Y`.
    pub fn yearly_ticks(&self) -> Vec<(NaiveDate, String)> {
        let (d0, d1) = self.domain;
        let first = if d0.ordinal() == 1 {
            d0.year()
        } else {
            d0.year() + 1
        };

        (first..=d1.year())
            .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .map(|date| (date, date.format("%Y").to_string()))
            .collect()
    }
}

/// Evenly spaced mapping from discrete categories to pixels.
///
/// Outer padding is zero: the first category sits on `range.0`, the last on
/// `range.1`. A single category is centered.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    domain: Vec<String>,
    range: (f32, f32),
}

impl PointScale {
    /// Duplicate categories keep their first position.
    pub fn new(categories: impl IntoIterator<Item = String>, range: (f32, f32)) -> Self {
        let mut domain: Vec<String> = Vec::new();
        for category in categories {
            if !domain.contains(&category) {
                domain.push(category);
            }
        }
        Self { domain, range }
    }

    pub fn step(&self) -> f32 {
        let n = self.domain.len();
        if n < 2 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / (n - 1) as f32
    }

    pub fn position(&self, category: &str) -> Option<f32> {
        let index = self.domain.iter().position(|c| c == category)?;
        Some(self.position_at(index))
    }

    fn position_at(&self, index: usize) -> f32 {
        let (r0, r1) = self.range;
        if self.domain.len() == 1 {
            (r0 + r1) / 2.0
        } else {
            r0 + index as f32 * self.step()
        }
    }

    /// Every category with its pixel position, in domain order.
    pub fn ticks(&self) -> Vec<(f32, String)> {
        self.domain
            .iter()
            .enumerate()
            .map(|(i, c)| (self.position_at(i), c.clone()))
            .collect()
    }
}
