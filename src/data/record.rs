//! Race Records
//! One record per fastest ascent, plus the immutable shared dataset.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("Record '{name}' has a year outside the calendar range: {year}")]
    InvalidYear { name: String, year: i32 },
}

/// A single ascent as published in the cyclist dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RaceRecord {
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "Seconds")]
    pub seconds: f64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Nationality")]
    pub nationality: String,
    /// Empty when there is no allegation
    #[serde(rename = "Doping", default)]
    pub doping: String,
    /// Source for the allegation, if any
    #[serde(rename = "URL", default)]
    pub url: String,
}

impl RaceRecord {
    pub fn has_allegation(&self) -> bool {
        !self.doping.is_empty()
    }

    /// 1 January of the record's year.
    pub fn year_start(&self) -> Option<NaiveDate> {
        year_start(self.year)
    }

    /// `MM:SS` label derived from `seconds`.
    pub fn time_label(&self) -> String {
        format_race_time(self.seconds)
    }

    /// Time as shown to the user: the dataset's own string when present.
    pub fn display_time(&self) -> String {
        if self.time.is_empty() {
            self.time_label()
        } else {
            self.time.clone()
        }
    }
}

pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Format elapsed seconds as minutes of the hour and whole seconds.
///
/// Fractional seconds are truncated, so `150.9` gives `02:30`.
pub fn format_race_time(seconds: f64) -> String {
    let whole = if seconds.is_finite() {
        seconds.floor() as i64
    } else {
        0
    };
    let of_day = whole.rem_euclid(SECONDS_PER_DAY) as u32;

    NaiveTime::from_num_seconds_from_midnight_opt(of_day, 0)
        .map(|t| t.format("%M:%S").to_string())
        .unwrap_or_default()
}

/// Ordered, immutable set of records shared between the loader and the views.
///
/// Clones share the same allocation; [`Dataset::same_as`] compares that identity.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[RaceRecord]>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }
}

impl Dataset {
    /// Build a dataset, rejecting records whose year (or the year before it,
    /// where the time axis starts) has no calendar date.
    pub fn new(records: Vec<RaceRecord>) -> Result<Self, RecordError> {
        let drawable = |r: &RaceRecord| {
            r.year_start().is_some() && r.year.checked_sub(1).and_then(year_start).is_some()
        };
        if let Some(bad) = records.iter().find(|r| !drawable(r)) {
            return Err(RecordError::InvalidYear {
                name: bad.name.clone(),
                year: bad.year,
            });
        }

        Ok(Self {
            records: Arc::from(records),
        })
    }

    pub fn records(&self) -> &[RaceRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&RaceRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when both handles point at the same loaded data.
    pub fn same_as(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// Smallest and largest year, if any records exist.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    pub fn allegation_count(&self) -> usize {
        self.records.iter().filter(|r| r.has_allegation()).count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Datelike;

    pub(crate) fn record(name: &str, year: i32, seconds: f64, doping: &str) -> RaceRecord {
        RaceRecord {
            time: String::new(),
            seconds,
            name: name.to_string(),
            year,
            nationality: "ITA".to_string(),
            doping: doping.to_string(),
            url: String::new(),
        }
    }

    #[test]
    fn formats_seconds_as_minutes_and_seconds() {
        assert_eq!(format_race_time(150.0), "02:30");
        assert_eq!(format_race_time(61.0), "01:01");
        assert_eq!(format_race_time(2210.0), "36:50");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_race_time(150.9), "02:30");
    }

    #[test]
    fn minutes_wrap_at_the_hour() {
        assert_eq!(format_race_time(3661.0), "01:01");
    }

    #[test]
    fn non_finite_seconds_format_as_zero() {
        assert_eq!(format_race_time(f64::NAN), "00:00");
    }

    #[test]
    fn display_time_prefers_dataset_string() {
        let mut r = record("Marco Pantani", 1995, 2210.0, "");
        assert_eq!(r.display_time(), "36:50");
        r.time = "36:50.5".to_string();
        assert_eq!(r.display_time(), "36:50.5");
    }

    #[test]
    fn deserializes_dataset_fields() {
        let json = r#"{
            "Time": "36:50",
            "Place": 1,
            "Seconds": 2210,
            "Name": "Marco Pantani",
            "Year": 1995,
            "Nationality": "ITA",
            "Doping": "Alleged drug use during 1995 due to high hematocrit levels",
            "URL": "https://en.wikipedia.org/wiki/Marco_Pantani#Alleged_drug_use"
        }"#;

        let r: RaceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.name, "Marco Pantani");
        assert_eq!(r.year, 1995);
        assert_eq!(r.seconds, 2210.0);
        assert!(r.url.ends_with("#Alleged_drug_use"));
        assert!(r.has_allegation());
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let json = r#"{"Seconds": 61, "Name": "A", "Year": 2000, "Nationality": "FRA"}"#;
        let r: RaceRecord = serde_json::from_str(json).unwrap();
        assert!(r.doping.is_empty());
        assert!(!r.has_allegation());
        assert_eq!(r.display_time(), "01:01");
    }

    #[test]
    fn rejects_year_without_calendar_date() {
        let err = Dataset::new(vec![record("Far Future", i32::MAX, 60.0, "")]).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidYear {
                name: "Far Future".to_string(),
                year: i32::MAX
            }
        );
    }

    #[test]
    fn rejects_year_whose_axis_start_has_no_calendar_date() {
        let earliest = NaiveDate::MIN.year();
        let err = Dataset::new(vec![record("Edge", earliest, 60.0, "")]).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidYear {
                name: "Edge".to_string(),
                year: earliest
            }
        );

        let ds = Dataset::new(vec![record("Edge", earliest + 1, 60.0, "")]).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn clones_share_identity_but_reloads_do_not() {
        let records = vec![record("A", 1994, 2200.0, "")];
        let a = Dataset::new(records.clone()).unwrap();
        let b = a.clone();
        let c = Dataset::new(records).unwrap();

        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn year_range_and_counts() {
        let ds = Dataset::new(vec![
            record("A", 1997, 2300.0, "x"),
            record("B", 1994, 2200.0, ""),
            record("C", 2015, 2400.0, ""),
        ])
        .unwrap();

        assert_eq!(ds.year_range(), Some((1994, 2015)));
        assert_eq!(ds.allegation_count(), 1);
        assert_eq!(Dataset::default().year_range(), None);
    }
}
