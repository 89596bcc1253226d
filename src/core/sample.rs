use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::domain::model::{DateRange, Observation, RawObservation, SampleKind};

pub const DEFAULT_START: &str = "2026-02-12";
pub const DEFAULT_END: &str = "2026-04-09";
pub const DEFAULT_TOTAL: i64 = 15;
pub const DEFAULT_WEEKDAY: Weekday = Weekday::Thu;
pub const DEFAULT_COMPLETIONS_YEAR: i32 = 2026;

const DEFAULT_COMPLETIONS: [&str; 16] = [
    "12-Mar", "12-Mar", "26-Feb", "19-Feb", "19-Mar", "26-Mar", "26-Feb", "26-Mar", "26-Mar",
    "2-Apr", "5-Mar", "2-Apr", "5-Mar", "9-Apr", "12-Mar", "19-Mar",
];

pub fn default_completions() -> Vec<String> {
    DEFAULT_COMPLETIONS.iter().map(|s| s.to_string()).collect()
}

/// Every `weekday` inside `range`, first one on or after `range.start`.
pub fn weekdays_between(range: &DateRange, weekday: Weekday) -> Vec<NaiveDate> {
    let offset = (7 + weekday.num_days_from_monday() as i64
        - range.start.weekday().num_days_from_monday() as i64)
        % 7;
    let first = range.start + Duration::days(offset);

    first
        .iter_weeks()
        .take_while(|day| *day <= range.end)
        .collect()
}

/// Input for one generated chart, shaped like a filled-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleData {
    pub range: DateRange,
    pub total: i64,
    pub observations: Vec<Observation>,
}

impl SampleData {
    /// One observation per `weekday`, cumulative counts spread evenly so the
    /// last one reaches `total`.
    pub fn weekly(range: DateRange, total: i64, weekday: Weekday) -> Self {
        let dates = weekdays_between(&range, weekday);
        let n = dates.len();
        let observations = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                let cumulative = (total as f64 * (i + 1) as f64 / n as f64).round() as i64;
                Observation::new(date, cumulative)
            })
            .collect();

        Self {
            range,
            total,
            observations,
        }
    }

    /// Tallies individual completions (`12-Mar`, `2-Apr`, ...) into cumulative
    /// observations. The total is the number of accepted entries.
    pub fn from_completions<S: AsRef<str>>(range: DateRange, entries: &[S], year: i32) -> Self {
        let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();

        for entry in entries {
            let entry = entry.as_ref().trim();
            match parse_day_month(entry, year) {
                Some(date) => *per_day.entry(date).or_insert(0) += 1,
                None => tracing::warn!("⚠️ Skipping unrecognised completion entry '{}'", entry),
            }
        }

        let mut cumulative = 0;
        let observations = per_day
            .into_iter()
            .map(|(date, count)| {
                cumulative += count;
                Observation::new(date, cumulative)
            })
            .collect();

        Self {
            range,
            total: cumulative,
            observations,
        }
    }

    pub fn from_kind(kind: &SampleKind, range: DateRange, total: i64, weekday: Weekday) -> Self {
        match kind {
            SampleKind::Weekly => Self::weekly(range, total, weekday),
            SampleKind::Completions { year, entries } => {
                Self::from_completions(range, entries, *year)
            }
        }
    }

    pub fn raw_observations(&self) -> Vec<RawObservation> {
        self.observations.iter().copied().map(RawObservation::from).collect()
    }
}

fn parse_day_month(entry: &str, year: i32) -> Option<NaiveDate> {
    let (day, month) = entry.split_once('-')?;
    if month.contains('-') {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{}-{}-{}", day, month, year), "%d-%b-%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn default_range() -> DateRange {
        DateRange::new(date(DEFAULT_START), date(DEFAULT_END))
    }

    #[test]
    fn test_thursdays_between_default_range() {
        let thursdays = weekdays_between(&default_range(), Weekday::Thu);
        assert_eq!(thursdays.len(), 9);
        assert_eq!(thursdays[0], date("2026-02-12"));
        assert_eq!(thursdays[8], date("2026-04-09"));
    }

    #[test]
    fn test_weekdays_between_advances_to_first_match() {
        let range = DateRange::new(date("2026-02-13"), date("2026-02-26"));
        let thursdays = weekdays_between(&range, Weekday::Thu);
        assert_eq!(thursdays, vec![date("2026-02-19"), date("2026-02-26")]);
    }

    #[test]
    fn test_weekdays_between_empty_when_none_fit() {
        let range = DateRange::new(date("2026-02-13"), date("2026-02-15"));
        assert!(weekdays_between(&range, Weekday::Thu).is_empty());
    }

    #[test]
    fn test_weekly_sample_reaches_total() {
        let sample = SampleData::weekly(default_range(), DEFAULT_TOTAL, Weekday::Thu);
        let counts: Vec<i64> = sample.observations.iter().map(|o| o.count).collect();
        assert_eq!(counts, vec![2, 3, 5, 7, 8, 10, 12, 13, 15]);
    }

    #[test]
    fn test_completions_are_tallied_cumulatively() {
        let sample =
            SampleData::from_completions(default_range(), &default_completions(), 2026);
        assert_eq!(sample.total, 16);
        assert_eq!(
            sample.observations.first(),
            Some(&Observation::new(date("2026-02-19"), 1))
        );
        assert_eq!(
            sample.observations.last(),
            Some(&Observation::new(date("2026-04-09"), 16))
        );
        assert_eq!(sample.observations.len(), 8);
    }

    #[test]
    fn test_completions_skip_malformed_entries() {
        let entries = ["5-Mar", "Mar", "1-2-3", "31-Feb", "7-mar"];
        let sample = SampleData::from_completions(default_range(), &entries, 2026);
        assert_eq!(sample.total, 2);
        assert_eq!(
            sample.observations,
            vec![
                Observation::new(date("2026-03-05"), 1),
                Observation::new(date("2026-03-07"), 2),
            ]
        );
    }
}
