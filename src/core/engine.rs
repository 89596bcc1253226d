//! Pure burndown computation: date range + total + observations in,
//! aligned ideal/actual series out. No I/O, no clock, no shared state.

use chrono::NaiveDate;

use crate::domain::model::{Burndown, DateRange, Observation, RawObservation, Series};
use crate::utils::error::{BurndownError, Result};
use crate::utils::validation::parse_iso_date;

/// Every calendar date from `range.start` to `range.end`, both inclusive.
pub fn enumerate_days(range: &DateRange) -> Result<Vec<NaiveDate>> {
    if range.end < range.start {
        return Err(BurndownError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    Ok(range
        .start
        .iter_days()
        .take_while(|day| *day <= range.end)
        .collect())
}

/// Straight line from `total` on the first day to `0` on the last.
///
/// Each point is `total * (n-1-i) / (n-1)` rounded half up, computed in
/// integers so every `u64` total stays exact.
pub fn compute_ideal_series(days: &[NaiveDate], total: u64) -> Series {
    let n = days.len();
    match n {
        0 => Vec::new(),
        1 => vec![total],
        _ => {
            let span = (n - 1) as u128;
            let total = u128::from(total);
            (0..n)
                .map(|i| {
                    let left = span - i as u128;
                    let remaining = (2 * total * left + span) / (2 * span);
                    // remaining <= total, so it fits back into u64
                    remaining as u64
                })
                .collect()
        }
    }
}

/// Sorts by date, forces the counts to be non-decreasing, clamps them to
/// `[0, total]` and keeps one entry per date.
///
/// A count lower than an earlier one is raised to the earlier value:
/// cumulative completion never goes backwards.
pub fn normalize_observations(observations: &[Observation], total: u64) -> Vec<Observation> {
    let mut sorted = observations.to_vec();
    // stable sort: same-date entries keep input order
    sorted.sort_by_key(|obs| obs.date);

    // counts are i64, so a total above i64::MAX never clamps anything
    let ceiling = i64::try_from(total).unwrap_or(i64::MAX);
    let mut normalized: Vec<Observation> = Vec::with_capacity(sorted.len());
    let mut running = i64::MIN;

    for obs in sorted {
        running = running.max(obs.count);
        let count = running.clamp(0, ceiling);

        match normalized.last_mut() {
            Some(last) if last.date == obs.date => last.count = count,
            _ => normalized.push(Observation::new(obs.date, count)),
        }
    }

    normalized
}

/// Remaining work per day, carrying the latest observation on or before
/// each day forward. Days before the first observation report `total`.
///
/// `observations` must already be sorted ascending by date.
pub fn compute_actual_series(
    days: &[NaiveDate],
    observations: &[Observation],
    total: u64,
) -> Series {
    let mut series = Vec::with_capacity(days.len());
    let mut cursor = observations.iter().peekable();
    let mut last_cumulative: u64 = 0;

    for day in days {
        while let Some(obs) = cursor.next_if(|obs| obs.date <= *day) {
            // negative counts read as nothing completed
            last_cumulative = u64::try_from(obs.count).unwrap_or(0).min(total);
        }
        series.push(total - last_cumulative);
    }

    series
}

/// Validates the inputs and computes both series for `range`.
pub fn build_burndown(
    range: &DateRange,
    total: i64,
    observations: &[RawObservation],
) -> Result<Burndown> {
    if total <= 0 {
        return Err(BurndownError::validation(
            "Total packages must be a positive number.",
        ));
    }
    if range.end < range.start {
        return Err(BurndownError::validation(
            "Estimated date must be on or after start date.",
        ));
    }

    let parsed = observations
        .iter()
        .map(|raw| {
            let date = parse_iso_date("Observation date", &raw.date)?;
            Ok(Observation::new(date, raw.count))
        })
        .collect::<Result<Vec<_>>>()?;

    let total = total as u64;
    let days = enumerate_days(range)?;
    let normalized = normalize_observations(&parsed, total);
    tracing::debug!(
        days = days.len(),
        observations = normalized.len(),
        total,
        "computing burndown series"
    );

    let ideal = compute_ideal_series(&days, total);
    let actual = compute_actual_series(&days, &normalized, total);

    Ok(Burndown {
        total,
        days,
        ideal,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end))
    }

    #[test]
    fn test_enumerate_days_inclusive() {
        let days = enumerate_days(&range("2026-02-27", "2026-03-02")).unwrap();
        assert_eq!(
            days,
            vec![
                date("2026-02-27"),
                date("2026-02-28"),
                date("2026-03-01"),
                date("2026-03-02"),
            ]
        );
    }

    #[test]
    fn test_enumerate_days_rejects_reversed_range() {
        let err = enumerate_days(&range("2026-02-19", "2026-02-12")).unwrap_err();
        assert!(matches!(err, BurndownError::InvalidRange { .. }));
    }

    #[test]
    fn test_ideal_series_shapes() {
        let days = enumerate_days(&range("2026-02-12", "2026-02-16")).unwrap();
        assert_eq!(compute_ideal_series(&days, 8), vec![8, 6, 4, 2, 0]);
        assert_eq!(compute_ideal_series(&days[..1], 8), vec![8]);
        assert!(compute_ideal_series(&[], 8).is_empty());
    }

    #[test]
    fn test_ideal_series_rounds_half_up() {
        let days = enumerate_days(&range("2026-02-12", "2026-02-14")).unwrap();
        // 3 * 0.5 = 1.5
        assert_eq!(compute_ideal_series(&days, 3), vec![3, 2, 0]);
    }

    #[test]
    fn test_large_totals_stay_exact() {
        let total = (1i64 << 53) + 1;
        let burndown = build_burndown(&range("2026-02-12", "2026-02-13"), total, &[]).unwrap();
        assert_eq!(burndown.ideal, vec![total as u64, 0]);
        assert_eq!(burndown.actual, vec![total as u64, total as u64]);

        let burndown = build_burndown(
            &range("2026-02-12", "2026-02-14"),
            i64::MAX,
            &[RawObservation::new("2026-02-14", i64::MAX)],
        )
        .unwrap();
        // i64::MAX / 2 = ...903.5, rounds up
        assert_eq!(
            burndown.ideal,
            vec![i64::MAX as u64, 4_611_686_018_427_387_904, 0]
        );
        assert_eq!(burndown.actual, vec![i64::MAX as u64, i64::MAX as u64, 0]);
    }

    #[test]
    fn test_actual_series_above_i64_range() {
        let days = enumerate_days(&range("2026-02-12", "2026-02-13")).unwrap();
        let total = u64::MAX;
        let obs = vec![Observation::new(date("2026-02-13"), 5)];
        assert_eq!(compute_actual_series(&days, &obs, total), vec![total, total - 5]);
        assert_eq!(compute_ideal_series(&days, total), vec![total, 0]);
    }

    #[test]
    fn test_normalize_raises_decreasing_counts() {
        let obs = vec![
            Observation::new(date("2026-02-19"), 5),
            Observation::new(date("2026-02-12"), 8),
        ];
        let normalized = normalize_observations(&obs, 10);
        assert_eq!(
            normalized,
            vec![
                Observation::new(date("2026-02-12"), 8),
                Observation::new(date("2026-02-19"), 8),
            ]
        );

        let clamped = normalize_observations(&obs, 6);
        assert!(clamped.iter().all(|o| o.count == 6));
    }

    #[test]
    fn test_normalize_collapses_duplicate_dates() {
        let obs = vec![
            Observation::new(date("2026-02-12"), 2),
            Observation::new(date("2026-02-13"), 3),
            Observation::new(date("2026-02-13"), 4),
            Observation::new(date("2026-02-14"), -1),
        ];
        let normalized = normalize_observations(&obs, 10);
        assert_eq!(
            normalized,
            vec![
                Observation::new(date("2026-02-12"), 2),
                Observation::new(date("2026-02-13"), 4),
                Observation::new(date("2026-02-14"), 4),
            ]
        );
    }

    #[test]
    fn test_normalize_clamps_negative_to_zero() {
        let obs = vec![Observation::new(date("2026-02-12"), -3)];
        assert_eq!(normalize_observations(&obs, 10)[0].count, 0);
    }

    #[test]
    fn test_actual_series_carries_forward() {
        let days = enumerate_days(&range("2026-02-12", "2026-02-16")).unwrap();
        let obs = vec![
            Observation::new(date("2026-02-10"), 1),
            Observation::new(date("2026-02-13"), 4),
            Observation::new(date("2026-02-15"), 7),
        ];
        assert_eq!(compute_actual_series(&days, &obs, 10), vec![9, 6, 6, 3, 3]);
    }

    #[test]
    fn test_actual_series_ignores_observations_after_range() {
        let days = enumerate_days(&range("2026-02-12", "2026-02-13")).unwrap();
        let obs = vec![Observation::new(date("2026-03-01"), 10)];
        assert_eq!(compute_actual_series(&days, &obs, 10), vec![10, 10]);
    }

    #[test]
    fn test_scenario_single_day_without_observations() {
        let burndown = build_burndown(&range("2026-02-12", "2026-02-12"), 10, &[]).unwrap();
        assert_eq!(burndown.days, vec![date("2026-02-12")]);
        assert_eq!(burndown.ideal, vec![10]);
        assert_eq!(burndown.actual, vec![10]);
    }

    #[test]
    fn test_scenario_completed_on_last_day() {
        let burndown = build_burndown(
            &range("2026-02-12", "2026-02-19"),
            10,
            &[RawObservation::new("2026-02-19", 10)],
        )
        .unwrap();
        assert_eq!(burndown.len(), 8);
        assert_eq!(burndown.actual, vec![10, 10, 10, 10, 10, 10, 10, 0]);
        assert_eq!(burndown.ideal[0], 10);
        assert_eq!(burndown.ideal[7], 0);
    }

    #[test]
    fn test_scenario_out_of_order_observations() {
        let burndown = build_burndown(
            &range("2026-02-12", "2026-02-14"),
            10,
            &[
                RawObservation::new("2026-02-14", 5),
                RawObservation::new("2026-02-13", 8),
            ],
        )
        .unwrap();
        assert_eq!(burndown.actual, vec![10, 2, 2]);
    }

    #[test]
    fn test_build_rejects_non_positive_total() {
        let err = build_burndown(&range("2026-02-12", "2026-02-19"), 0, &[]).unwrap_err();
        assert!(matches!(err, BurndownError::Validation { .. }));
        assert!(build_burndown(&range("2026-02-12", "2026-02-19"), -4, &[]).is_err());
    }

    #[test]
    fn test_build_rejects_reversed_range() {
        let err = build_burndown(&range("2026-02-19", "2026-02-12"), 10, &[]).unwrap_err();
        assert!(matches!(err, BurndownError::Validation { .. }));
    }

    #[test]
    fn test_build_rejects_unparseable_observation_date() {
        let err = build_burndown(
            &range("2026-02-12", "2026-02-19"),
            10,
            &[RawObservation::new("19 Feb", 3)],
        )
        .unwrap_err();
        assert!(matches!(err, BurndownError::Validation { .. }));
        assert!(err.user_friendly_message().contains("19 Feb"));
    }

    #[test]
    fn test_build_is_idempotent() {
        let r = range("2026-02-12", "2026-04-09");
        let obs = vec![
            RawObservation::new("2026-03-05", 6),
            RawObservation::new("2026-02-19", 2),
        ];
        assert_eq!(
            build_burndown(&r, 15, &obs).unwrap(),
            build_burndown(&r, 15, &obs).unwrap()
        );
    }
}
