use serde::Deserialize;

use crate::domain::model::RawObservation;
use crate::utils::error::Result;

#[derive(Debug, Deserialize)]
struct ObservationRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    count: Option<i64>,
}

/// Reads `date,count` rows. Rows without a date are skipped and a blank
/// count reads as zero, the way half-filled table rows behave.
pub fn parse_observations(data: &[u8]) -> Result<Vec<RawObservation>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let mut observations = Vec::new();
    for (line, row) in reader.deserialize::<ObservationRow>().enumerate() {
        let row = row?;
        if row.date.is_empty() {
            tracing::debug!("Skipping observation row {} without a date", line + 1);
            continue;
        }
        observations.push(RawObservation::new(row.date, row.count.unwrap_or(0)));
    }

    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_observations() {
        let data = b"date,count\n2026-02-19,2\n2026-02-26, 5 \n";
        let observations = parse_observations(data).unwrap();
        assert_eq!(
            observations,
            vec![
                RawObservation::new("2026-02-19", 2),
                RawObservation::new("2026-02-26", 5),
            ]
        );
    }

    #[test]
    fn test_rows_without_date_are_skipped_and_blank_counts_are_zero() {
        let data = b"date,count\n,4\n2026-03-05,\n";
        let observations = parse_observations(data).unwrap();
        assert_eq!(observations, vec![RawObservation::new("2026-03-05", 0)]);
    }

    #[test]
    fn test_non_numeric_count_is_an_error() {
        let data = b"date,count\n2026-03-05,many\n";
        assert!(matches!(
            parse_observations(data),
            Err(crate::utils::error::BurndownError::Csv(_))
        ));
    }

    #[test]
    fn test_dates_are_not_validated_here() {
        let data = b"date,count\nnext week,1\n";
        let observations = parse_observations(data).unwrap();
        assert_eq!(observations[0].date, "next week");
    }
}
