use std::collections::HashMap;

use super::error::PipelineError;
use super::model::{Row, Series, SeriesCollection, FIRST_DAY_FIELD, REGION_FIELD};

// ---------------------------------------------------------------------------
// Aggregation: raw rows → one summed series per region
// ---------------------------------------------------------------------------

/// Group rows by region name and sum their day columns element-wise.
///
/// * Rows without a region name are skipped.
/// * Every named row must carry exactly `day_count` day values.
/// * A day value that is not an integer aborts with [`PipelineError::MalformedRow`].
///
/// The result is in first-seen order; ranking fixes the final order.
pub fn aggregate(rows: &[Row], day_count: usize) -> Result<SeriesCollection, PipelineError> {
    let mut entries: Vec<Series> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (row_no, row) in rows.iter().enumerate() {
        let name = match row.get(REGION_FIELD) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };

        let payload = row.get(FIRST_DAY_FIELD..).unwrap_or(&[]);
        if payload.len() != day_count {
            return Err(PipelineError::InconsistentSeriesLength {
                region: name.clone(),
                expected: day_count,
                actual: payload.len(),
            });
        }

        let values = parse_counts(payload, row_no)?;

        let slot = *index.entry(name.clone()).or_insert_with(|| {
            entries.push(Series::new(name.clone(), vec![0.0; day_count]));
            entries.len() - 1
        });
        for (acc, v) in entries[slot].values.iter_mut().zip(values) {
            *acc += v;
        }
    }

    log::debug!("aggregated {} rows into {} regions", rows.len(), entries.len());
    Ok(SeriesCollection::from_validated(day_count, entries))
}

fn parse_counts(payload: &[String], row_no: usize) -> Result<Vec<f64>, PipelineError> {
    payload
        .iter()
        .enumerate()
        .map(|(j, tok)| {
            tok.trim()
                .parse::<i64>()
                .map(|n| n as f64)
                .map_err(|_| PipelineError::MalformedRow {
                    row: row_no,
                    field: FIRST_DAY_FIELD + j,
                    value: tok.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sums_rows_of_the_same_region() {
        let rows = vec![row(&["", "X", "", "", "1", "2"]), row(&["", "X", "", "", "3", "4"])];
        let out = aggregate(&rows, 2).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("X").unwrap().values, vec![4.0, 6.0]);
    }

    #[test]
    fn keeps_first_seen_order() {
        let rows = vec![
            row(&["a", "Canada", "0", "0", "1"]),
            row(&["", "Albania", "0", "0", "7"]),
            row(&["b", "Canada", "0", "0", "2"]),
        ];
        let out = aggregate(&rows, 1).unwrap();
        assert_eq!(out.keys(), vec!["Canada", "Albania"]);
        assert_eq!(out.get("Canada").unwrap().values, vec![3.0]);
    }

    #[test]
    fn skips_rows_without_region() {
        let rows = vec![
            row(&[""]),
            row(&["", "", "", "", "9"]),
            row(&["", "Y", "", "", "5"]),
        ];
        let out = aggregate(&rows, 1).unwrap();
        assert_eq!(out.keys(), vec!["Y"]);
    }

    #[test]
    fn non_numeric_field_is_fatal() {
        let rows = vec![row(&["", "X", "", "", "1", "two"])];
        let err = aggregate(&rows, 2).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MalformedRow {
                row: 0,
                field: 5,
                value: "two".into(),
            }
        );
    }

    #[test]
    fn row_length_must_match_header() {
        let rows = vec![
            row(&["", "X", "", "", "1", "2"]),
            row(&["", "X", "", "", "3"]),
        ];
        let err = aggregate(&rows, 2).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InconsistentSeriesLength { expected: 2, actual: 1, .. }
        ));
    }
}
