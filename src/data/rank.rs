use std::cmp::Ordering;

use super::error::PipelineError;
use super::model::SeriesCollection;

/// Order regions by their final cumulative value, largest first.
///
/// The sort is stable, so regions with equal final values keep their
/// first-seen order. The returned collection is the canonical total view.
pub fn rank(collection: SeriesCollection) -> Result<SeriesCollection, PipelineError> {
    let day_count = collection.day_count();
    let mut keyed = Vec::with_capacity(collection.len());
    for series in collection.into_entries() {
        let last = series.last().ok_or_else(|| PipelineError::EmptySeries {
            region: series.name.clone(),
        })?;
        keyed.push((last, series));
    }

    keyed.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    Ok(SeriesCollection::from_validated(
        day_count,
        keyed.into_iter().map(|(_, s)| s).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Series;

    fn collection(entries: &[(&str, &[f64])]) -> SeriesCollection {
        let n = entries.first().map(|(_, v)| v.len()).unwrap_or(0);
        SeriesCollection::new(
            n,
            entries
                .iter()
                .map(|(name, v)| Series::new(*name, v.to_vec()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn sorts_by_final_value_descending() {
        let ranked = rank(collection(&[
            ("A", &[10.0, 20.0, 30.0]),
            ("B", &[5.0, 5.0, 50.0]),
            ("C", &[0.0, 0.0, 40.0]),
        ]))
        .unwrap();
        assert_eq!(ranked.keys(), vec!["B", "C", "A"]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let ranked = rank(collection(&[
            ("First", &[1.0, 7.0]),
            ("Big", &[0.0, 9.0]),
            ("Second", &[3.0, 7.0]),
            ("Third", &[7.0, 7.0]),
        ]))
        .unwrap();
        assert_eq!(ranked.keys(), vec!["Big", "First", "Second", "Third"]);
    }

    #[test]
    fn empty_series_is_an_error() {
        let err = rank(collection(&[("Nowhere", &[])])).unwrap_err();
        assert_eq!(
            err,
            PipelineError::EmptySeries {
                region: "Nowhere".into()
            }
        );
    }

    #[test]
    fn empty_collection_ranks_to_empty() {
        assert!(rank(SeriesCollection::default()).unwrap().is_empty());
    }
}
