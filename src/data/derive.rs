use super::model::{Series, SeriesCollection};

// ---------------------------------------------------------------------------
// Derived views: daily deltas and growth ratios
// ---------------------------------------------------------------------------

/// Day-over-day difference of each cumulative series. Day 0 is always 0.
pub fn derive_daily(total: &SeriesCollection) -> SeriesCollection {
    map_series(total, |values| {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| if i == 0 { 0.0 } else { v - values[i - 1] })
            .collect()
    })
}

/// Ratio of each day's delta to the sum of all earlier deltas.
///
/// The denominator is the running sum of `daily` *before* the current day,
/// so while that sum is still zero the growth is defined as zero.
pub fn derive_growth(daily: &SeriesCollection) -> SeriesCollection {
    map_series(daily, |values| {
        let mut running = 0.0;
        values
            .iter()
            .map(|&delta| {
                let last = running;
                running += delta;
                if last == 0.0 {
                    0.0
                } else {
                    delta / last
                }
            })
            .collect()
    })
}

fn map_series<F>(input: &SeriesCollection, f: F) -> SeriesCollection
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let entries = input
        .iter()
        .map(|s| Series::new(s.name.clone(), f(&s.values)))
        .collect();
    SeriesCollection::from_validated(input.day_count(), entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(values: &[f64]) -> SeriesCollection {
        SeriesCollection::new(values.len(), vec![Series::new("R", values.to_vec())]).unwrap()
    }

    #[test]
    fn daily_starts_at_zero() {
        let daily = derive_daily(&single(&[7.0, 9.0, 9.0, 15.0]));
        assert_eq!(daily.get("R").unwrap().values, vec![0.0, 2.0, 0.0, 6.0]);
    }

    #[test]
    fn daily_reconstructs_total_from_first_day() {
        let total = [12.0, 15.0, 15.0, 14.0, 30.0];
        let daily = derive_daily(&single(&total));
        let d = &daily.get("R").unwrap().values;
        for i in 0..total.len() {
            let rebuilt: f64 = total[0] + d[1..=i].iter().sum::<f64>();
            assert_eq!(rebuilt, total[i], "day {i}");
        }
    }

    #[test]
    fn negative_corrections_pass_through() {
        let daily = derive_daily(&single(&[10.0, 8.0]));
        assert_eq!(daily.get("R").unwrap().values, vec![0.0, -2.0]);
    }

    #[test]
    fn growth_uses_running_sum_of_earlier_days() {
        let growth = derive_growth(&single(&[0.0, 4.0, 2.0, 3.0]));
        // running sums before each day: 0, 0, 4, 6
        assert_eq!(growth.get("R").unwrap().values, vec![0.0, 0.0, 0.5, 0.5]);
    }

    #[test]
    fn growth_is_zero_while_nothing_accumulated() {
        let growth = derive_growth(&single(&[0.0, 0.0, 45.0]));
        assert_eq!(growth.get("R").unwrap().values, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn derived_views_keep_key_order() {
        let total = SeriesCollection::new(
            2,
            vec![
                Series::new("Zeta", vec![1.0, 9.0]),
                Series::new("Alpha", vec![1.0, 5.0]),
                Series::new("Mu", vec![0.0, 2.0]),
            ],
        )
        .unwrap();
        let daily = derive_daily(&total);
        let growth = derive_growth(&daily);
        assert_eq!(daily.keys(), total.keys());
        assert_eq!(growth.keys(), total.keys());
        assert_eq!(growth.day_count(), 2);
    }
}
