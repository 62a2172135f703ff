//! Summary statistics and chart dataset builders.
//!
//! Every view that needs derived numbers goes through this module so the
//! arithmetic exists exactly once. All functions are pure and operate on
//! slices fetched wholesale from the backend.

use crate::types::{LedHistoryEntry, SensorReading, Statistics};

/// Distance-range histogram boundaries, in centimeters.
///
/// Buckets are half-open: `[0,10) [10,30) [30,50) [50,100) [100,∞)`.
pub const DISTANCE_BUCKETS: [f64; 5] = [0.0, 10.0, 30.0, 50.0, 100.0];

/// One histogram bucket: a labeled half-open value range and its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Range label, e.g. `"10-30 cm"` or `">100 cm"`.
    pub label: String,
    pub count: usize,
}

/// ON/OFF change tallies for one LED, derived from its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedActivity {
    pub device_id: i64,
    pub on: usize,
    pub off: usize,
}

/// Compute count/mean/min/max over a batch of readings.
///
/// An empty batch yields all zeros. This is an explicit policy, not an error, so
/// views can render a dashboard before the first sample arrives.
pub fn compute_statistics(readings: &[SensorReading]) -> Statistics {
    if readings.is_empty() {
        return Statistics::default();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for reading in readings {
        min = min.min(reading.value);
        max = max.max(reading.value);
        sum += reading.value;
    }

    Statistics {
        total_count: readings.len() as u64,
        mean: sum / readings.len() as f64,
        min,
        max,
    }
}

/// Histogram readings into half-open buckets defined by `boundaries`.
///
/// `boundaries` must be ascending; `[b0, b1, ..., bn]` produces the buckets
/// `[b0,b1) ... [b(n-1),bn) [bn,∞)`. Every reading lands in exactly one
/// bucket: values below `b1` (including anything under `b0`) count into the
/// first, so the bucket counts always sum to `readings.len()`.
pub fn bucketize(readings: &[SensorReading], boundaries: &[f64]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = boundaries
        .windows(2)
        .map(|pair| Bucket {
            label: format!("{}-{} cm", fmt_bound(pair[0]), fmt_bound(pair[1])),
            count: 0,
        })
        .collect();
    if let Some(last) = boundaries.last() {
        buckets.push(Bucket {
            label: format!(">{} cm", fmt_bound(*last)),
            count: 0,
        });
    }
    if buckets.is_empty() {
        return buckets;
    }

    for reading in readings {
        let idx = boundaries[1..]
            .iter()
            .position(|bound| reading.value < *bound)
            .unwrap_or(buckets.len() - 1);
        buckets[idx].count += 1;
    }

    buckets
}

/// Count records per key, preserving first-occurrence order.
///
/// Chart legends render tallies in the order keys first appear in the data,
/// so the result is an ordered list rather than a map.
pub fn group_count_by<T, K, F>(records: &[T], key: F) -> Vec<(K, usize)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut counts: Vec<(K, usize)> = Vec::new();
    for record in records {
        let k = key(record);
        match counts.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, count)) => *count += 1,
            None => counts.push((k, 1)),
        }
    }
    counts
}

/// Tally ON vs OFF changes per LED, in first-occurrence order.
pub fn led_activity(entries: &[LedHistoryEntry]) -> Vec<LedActivity> {
    let mut tallies: Vec<LedActivity> = Vec::new();
    for entry in entries {
        let tally = match tallies.iter_mut().find(|t| t.device_id == entry.device_id) {
            Some(t) => t,
            None => {
                tallies.push(LedActivity {
                    device_id: entry.device_id,
                    on: 0,
                    off: 0,
                });
                tallies.last_mut().expect("just pushed")
            }
        };
        if entry.on {
            tally.on += 1;
        } else {
            tally.off += 1;
        }
    }
    tallies
}

/// Last `n` reading values in chronological order.
///
/// The backend returns readings newest-first; trend charts want them
/// oldest-first, so this takes the head of the batch and reverses it.
pub fn recent_series(readings: &[SensorReading], n: usize) -> Vec<f64> {
    let mut values: Vec<f64> = readings.iter().take(n).map(|r| r.value).collect();
    values.reverse();
    values
}

fn fmt_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;
    use proptest::prelude::*;

    fn reading(id: i64, value: f64) -> SensorReading {
        SensorReading {
            id,
            device_type: "HC-SR05".to_string(),
            value,
            timestamp: "2026-01-02T03:04:05".to_string(),
        }
    }

    fn hist(id: i64, device_id: i64, on: bool, source: Source) -> LedHistoryEntry {
        LedHistoryEntry {
            id,
            device_id,
            actor: "ana".to_string(),
            on,
            source,
            timestamp: "2026-01-02T03:04:05".to_string(),
        }
    }

    #[test]
    fn statistics_empty_is_all_zero() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn statistics_basic() {
        let readings = vec![reading(1, 10.0), reading(2, 20.0), reading(3, 60.0)];
        let stats = compute_statistics(&readings);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.mean, 30.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 60.0);
    }

    #[test]
    fn bucketize_distance_ranges() {
        let readings = vec![
            reading(1, 0.0),
            reading(2, 9.99),
            reading(3, 10.0),
            reading(4, 49.0),
            reading(5, 99.9),
            reading(6, 100.0),
            reading(7, 250.0),
        ];
        let buckets = bucketize(&readings, &DISTANCE_BUCKETS);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            ["0-10 cm", "10-30 cm", "30-50 cm", "50-100 cm", ">100 cm"]
        );
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, [2, 1, 1, 1, 2]);
    }

    #[test]
    fn bucketize_empty_boundaries() {
        assert!(bucketize(&[reading(1, 5.0)], &[]).is_empty());
    }

    #[test]
    fn group_count_preserves_first_occurrence_order() {
        let entries = vec![
            hist(1, 2, true, Source::Web),
            hist(2, 1, false, Source::Hardware),
            hist(3, 2, false, Source::Web),
        ];
        let by_device = group_count_by(&entries, |e| e.device_id);
        assert_eq!(by_device, vec![(2, 2), (1, 1)]);

        let by_source = group_count_by(&entries, |e| e.source);
        assert_eq!(by_source, vec![(Source::Web, 2), (Source::Hardware, 1)]);
    }

    #[test]
    fn led_activity_tallies_on_off() {
        let entries = vec![
            hist(1, 1, true, Source::Web),
            hist(2, 1, false, Source::Hardware),
            hist(3, 1, true, Source::Web),
            hist(4, 3, false, Source::Web),
        ];
        let activity = led_activity(&entries);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].device_id, 1);
        assert_eq!(activity[0].on, 2);
        assert_eq!(activity[0].off, 1);
        assert_eq!(activity[1].device_id, 3);
        assert_eq!(activity[1].off, 1);
    }

    #[test]
    fn recent_series_is_chronological() {
        // Newest-first input, as the backend returns it.
        let readings = vec![reading(3, 30.0), reading(2, 20.0), reading(1, 10.0)];
        assert_eq!(recent_series(&readings, 2), vec![20.0, 30.0]);
        assert_eq!(recent_series(&readings, 10), vec![10.0, 20.0, 30.0]);
    }

    proptest! {
        #[test]
        fn mean_is_bounded_by_extrema(values in proptest::collection::vec(0.0f64..500.0, 1..100)) {
            let readings: Vec<SensorReading> = values
                .iter()
                .enumerate()
                .map(|(i, v)| reading(i as i64, *v))
                .collect();
            let stats = compute_statistics(&readings);
            prop_assert!(stats.min <= stats.mean + 1e-9);
            prop_assert!(stats.mean <= stats.max + 1e-9);
        }

        #[test]
        fn buckets_partition_readings(values in proptest::collection::vec(0.0f64..500.0, 0..100)) {
            let readings: Vec<SensorReading> = values
                .iter()
                .enumerate()
                .map(|(i, v)| reading(i as i64, *v))
                .collect();
            let total: usize = bucketize(&readings, &DISTANCE_BUCKETS)
                .iter()
                .map(|b| b.count)
                .sum();
            prop_assert_eq!(total, readings.len());
        }

        #[test]
        fn buckets_partition_with_arbitrary_boundaries(
            values in proptest::collection::vec(-50.0f64..500.0, 0..60),
            mut bounds in proptest::collection::vec(0.0f64..200.0, 1..8),
        ) {
            bounds.sort_by(|a, b| a.partial_cmp(b).expect("no NaN"));
            bounds.dedup();
            let readings: Vec<SensorReading> = values
                .iter()
                .enumerate()
                .map(|(i, v)| reading(i as i64, *v))
                .collect();
            let total: usize = bucketize(&readings, &bounds).iter().map(|b| b.count).sum();
            prop_assert_eq!(total, readings.len());
        }
    }
}
