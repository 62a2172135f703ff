//! Date-range selection over timestamped records.

use time::macros::time;
use time::{Date, PrimitiveDateTime};

use crate::types::{
    ButtonHistoryEntry, Event, LedHistoryEntry, SensorReading, parse_timestamp,
};

/// A record carrying a backend timestamp.
pub trait Dated {
    /// The raw wire timestamp.
    fn timestamp_raw(&self) -> &str;

    /// Parsed civil timestamp, `None` when the wire value is unparseable.
    fn timestamp(&self) -> Option<PrimitiveDateTime> {
        parse_timestamp(self.timestamp_raw())
    }
}

impl Dated for SensorReading {
    fn timestamp_raw(&self) -> &str {
        &self.timestamp
    }
}

impl Dated for LedHistoryEntry {
    fn timestamp_raw(&self) -> &str {
        &self.timestamp
    }
}

impl Dated for ButtonHistoryEntry {
    fn timestamp_raw(&self) -> &str {
        &self.timestamp
    }
}

impl Dated for Event {
    fn timestamp_raw(&self) -> &str {
        &self.timestamp
    }
}

/// Select the records whose timestamp falls within `[start, end]`.
///
/// The range covers whole days: from `start` at midnight through `end` at
/// `23:59:59.999`. Records with no parseable timestamp are excluded. If
/// either bound is absent no filtering happens at all and the input is
/// returned unchanged: the caller asked for "everything", not "everything
/// before/after".
pub fn filter_by_date_range<T: Dated + Clone>(
    records: &[T],
    start: Option<Date>,
    end: Option<Date>,
) -> Vec<T> {
    let (Some(start), Some(end)) = (start, end) else {
        return records.to_vec();
    };

    let from = PrimitiveDateTime::new(start, time!(00:00:00));
    let until = PrimitiveDateTime::new(end, time!(23:59:59.999));

    records
        .iter()
        .filter(|record| {
            record
                .timestamp()
                .is_some_and(|ts| ts >= from && ts <= until)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::macros::date;

    fn reading(id: i64, timestamp: &str) -> SensorReading {
        SensorReading {
            id,
            device_type: "HC-SR05".to_string(),
            value: 1.0,
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn range_is_inclusive_of_whole_end_day() {
        let records = vec![
            reading(1, "2026-03-09T23:59:59.999"),
            reading(2, "2026-03-10T00:00:00"),
            reading(3, "2026-03-12T23:59:59.999"),
            reading(4, "2026-03-13T00:00:00"),
        ];
        let kept = filter_by_date_range(&records, Some(date!(2026-03-10)), Some(date!(2026-03-12)));
        let ids: Vec<i64> = kept.iter().map(|r| r.id).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn missing_bound_is_pass_through() {
        let records = vec![reading(1, "not a date"), reading(2, "2026-03-10T12:00:00")];
        assert_eq!(filter_by_date_range(&records, None, None).len(), 2);
        assert_eq!(
            filter_by_date_range(&records, Some(date!(2026-03-10)), None).len(),
            2
        );
        assert_eq!(
            filter_by_date_range(&records, None, Some(date!(2026-03-10))).len(),
            2
        );
    }

    #[test]
    fn unparseable_timestamps_are_excluded() {
        let records = vec![reading(1, "???"), reading(2, "2026-03-10T12:00:00")];
        let kept = filter_by_date_range(&records, Some(date!(2026-03-01)), Some(date!(2026-03-31)));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(days in proptest::collection::vec(1u8..28, 0..50)) {
            let records: Vec<SensorReading> = days
                .iter()
                .enumerate()
                .map(|(i, d)| reading(i as i64, &format!("2026-03-{:02}T12:00:00", d)))
                .collect();
            let start = Some(date!(2026-03-07));
            let end = Some(date!(2026-03-21));
            let once = filter_by_date_range(&records, start, end);
            let twice = filter_by_date_range(&once, start, end);
            prop_assert_eq!(once, twice);
        }
    }
}
