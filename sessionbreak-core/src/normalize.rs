//! Bar normalization — ordering and calendar annotation.
//!
//! Upstream loaders promise consistent units but not ordering, so the
//! normalizer stable-sorts by timestamp (ties keep input order) before
//! annotating. Non-finite OHLC values are a hard error at this boundary;
//! silently dropping a bar would shift the reference-window aggregates
//! without a trace.

use chrono::Timelike;
use thiserror::Error;

use crate::clock::SessionClock;
use crate::domain::{RawBar, SessionBar};

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("non-finite OHLC value in bar {index} at {timestamp}")]
    NonFiniteOhlc {
        index: usize,
        timestamp: chrono::NaiveDateTime,
    },
}

/// Order and annotate a raw bar stream.
///
/// Returns bars sorted by timestamp (stable), each tagged with its
/// calendar date, hour-of-day, and reference-window membership per
/// `clock`. The date is the timestamp truncated to its own day; no
/// timezone conversion is performed.
pub fn normalize(raw: Vec<RawBar>, clock: &SessionClock) -> Result<Vec<SessionBar>, NormalizeError> {
    for (index, bar) in raw.iter().enumerate() {
        if bar.has_non_finite() {
            return Err(NormalizeError::NonFiniteOhlc {
                index,
                timestamp: bar.timestamp,
            });
        }
    }

    let mut ordered = raw;
    ordered.sort_by_key(|bar| bar.timestamp);

    Ok(ordered
        .into_iter()
        .map(|bar| {
            let hour = bar.timestamp.hour();
            SessionBar {
                timestamp: bar.timestamp,
                date: bar.timestamp.date(),
                hour,
                in_reference_session: clock.in_reference_window(hour),
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn raw(timestamp: NaiveDateTime, open: f64) -> RawBar {
        RawBar {
            timestamp,
            open,
            high: open + 0.5,
            low: open - 0.5,
            close: open + 0.2,
        }
    }

    #[test]
    fn sorts_by_timestamp() {
        let clock = SessionClock::default();
        let bars = normalize(
            vec![raw(ts(4, 9, 0), 2.0), raw(ts(4, 3, 0), 1.0), raw(ts(5, 1, 0), 3.0)],
            &clock,
        )
        .unwrap();
        assert_eq!(bars[0].open, 1.0);
        assert_eq!(bars[1].open, 2.0);
        assert_eq!(bars[2].open, 3.0);
    }

    #[test]
    fn sort_is_stable_for_equal_timestamps() {
        let clock = SessionClock::default();
        let t = ts(4, 9, 0);
        let bars = normalize(vec![raw(t, 1.0), raw(t, 2.0), raw(t, 3.0)], &clock).unwrap();
        let opens: Vec<f64> = bars.iter().map(|b| b.open).collect();
        assert_eq!(opens, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn annotates_date_hour_and_session() {
        let clock = SessionClock::default();
        let bars = normalize(vec![raw(ts(4, 7, 59), 1.0), raw(ts(4, 8, 0), 2.0)], &clock).unwrap();
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(bars[0].hour, 7);
        assert!(bars[0].in_reference_session);
        assert_eq!(bars[1].hour, 8);
        assert!(!bars[1].in_reference_session);
    }

    #[test]
    fn nan_ohlc_fails_fast() {
        let clock = SessionClock::default();
        let mut bad = raw(ts(4, 9, 0), 1.0);
        bad.close = f64::NAN;
        let err = normalize(vec![raw(ts(4, 8, 0), 1.0), bad], &clock).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::NonFiniteOhlc {
                index: 1,
                timestamp: ts(4, 9, 0)
            }
        );
    }

    #[test]
    fn empty_input_is_fine() {
        let clock = SessionClock::default();
        assert!(normalize(Vec::new(), &clock).unwrap().is_empty());
    }
}
