//! Session level calculation — one band per calendar date.
//!
//! Two passes: aggregate the reference-window bars of each date into a
//! `DailyLevels`, then left-join the table back onto every bar of the
//! stream. The join preserves input order exactly and never recomputes;
//! reference-window bars receive their own date's full-window band, not
//! a running partial.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{DailyLevels, LevelBar, SessionBar};

/// Attach each bar's date-level band. Dates with no reference-window
/// bars produce `levels: None` for all of their bars.
pub fn annotate_levels(bars: &[SessionBar]) -> Vec<LevelBar> {
    let table = build_level_table(bars);
    bars.iter()
        .map(|bar| LevelBar {
            bar: bar.clone(),
            levels: table.get(&bar.date).copied(),
        })
        .collect()
}

/// Aggregate reference-window bars into one `DailyLevels` per date.
pub fn build_level_table(bars: &[SessionBar]) -> HashMap<NaiveDate, DailyLevels> {
    let mut bands: HashMap<NaiveDate, (f64, f64)> = HashMap::new();
    for bar in bars.iter().filter(|b| b.in_reference_session) {
        bands
            .entry(bar.date)
            .and_modify(|(high, low)| {
                *high = high.max(bar.high);
                *low = low.min(bar.low);
            })
            .or_insert((bar.high, bar.low));
    }
    bands
        .into_iter()
        .map(|(date, (high, low))| (date, DailyLevels::from_band(date, high, low)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn session_bar(day: u32, hour: u32, high: f64, low: f64) -> SessionBar {
        SessionBar {
            timestamp: ts(day, hour),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            hour,
            in_reference_session: hour < 8,
            open: (high + low) / 2.0,
            high,
            low,
            close: (high + low) / 2.0,
        }
    }

    #[test]
    fn band_aggregates_reference_window_only() {
        let bars = vec![
            session_bar(4, 1, 150.0, 120.0),
            session_bar(4, 5, 140.0, 100.0),
            // Entry-window bar: wider range, must not widen the band.
            session_bar(4, 9, 200.0, 50.0),
        ];
        let annotated = annotate_levels(&bars);
        let levels = annotated[0].levels.unwrap();
        assert_eq!(levels.session_high, 150.0);
        assert_eq!(levels.session_low, 100.0);
        assert_eq!(levels.stop_loss, 125.0);
    }

    #[test]
    fn all_bars_of_a_date_share_one_band() {
        let bars = vec![
            session_bar(4, 0, 150.0, 100.0),
            session_bar(4, 7, 149.0, 101.0),
            session_bar(4, 9, 155.0, 99.0),
            session_bar(4, 18, 152.0, 98.0),
        ];
        let annotated = annotate_levels(&bars);
        let first = annotated[0].levels.unwrap();
        for lb in &annotated {
            assert_eq!(lb.levels.unwrap(), first);
        }
    }

    #[test]
    fn reference_bars_get_their_own_days_full_band() {
        // The 01:00 bar is annotated with the band including the 07:00 bar.
        let bars = vec![session_bar(4, 1, 110.0, 105.0), session_bar(4, 7, 150.0, 100.0)];
        let annotated = annotate_levels(&bars);
        assert_eq!(annotated[0].levels.unwrap().session_high, 150.0);
        assert_eq!(annotated[0].levels.unwrap().session_low, 100.0);
    }

    #[test]
    fn date_without_reference_bars_has_no_levels() {
        let bars = vec![
            session_bar(4, 2, 150.0, 100.0),
            session_bar(5, 9, 160.0, 140.0),
            session_bar(5, 10, 161.0, 141.0),
        ];
        let annotated = annotate_levels(&bars);
        assert!(annotated[0].levels.is_some());
        assert!(annotated[1].levels.is_none());
        assert!(annotated[2].levels.is_none());
    }

    #[test]
    fn dates_are_independent() {
        let bars = vec![session_bar(4, 1, 150.0, 100.0), session_bar(5, 1, 80.0, 60.0)];
        let annotated = annotate_levels(&bars);
        assert_eq!(annotated[0].levels.unwrap().stop_loss, 125.0);
        assert_eq!(annotated[1].levels.unwrap().stop_loss, 70.0);
    }

    #[test]
    fn join_preserves_input_order() {
        let bars = vec![
            session_bar(5, 1, 80.0, 60.0),
            session_bar(4, 1, 150.0, 100.0),
            session_bar(4, 9, 155.0, 120.0),
        ];
        let annotated = annotate_levels(&bars);
        let stamps: Vec<_> = annotated.iter().map(|lb| lb.bar.timestamp).collect();
        assert_eq!(stamps, vec![ts(5, 1), ts(4, 1), ts(4, 9)]);
    }
}
