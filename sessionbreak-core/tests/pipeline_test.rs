//! End-to-end scenarios through normalize → annotate_levels → simulate.

use chrono::{NaiveDate, NaiveDateTime};
use sessionbreak_core::{
    annotate_levels, normalize, simulate, Direction, ExitReason, RawBar, SessionClock, TradeState,
};

fn ts(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn bar(day: u32, hour: u32, open: f64, high: f64, low: f64, close: f64) -> RawBar {
    RawBar {
        timestamp: ts(day, hour),
        open,
        high,
        low,
        close,
    }
}

fn run(raw: Vec<RawBar>) -> Vec<sessionbreak_core::Trade> {
    let clock = SessionClock::default();
    let bars = normalize(raw, &clock).unwrap();
    let annotated = annotate_levels(&bars);
    simulate(&annotated, &clock)
}

#[test]
fn breakout_then_stop_hit() {
    // Reference window band 150/100 → stop at 125. Buy at 151 on the
    // 8 AM bar, stopped out when a later bar's low touches 124.
    let trades = run(vec![
        bar(4, 2, 149.0, 150.0, 100.0, 120.0),
        bar(4, 8, 151.0, 152.0, 150.5, 151.5),
        bar(4, 10, 130.0, 131.0, 124.0, 126.0),
    ]);

    assert_eq!(trades.len(), 1);
    let trade = &trades[0];
    assert_eq!(trade.direction, Direction::Buy);
    assert_eq!(trade.open_time, ts(4, 8));
    assert_eq!(trade.open_price, 151.0);
    assert_eq!(trade.state, TradeState::Closed);
    assert_eq!(trade.close_time, Some(ts(4, 10)));
    assert_eq!(trade.close_price, Some(125.0));
    assert_eq!(trade.exit_reason, Some(ExitReason::StopLoss));
}

#[test]
fn no_reference_window_means_no_entries() {
    // Day 5 has no bars before 08:00, so even a clear breakout-shaped
    // open in the entry window cannot trigger.
    let trades = run(vec![
        bar(4, 2, 149.0, 150.0, 100.0, 120.0),
        bar(5, 9, 151.0, 152.0, 150.5, 151.5),
        bar(5, 11, 99.0, 99.5, 98.0, 98.5),
    ]);
    assert!(trades.is_empty());
}

#[test]
fn forced_exit_closes_at_open_price() {
    // Opened at 9 AM, never near the stop, force-closed on the hour-17
    // bar at that bar's open even though the stop is far away.
    let trades = run(vec![
        bar(4, 3, 149.0, 150.0, 100.0, 120.0),
        bar(4, 9, 151.0, 152.0, 150.5, 151.5),
        bar(4, 13, 153.0, 154.0, 152.0, 153.5),
        bar(4, 17, 156.0, 157.0, 155.0, 156.5),
    ]);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].close_time, Some(ts(4, 17)));
    assert_eq!(trades[0].close_price, Some(156.0));
    assert_eq!(trades[0].exit_reason, Some(ExitReason::ForcedHour));
}

#[test]
fn unordered_input_is_handled_by_normalization() {
    // Same bars as breakout_then_stop_hit, shuffled.
    let trades = run(vec![
        bar(4, 10, 130.0, 131.0, 124.0, 126.0),
        bar(4, 2, 149.0, 150.0, 100.0, 120.0),
        bar(4, 8, 151.0, 152.0, 150.5, 151.5),
    ]);
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].close_price, Some(125.0));
}

#[test]
fn overnight_hold_closes_next_day() {
    // Day 4's stream ends before 17:00, so the trade survives into day 5.
    // Day 5 has no reference window, which suppresses stop checks even
    // though its bars dip through day 4's stop level; only the hour-18
    // forced exit can close.
    let trades = run(vec![
        bar(4, 1, 149.0, 150.0, 100.0, 120.0),
        bar(4, 11, 151.0, 152.0, 150.6, 151.5),
        bar(4, 16, 152.0, 153.0, 151.0, 152.5),
        bar(5, 10, 121.0, 122.0, 110.0, 115.0),
        bar(5, 18, 149.0, 150.0, 148.0, 149.5),
    ]);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].open_time, ts(4, 11));
    assert_eq!(trades[0].close_time, Some(ts(5, 18)));
    assert_eq!(trades[0].close_price, Some(149.0));
    assert_eq!(trades[0].exit_reason, Some(ExitReason::ForcedHour));
}
