mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{days_ago, earning, fixed_now, parse_date, store_at};
use shiftledger::application::target_report;
use shiftledger::domain::{Target, TargetPeriod, TimeLeft};

#[test]
fn test_daily_target_tracks_today() {
    let now = fixed_now();
    let mut store = store_at(now);
    store.add_earning(earning("1", 14750, days_ago(0)));
    store.add_earning(earning("2", 10000, days_ago(1)));

    let progress = store.target_progress(&Target::new(TargetPeriod::Daily, 20000, now));

    assert_eq!(progress.current, 14750);
    assert_eq!(progress.percentage, 73.75);
    assert_eq!(progress.remaining(), 5250);
    assert_eq!(progress.time_left, TimeLeft::Days(1));
    assert_eq!(progress.daily_needed(), 5250);
}

#[test]
fn test_weekly_target_uses_rolling_window() {
    let now = fixed_now();
    let mut store = store_at(now);
    store.add_earning(earning("1", 60000, days_ago(3)));
    store.add_earning(earning("2", 80000, days_ago(7)));
    store.add_earning(earning("3", 99999, days_ago(8)));

    let target = Target::new(TargetPeriod::Weekly, 120000, now - Duration::days(5));
    let progress = store.target_progress(&target);

    assert_eq!(progress.current, 140000);
    assert_eq!(progress.percentage, 100.0);
    assert_eq!(progress.remaining(), 0);
    assert_eq!(progress.time_left, TimeLeft::Days(2));
    assert_eq!(progress.daily_needed(), 0);
}

#[test]
fn test_monthly_target_counts_month_to_date() {
    let now = Utc.with_ymd_and_hms(2024, 2, 3, 10, 0, 0).unwrap();
    let mut store = store_at(now);
    store.add_earning(earning("1", 25000, parse_date("2024-02-01")));
    store.add_earning(earning("2", 40000, parse_date("2024-01-30")));

    let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let progress = store.target_progress(&Target::new(TargetPeriod::Monthly, 500000, start));

    assert_eq!(progress.current, 25000);
    assert_eq!(progress.percentage, 5.0);
    // Period closes on 2024-03-01
    assert_eq!(progress.time_left, TimeLeft::Days(27));
    // 4750.00 left over 27 days
    assert_eq!(progress.daily_needed(), 17592);
}

#[test]
fn test_expired_target() {
    let now = fixed_now();
    let store = store_at(now);
    let stale = Target::new(TargetPeriod::Daily, 20000, now - Duration::days(3));

    assert_eq!(store.target_progress(&stale).time_left, TimeLeft::Expired);
}

#[test]
fn test_target_report_with_adjusted_defaults() {
    let now = fixed_now();
    let mut store = store_at(now);
    store.add_earning(earning("1", 30000, days_ago(0)));

    let targets: Vec<Target> = Target::defaults(now)
        .into_iter()
        .map(|t| match t.period {
            TargetPeriod::Daily => t.with_amount(60000),
            TargetPeriod::Monthly => t.toggled(),
            TargetPeriod::Weekly => t.toggled(),
        })
        .collect();

    let report = target_report(&store, &targets);

    let periods: Vec<TargetPeriod> = report.iter().map(|p| p.target.period).collect();
    assert_eq!(periods, vec![TargetPeriod::Daily, TargetPeriod::Monthly]);
    assert_eq!(report[0].percentage, 50.0);
    assert_eq!(report[1].current, 30000);
}
