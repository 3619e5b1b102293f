use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl TargetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPeriod::Daily => "daily",
            TargetPeriod::Weekly => "weekly",
            TargetPeriod::Monthly => "monthly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Some(TargetPeriod::Daily),
            "weekly" => Some(TargetPeriod::Weekly),
            "monthly" => Some(TargetPeriod::Monthly),
            _ => None,
        }
    }

    /// End of a period that begins at `start`.
    pub fn end_from(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TargetPeriod::Daily => start + Duration::days(1),
            TargetPeriod::Weekly => start + Duration::days(7),
            // Clamps to the last day of a shorter month (Jan 31 -> Feb 29)
            TargetPeriod::Monthly => start
                .checked_add_months(Months::new(1))
                .unwrap_or(start + Duration::days(30)),
        }
    }
}

impl std::fmt::Display for TargetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time remaining before a target period closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "days")]
pub enum TimeLeft {
    Expired,
    Today,
    Days(i64),
}

impl std::fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeLeft::Expired => write!(f, "Expired"),
            TimeLeft::Today => write!(f, "Today"),
            TimeLeft::Days(1) => write!(f, "1 day left"),
            TimeLeft::Days(n) => write!(f, "{} days left", n),
        }
    }
}

/// An income goal for a daily, weekly or monthly period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub period: TargetPeriod,
    pub amount: Cents,
    pub enabled: bool,
    pub start_date: DateTime<Utc>,
}

impl Target {
    pub fn new(period: TargetPeriod, amount: Cents, start_date: DateTime<Utc>) -> Self {
        Self {
            id: period.as_str().to_string(),
            period,
            amount,
            enabled: true,
            start_date,
        }
    }

    /// The three stock targets a fresh session starts with.
    pub fn defaults(now: DateTime<Utc>) -> Vec<Target> {
        let month_start = now
            .date_naive()
            .with_day(1)
            .unwrap_or(now.date_naive())
            .and_time(NaiveTime::MIN)
            .and_utc();

        vec![
            Target::new(TargetPeriod::Daily, 20000, now),
            Target::new(TargetPeriod::Weekly, 120000, now - Duration::days(5)),
            Target::new(TargetPeriod::Monthly, 500000, month_start).toggled(),
        ]
    }

    pub fn with_amount(mut self, amount: Cents) -> Self {
        self.amount = amount;
        self
    }

    pub fn toggled(mut self) -> Self {
        self.enabled = !self.enabled;
        self
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.period.end_from(self.start_date)
    }

    /// Whole days until the period closes, rounded up.
    pub fn time_left(&self, now: DateTime<Utc>) -> TimeLeft {
        let remaining_ms = (self.end_date() - now).num_milliseconds();
        let day_ms = Duration::days(1).num_milliseconds();
        // Ceiling division that also rounds negative values toward zero
        let days = if remaining_ms > 0 {
            (remaining_ms + day_ms - 1) / day_ms
        } else {
            remaining_ms / day_ms
        };

        match days {
            d if d < 0 => TimeLeft::Expired,
            0 => TimeLeft::Today,
            d => TimeLeft::Days(d),
        }
    }

    /// Share of the target reached, capped at 100.
    pub fn progress_percentage(&self, current: Cents) -> f64 {
        if self.amount <= 0 {
            return if current > 0 { 100.0 } else { 0.0 };
        }
        (current as f64 / self.amount as f64 * 100.0).min(100.0)
    }
}

/// How far a target has come along in its current period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProgress {
    pub target: Target,
    pub current: Cents,
    pub percentage: f64,
    pub time_left: TimeLeft,
}

impl TargetProgress {
    pub fn new(target: Target, current: Cents, now: DateTime<Utc>) -> Self {
        Self {
            percentage: target.progress_percentage(current),
            time_left: target.time_left(now),
            current,
            target,
        }
    }

    pub fn remaining(&self) -> Cents {
        (self.target.amount - self.current).max(0)
    }

    /// Amount still needed per remaining day, counting the last day as one.
    pub fn daily_needed(&self) -> Cents {
        let days = match self.time_left {
            TimeLeft::Days(n) => n.max(1),
            TimeLeft::Today | TimeLeft::Expired => 1,
        };
        self.remaining() / days
    }
}
