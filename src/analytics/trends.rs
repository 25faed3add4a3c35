//! Spending over time
//!
//! Splits a date range into contiguous buckets and totals each one.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::kpis::average;
use super::Granularity;
use crate::models::period::month_end;
use crate::models::{DateRange, Money, Transaction};

/// Relative change between halves that still counts as flat
const STABLE_TOLERANCE: f64 = 0.05;

/// Totals for one bucket
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSummary {
    pub average_expenses: Money,
    /// Index into `points` of the bucket with the highest expenses
    pub peak: Option<usize>,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendingTrends {
    pub range: DateRange,
    pub granularity: Granularity,
    pub points: Vec<TrendPoint>,
    pub summary: TrendSummary,
}

impl SpendingTrends {
    pub fn peak_point(&self) -> Option<&TrendPoint> {
        self.summary.peak.and_then(|i| self.points.get(i))
    }
}

/// Bucket the transactions in `range` by `granularity`
///
/// Weeks start on Monday and months on the 1st; the first and last buckets
/// are clipped to the range. Empty buckets are kept.
pub fn spending_trends(
    transactions: &[Transaction],
    range: DateRange,
    granularity: Granularity,
) -> SpendingTrends {
    let mut points = buckets(range, granularity);

    for txn in transactions.iter().filter(|t| range.contains(t.date)) {
        let idx = points.partition_point(|p| p.end < txn.date);
        if let Some(point) = points.get_mut(idx) {
            if txn.is_income() {
                point.income += txn.amount;
            } else {
                point.expenses += txn.amount;
            }
            point.transaction_count += 1;
        }
    }

    for point in &mut points {
        point.net = point.income - point.expenses;
    }

    let summary = summarize(&points);
    SpendingTrends {
        range,
        granularity,
        points,
        summary,
    }
}

fn buckets(range: DateRange, granularity: Granularity) -> Vec<TrendPoint> {
    let mut points = Vec::new();
    let mut start = range.start;

    loop {
        let natural_end = match granularity {
            Granularity::Daily => start,
            Granularity::Weekly => {
                start + Duration::days(6 - start.weekday().num_days_from_monday() as i64)
            }
            Granularity::Monthly => month_end(start),
        };
        let end = natural_end.min(range.end);

        points.push(TrendPoint {
            start,
            end,
            label: label(start, granularity),
            income: Money::zero(),
            expenses: Money::zero(),
            net: Money::zero(),
            transaction_count: 0,
        });

        match end.succ_opt() {
            Some(next) if next <= range.end => start = next,
            _ => break,
        }
    }

    points
}

fn label(start: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => start.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => format!("Week of {}", start.format("%Y-%m-%d")),
        Granularity::Monthly => start.format("%b %Y").to_string(),
    }
}

fn summarize(points: &[TrendPoint]) -> TrendSummary {
    let total: Money = points.iter().map(|p| p.expenses).sum();

    let peak = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.expenses.is_positive())
        // Earliest bucket wins ties
        .max_by(|(ia, a), (ib, b)| a.expenses.cmp(&b.expenses).then(ib.cmp(ia)))
        .map(|(i, _)| i);

    TrendSummary {
        average_expenses: average(total, points.len()),
        peak,
        direction: direction(points),
    }
}

fn direction(points: &[TrendPoint]) -> TrendDirection {
    if points.len() < 2 {
        return TrendDirection::Stable;
    }

    let half = points.len() / 2;
    let mean = |slice: &[TrendPoint]| {
        slice.iter().map(|p| p.expenses.cents() as f64).sum::<f64>() / slice.len() as f64
    };
    let first = mean(&points[..half]);
    let second = mean(&points[points.len() - half..]);

    if first == 0.0 {
        return if second > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Stable
        };
    }

    let change = (second - first) / first;
    if change > STABLE_TOLERANCE {
        TrendDirection::Increasing
    } else if change < -STABLE_TOLERANCE {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}
