use serde::Serialize;
use std::fmt;

use crate::model::Currency;

/// Time-since-due classification for an unpaid invoice. Exactly one bucket
/// applies to every unpaid invoice; anything not yet due (or without a due
/// date) lands in `NotDue` so the partition stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    NotDue,
    Days0To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl AgingBucket {
    pub const ALL: [AgingBucket; 5] = [
        AgingBucket::NotDue,
        AgingBucket::Days0To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    /// Classify by days past due. Zero or negative means the invoice is not
    /// overdue yet.
    pub fn classify(days_overdue: Option<i64>) -> Self {
        match days_overdue {
            None => AgingBucket::NotDue,
            Some(d) if d <= 0 => AgingBucket::NotDue,
            Some(d) if d <= 30 => AgingBucket::Days0To30,
            Some(d) if d <= 60 => AgingBucket::Days31To60,
            Some(d) if d <= 90 => AgingBucket::Days61To90,
            Some(_) => AgingBucket::Over90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::NotDue => "NOT DUE",
            AgingBucket::Days0To30 => "0-30 DAYS",
            AgingBucket::Days31To60 => "31-60 DAYS",
            AgingBucket::Days61To90 => "61-90 DAYS",
            AgingBucket::Over90 => "OVER 90 DAYS",
        }
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Count and amount accumulated in one aging bucket for one currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AgingLine {
    pub count: usize,
    pub amount: f64,
}

/// One currency's unpaid invoices broken down by aging bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AgingBreakdown {
    pub not_due: AgingLine,
    pub days_0_30: AgingLine,
    pub days_31_60: AgingLine,
    pub days_61_90: AgingLine,
    pub over_90: AgingLine,
}

impl AgingBreakdown {
    pub fn line(&self, bucket: AgingBucket) -> &AgingLine {
        match bucket {
            AgingBucket::NotDue => &self.not_due,
            AgingBucket::Days0To30 => &self.days_0_30,
            AgingBucket::Days31To60 => &self.days_31_60,
            AgingBucket::Days61To90 => &self.days_61_90,
            AgingBucket::Over90 => &self.over_90,
        }
    }

    fn line_mut(&mut self, bucket: AgingBucket) -> &mut AgingLine {
        match bucket {
            AgingBucket::NotDue => &mut self.not_due,
            AgingBucket::Days0To30 => &mut self.days_0_30,
            AgingBucket::Days31To60 => &mut self.days_31_60,
            AgingBucket::Days61To90 => &mut self.days_61_90,
            AgingBucket::Over90 => &mut self.over_90,
        }
    }

    pub fn total_count(&self) -> usize {
        AgingBucket::ALL.iter().map(|b| self.line(*b).count).sum()
    }
}

/// Aging breakdown per currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AgingSummary {
    pub php: AgingBreakdown,
    pub usd: AgingBreakdown,
}

impl AgingSummary {
    pub fn for_currency(&self, currency: Currency) -> &AgingBreakdown {
        match currency {
            Currency::Php => &self.php,
            Currency::Usd => &self.usd,
        }
    }

    pub(crate) fn record(&mut self, currency: Currency, bucket: AgingBucket, amount: f64) {
        let breakdown = match currency {
            Currency::Php => &mut self.php,
            Currency::Usd => &mut self.usd,
        };
        let line = breakdown.line_mut(bucket);
        line.count += 1;
        line.amount += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(AgingBucket::classify(None), AgingBucket::NotDue);
        assert_eq!(AgingBucket::classify(Some(-5)), AgingBucket::NotDue);
        assert_eq!(AgingBucket::classify(Some(0)), AgingBucket::NotDue);
        assert_eq!(AgingBucket::classify(Some(1)), AgingBucket::Days0To30);
        assert_eq!(AgingBucket::classify(Some(30)), AgingBucket::Days0To30);
        assert_eq!(AgingBucket::classify(Some(31)), AgingBucket::Days31To60);
        assert_eq!(AgingBucket::classify(Some(60)), AgingBucket::Days31To60);
        assert_eq!(AgingBucket::classify(Some(61)), AgingBucket::Days61To90);
        assert_eq!(AgingBucket::classify(Some(90)), AgingBucket::Days61To90);
        assert_eq!(AgingBucket::classify(Some(91)), AgingBucket::Over90);
        assert_eq!(AgingBucket::classify(Some(400)), AgingBucket::Over90);
    }

    #[test]
    fn every_day_count_maps_to_exactly_one_bucket() {
        for d in -10..200 {
            let bucket = AgingBucket::classify(Some(d));
            let hits = AgingBucket::ALL
                .iter()
                .filter(|b| **b == bucket)
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn record_accumulates_per_currency() {
        let mut aging = AgingSummary::default();
        aging.record(Currency::Php, AgingBucket::Days0To30, 30_000.0);
        aging.record(Currency::Php, AgingBucket::Days0To30, 5_000.0);
        aging.record(Currency::Usd, AgingBucket::Over90, 1_000.0);

        let php = aging.for_currency(Currency::Php);
        assert_eq!(php.days_0_30.count, 2);
        assert_eq!(php.days_0_30.amount, 35_000.0);
        assert_eq!(php.over_90.count, 0);

        let usd = aging.for_currency(Currency::Usd);
        assert_eq!(usd.over_90.count, 1);
        assert_eq!(usd.over_90.amount, 1_000.0);
        assert_eq!(usd.total_count(), 1);
    }
}
