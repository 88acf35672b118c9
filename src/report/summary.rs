use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Currency, InvoiceStatus, PerCurrency, PurchaseOrder};

use super::aging::{AgingBucket, AgingSummary};

/// Per-status invoice tally. Statuses partition the invoice set, so the field
/// sums always equal the total invoice count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub draft: usize,
    pub pending: usize,
    pub submitted: usize,
    pub approved: usize,
    pub pending_disbursement: usize,
    pub paid: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn get(&self, status: InvoiceStatus) -> usize {
        match status {
            InvoiceStatus::Draft => self.draft,
            InvoiceStatus::Pending => self.pending,
            InvoiceStatus::Submitted => self.submitted,
            InvoiceStatus::Approved => self.approved,
            InvoiceStatus::PendingDisbursement => self.pending_disbursement,
            InvoiceStatus::Paid => self.paid,
            InvoiceStatus::Rejected => self.rejected,
        }
    }

    fn bump(&mut self, status: InvoiceStatus) {
        match status {
            InvoiceStatus::Draft => self.draft += 1,
            InvoiceStatus::Pending => self.pending += 1,
            InvoiceStatus::Submitted => self.submitted += 1,
            InvoiceStatus::Approved => self.approved += 1,
            InvoiceStatus::PendingDisbursement => self.pending_disbursement += 1,
            InvoiceStatus::Paid => self.paid += 1,
            InvoiceStatus::Rejected => self.rejected += 1,
        }
    }

    pub fn total(&self) -> usize {
        InvoiceStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Budget figures derived for a PHP project budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetLine {
    pub budget: f64,
    pub remaining: f64,
    /// Committed PO amount as a percentage of budget, 0 when the budget is 0.
    pub utilization: f64,
}

/// Everything a dashboard widget or detail view needs, derived in one pass
/// over a slice of purchase orders. Plain data, no rendering concerns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_po_amount: PerCurrency,
    pub total_invoiced: PerCurrency,
    pub total_paid: PerCurrency,
    pub total_outstanding: PerCurrency,
    /// Invoiced amount as a percentage of committed PO amount. Raw ratio,
    /// deliberately not clamped to 100; display layers clamp for progress
    /// bars.
    pub invoiced_percentage: PerCurrency,
    /// Paid amount as a percentage of invoiced amount.
    pub paid_percentage: PerCurrency,
    pub budget: Option<BudgetLine>,
    pub status_counts: StatusCounts,
    pub aging: AgingSummary,
    pub po_count: usize,
    pub invoice_count: usize,
    /// Unpaid invoices strictly past their due date as of the reference date.
    pub overdue_count: usize,
}

/// Percentage with a zero denominator collapsing to 0 instead of NaN.
pub(crate) fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

/// Aggregate a slice of purchase orders (with their nested invoices) into a
/// [`FinancialSummary`]. Pure: same inputs, same output. The reference date
/// is explicit so overdue and aging figures are deterministic under test.
///
/// Totals are currency-partitioned throughout; a PHP and a USD amount never
/// meet in the same sum. `budget` is the optional PHP project budget.
pub fn summarize<'a, I>(orders: I, budget: Option<f64>, as_of: NaiveDate) -> FinancialSummary
where
    I: IntoIterator<Item = &'a PurchaseOrder>,
{
    let mut summary = FinancialSummary::default();

    for po in orders {
        summary.po_count += 1;
        summary.total_po_amount.add(po.currency, po.amount);

        for inv in &po.invoices {
            summary.invoice_count += 1;
            summary.status_counts.bump(inv.status);
            summary.total_invoiced.add(inv.currency, inv.net_amount);

            if inv.is_paid() {
                summary.total_paid.add(inv.currency, inv.net_amount);
            } else {
                summary.total_outstanding.add(inv.currency, inv.net_amount);
                let bucket = AgingBucket::classify(inv.days_overdue(as_of));
                summary.aging.record(inv.currency, bucket, inv.net_amount);
                if inv.is_overdue(as_of) {
                    summary.overdue_count += 1;
                }
            }
        }
    }

    for currency in Currency::ALL {
        summary.invoiced_percentage.set(
            currency,
            percentage(
                summary.total_invoiced.get(currency),
                summary.total_po_amount.get(currency),
            ),
        );
        summary.paid_percentage.set(
            currency,
            percentage(
                summary.total_paid.get(currency),
                summary.total_invoiced.get(currency),
            ),
        );
    }

    if let Some(budget) = budget {
        summary.budget = Some(BudgetLine {
            budget,
            remaining: budget - summary.total_po_amount.php,
            utilization: percentage(summary.total_po_amount.php, budget),
        });
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PurchaseOrder;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn po(json: &str) -> PurchaseOrder {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn worked_scenario_paid_and_pending() {
        // PO 100k PHP; 40k paid, 30k pending due yesterday.
        let order = po(r#"{
            "id": "po-1", "amount": 100000, "currency": "PHP", "status": "open",
            "invoices": [
                {"id": "si-1", "net_amount": 40000, "currency": "PHP", "status": "paid"},
                {"id": "si-2", "net_amount": 30000, "currency": "PHP",
                 "status": "pending", "due_date": "2026-03-14"}
            ]
        }"#);

        let s = summarize([&order], None, as_of());
        assert_eq!(s.total_invoiced.php, 70_000.0);
        assert_eq!(s.total_paid.php, 40_000.0);
        assert_eq!(s.total_outstanding.php, 30_000.0);
        assert_eq!(s.overdue_count, 1);
        assert!((s.paid_percentage.php - 57.142857).abs() < 0.001);
        assert_eq!(s.invoiced_percentage.php, 70.0);
        assert_eq!(s.aging.php.days_0_30.count, 1);
        assert_eq!(s.aging.php.days_0_30.amount, 30_000.0);
    }

    #[test]
    fn zero_po_amount_yields_zero_percentages() {
        let order = po(r#"{
            "id": "po-1", "amount": 0,
            "invoices": [{"id": "si-1", "net_amount": 5000, "status": "submitted"}]
        }"#);

        let s = summarize([&order], None, as_of());
        assert_eq!(s.invoiced_percentage.php, 0.0);
        assert!(s.invoiced_percentage.php.is_finite());
        assert_eq!(s.total_invoiced.php, 5_000.0);
    }

    #[test]
    fn currencies_are_never_summed_together() {
        let a = po(r#"{"id": "po-1", "amount": 50000, "currency": "PHP"}"#);
        let b = po(r#"{"id": "po-2", "amount": 1000, "currency": "USD"}"#);

        let s = summarize([&a, &b], None, as_of());
        assert_eq!(s.total_po_amount.php, 50_000.0);
        assert_eq!(s.total_po_amount.usd, 1_000.0);
    }

    #[test]
    fn status_counts_partition_the_invoice_set() {
        let order = po(r#"{
            "id": "po-1", "amount": 100000,
            "invoices": [
                {"id": "a", "net_amount": 1, "status": "paid"},
                {"id": "b", "net_amount": 1, "status": "pending"},
                {"id": "c", "net_amount": 1, "status": "approved"},
                {"id": "d", "net_amount": 1, "status": "rejected"},
                {"id": "e", "net_amount": 1, "status": "pending_disbursement"},
                {"id": "f", "net_amount": 1, "status": "nonsense"}
            ]
        }"#);

        let s = summarize([&order], None, as_of());
        assert_eq!(s.invoice_count, 6);
        assert_eq!(s.status_counts.total(), 6);
        assert_eq!(s.status_counts.paid, 1);
        // Unknown status degrades to draft
        assert_eq!(s.status_counts.draft, 1);
    }

    #[test]
    fn unpaid_invoices_land_in_exactly_one_aging_bucket() {
        let order = po(r#"{
            "id": "po-1", "amount": 100000,
            "invoices": [
                {"id": "a", "net_amount": 10, "status": "pending", "due_date": "2026-04-01"},
                {"id": "b", "net_amount": 20, "status": "pending", "due_date": "2026-03-01"},
                {"id": "c", "net_amount": 30, "status": "pending", "due_date": "2026-01-30"},
                {"id": "d", "net_amount": 40, "status": "pending", "due_date": "2026-01-01"},
                {"id": "e", "net_amount": 50, "status": "pending", "due_date": "2025-10-01"},
                {"id": "f", "net_amount": 60, "status": "pending"},
                {"id": "g", "net_amount": 70, "status": "paid", "due_date": "2025-10-01"}
            ]
        }"#);

        let s = summarize([&order], None, as_of());
        let unpaid = s.invoice_count - s.status_counts.paid;
        assert_eq!(s.aging.php.total_count(), unpaid);
        assert_eq!(s.aging.php.not_due.count, 2); // future due date + no due date
        assert_eq!(s.aging.php.days_0_30.count, 1);
        assert_eq!(s.aging.php.days_31_60.count, 1);
        assert_eq!(s.aging.php.days_61_90.count, 1);
        assert_eq!(s.aging.php.over_90.count, 1);
        // Paid invoices never age
        assert_eq!(s.aging.php.over_90.amount, 50.0);
    }

    #[test]
    fn paid_never_exceeds_invoiced_per_currency() {
        let order = po(r#"{
            "id": "po-1", "amount": 100000,
            "invoices": [
                {"id": "a", "net_amount": 500, "currency": "USD", "status": "paid"},
                {"id": "b", "net_amount": 300, "currency": "USD", "status": "pending"},
                {"id": "c", "net_amount": 20000, "status": "paid"}
            ]
        }"#);

        let s = summarize([&order], None, as_of());
        for c in Currency::ALL {
            assert!(s.total_invoiced.get(c) >= s.total_paid.get(c));
        }
    }

    #[test]
    fn budget_line_derivations() {
        let order = po(r#"{"id": "po-1", "amount": 150000, "currency": "PHP"}"#);

        let s = summarize([&order], Some(200_000.0), as_of());
        let b = s.budget.unwrap();
        assert_eq!(b.remaining, 50_000.0);
        assert_eq!(b.utilization, 75.0);

        let s = summarize([&order], Some(0.0), as_of());
        let b = s.budget.unwrap();
        assert_eq!(b.utilization, 0.0);
        assert_eq!(b.remaining, -150_000.0);

        let s = summarize([&order], None, as_of());
        assert!(s.budget.is_none());
    }

    #[test]
    fn summarize_is_idempotent() {
        let order = po(r#"{
            "id": "po-1", "amount": 100000,
            "invoices": [
                {"id": "a", "net_amount": 40000, "status": "paid"},
                {"id": "b", "net_amount": 30000, "status": "pending", "due_date": "2026-03-14"}
            ]
        }"#);

        let first = summarize([&order], Some(120_000.0), as_of());
        let second = summarize([&order], Some(120_000.0), as_of());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_produces_all_zero_summary() {
        let orders: [&PurchaseOrder; 0] = [];
        let s = summarize(orders, None, as_of());
        assert_eq!(s.po_count, 0);
        assert_eq!(s.invoice_count, 0);
        assert!(s.total_po_amount.is_zero());
        assert_eq!(s.invoiced_percentage.php, 0.0);
        assert_eq!(s.paid_percentage.usd, 0.0);
    }

    #[test]
    fn uncapped_percentage_when_invoiced_exceeds_po() {
        let order = po(r#"{
            "id": "po-1", "amount": 10000, "currency": "PHP",
            "invoices": [{"id": "a", "net_amount": 15000, "status": "approved"}]
        }"#);

        let s = summarize([&order], None, as_of());
        assert_eq!(s.invoiced_percentage.php, 150.0);
    }
}
