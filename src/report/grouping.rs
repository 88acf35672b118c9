use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{Dataset, PerCurrency, PurchaseOrder};

use super::summary::{summarize, FinancialSummary};

/// One grouped entity (vendor or project) with its own financial summary.
#[derive(Debug, Clone, Serialize)]
pub struct EntitySummary {
    pub id: String,
    pub name: String,
    pub summary: FinancialSummary,
}

/// PHP leg first, USD as tiebreak. Cross-currency sums are forbidden, so
/// ranking compares the two legs lexicographically instead of merging them.
fn compare_desc(a: PerCurrency, b: PerCurrency) -> Ordering {
    b.php
        .total_cmp(&a.php)
        .then_with(|| b.usd.total_cmp(&a.usd))
}

fn group_orders<'a, F>(orders: &'a [PurchaseOrder], key: F) -> BTreeMap<&'a str, Vec<&'a PurchaseOrder>>
where
    F: Fn(&'a PurchaseOrder) -> &'a str,
{
    let mut groups: BTreeMap<&str, Vec<&PurchaseOrder>> = BTreeMap::new();
    for po in orders {
        let id = key(po);
        if id.is_empty() {
            continue;
        }
        groups.entry(id).or_default().push(po);
    }
    groups
}

/// Vendors ranked by outstanding amount, truncated to the top `n`.
pub fn top_vendors_by_outstanding(data: &Dataset, as_of: NaiveDate, n: usize) -> Vec<EntitySummary> {
    let mut rows: Vec<EntitySummary> = group_orders(&data.purchase_orders, |po| po.vendor_id.as_str())
        .into_iter()
        .map(|(vendor_id, orders)| EntitySummary {
            id: vendor_id.to_string(),
            name: data
                .vendor(vendor_id)
                .map(|v| v.name.clone())
                .unwrap_or_else(|| vendor_id.to_string()),
            summary: summarize(orders, None, as_of),
        })
        .collect();

    rows.sort_by(|a, b| compare_desc(a.summary.total_outstanding, b.summary.total_outstanding));
    rows.truncate(n);
    rows
}

/// Projects ranked by committed PO amount, truncated to the top `n`. Each
/// project's summary carries its PHP budget line.
pub fn project_spend_summaries(data: &Dataset, as_of: NaiveDate, n: usize) -> Vec<EntitySummary> {
    let mut rows: Vec<EntitySummary> = group_orders(&data.purchase_orders, |po| po.project_id.as_str())
        .into_iter()
        .map(|(project_id, orders)| {
            let project = data.project(project_id);
            EntitySummary {
                id: project_id.to_string(),
                name: project
                    .map(|p| p.title.clone())
                    .unwrap_or_else(|| project_id.to_string()),
                summary: summarize(orders, project.map(|p| p.budget), as_of),
            }
        })
        .collect();

    rows.sort_by(|a, b| compare_desc(a.summary.total_po_amount, b.summary.total_po_amount));
    rows.truncate(n);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn dataset() -> Dataset {
        serde_json::from_str(
            r#"{
                "projects": [
                    {"id": "prj-1", "title": "Plant Upgrade", "budget": 500000},
                    {"id": "prj-2", "title": "Office Fitout", "budget": 100000}
                ],
                "vendors": [
                    {"id": "ven-1", "name": "Acme Builders"},
                    {"id": "ven-2", "name": "Bolt Supply"}
                ],
                "purchase_orders": [
                    {"id": "po-1", "project_id": "prj-1", "vendor_id": "ven-1",
                     "amount": 300000, "currency": "PHP",
                     "invoices": [{"id": "a", "net_amount": 200000, "status": "pending"}]},
                    {"id": "po-2", "project_id": "prj-2", "vendor_id": "ven-2",
                     "amount": 80000, "currency": "PHP",
                     "invoices": [{"id": "b", "net_amount": 50000, "status": "paid"},
                                  {"id": "c", "net_amount": 10000, "status": "approved"}]},
                    {"id": "po-3", "project_id": "prj-1", "vendor_id": "ven-1",
                     "amount": 2000, "currency": "USD"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn vendors_ranked_by_outstanding() {
        let rows = top_vendors_by_outstanding(&dataset(), as_of(), 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Acme Builders");
        assert_eq!(rows[0].summary.total_outstanding.php, 200_000.0);
        assert_eq!(rows[1].summary.total_outstanding.php, 10_000.0);
    }

    #[test]
    fn top_n_truncates() {
        let rows = top_vendors_by_outstanding(&dataset(), as_of(), 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "ven-1");
    }

    #[test]
    fn projects_ranked_by_committed_amount_with_budget_line() {
        let rows = project_spend_summaries(&dataset(), as_of(), 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Plant Upgrade");
        assert_eq!(rows[0].summary.total_po_amount.php, 300_000.0);
        assert_eq!(rows[0].summary.total_po_amount.usd, 2_000.0);

        let budget = rows[0].summary.budget.unwrap();
        assert_eq!(budget.remaining, 200_000.0);
        assert_eq!(budget.utilization, 60.0);
    }

    #[test]
    fn unknown_vendor_id_falls_back_to_the_raw_id() {
        let data: Dataset = serde_json::from_str(
            r#"{"purchase_orders": [
                {"id": "po-1", "vendor_id": "ghost", "amount": 10}
            ]}"#,
        )
        .unwrap();
        let rows = top_vendors_by_outstanding(&data, as_of(), 5);
        assert_eq!(rows[0].name, "ghost");
    }

    #[test]
    fn orders_without_a_group_key_are_skipped() {
        let data: Dataset = serde_json::from_str(
            r#"{"purchase_orders": [{"id": "po-1", "amount": 10}]}"#,
        )
        .unwrap();
        assert!(top_vendors_by_outstanding(&data, as_of(), 5).is_empty());
        assert!(project_spend_summaries(&data, as_of(), 5).is_empty());
    }
}
