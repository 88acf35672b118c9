use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::currency::Currency;
use super::invoice::Invoice;
use super::{lenient_amount, lenient_date};

/// Commitment to a vendor for goods or services under a project.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseOrder {
    pub id: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub status: PoStatus,
    #[serde(default, deserialize_with = "lenient_date")]
    pub order_date: Option<NaiveDate>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoStatus {
    #[default]
    Draft,
    Open,
    Closed,
    Cancelled,
}

impl PoStatus {
    fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "open" => PoStatus::Open,
            "closed" => PoStatus::Closed,
            "cancelled" => PoStatus::Cancelled,
            _ => PoStatus::Draft,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PoStatus::Draft => "DRAFT",
            PoStatus::Open => "OPEN",
            PoStatus::Closed => "CLOSED",
            PoStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for PoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PoStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(PoStatus::Draft, PoStatus::from_tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_with_nested_invoices() {
        let po: PurchaseOrder = serde_json::from_str(
            r#"{
                "id": "po-1",
                "number": "PO-2026-0001",
                "project_id": "prj-1",
                "vendor_id": "ven-1",
                "amount": 100000,
                "currency": "PHP",
                "status": "open",
                "order_date": "2026-01-05",
                "invoices": [
                    {"id": "si-1", "net_amount": 40000, "status": "paid"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(po.status, PoStatus::Open);
        assert_eq!(po.invoices.len(), 1);
        assert!(po.invoices[0].is_paid());
    }

    #[test]
    fn bare_po_decodes_with_defaults() {
        let po: PurchaseOrder = serde_json::from_str(r#"{"id": "po-2"}"#).unwrap();
        assert_eq!(po.amount, 0.0);
        assert_eq!(po.currency, Currency::Php);
        assert_eq!(po.status, PoStatus::Draft);
        assert!(po.invoices.is_empty());
    }
}
