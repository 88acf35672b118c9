use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::currency::Currency;
use super::{lenient_amount, lenient_date};

/// Billing document submitted by a vendor against a purchase order.
#[derive(Debug, Clone, Deserialize)]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub number: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub invoice_amount: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub net_amount: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Days past due as of the given date. Negative means not yet due;
    /// invoices without a due date never accrue aging.
    pub fn days_overdue(&self, as_of: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (as_of - due).num_days())
    }

    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        !self.is_paid() && self.days_overdue(as_of).is_some_and(|d| d > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Pending,
    Submitted,
    Approved,
    PendingDisbursement,
    Paid,
    Rejected,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 7] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Pending,
        InvoiceStatus::Submitted,
        InvoiceStatus::Approved,
        InvoiceStatus::PendingDisbursement,
        InvoiceStatus::Paid,
        InvoiceStatus::Rejected,
    ];

    fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pending" => InvoiceStatus::Pending,
            "submitted" => InvoiceStatus::Submitted,
            "approved" => InvoiceStatus::Approved,
            "pending_disbursement" => InvoiceStatus::PendingDisbursement,
            "paid" => InvoiceStatus::Paid,
            "rejected" => InvoiceStatus::Rejected,
            _ => InvoiceStatus::Draft,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Pending => "PENDING",
            InvoiceStatus::Submitted => "SUBMITTED",
            InvoiceStatus::Approved => "APPROVED",
            InvoiceStatus::PendingDisbursement => "FOR DISBURSEMENT",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for InvoiceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map_or(InvoiceStatus::Draft, InvoiceStatus::from_tag))
    }
}
