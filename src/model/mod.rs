mod currency;
mod invoice;
mod project;
mod purchase_order;
mod vendor;

pub use currency::{Currency, PerCurrency};
pub use invoice::{Invoice, InvoiceStatus};
pub use project::{Project, ProjectKind, ProjectStatus};
pub use purchase_order::{PoStatus, PurchaseOrder};
pub use vendor::Vendor;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Everything a reporting command consumes, shaped like the JSON export of
/// the back office (projects, vendors, purchase orders with nested invoices).
#[derive(Debug, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrder>,
}

impl Dataset {
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn vendor(&self, id: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == id)
    }

    pub fn purchase_order(&self, id: &str) -> Option<&PurchaseOrder> {
        self.purchase_orders
            .iter()
            .find(|po| po.id == id || po.number == id)
    }

    pub fn orders_for_project<'a>(&'a self, project_id: &str) -> Vec<&'a PurchaseOrder> {
        self.purchase_orders
            .iter()
            .filter(|po| po.project_id == project_id)
            .collect()
    }

    pub fn orders_for_vendor<'a>(&'a self, vendor_id: &str) -> Vec<&'a PurchaseOrder> {
        self.purchase_orders
            .iter()
            .filter(|po| po.vendor_id == vendor_id)
            .collect()
    }

    pub fn invoice_count(&self) -> usize {
        self.purchase_orders.iter().map(|po| po.invoices.len()).sum()
    }
}

/// Decode a monetary amount from a number, a numeric string (with optional
/// thousands separators), or null. Anything unparseable becomes 0.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) if n.is_finite() => n,
        Some(Raw::Text(s)) => s.trim().replace(',', "").parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Decode a YYYY-MM-DD date, treating null or malformed values as absent.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}
