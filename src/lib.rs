pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod source;

pub use config::Config;
pub use error::{PofinError, Result};
pub use model::{Currency, Dataset, Invoice, InvoiceStatus, PerCurrency, PurchaseOrder, Vendor};
pub use report::{summarize, FinancialSummary};
