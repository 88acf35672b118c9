mod aging;
mod grouping;
mod summary;

pub use aging::{AgingBreakdown, AgingBucket, AgingLine, AgingSummary};
pub use grouping::{project_spend_summaries, top_vendors_by_outstanding, EntitySummary};
pub use summary::{summarize, BudgetLine, FinancialSummary, StatusCounts};
