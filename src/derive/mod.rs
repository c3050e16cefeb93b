//! Pure functions that turn a user's stored records into read-only views: budget utilization,
//! monthly rollups, category breakdowns, recurring projections, page summaries and filtered
//! transaction lists.
//!
//! Nothing in this module touches a `Store`. Inputs are assumed to be well-formed; bad values are
//! rejected where they enter the program, not here.

mod breakdown;
mod budget;
mod filter;
mod rollup;
mod schedule;

pub use breakdown::{breakdown_total, category_breakdown, CategorySpend};
pub use budget::{budget_summary, budget_utilization, BudgetSummary, BudgetUtilization};
pub use filter::{expense_categories, filter_transactions, TransactionQuery};
pub use rollup::{monthly_rollup, MonthTotals, MonthlyRollup, ROLLUP_MONTHS};
pub use schedule::{next_occurrence, recurring_summary, RecurringSummary};
