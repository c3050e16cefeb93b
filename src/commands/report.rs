//! Report command handlers. These print what the derivation functions compute.

use crate::commands::Out;
use crate::derive::{breakdown_total, budget_summary, BudgetSummary, BudgetUtilization};
use crate::error::{ErrorType, IntoResult};
use crate::session::Dashboard;
use crate::{Config, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// The dashboard for the month containing `today`: income, expenses, net, spending by category,
/// the six-month series and the month's first few transactions.
pub async fn report_dashboard(config: Config, today: NaiveDate) -> Result<Out<Dashboard>> {
    let session = config.session().await.pub_result(ErrorType::Store)?;
    let dashboard = session
        .dashboard(today)
        .await
        .pub_result(ErrorType::Store)?;
    let rollup = &dashboard.rollup;

    let mut message = format!("Dashboard for {} ({})", session.user().name(), rollup.month);
    let _ = write!(
        message,
        "\n  Income {}  Expenses {}  Net {}",
        rollup.total_income, rollup.total_expenses, rollup.net_income
    );

    let total = breakdown_total(&dashboard.breakdown);
    if !dashboard.breakdown.is_empty() {
        message.push_str("\n  Spending by category:");
    }
    for row in &dashboard.breakdown {
        let _ = write!(
            message,
            "\n    {:<20} {:>12} {:>5}%  {}",
            row.category,
            row.amount.to_string(),
            row.share_of(total).round_dp(1),
            row.color
        );
    }

    message.push_str("\n  Last six months:");
    for month in &rollup.series {
        let _ = write!(
            message,
            "\n    {} {}  income {:>12}  expenses {:>12}",
            month.label,
            month.month.year(),
            month.income.to_string(),
            month.expenses.to_string()
        );
    }

    if !dashboard.recent.is_empty() {
        message.push_str("\n  Recent transactions:");
    }
    for t in &dashboard.recent {
        let _ = write!(
            message,
            "\n    {}  {:<8} {:>12}  {}",
            t.date(),
            t.kind(),
            t.amount().to_string(),
            t.category()
        );
    }
    Ok(Out::new(message, dashboard))
}

/// The budgets overview and one utilization row per budget.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BudgetReport {
    pub summary: BudgetSummary,
    pub budgets: Vec<BudgetUtilization>,
}

/// Spending against every budget of the configured user, in stored order.
pub async fn report_budgets(config: Config) -> Result<Out<BudgetReport>> {
    let session = config.session().await.pub_result(ErrorType::Store)?;
    let budgets = session.budget_report().await.pub_result(ErrorType::Store)?;
    let summary = budget_summary(&budgets);

    let mut message = match summary.count {
        0 => "No budgets".to_string(),
        n => format!(
            "Budget utilization for {n} budget{}\n  {} budgeted, {} over budget",
            if n == 1 { "" } else { "s" },
            summary.total_budgeted,
            summary.over_budget
        ),
    };
    for row in &budgets {
        let _ = write!(
            message,
            "\n  {}  {:<20} {} of {} ({}%), {} remaining{}",
            row.budget.month(),
            row.budget.category(),
            row.spent,
            row.budget.amount(),
            row.percentage.round_dp(1),
            row.remaining,
            if row.is_over_budget { ", over budget" } else { "" }
        );
    }
    Ok(Out::new(message, BudgetReport { summary, budgets }))
}
