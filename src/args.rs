//! These structs provide the CLI interface for the fintrack CLI.

use crate::model::{
    Amount, BudgetUpdates, Frequency, TransactionType, TransactionUpdates, YearMonth,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fintrack: A command-line tool for tracking income, expenses and monthly budgets.
///
/// Record transactions against categories, set a spending ceiling per category and month, keep
/// templates for recurring income and bills, and see how the month is going with `report`.
/// Everything is stored in a single JSON file in the fintrack home directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and configuration for a new user.
    ///
    /// This is the first command you should run. It writes `config.json` with a fresh user ID
    /// and creates the data file with the default categories. By default the directory is
    /// $HOME/fintrack; pass --fintrack-home to put it somewhere else.
    Init(InitArgs),
    /// Add a transaction, category, budget or recurring transaction.
    Insert(InsertArgs),
    /// Change some fields of a transaction or budget.
    Update(UpdateArgs),
    /// Delete a transaction.
    Delete(DeleteArgs),
    /// List stored records.
    List(ListArgs),
    /// Show derived summaries: the dashboard or budget utilization.
    Report(ReportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fintrack data and configuration is held. Defaults to ~/fintrack
    #[arg(long, env = "FINTRACK_HOME", default_value_t = default_fintrack_home())]
    fintrack_home: DisplayPath,

    /// The date that reports and new records are relative to, as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl Common {
    pub fn new(log_level: LevelFilter, fintrack_home: PathBuf, today: Option<NaiveDate>) -> Self {
        Self {
            log_level,
            fintrack_home: fintrack_home.into(),
            today,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fintrack_home(&self) -> &DisplayPath {
        &self.fintrack_home
    }

    /// The `--today` date, or the local date when it was not given.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Args for the `fintrack init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Your name, shown in command output.
    #[arg(long)]
    user_name: String,
}

impl InitArgs {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }
}

/// Income, expense or both.
#[derive(
    Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TypeFilter);
serde_plain::derive_fromstr_from_deserialize!(TypeFilter);

impl TypeFilter {
    pub fn kind(self) -> Option<TransactionType> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Income => Some(TransactionType::Income),
            TypeFilter::Expense => Some(TransactionType::Expense),
        }
    }
}

#[derive(Debug, Parser, Clone)]
pub struct InsertArgs {
    #[command(subcommand)]
    entity: InsertSubcommand,
}

impl InsertArgs {
    pub fn entity(&self) -> &InsertSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum InsertSubcommand {
    /// Record an income or expense.
    Transaction(InsertTransactionArgs),
    /// Add a category.
    Category(InsertCategoryArgs),
    /// Set a spending ceiling for a category in one month.
    Budget(InsertBudgetArgs),
    /// Add a template for a transaction that repeats.
    Recurring(InsertRecurringArgs),
}

/// Args for the `fintrack insert transaction` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertTransactionArgs {
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    kind: TransactionType,

    /// The amount, without a sign, e.g. 12.50
    #[arg(long, value_parser = parse_non_negative)]
    amount: Amount,

    /// The category name. It does not have to match an existing category.
    #[arg(long)]
    category: String,

    #[arg(long, default_value = "")]
    description: String,

    /// YYYY-MM-DD. Defaults to --today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl InsertTransactionArgs {
    pub fn new(
        kind: TransactionType,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Args for the `fintrack insert category` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertCategoryArgs {
    #[arg(long)]
    name: String,

    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    kind: TransactionType,

    /// A display color such as #ef4444. Defaults to the fallback color.
    #[arg(long)]
    color: Option<String>,
}

impl InsertCategoryArgs {
    pub fn new(name: impl Into<String>, kind: TransactionType, color: Option<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// Args for the `fintrack insert budget` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertBudgetArgs {
    /// The expense category the ceiling applies to.
    #[arg(long)]
    category: String,

    /// The spending ceiling. Must be greater than zero.
    #[arg(long, value_parser = parse_positive)]
    amount: Amount,

    /// YYYY-MM. Defaults to the month of --today.
    #[arg(long)]
    month: Option<YearMonth>,
}

impl InsertBudgetArgs {
    pub fn new(category: impl Into<String>, amount: Amount, month: Option<YearMonth>) -> Self {
        Self {
            category: category.into(),
            amount,
            month,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }
}

/// Args for the `fintrack insert recurring` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertRecurringArgs {
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    kind: TransactionType,

    #[arg(long, value_parser = parse_non_negative)]
    amount: Amount,

    #[arg(long)]
    category: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, value_enum, default_value_t = Frequency::Monthly)]
    frequency: Frequency,

    /// The next occurrence is one period after this date. Defaults to --today.
    #[arg(long)]
    from: Option<NaiveDate>,
}

impl InsertRecurringArgs {
    pub fn new(
        kind: TransactionType,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        frequency: Frequency,
        from: Option<NaiveDate>,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            frequency,
            from,
        }
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    #[command(subcommand)]
    entity: UpdateSubcommand,
}

impl UpdateArgs {
    pub fn entity(&self) -> &UpdateSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum UpdateSubcommand {
    Transaction(UpdateTransactionArgs),
    Budget(UpdateBudgetArgs),
}

/// Args for the `fintrack update transaction` command. Only the fields given are changed.
#[derive(Debug, Parser, Clone)]
pub struct UpdateTransactionArgs {
    /// The ID of the transaction to change.
    id: String,

    #[arg(long = "type", value_enum)]
    kind: Option<TransactionType>,

    #[arg(long, value_parser = parse_non_negative)]
    amount: Option<Amount>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    date: Option<NaiveDate>,
}

impl UpdateTransactionArgs {
    pub fn new(id: impl Into<String>, updates: TransactionUpdates) -> Self {
        Self {
            id: id.into(),
            kind: updates.kind,
            amount: updates.amount,
            category: updates.category,
            description: updates.description,
            date: updates.date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn updates(&self) -> TransactionUpdates {
        TransactionUpdates {
            kind: self.kind,
            amount: self.amount,
            category: self.category.clone(),
            description: self.description.clone(),
            date: self.date,
        }
    }
}

/// Args for the `fintrack update budget` command. Only the fields given are changed.
#[derive(Debug, Parser, Clone)]
pub struct UpdateBudgetArgs {
    /// The ID of the budget to change.
    id: String,

    #[arg(long)]
    category: Option<String>,

    #[arg(long, value_parser = parse_positive)]
    amount: Option<Amount>,

    #[arg(long)]
    month: Option<YearMonth>,
}

impl UpdateBudgetArgs {
    pub fn new(id: impl Into<String>, updates: BudgetUpdates) -> Self {
        Self {
            id: id.into(),
            category: updates.category,
            amount: updates.amount,
            month: updates.month,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn updates(&self) -> BudgetUpdates {
        BudgetUpdates {
            category: self.category.clone(),
            amount: self.amount,
            month: self.month,
        }
    }
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    #[command(subcommand)]
    entity: DeleteSubcommand,
}

impl DeleteArgs {
    pub fn entity(&self) -> &DeleteSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeleteSubcommand {
    Transaction(DeleteTransactionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteTransactionArgs {
    /// The ID of the transaction to delete.
    id: String,
}

impl DeleteTransactionArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    #[command(subcommand)]
    entity: ListSubcommand,
}

impl ListArgs {
    pub fn entity(&self) -> &ListSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ListSubcommand {
    /// Transactions, newest first.
    Transactions(ListTransactionsArgs),
    Categories(ListCategoriesArgs),
    Budgets,
    Recurring,
}

#[derive(Debug, Default, Parser, Clone)]
pub struct ListTransactionsArgs {
    #[arg(long = "type", value_enum, default_value_t = TypeFilter::All)]
    kind: TypeFilter,

    /// Only transactions whose description or category contains this text, ignoring case.
    #[arg(long, default_value = "")]
    search: String,
}

impl ListTransactionsArgs {
    pub fn new(kind: TypeFilter, search: impl Into<String>) -> Self {
        Self {
            kind,
            search: search.into(),
        }
    }

    pub fn kind(&self) -> TypeFilter {
        self.kind
    }

    pub fn search(&self) -> &str {
        &self.search
    }
}

#[derive(Debug, Default, Parser, Clone)]
pub struct ListCategoriesArgs {
    #[arg(long = "type", value_enum, default_value_t = TypeFilter::All)]
    kind: TypeFilter,
}

impl ListCategoriesArgs {
    pub fn new(kind: TypeFilter) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> TypeFilter {
        self.kind
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    #[command(subcommand)]
    report: ReportSubcommand,
}

impl ReportArgs {
    pub fn report(&self) -> &ReportSubcommand {
        &self.report
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReportSubcommand {
    /// This month's income, expenses and spending by category, plus the last six months.
    Dashboard,
    /// Spending against each budget.
    Budgets,
}

fn parse_non_negative(s: &str) -> Result<Amount, String> {
    let amount = Amount::from_str(s).map_err(|e| e.to_string())?;
    if amount.is_negative() {
        return Err(format!("amount must not be negative, got {s}"));
    }
    Ok(amount)
}

fn parse_positive(s: &str) -> Result<Amount, String> {
    let amount = parse_non_negative(s)?;
    if amount.is_zero() {
        return Err("amount must be greater than zero".to_string());
    }
    Ok(amount)
}

fn default_fintrack_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fintrack"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fintrack-home or FINTRACK_HOME instead of relying on the \
                default fintrack home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("fintrack")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
