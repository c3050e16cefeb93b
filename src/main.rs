use clap::Parser;
use fintrack::args::{
    Args, Command, DeleteSubcommand, InsertSubcommand, ListSubcommand, ReportSubcommand,
    UpdateSubcommand,
};
use fintrack::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().fintrack_home().path();
    let today = args.common().today();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.user_name())
            .await?
            .print(),

        Command::Insert(insert_args) => {
            let config = Config::load(home).await?;
            match insert_args.entity() {
                InsertSubcommand::Transaction(args) => {
                    commands::insert_transaction(config, args.clone(), today)
                        .await?
                        .print()
                }
                InsertSubcommand::Category(args) => commands::insert_category(config, args.clone())
                    .await?
                    .print(),
                InsertSubcommand::Budget(args) => {
                    commands::insert_budget(config, args.clone(), today)
                        .await?
                        .print()
                }
                InsertSubcommand::Recurring(args) => {
                    commands::insert_recurring(config, args.clone(), today)
                        .await?
                        .print()
                }
            }
        }

        Command::Update(update_args) => {
            let config = Config::load(home).await?;
            match update_args.entity() {
                UpdateSubcommand::Transaction(args) => {
                    commands::update_transaction(config, args.clone())
                        .await?
                        .print()
                }
                UpdateSubcommand::Budget(args) => commands::update_budget(config, args.clone())
                    .await?
                    .print(),
            }
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home).await?;
            match delete_args.entity() {
                DeleteSubcommand::Transaction(args) => {
                    commands::delete_transaction(config, args.clone())
                        .await?
                        .print()
                }
            }
        }

        Command::List(list_args) => {
            let config = Config::load(home).await?;
            match list_args.entity() {
                ListSubcommand::Transactions(args) => {
                    commands::list_transactions(config, args.clone())
                        .await?
                        .print()
                }
                ListSubcommand::Categories(args) => commands::list_categories(config, args.clone())
                    .await?
                    .print(),
                ListSubcommand::Budgets => commands::list_budgets(config).await?.print(),
                ListSubcommand::Recurring => commands::list_recurring(config).await?.print(),
            }
        }

        Command::Report(report_args) => {
            let config = Config::load(home).await?;
            match report_args.report() {
                ReportSubcommand::Dashboard => commands::report_dashboard(config, today)
                    .await?
                    .print(),
                ReportSubcommand::Budgets => commands::report_budgets(config).await?.print(),
            }
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
