use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use household_budget::api::SnapshotApi;
use household_budget::cli::{
    handle_category_command, handle_config_command, handle_export_command, handle_income_command,
    handle_limits_command, handle_planned_command, handle_report_command, handle_stats_command,
    BudgetSelection, CategoryCommands, ConfigCommands, IncomeCommands, PlannedCommands,
};
use household_budget::config::{paths::BudgetPaths, settings::Settings};
use household_budget::export::ExportFormat;

#[derive(Parser)]
#[command(
    name = "hbudget",
    version,
    about = "Monthly household budget reconciliation",
    long_about = "hbudget reconciles a monthly household budget: how much is still \
                  available for planning, how much is actually available right now, \
                  and how every category is doing against its per-currency limits."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Show the availability figures of a budget
    Stats {
        #[command(flatten)]
        selection: BudgetSelection,
        /// Print the figures as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show category limits with their per-currency breakdown
    Limits {
        #[command(flatten)]
        selection: BudgetSelection,
    },

    /// Show the full budget overview
    Report {
        #[command(flatten)]
        selection: BudgetSelection,
    },

    /// Export the budget overview
    Export {
        #[command(flatten)]
        selection: BudgetSelection,
        /// Output format: json, yaml or csv
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Planned expense commands
    #[command(subcommand)]
    Planned(PlannedCommands),

    /// Planned income commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Category display preferences
    #[command(subcommand)]
    Category(CategoryCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing household-budget at: {}", paths.base_dir().display());
            initialize_data(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Snapshot files live in {}", paths.data_dir().display());
            println!("Run 'hbudget report' to see the current month.");
        }
        Some(Commands::Config { action }) => {
            handle_config_command(&paths, &mut settings, action)?;
        }
        Some(Commands::Stats { selection, json }) => {
            handle_stats_command(&paths, &settings, &selection, json)?;
        }
        Some(Commands::Limits { selection }) => {
            handle_limits_command(&paths, &settings, &selection)?;
        }
        Some(Commands::Report { selection }) => {
            handle_report_command(&paths, &settings, &selection)?;
        }
        Some(Commands::Export {
            selection,
            format,
            output,
        }) => {
            handle_export_command(&paths, &settings, &selection, format, output)?;
        }
        Some(Commands::Planned(cmd)) => {
            handle_planned_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&paths, &settings, cmd)?;
        }
        None => {
            println!("hbudget - monthly household budget reconciliation");
            println!();
            println!("Run 'hbudget --help' for usage information.");
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level; logs go to stderr
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Create the directories and empty snapshot files that don't exist yet
fn initialize_data(paths: &BudgetPaths) -> Result<()> {
    paths.ensure_directories()?;
    let api = SnapshotApi::new(paths.clone());

    if !paths.budgets_file().exists() {
        api.save_budgets(&[])?;
    }
    if !paths.budget_items_file().exists() {
        api.save_budget_items(&[])?;
    }
    if !paths.planned_expenses_file().exists() {
        api.save_planned_expenses(&[])?;
    }
    if !paths.planned_incomes_file().exists() {
        api.save_planned_incomes(&[])?;
    }
    if !paths.expenses_file().exists() {
        api.save_expenses(&[])?;
    }
    Ok(())
}
