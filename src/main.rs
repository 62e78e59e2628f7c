use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use infl::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct CalculateCommand {
    /// Amount of money in the starting year
    #[arg(short, long)]
    amount: f64,

    /// Year the amount is expressed in
    #[arg(short, long)]
    from: i32,

    /// Year to restate the amount in (defaults to the latest year with data)
    #[arg(short, long)]
    to: Option<i32>,

    /// Country code or name (defaults to the configured country)
    #[arg(long)]
    country: Option<String>,

    /// Also express the result in this currency at the latest exchange rate
    #[arg(long)]
    convert_to: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl From<CalculateCommand> for infl::CalculateArgs {
    fn from(cmd: CalculateCommand) -> infl::CalculateArgs {
        infl::CalculateArgs {
            amount: cmd.amount,
            from: cmd.from,
            to: cmd.to,
            country: cmd.country,
            convert_to: cmd.convert_to,
            json: cmd.json,
        }
    }
}

impl From<Commands> for infl::AppCommand {
    fn from(cmd: Commands) -> infl::AppCommand {
        match cmd {
            Commands::Calculate(args) => infl::AppCommand::Calculate(args.into()),
            Commands::Range { country } => infl::AppCommand::Range { country },
            Commands::Countries => infl::AppCommand::Countries,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Restate an amount of money between two years
    Calculate(CalculateCommand),
    /// Show the years with CPI data for a country, or for all countries
    Range {
        /// Country code or name
        #[arg(long)]
        country: Option<String>,
    },
    /// List supported countries and their currencies
    Countries,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => infl::cli::setup::setup(),
        Some(cmd) => infl::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
