use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hhmm_calc::{OutputFormat, commands, config, logging};

#[derive(Parser)]
#[command(name = "hmc")]
#[command(about = "Add and subtract hour:minute durations")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(long, global = true, help = "Do not record or persist the history tape")]
    no_tape: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Press a sequence of keys and print the display
    Keys {
        #[arg(long, help = "Print the history tape after the display")]
        show_tape: bool,
        #[arg(
            required = true,
            allow_hyphen_values = true,
            help = "Keys: 0-9 + - = < (backspace), bs, ce, ca"
        )]
        keys: Vec<String>,
    },
    /// Interactive calculator reading key sequences from stdin
    Repl,
    /// Show or clear the history tape
    Tape(TapeArgs),
    /// Inspect configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct TapeArgs {
    #[command(subcommand)]
    action: TapeAction,
}

#[derive(Subcommand)]
enum TapeAction {
    /// Print the recorded history
    Show {
        #[arg(long, help = "Only the most recent N entries")]
        last: Option<usize>,
    },
    /// Erase the recorded history
    Clear,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get { key: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            logging::init("warn");
            tracing::warn!("{:#}. Using default configuration.", e);
            config::Config::default()
        }
    };
    logging::init(&config.logging.filter);

    match &cli.command {
        Commands::Keys { show_tape, keys } => {
            commands::calc::keys(&config, keys, cli.no_tape, *show_tape, cli.format)?;
        }
        Commands::Repl => {
            commands::calc::repl(&config, cli.no_tape, cli.format)?;
        }
        Commands::Tape(args) => match &args.action {
            TapeAction::Show { last } => commands::tape::show(&config, *last, cli.format)?,
            TapeAction::Clear => commands::tape::clear(&config)?,
        },
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Get { key } => commands::config::get(key, &config)?,
        },
    }

    Ok(())
}
