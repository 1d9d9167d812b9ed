use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use evsite::api::SiteEvaluator;
use evsite::config::Config;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with model and forecast parameters. Explicit flags win.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Evaluate(cmd::evaluate::EvaluateArgs),
    Batch(cmd::batch::BatchArgs),
}

fn main() {
    // 1. Raw matches tell typed flags apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🔌 Initializing EV Site Engine...");

    // 2. Flags live in the subcommand's matches, not the root
    let (cli_config, sub_matches) = match &cli.command {
        Commands::Evaluate(args) => (&args.config, matches.subcommand_matches("evaluate")),
        Commands::Batch(args) => (&args.config, matches.subcommand_matches("batch")),
    };

    // 3. Resolve config: file as base, CLI overrides on top
    let config = match &cli.config_file {
        Some(path) => {
            info!("⚖️  Loading model config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ Failed to load config '{}': {}", path, e);
                process::exit(1);
            });
            if let Some(sub) = sub_matches {
                file_config.merge_from_cli(cli_config, sub);
            }
            file_config
        }
        None => {
            warn!("⚠️  No config file given. Using embedded defaults and CLI flags.");
            cli_config.clone()
        }
    };

    // 4. Validate the model once
    let evaluator = SiteEvaluator::new(&config).unwrap_or_else(|e| {
        error!("❌ FATAL ERROR INITIALIZING MODEL: {}", e);
        process::exit(1);
    });

    // 5. Execute
    let outcome = match cli.command {
        Commands::Evaluate(args) => cmd::evaluate::run(args, &evaluator),
        Commands::Batch(args) => cmd::batch::run(args, &evaluator),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
