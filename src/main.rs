use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use temperforge::config::Config;
use temperforge::error::TfResult;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; values typed on the command line still win.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(cmd::search::SearchArgs),
    Validate(cmd::validate::ValidateArgs),
    Export(cmd::export::ExportArgs),
    Dissonance(cmd::dissonance::DissonanceArgs),
}

fn resolve_config(
    cli_config: &Config,
    path: Option<&str>,
    sub_matches: Option<&ArgMatches>,
) -> TfResult<Config> {
    let Some(path) = path else {
        return Ok(cli_config.clone());
    };
    info!("Loading config from: {}", path);
    let mut config = Config::load_from_file(path)?;
    if let Some(m) = sub_matches {
        config.merge_from_cli(cli_config, m);
    }
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Logs go to stderr so --json output stays clean.
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let sub_matches = matches.subcommand().map(|(_, m)| m);
    let path = cli.config_file.as_deref();

    let result = match &cli.command {
        Commands::Search(args) => resolve_config(&args.config, path, sub_matches)
            .and_then(|config| cmd::search::run(args, &config)),
        Commands::Validate(args) => resolve_config(&args.config, path, sub_matches)
            .and_then(|config| cmd::validate::run(args, &config)),
        Commands::Export(args) => cmd::export::run(args),
        Commands::Dissonance(args) => resolve_config(&args.config, path, sub_matches)
            .and_then(|config| cmd::dissonance::run(args, &config)),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
