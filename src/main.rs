use anyhow::Result;
use clap::Parser;
use gradebook::cli::{Cli, Commands};
use gradebook::commands::{self, Session};
use gradebook::config::load_config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    if let Commands::Init { force } = cli.command {
        return commands::init_config(force);
    }

    let config = load_config(cli.config.as_deref()).map_err(anyhow::Error::msg)?;
    let mut session = Session::open(&config, cli.data_file, cli.plain)?
        .allow_lossy_save(cli.allow_lossy_save);

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Student { command } => commands::handle_student(&mut session, command),
        Commands::Grade { command } => commands::handle_grade(&mut session, command),
        Commands::Report { format, command } => {
            commands::handle_report(&session, format, command)
        }
        Commands::File { command } => commands::handle_file(&mut session, command),
    }
}

// RUST_LOG wins; otherwise -v maps to info and -vv to debug
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
